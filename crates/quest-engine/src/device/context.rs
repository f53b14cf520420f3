use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::error::{RenderError, RenderResult};

use super::surface;
use super::{DeviceFaults, GpuFrame, GpuInit};

/// The render context: device connection plus the window's surface.
///
/// - creates Instance/Adapter/Device/Queue
/// - creates and configures the Surface (swapchain)
/// - acquires frames and submits recorded commands
pub struct Gpu<'w> {
    /// Kept alive for the surface's sake.
    _instance: wgpu::Instance,

    /// Surface bound to the window; the window must outlive the `Gpu`.
    surface: wgpu::Surface<'w>,

    device: wgpu::Device,
    queue: wgpu::Queue,

    /// Errors the device raised outside a returned `Result`.
    faults: DeviceFaults,

    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,
}

impl<'w> Gpu<'w> {
    /// Acquires an adapter and device for `window` and configures its surface.
    ///
    /// Adapter and device requests are the only suspension points of setup.
    pub async fn new(window: &'w Window, init: GpuInit) -> RenderResult<Self> {
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Err(RenderError::SurfaceAcquisitionError(
                "window has zero size".into(),
            ));
        }

        let GpuInit {
            backends,
            power_preference,
            prefer_srgb,
            present_mode,
            alpha_mode,
            required_features,
            required_limits,
            desired_maximum_frame_latency,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let surface = surface::require_device("surface", instance.create_surface(window))?;

        let adapter = surface::require_device(
            "adapter",
            instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference,
                    compatible_surface: Some(&surface),
                    force_fallback_adapter: false,
                })
                .await,
        )?;

        let info = adapter.get_info();
        log::debug!("adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = surface::require_device(
            "device",
            adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some("quest device"),
                    required_features,
                    required_limits,
                    experimental_features: wgpu::ExperimentalFeatures::disabled(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    trace: wgpu::Trace::Off,
                })
                .await,
        )?;

        let faults = DeviceFaults::default();
        faults.install(&device);

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps.formats, prefer_srgb).ok_or_else(
            || RenderError::DeviceUnavailable("surface reports no supported formats".into()),
        )?;
        let alpha_mode = surface::choose_alpha_mode(&caps.alpha_modes, alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        };
        surface.configure(&device, &config);

        log::debug!("surface configured: {format:?} {}x{}", size.width, size.height);

        Ok(Self {
            _instance: instance,
            surface,
            device,
            queue,
            faults,
            config,
            size,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn faults(&self) -> &DeviceFaults {
        &self.faults
    }

    /// Reconfigures the surface after a resize.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
    }

    /// Acquires the current surface texture and opens a command encoder.
    pub fn begin_frame(&self) -> RenderResult<GpuFrame> {
        let surface_texture = self
            .surface
            .get_current_texture()
            .map_err(surface::map_surface_error)?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("quest frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the frame's commands and presents it. Does not wait for the GPU.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }
}
