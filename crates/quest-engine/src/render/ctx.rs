use crate::device::{DeviceFaults, Gpu};

/// Renderer-facing context (device/queue + surface format).
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub faults: &'a DeviceFaults,
    pub surface_format: wgpu::TextureFormat,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        faults: &'a DeviceFaults,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            device,
            queue,
            faults,
            surface_format,
        }
    }

    #[inline]
    pub fn from_gpu(gpu: &'a Gpu<'_>) -> Self {
        Self::new(gpu.device(), gpu.queue(), gpu.faults(), gpu.surface_format())
    }

    /// Largest buffer the device will allocate.
    #[inline]
    pub fn max_buffer_size(&self) -> u64 {
        self.device.limits().max_buffer_size
    }
}
