use std::fmt::Display;

use winit::dpi::PhysicalSize;

use crate::error::{RenderError, RenderResult};

/// Picks the surface format: an sRGB one when preferred and offered, otherwise
/// the surface's first format.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        if let Some(f) = preferred.into_iter().find(|f| formats.contains(f)) {
            return Some(f);
        }
    }

    formats.first().copied()
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Maps an adapter/device request outcome onto `DeviceUnavailable`.
pub(crate) fn require_device<T, E: Display>(what: &str, res: Result<T, E>) -> RenderResult<T> {
    res.map_err(|e| RenderError::DeviceUnavailable(format!("{what}: {e}")))
}

/// Frame acquisition failures are fatal; out-of-memory is reported as such.
pub(crate) fn map_surface_error(err: wgpu::SurfaceError) -> RenderError {
    match err {
        wgpu::SurfaceError::OutOfMemory => {
            RenderError::OutOfDeviceMemory("surface texture allocation failed".into())
        }
        other => RenderError::SurfaceAcquisitionError(other.to_string()),
    }
}

/// Reconfigures the surface for `new_size`.
///
/// wgpu rejects 0x0 configurations; in that case only `size` is updated.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;
    if new_size.width == 0 || new_size.height == 0 {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
}
