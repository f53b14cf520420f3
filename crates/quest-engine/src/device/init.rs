/// Parameters for acquiring the device and configuring the surface.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends the instance may pick an adapter from.
    pub backends: wgpu::Backends,

    /// Adapter selection hint.
    pub power_preference: wgpu::PowerPreference,

    /// Prefer an sRGB surface format when the surface offers one.
    ///
    /// Off by default: the surface's first (preferred) format is used, so
    /// colors are written unencoded.
    pub prefer_srgb: bool,

    pub present_mode: wgpu::PresentMode,

    /// Requested alpha mode. Falls back to the first supported mode when absent
    /// or unsupported.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Hint only; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
