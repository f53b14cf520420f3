use bytemuck::{Pod, Zeroable};

/// Straight-alpha RGBA color with every channel in `[0, 1]`.
///
/// Fields are private so the range holds for every value; the layout matches a
/// WGSL `vec4f` and is uploaded as-is into a shape's uniform buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct ColorRgba {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl ColorRgba {
    /// Bytes occupied by one color in a uniform buffer.
    pub const SIZE: u64 = std::mem::size_of::<ColorRgba>() as u64;

    pub const BLACK: Self = Self::opaque(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::opaque(1.0, 1.0, 1.0);
    pub const RED: Self = Self::opaque(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::opaque(0.0, 1.0, 0.0);
    pub const NAVY: Self = Self::opaque(0.0, 0.0, 0.5);

    /// Creates a color, clamping each channel into `[0, 1]`.
    ///
    /// Non-finite channels become `0.0`.
    #[inline]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: unit(r),
            g: unit(g),
            b: unit(b),
            a: unit(a),
        }
    }

    // Only for the in-range constants above.
    const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub fn r(self) -> f32 {
        self.r
    }

    #[inline]
    pub fn g(self) -> f32 {
        self.g
    }

    #[inline]
    pub fn b(self) -> f32 {
        self.b
    }

    #[inline]
    pub fn a(self) -> f32 {
        self.a
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Raw uniform bytes (always `SIZE` long).
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Clear value for a render pass load op.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

impl From<[f32; 4]> for ColorRgba {
    #[inline]
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

fn unit(v: f32) -> f32 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}
