/// Stable index of a registered shape.
///
/// Handles are assigned in registration order and double as the slot of the
/// shape's GPU resources once uploaded.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ShapeHandle(u32);

impl ShapeHandle {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
