use crate::coords::ColorRgba;

use super::{Shape, ShapeHandle};

/// One registered shape and its fill color.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeEntry {
    pub handle: ShapeHandle,
    pub shape: Shape,
    pub color: ColorRgba,
}

/// Shapes in registration order.
///
/// Registration order is paint order: later entries are drawn over earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ShapeList {
    entries: Vec<ShapeEntry>,
}

impl ShapeList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a shape and returns its handle.
    pub fn push(&mut self, shape: Shape, color: ColorRgba) -> ShapeHandle {
        let handle = ShapeHandle::new(self.entries.len() as u32);
        self.entries.push(ShapeEntry { handle, shape, color });
        handle
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, shape: Shape, color: ColorRgba) -> Self {
        self.push(shape, color);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, handle: ShapeHandle) -> Option<&ShapeEntry> {
        self.entries.get(handle.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeEntry> {
        self.entries.iter()
    }
}
