//! Quest engine crate.
//!
//! Owns the GPU context, the shared solid-color shape pipeline and the
//! one-shot frame driver, plus the window runtime that hosts them.

pub mod coords;
pub mod device;
pub mod logging;
pub mod render;
pub mod scene;
pub mod window;

mod error;

pub use error::{RenderError, RenderResult};
