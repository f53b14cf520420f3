//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single Window, and wires it to the
//! shape renderer.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
