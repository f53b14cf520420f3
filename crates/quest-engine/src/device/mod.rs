//! GPU device + surface management.
//!
//! This module is responsible for:
//! - acquiring the wgpu Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and submitting encoded commands
//! - collecting errors the device reports out of band

mod context;
mod faults;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use faults::DeviceFaults;
pub use frame::GpuFrame;
pub use init::GpuInit;
