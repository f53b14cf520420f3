use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{RenderError, RenderResult};

/// An error the device raised outside of a returned `Result`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DeviceFault {
    OutOfMemory(String),
    Validation(String),
}

impl DeviceFault {
    fn from_wgpu(err: &wgpu::Error) -> Self {
        match err {
            wgpu::Error::OutOfMemory { .. } => Self::OutOfMemory(err.to_string()),
            other => Self::Validation(other.to_string()),
        }
    }

    /// Out-of-memory maps to `OutOfDeviceMemory`; everything else goes
    /// through `validation`.
    fn into_error(self, validation: fn(String) -> RenderError) -> RenderError {
        match self {
            Self::OutOfMemory(msg) => RenderError::OutOfDeviceMemory(msg),
            Self::Validation(msg) => validation(msg),
        }
    }
}

/// Collects errors wgpu would otherwise hand to its panicking default handler.
///
/// Native backends report creation errors while the call is still running,
/// so checking right after a `create_*` call attributes the fault to it.
#[derive(Debug, Clone, Default)]
pub struct DeviceFaults {
    faults: Arc<Mutex<Vec<DeviceFault>>>,
}

impl DeviceFaults {
    /// Routes `device`'s uncaptured errors into this sink.
    pub(crate) fn install(&self, device: &wgpu::Device) {
        let sink = self.clone();
        device.on_uncaptured_error(Arc::new(move |err: wgpu::Error| {
            log::debug!("device error: {err}");
            sink.push(DeviceFault::from_wgpu(&err));
        }));
    }

    pub(crate) fn push(&self, fault: DeviceFault) {
        self.faults.lock().push(fault);
    }

    /// Drains the sink; the first fault (if any) becomes the error.
    pub(crate) fn check(&self, validation: fn(String) -> RenderError) -> RenderResult<()> {
        let mut faults = self.faults.lock();
        let first = faults.drain(..).next();
        match first {
            Some(fault) => Err(fault.into_error(validation)),
            None => Ok(()),
        }
    }
}
