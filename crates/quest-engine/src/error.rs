use std::fmt;

use crate::render::Stage;

/// Failure of the setup-and-draw sequence.
///
/// Every variant is fatal: nothing is retried, and the first failure halts
/// setup at whatever stage it had reached.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// No adapter or logical device could be obtained.
    DeviceUnavailable(String),
    /// WGSL source failed to parse or validate.
    ShaderCompileError(String),
    /// An allocation exceeded what the device can provide.
    OutOfDeviceMemory(String),
    /// The surface did not hand out a frame texture.
    SurfaceAcquisitionError(String),
    /// Geometry rejected at construction.
    InvalidShape(String),
    /// A lifecycle stage was skipped, repeated, or entered after a failure.
    InvalidTransition { from: Stage, to: Stage },
}

pub type RenderResult<T> = Result<T, RenderError>;

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceUnavailable(msg) => write!(f, "GPU device unavailable: {msg}"),
            Self::ShaderCompileError(msg) => write!(f, "shader compilation failed: {msg}"),
            Self::OutOfDeviceMemory(msg) => write!(f, "out of device memory: {msg}"),
            Self::SurfaceAcquisitionError(msg) => {
                write!(f, "failed to acquire surface texture: {msg}")
            }
            Self::InvalidShape(msg) => write!(f, "invalid shape: {msg}"),
            Self::InvalidTransition { from, to } => {
                write!(f, "invalid lifecycle transition {from:?} -> {to:?}")
            }
        }
    }
}

impl std::error::Error for RenderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_message() {
        let err = RenderError::DeviceUnavailable("no adapter".into());
        assert_eq!(err.to_string(), "GPU device unavailable: no adapter");
    }

    #[test]
    fn display_names_both_stages() {
        let err = RenderError::InvalidTransition {
            from: Stage::Uninitialized,
            to: Stage::PipelineReady,
        };
        let text = err.to_string();
        assert!(text.contains("Uninitialized"));
        assert!(text.contains("PipelineReady"));
    }

    #[test]
    fn converts_into_anyhow() {
        let err: anyhow::Error = RenderError::OutOfDeviceMemory("vertex buffer".into()).into();
        assert!(err.downcast_ref::<RenderError>().is_some());
    }
}
