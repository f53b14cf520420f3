use crate::error::{RenderError, RenderResult};

/// Setup stage of a [`ShapeRenderer`](super::ShapeRenderer).
///
/// Stages only move forward, one step at a time. `FrameSubmitted` is terminal.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Stage {
    #[default]
    Uninitialized,
    DeviceReady,
    PipelineReady,
    ResourcesUploaded,
    FrameSubmitted,
}

impl Stage {
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Uninitialized => Some(Stage::DeviceReady),
            Stage::DeviceReady => Some(Stage::PipelineReady),
            Stage::PipelineReady => Some(Stage::ResourcesUploaded),
            Stage::ResourcesUploaded => Some(Stage::FrameSubmitted),
            Stage::FrameSubmitted => None,
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

/// Linear stage tracker.
///
/// A recorded failure halts the tracker at its current stage; every later
/// transition is refused.
#[derive(Debug, Default)]
pub struct Lifecycle {
    stage: Stage,
    failure: Option<RenderError>,
}

impl Lifecycle {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[inline]
    pub fn failure(&self) -> Option<&RenderError> {
        self.failure.as_ref()
    }

    /// Moves to `to`, which must be the stage directly after the current one.
    pub fn advance(&mut self, to: Stage) -> RenderResult<()> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        if self.stage.next() != Some(to) {
            return Err(RenderError::InvalidTransition { from: self.stage, to });
        }

        log::debug!("lifecycle: {:?} -> {to:?}", self.stage);
        self.stage = to;
        Ok(())
    }

    /// Succeeds only when sitting at `stage` with no recorded failure.
    pub fn require(&self, stage: Stage) -> RenderResult<()> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        if self.stage != stage {
            return Err(RenderError::InvalidTransition {
                from: self.stage,
                to: stage.next().unwrap_or(stage),
            });
        }
        Ok(())
    }

    /// Records `err` as the halting failure and hands it back for propagation.
    ///
    /// Only the first failure is kept. Reporting it is left to the caller.
    pub fn fail(&mut self, err: RenderError) -> RenderError {
        log::debug!("lifecycle halted at {:?}", self.stage);
        self.failure.get_or_insert(err).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_every_stage_in_order() {
        let mut lc = Lifecycle::new();
        for to in [
            Stage::DeviceReady,
            Stage::PipelineReady,
            Stage::ResourcesUploaded,
            Stage::FrameSubmitted,
        ] {
            lc.advance(to).unwrap();
            assert_eq!(lc.stage(), to);
        }
        assert!(lc.stage().is_terminal());
    }

    #[test]
    fn skipping_a_stage_is_rejected() {
        let mut lc = Lifecycle::new();
        let err = lc.advance(Stage::PipelineReady).unwrap_err();
        assert_eq!(
            err,
            RenderError::InvalidTransition {
                from: Stage::Uninitialized,
                to: Stage::PipelineReady
            }
        );
        assert_eq!(lc.stage(), Stage::Uninitialized);
    }

    #[test]
    fn repeating_a_stage_is_rejected() {
        let mut lc = Lifecycle::new();
        lc.advance(Stage::DeviceReady).unwrap();
        assert!(lc.advance(Stage::DeviceReady).is_err());
    }

    #[test]
    fn terminal_stage_has_no_successor() {
        let mut lc = Lifecycle::new();
        for to in [
            Stage::DeviceReady,
            Stage::PipelineReady,
            Stage::ResourcesUploaded,
            Stage::FrameSubmitted,
        ] {
            lc.advance(to).unwrap();
        }
        assert!(lc.advance(Stage::Uninitialized).is_err());
    }

    #[test]
    fn failure_halts_progress() {
        let mut lc = Lifecycle::new();
        lc.advance(Stage::DeviceReady).unwrap();
        let err = lc.fail(RenderError::ShaderCompileError("bad".into()));

        assert_eq!(lc.stage(), Stage::DeviceReady);
        assert_eq!(lc.advance(Stage::PipelineReady), Err(err.clone()));
        assert_eq!(lc.require(Stage::DeviceReady), Err(err));
    }

    #[test]
    fn first_failure_is_kept() {
        let mut lc = Lifecycle::new();
        lc.fail(RenderError::DeviceUnavailable("first".into()));
        let kept = lc.fail(RenderError::DeviceUnavailable("second".into()));
        assert_eq!(kept, RenderError::DeviceUnavailable("first".into()));
    }

    #[test]
    fn require_checks_exact_stage() {
        let mut lc = Lifecycle::new();
        assert!(lc.require(Stage::Uninitialized).is_ok());
        assert!(lc.require(Stage::ResourcesUploaded).is_err());
        lc.advance(Stage::DeviceReady).unwrap();
        assert!(lc.require(Stage::DeviceReady).is_ok());
    }
}
