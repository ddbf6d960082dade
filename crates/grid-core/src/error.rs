use thiserror::Error;

/// Failures of an optional operation. The session stays usable after any of
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
	#[error("jump labels are not available: no label generator configured")]
	NoLabelGenerator,
	#[error("no action menu configured")]
	NoDispatcher,
	#[error("no visible candidates to jump to")]
	NoJumpTargets,
	#[error("no candidate selected")]
	NoSelection,
}
