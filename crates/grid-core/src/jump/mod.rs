//! Jump labels: short key sequences that select a visible candidate directly.

mod labels;
mod selector;

pub use labels::{AlphabetError, LabelGenerator, TreeLabeler};
pub use selector::{
	JumpContinuation, JumpInput, JumpResolution, JumpSelector, JumpTarget, LabeledTarget,
	PendingJump, ScreenPosition,
};
