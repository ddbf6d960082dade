use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Named operations a host binds keys to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
	Forward,
	Backward,
	ForwardAndAct,
	BackwardAndAct,
	Down,
	Up,
	DownAndAct,
	UpAndAct,
	Jump,
	JumpAndDispatch,
	OpenAsDirectory,
	Confirm,
	Cancel,
	CancelAll,
}

impl Operation {
	pub const ALL: [Operation; 14] = [
		Operation::Forward,
		Operation::Backward,
		Operation::ForwardAndAct,
		Operation::BackwardAndAct,
		Operation::Down,
		Operation::Up,
		Operation::DownAndAct,
		Operation::UpAndAct,
		Operation::Jump,
		Operation::JumpAndDispatch,
		Operation::OpenAsDirectory,
		Operation::Confirm,
		Operation::Cancel,
		Operation::CancelAll,
	];

	pub fn name(self) -> &'static str {
		match self {
			Operation::Forward => "forward",
			Operation::Backward => "backward",
			Operation::ForwardAndAct => "forward-and-act",
			Operation::BackwardAndAct => "backward-and-act",
			Operation::Down => "down",
			Operation::Up => "up",
			Operation::DownAndAct => "down-and-act",
			Operation::UpAndAct => "up-and-act",
			Operation::Jump => "jump",
			Operation::JumpAndDispatch => "jump-and-dispatch",
			Operation::OpenAsDirectory => "open-as-directory",
			Operation::Confirm => "confirm",
			Operation::Cancel => "cancel",
			Operation::CancelAll => "cancel-all",
		}
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation `{0}`")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
	type Err = UnknownOperation;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let normalized = value.trim().replace('_', "-").to_ascii_lowercase();
		Operation::ALL
			.into_iter()
			.find(|operation| operation.name() == normalized)
			.ok_or_else(|| UnknownOperation(value.to_string()))
	}
}
