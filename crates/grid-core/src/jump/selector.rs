use super::labels::LabelGenerator;

/// Where a jump target sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPosition {
	pub row: usize,
	pub column: usize,
}

/// A visible candidate that can be jumped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpTarget {
	pub position: ScreenPosition,
	pub index: usize,
}

/// A target together with the key sequence that selects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledTarget {
	pub label: String,
	pub target: JumpTarget,
}

/// What happens once a label resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpContinuation {
	/// Select the candidate and stop.
	#[default]
	Select,
	/// Select the candidate, then hand it to the action dispatcher.
	Dispatch,
}

/// One key of input while a jump is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpInput {
	Key(char),
	Backspace,
	Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpResolution {
	/// More keys are needed.
	Pending,
	/// The typed sequence names exactly one candidate.
	Resolved(usize),
	/// Cancelled, or the typed sequence matches nothing.
	Cancelled,
}

/// Labels every target it is given, using the configured generator.
pub struct JumpSelector {
	generator: Box<dyn LabelGenerator>,
}

impl JumpSelector {
	pub fn new(generator: Box<dyn LabelGenerator>) -> Self {
		Self { generator }
	}

	/// Start a jump over `targets` in display order.
	pub fn begin(&self, targets: Vec<JumpTarget>, continuation: JumpContinuation) -> PendingJump {
		let labels = self.generator.labels(targets.len());
		let labeled = labels
			.into_iter()
			.zip(targets)
			.map(|(label, target)| LabeledTarget { label, target })
			.collect();
		PendingJump {
			labeled,
			typed: String::new(),
			continuation,
		}
	}
}

impl std::fmt::Debug for JumpSelector {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("JumpSelector").finish_non_exhaustive()
	}
}

/// A jump waiting for its key sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingJump {
	labeled: Vec<LabeledTarget>,
	typed: String,
	continuation: JumpContinuation,
}

impl PendingJump {
	pub fn continuation(&self) -> JumpContinuation {
		self.continuation
	}

	/// Keys typed so far.
	pub fn typed(&self) -> &str {
		&self.typed
	}

	pub fn labels(&self) -> &[LabeledTarget] {
		&self.labeled
	}

	/// Labels still reachable from what has been typed.
	pub fn matching(&self) -> impl Iterator<Item = &LabeledTarget> + '_ {
		self.labeled
			.iter()
			.filter(|entry| entry.label.starts_with(self.typed.as_str()))
	}

	pub fn feed(&mut self, input: JumpInput) -> JumpResolution {
		match input {
			JumpInput::Cancel => JumpResolution::Cancelled,
			JumpInput::Backspace => {
				self.typed.pop();
				JumpResolution::Pending
			}
			JumpInput::Key(key) => {
				self.typed.push(key);
				let mut matching = self.matching();
				match (matching.next(), matching.next()) {
					(None, _) => JumpResolution::Cancelled,
					(Some(entry), None) if entry.label == self.typed => {
						JumpResolution::Resolved(entry.target.index)
					}
					_ => JumpResolution::Pending,
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::jump::TreeLabeler;

	fn targets(indices: &[usize]) -> Vec<JumpTarget> {
		indices
			.iter()
			.enumerate()
			.map(|(position, &index)| JumpTarget {
				position: ScreenPosition {
					row: 0,
					column: position * 4,
				},
				index,
			})
			.collect()
	}

	fn selector(keys: &str) -> JumpSelector {
		JumpSelector::new(Box::new(
			TreeLabeler::new(keys.chars()).expect("valid alphabet"),
		))
	}

	#[test]
	fn single_key_resolves_visible_candidate() {
		let mut pending =
			selector("asdfg").begin(targets(&[10, 11, 12, 13, 14]), JumpContinuation::Select);
		let labels: Vec<&str> = pending.labels().iter().map(|entry| entry.label.as_str()).collect();
		assert_eq!(labels, vec!["a", "s", "d", "f", "g"]);

		assert_eq!(pending.feed(JumpInput::Key('d')), JumpResolution::Resolved(12));
	}

	#[test]
	fn multi_key_sequences_stay_pending_until_unique() {
		let mut pending = selector("as").begin(targets(&[0, 1, 2, 3]), JumpContinuation::Select);
		assert_eq!(pending.feed(JumpInput::Key('s')), JumpResolution::Pending);
		assert_eq!(pending.matching().count(), 2);
		assert_eq!(pending.feed(JumpInput::Key('a')), JumpResolution::Resolved(2));
	}

	#[test]
	fn backspace_undoes_last_key() {
		let mut pending = selector("as").begin(targets(&[0, 1, 2, 3]), JumpContinuation::Select);
		assert_eq!(pending.feed(JumpInput::Key('a')), JumpResolution::Pending);
		assert_eq!(pending.feed(JumpInput::Backspace), JumpResolution::Pending);
		assert_eq!(pending.typed(), "");
		assert_eq!(pending.feed(JumpInput::Key('s')), JumpResolution::Pending);
		assert_eq!(pending.feed(JumpInput::Key('s')), JumpResolution::Resolved(3));
	}

	#[test]
	fn unknown_key_cancels() {
		let mut pending = selector("asd").begin(targets(&[0, 1]), JumpContinuation::Select);
		assert_eq!(pending.feed(JumpInput::Key('z')), JumpResolution::Cancelled);
	}

	#[test]
	fn cancel_key_aborts() {
		let mut pending = selector("asd").begin(targets(&[0, 1]), JumpContinuation::Dispatch);
		assert_eq!(pending.feed(JumpInput::Cancel), JumpResolution::Cancelled);
		assert_eq!(pending.continuation(), JumpContinuation::Dispatch);
	}
}
