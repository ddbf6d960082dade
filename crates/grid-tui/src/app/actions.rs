use frz_grid_core::{Effect, Mode};
use ratatui::crossterm::event::KeyEvent;

use super::{App, Outcome, Selected};
use crate::input::QueryInput;

impl App<'_> {
	/// Handle one key press. Returns the outcome once the last session closes.
	pub fn handle_key(&mut self, key: KeyEvent) -> Option<Outcome> {
		let Some(session) = self.stack.active_mut() else {
			return Some(self.finish(false, None, None));
		};

		let effect = if matches!(session.mode(), Mode::Browsing) {
			match self.keymap.operation_for(&key) {
				Some(operation) => match session.apply(operation) {
					Ok(effect) => {
						tracing::trace!(%operation, ?effect, "operation applied");
						self.status = None;
						effect
					}
					Err(error) => {
						tracing::debug!(%operation, %error, "operation refused");
						self.set_error(error.to_string());
						return None;
					}
				},
				None => {
					if self.input.handle_key(&key) {
						session.set_query(self.input.text());
						self.status = None;
						self.redisplay(false);
					}
					// The cursor may have moved even when the text did not change.
					self.redraw = true;
					return None;
				}
			}
		} else {
			let input = self.keymap.jump_input(&key)?;
			session.feed(input)
		};

		self.apply_effect(effect)
	}

	fn apply_effect(&mut self, effect: Effect) -> Option<Outcome> {
		match effect {
			Effect::Continue | Effect::Pending | Effect::Jumped(_) => {}
			Effect::JumpCancelled => self.set_info("jump cancelled"),
			Effect::Act(index) => self.act(index),
			Effect::Accept { index, action } => {
				let selection = index.and_then(|index| self.selected(index));
				return Some(self.finish(true, selection, action));
			}
			Effect::Cancel => {
				if let Some(closed) = self.stack.pop() {
					if self.stack.is_empty() {
						return Some(self.finish(false, None, None));
					}
					self.resume(closed.title());
				}
			}
			Effect::CancelAll => return Some(self.finish(false, None, None)),
			Effect::OpenDirectory(index) => self.open_directory(index),
		}
		self.redisplay(false);
		self.redraw = true;
		None
	}

	/// Close every remaining session and report how the overlay ended.
	fn finish(
		&mut self,
		accepted: bool,
		selection: Option<Selected>,
		action: Option<String>,
	) -> Outcome {
		let query = self.input.text().to_string();
		let closed = self.stack.cancel_all();
		tracing::info!(
			accepted,
			closed = closed.len(),
			selection = selection.as_ref().map(|selected| selected.candidate.as_str()),
			action = action.as_deref(),
			"overlay closed"
		);
		Outcome {
			accepted,
			query,
			selection,
			action,
			acted: std::mem::take(&mut self.acted),
		}
	}

	fn act(&mut self, index: usize) {
		let Some(selected) = self.selected(index) else {
			return;
		};
		tracing::info!(candidate = %selected.candidate, index, "act");
		self.set_info(format!("acted on {}", selected.candidate));
		self.acted.push(selected);
	}

	fn resume(&mut self, closed_title: &str) {
		let Some(session) = self.stack.active() else {
			return;
		};
		self.input = QueryInput::new(session.query());
		let message = format!("closed {closed_title}, back in {}", session.title());
		self.set_info(message);
		self.redisplay(true);
	}

	fn open_directory(&mut self, index: usize) {
		let Some(parent) = self.stack.active() else {
			return;
		};
		let Some(opener) = self.opener.as_mut() else {
			self.set_error("nothing here can be opened as a directory");
			return;
		};
		let candidate = parent.candidates().get(index).cloned().unwrap_or_default();
		match opener.open(parent, index, self.grid_width) {
			Ok(Some(mut session)) => {
				session.set_max_rows(self.max_rows);
				self.input = QueryInput::new(session.query());
				self.stack.push(session);
				self.status = None;
				self.redisplay(true);
			}
			Ok(None) => self.set_error(format!("{candidate} is not a directory")),
			Err(error) => {
				tracing::warn!(
					%candidate,
					error = %format!("{error:#}"),
					"failed to open directory"
				);
				self.set_error(format!("{error:#}"));
			}
		}
	}
}
