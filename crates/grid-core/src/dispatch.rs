//! Multi-action menus run against a candidate after a jump.

/// Result of running a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
	/// Keep browsing.
	Stay,
	/// Accept the candidate and close, tagging the outcome with `action`.
	Accept { action: String },
}

/// Menu entry as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEntry {
	pub key: char,
	pub name: String,
	pub description: String,
}

/// Supplies the actions offered after `jump-and-dispatch`.
pub trait ActionDispatcher {
	fn entries(&self) -> Vec<ActionEntry>;

	/// Run the action bound to `key` on the candidate at `index`.
	///
	/// Returns `None` when no action uses `key`.
	fn dispatch(&mut self, key: char, index: usize, candidate: &str) -> Option<ActionResult>;
}

pub type ActionHandler = Box<dyn FnMut(usize, &str) -> ActionResult>;

/// A dispatcher backed by a list of key-bound closures.
#[derive(Default)]
pub struct ActionMenu {
	actions: Vec<(ActionEntry, ActionHandler)>,
}

impl ActionMenu {
	pub fn new() -> Self {
		Self::default()
	}

	/// Bind `key` to `handler`; a later binding for the same key wins.
	#[must_use]
	pub fn with_action(
		mut self,
		key: char,
		name: impl Into<String>,
		description: impl Into<String>,
		handler: impl FnMut(usize, &str) -> ActionResult + 'static,
	) -> Self {
		self.actions.retain(|(entry, _)| entry.key != key);
		let entry = ActionEntry {
			key,
			name: name.into(),
			description: description.into(),
		};
		self.actions.push((entry, Box::new(handler)));
		self
	}

	pub fn is_empty(&self) -> bool {
		self.actions.is_empty()
	}
}

impl ActionDispatcher for ActionMenu {
	fn entries(&self) -> Vec<ActionEntry> {
		self.actions.iter().map(|(entry, _)| entry.clone()).collect()
	}

	fn dispatch(&mut self, key: char, index: usize, candidate: &str) -> Option<ActionResult> {
		let (entry, handler) = self.actions.iter_mut().find(|(entry, _)| entry.key == key)?;
		tracing::debug!(action = %entry.name, index, "dispatching action");
		Some(handler(index, candidate))
	}
}

impl std::fmt::Debug for ActionMenu {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list()
			.entries(self.actions.iter().map(|(entry, _)| entry))
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;

	#[test]
	fn dispatch_runs_handler_for_key() {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = Rc::clone(&seen);
		let mut menu = ActionMenu::new()
			.with_action('o', "open", "Open it", |_, _| ActionResult::Accept {
				action: "open".into(),
			})
			.with_action('l', "log", "Remember it", move |index, candidate| {
				sink.borrow_mut().push((index, candidate.to_string()));
				ActionResult::Stay
			});

		assert_eq!(menu.dispatch('l', 3, "notes.md"), Some(ActionResult::Stay));
		assert_eq!(*seen.borrow(), vec![(3, "notes.md".to_string())]);
		assert_eq!(
			menu.dispatch('o', 3, "notes.md"),
			Some(ActionResult::Accept {
				action: "open".into()
			})
		);
		assert_eq!(menu.dispatch('x', 3, "notes.md"), None);
	}

	#[test]
	fn rebinding_a_key_replaces_the_entry() {
		let menu = ActionMenu::new()
			.with_action('o', "open", "Open it", |_, _| ActionResult::Stay)
			.with_action('o', "other", "Something else", |_, _| ActionResult::Stay);
		let entries = menu.entries();
		assert_eq!(entries.len(), 1);
		assert_eq!(entries[0].name, "other");
	}
}
