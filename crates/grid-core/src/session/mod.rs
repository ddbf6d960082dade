//! One open-to-close browsing lifecycle and the stack that nests them.
//!
//! A [`Session`] owns its candidate list, the grid layout derived from it and
//! the selection. Sessions never share state; nesting is expressed by pushing
//! a new session onto a [`SessionStack`].

mod stack;

use std::ops::Range;
use std::path::{Path, PathBuf};

pub use stack::SessionStack;

use crate::dispatch::{ActionDispatcher, ActionEntry, ActionResult};
use crate::error::SessionError;
use crate::jump::{
	JumpContinuation, JumpInput, JumpResolution, JumpSelector, JumpTarget, LabelGenerator,
	PendingJump, ScreenPosition,
};
use crate::layout::{self, GridCell, GridLayout};
use crate::navigation::{Navigator, Selection};
use crate::operation::Operation;
use crate::source::CandidateSource;

/// What the host has to do after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
	/// Redisplay and keep browsing.
	Continue,
	/// The session waits for jump or dispatch keys.
	Pending,
	/// Run the act action on the candidate without closing.
	Act(usize),
	/// A jump selected the candidate.
	Jumped(usize),
	/// A pending jump or dispatch ended without selecting anything.
	JumpCancelled,
	/// Close the session and accept. `index` is `None` when the prompt itself
	/// is selected.
	Accept {
		index: Option<usize>,
		action: Option<String>,
	},
	/// Close this session.
	Cancel,
	/// Close this session and every session it is nested in.
	CancelAll,
	/// Browse the candidate as a directory in a nested session.
	OpenDirectory(usize),
}

/// Input state of a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
	#[default]
	Browsing,
	Jumping(PendingJump),
	/// Waiting for an action key for the candidate at `index`.
	Dispatching { index: usize },
}

/// Configures a [`Session`] before its first layout pass.
pub struct SessionBuilder {
	source: Box<dyn CandidateSource>,
	title: String,
	context: Option<PathBuf>,
	query: String,
	column_cap: Option<usize>,
	prompt_selectable: bool,
	max_rows: Option<usize>,
	self_entry: Option<String>,
	labels: Option<Box<dyn LabelGenerator>>,
	dispatcher: Option<Box<dyn ActionDispatcher>>,
}

impl SessionBuilder {
	#[must_use]
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	/// Directory the candidates are relative to.
	#[must_use]
	pub fn context(mut self, context: impl Into<PathBuf>) -> Self {
		self.context = Some(context.into());
		self
	}

	#[must_use]
	pub fn query(mut self, query: impl Into<String>) -> Self {
		self.query = query.into();
		self
	}

	#[must_use]
	pub fn column_cap(mut self, cap: Option<usize>) -> Self {
		self.column_cap = cap;
		self
	}

	#[must_use]
	pub fn prompt_selectable(mut self, selectable: bool) -> Self {
		self.prompt_selectable = selectable;
		self
	}

	/// Limit the viewport to `rows` grid rows.
	#[must_use]
	pub fn max_rows(mut self, rows: Option<usize>) -> Self {
		self.max_rows = rows;
		self
	}

	/// Candidate naming the browsed directory itself; never a jump target.
	#[must_use]
	pub fn self_entry(mut self, entry: impl Into<String>) -> Self {
		self.self_entry = Some(entry.into());
		self
	}

	#[must_use]
	pub fn labels(mut self, generator: Box<dyn LabelGenerator>) -> Self {
		self.labels = Some(generator);
		self
	}

	#[must_use]
	pub fn dispatcher(mut self, dispatcher: Box<dyn ActionDispatcher>) -> Self {
		self.dispatcher = Some(dispatcher);
		self
	}

	/// Pull the first candidate list and lay it out `width` cells wide.
	pub fn build(self, width: usize) -> Session {
		let Self {
			mut source,
			title,
			context,
			query,
			column_cap,
			prompt_selectable,
			max_rows,
			self_entry,
			labels,
			dispatcher,
		} = self;

		let candidates = source.candidates(&query);
		let layout = layout::layout(&candidates, column_cap, width);
		let navigator = Navigator::new(candidates.len(), layout.column_count(), prompt_selectable);
		tracing::debug!(%title, candidates = candidates.len(), "session opened");

		let mut session = Session {
			title,
			context,
			query,
			candidates,
			layout,
			navigator,
			column_cap,
			width,
			max_rows,
			scroll: 0,
			self_entry,
			source,
			jump: labels.map(JumpSelector::new),
			dispatcher,
			mode: Mode::Browsing,
		};
		session.follow_selection();
		session
	}
}

/// One browsing lifecycle.
pub struct Session {
	title: String,
	context: Option<PathBuf>,
	query: String,
	candidates: Vec<String>,
	layout: GridLayout,
	navigator: Navigator,
	column_cap: Option<usize>,
	width: usize,
	max_rows: Option<usize>,
	scroll: usize,
	self_entry: Option<String>,
	source: Box<dyn CandidateSource>,
	jump: Option<JumpSelector>,
	dispatcher: Option<Box<dyn ActionDispatcher>>,
	mode: Mode,
}

impl Session {
	pub fn builder(source: impl CandidateSource + 'static) -> SessionBuilder {
		SessionBuilder {
			source: Box::new(source),
			title: String::new(),
			context: None,
			query: String::new(),
			column_cap: None,
			prompt_selectable: false,
			max_rows: None,
			self_entry: None,
			labels: None,
			dispatcher: None,
		}
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn context(&self) -> Option<&Path> {
		self.context.as_deref()
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn candidates(&self) -> &[String] {
		&self.candidates
	}

	pub fn layout(&self) -> &GridLayout {
		&self.layout
	}

	pub fn navigator(&self) -> &Navigator {
		&self.navigator
	}

	pub fn selection(&self) -> Selection {
		self.navigator.selection()
	}

	pub fn selected_index(&self) -> Option<usize> {
		self.navigator.index()
	}

	pub fn selected_candidate(&self) -> Option<&str> {
		self.selected_index()
			.and_then(|index| self.candidates.get(index))
			.map(String::as_str)
	}

	/// Cell that shows the current selection.
	pub fn selected_cell(&self) -> Option<&GridCell> {
		self.layout.cell_for_index(self.selected_index()?)
	}

	pub fn mode(&self) -> &Mode {
		&self.mode
	}

	pub fn pending_jump(&self) -> Option<&PendingJump> {
		match &self.mode {
			Mode::Jumping(pending) => Some(pending),
			_ => None,
		}
	}

	pub fn has_dispatcher(&self) -> bool {
		self.dispatcher.is_some()
	}

	/// Actions offered by the dispatch menu, empty when none is configured.
	pub fn dispatch_entries(&self) -> Vec<ActionEntry> {
		self.dispatcher
			.as_ref()
			.map(|dispatcher| dispatcher.entries())
			.unwrap_or_default()
	}

	/// Replace the query and pull a fresh candidate list for it.
	pub fn set_query(&mut self, query: impl Into<String>) {
		let query = query.into();
		if query == self.query {
			return;
		}
		self.query = query;
		self.refresh();
	}

	/// Pull candidates for the current query again.
	pub fn refresh(&mut self) {
		self.candidates = self.source.candidates(&self.query);
		tracing::debug!(
			query = %self.query,
			candidates = self.candidates.len(),
			"candidate list replaced"
		);
		self.mode = Mode::Browsing;
		self.relayout();
	}

	/// Lay the grid out again for a new available width.
	pub fn resize(&mut self, width: usize) {
		if width != self.width {
			self.width = width;
			self.relayout();
		}
	}

	pub fn set_max_rows(&mut self, rows: Option<usize>) {
		self.max_rows = rows;
		self.follow_selection();
	}

	/// Grid rows currently inside the viewport.
	pub fn visible_rows(&self) -> Range<usize> {
		let total = self.layout.row_count();
		let end = match self.max_rows {
			Some(rows) => (self.scroll + rows.max(1)).min(total),
			None => total,
		};
		self.scroll.min(end)..end
	}

	/// The viewport's slice of the grid as displayable text.
	pub fn visible_text(&self) -> String {
		self.layout.rows()[self.visible_rows()].join("\n")
	}

	/// Visible cells that can be jumped to, in display order.
	pub fn jump_targets(&self) -> Vec<JumpTarget> {
		let first_row = self.visible_rows().start;
		self.layout
			.cells_in_rows(self.visible_rows())
			.filter(|cell| cell.width > 0)
			.filter(|cell| {
				self.self_entry
					.as_deref()
					.is_none_or(|entry| self.candidates[cell.index] != entry)
			})
			.map(|cell| JumpTarget {
				position: ScreenPosition {
					row: cell.row - first_row,
					column: cell.column,
				},
				index: cell.index,
			})
			.collect()
	}

	/// Run a named operation.
	///
	/// Any pending jump or dispatch is abandoned first. Errors leave the
	/// candidates and the selection untouched.
	pub fn apply(&mut self, operation: Operation) -> Result<Effect, SessionError> {
		self.mode = Mode::Browsing;
		let effect = match operation {
			Operation::Forward => self.step_horizontally(1, false),
			Operation::Backward => self.step_horizontally(-1, false),
			Operation::ForwardAndAct => self.step_horizontally(1, true),
			Operation::BackwardAndAct => self.step_horizontally(-1, true),
			Operation::Down => self.step_vertically(1, false),
			Operation::Up => self.step_vertically(-1, false),
			Operation::DownAndAct => self.step_vertically(1, true),
			Operation::UpAndAct => self.step_vertically(-1, true),
			Operation::Jump => self.begin_jump(JumpContinuation::Select)?,
			Operation::JumpAndDispatch => {
				if self.dispatcher.is_none() {
					return Err(SessionError::NoDispatcher);
				}
				self.begin_jump(JumpContinuation::Dispatch)?
			}
			Operation::OpenAsDirectory => {
				let index = self.selected_index().ok_or(SessionError::NoSelection)?;
				Effect::OpenDirectory(index)
			}
			Operation::Confirm => Effect::Accept {
				index: self.selected_index(),
				action: None,
			},
			Operation::Cancel => Effect::Cancel,
			Operation::CancelAll => Effect::CancelAll,
		};
		Ok(effect)
	}

	/// Feed one key to a pending jump or dispatch.
	pub fn feed(&mut self, input: JumpInput) -> Effect {
		match std::mem::take(&mut self.mode) {
			Mode::Browsing => Effect::Continue,
			Mode::Jumping(mut pending) => match pending.feed(input) {
				JumpResolution::Pending => {
					self.mode = Mode::Jumping(pending);
					Effect::Pending
				}
				JumpResolution::Cancelled => {
					tracing::debug!(typed = pending.typed(), "jump cancelled");
					Effect::JumpCancelled
				}
				JumpResolution::Resolved(index) => {
					tracing::debug!(index, "jump resolved");
					self.select(Selection::Candidate(index));
					match pending.continuation() {
						JumpContinuation::Select => Effect::Jumped(index),
						JumpContinuation::Dispatch => {
							self.mode = Mode::Dispatching { index };
							Effect::Pending
						}
					}
				}
			},
			Mode::Dispatching { index } => self.dispatch(index, input),
		}
	}

	fn dispatch(&mut self, index: usize, input: JumpInput) -> Effect {
		let key = match input {
			JumpInput::Key(key) => key,
			JumpInput::Backspace => {
				self.mode = Mode::Dispatching { index };
				return Effect::Pending;
			}
			JumpInput::Cancel => return Effect::JumpCancelled,
		};
		let Some(dispatcher) = self.dispatcher.as_mut() else {
			return Effect::JumpCancelled;
		};
		let Some(candidate) = self.candidates.get(index) else {
			return Effect::JumpCancelled;
		};
		match dispatcher.dispatch(key, index, candidate) {
			Some(ActionResult::Stay) => Effect::Continue,
			Some(ActionResult::Accept { action }) => Effect::Accept {
				index: Some(index),
				action: Some(action),
			},
			None => Effect::JumpCancelled,
		}
	}

	fn begin_jump(&mut self, continuation: JumpContinuation) -> Result<Effect, SessionError> {
		let selector = self.jump.as_ref().ok_or(SessionError::NoLabelGenerator)?;
		let targets = self.jump_targets();
		if targets.is_empty() {
			return Err(SessionError::NoJumpTargets);
		}
		tracing::debug!(targets = targets.len(), ?continuation, "jump started");
		self.mode = Mode::Jumping(selector.begin(targets, continuation));
		Ok(Effect::Pending)
	}

	fn step_horizontally(&mut self, step: isize, act: bool) -> Effect {
		self.navigator.move_horizontally_by(step);
		self.after_move(act)
	}

	fn step_vertically(&mut self, step: isize, act: bool) -> Effect {
		self.navigator.move_vertically_by(step);
		self.after_move(act)
	}

	fn after_move(&mut self, act: bool) -> Effect {
		self.follow_selection();
		match self.selected_index() {
			Some(index) if act => Effect::Act(index),
			_ => Effect::Continue,
		}
	}

	fn select(&mut self, selection: Selection) {
		self.navigator.select(selection);
		self.follow_selection();
	}

	fn relayout(&mut self) {
		self.layout = layout::layout(&self.candidates, self.column_cap, self.width);
		self.navigator.set_column_count(self.layout.column_count());
		self.navigator.set_len(self.candidates.len());
		self.follow_selection();
	}

	/// Scroll the viewport so the selected cell is visible.
	fn follow_selection(&mut self) {
		let Some(rows) = self.max_rows.map(|rows| rows.max(1)) else {
			self.scroll = 0;
			return;
		};
		let row = self.selected_cell().map(|cell| cell.row).unwrap_or(0);
		if row < self.scroll {
			self.scroll = row;
		} else if row >= self.scroll + rows {
			self.scroll = row + 1 - rows;
		}
		let last_start = self.layout.row_count().saturating_sub(rows);
		self.scroll = self.scroll.min(last_start);
	}
}

impl std::fmt::Debug for Session {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Session")
			.field("title", &self.title)
			.field("query", &self.query)
			.field("candidates", &self.candidates.len())
			.field("selection", &self.selection())
			.field("mode", &self.mode)
			.finish_non_exhaustive()
	}
}
