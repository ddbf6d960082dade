mod actions;
mod render;
mod runtime;
#[cfg(test)]
mod tests;

use std::path::PathBuf;

use frz_grid_core::{RenderSurface, Session, SessionStack};

pub use runtime::run;

use crate::input::QueryInput;
use crate::keymap::Keymap;
use crate::panel::GridPanel;
use crate::theme::Theme;

/// Rows below the grid: the prompt line and the status line.
const CHROME_ROWS: u16 = 2;

/// Builds the nested session for `open-as-directory`.
pub trait SessionOpener {
	/// Open the candidate at `index` of `parent` as a directory, laid out
	/// `width` cells wide. Returns `None` when the candidate is not one.
	fn open(
		&mut self,
		parent: &Session,
		index: usize,
		width: usize,
	) -> anyhow::Result<Option<Session>>;
}

/// A candidate picked by the user, with the directory it is relative to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selected {
	pub candidate: String,
	pub index: usize,
	pub context: Option<PathBuf>,
}

impl Selected {
	/// The candidate joined onto its context directory, when it has one.
	pub fn path(&self) -> PathBuf {
		match &self.context {
			Some(context) => context.join(&self.candidate),
			None => PathBuf::from(&self.candidate),
		}
	}
}

/// How the overlay was closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
	pub accepted: bool,
	/// Query of the innermost session when it closed.
	pub query: String,
	/// `None` when cancelled, or when the prompt itself was accepted.
	pub selection: Option<Selected>,
	/// Name of the dispatched action that accepted, if any.
	pub action: Option<String>,
	/// Candidates acted on while browsing, in order.
	pub acted: Vec<Selected>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
	pub message: String,
	pub is_error: bool,
}

/// The overlay: a stack of sessions, the query editor and the grid panel.
pub struct App<'a> {
	stack: SessionStack,
	keymap: Keymap,
	theme: Theme,
	panel: GridPanel,
	input: QueryInput<'a>,
	opener: Option<Box<dyn SessionOpener>>,
	status: Option<Status>,
	acted: Vec<Selected>,
	max_height: Option<usize>,
	max_rows: Option<usize>,
	grid_width: usize,
	redraw: bool,
}

impl App<'_> {
	pub fn new(root: Session) -> Self {
		let input = QueryInput::new(root.query());
		let mut app = Self {
			stack: SessionStack::new(root),
			keymap: Keymap::default(),
			theme: Theme::default(),
			panel: GridPanel::new(true),
			input,
			opener: None,
			status: None,
			acted: Vec::new(),
			max_height: None,
			max_rows: None,
			grid_width: 0,
			redraw: true,
		};
		app.redisplay(true);
		app
	}

	#[must_use]
	pub fn with_keymap(mut self, keymap: Keymap) -> Self {
		self.keymap = keymap;
		self
	}

	#[must_use]
	pub fn with_theme(mut self, theme: Theme) -> Self {
		self.theme = theme;
		self
	}

	#[must_use]
	pub fn with_opener(mut self, opener: Box<dyn SessionOpener>) -> Self {
		self.opener = Some(opener);
		self
	}

	#[must_use]
	pub fn with_separator(mut self, separator: bool) -> Self {
		self.panel = GridPanel::new(separator);
		self.redisplay(true);
		self
	}

	/// Cap the grid at `rows` rows; larger lists scroll.
	#[must_use]
	pub fn with_max_height(mut self, rows: Option<usize>) -> Self {
		self.max_height = rows;
		self
	}

	pub fn stack(&self) -> &SessionStack {
		&self.stack
	}

	pub fn status(&self) -> Option<&Status> {
		self.status.as_ref()
	}

	pub fn query(&self) -> &str {
		self.input.text()
	}

	pub fn panel(&self) -> &GridPanel {
		&self.panel
	}

	/// Fit every session to a terminal of `width` by `height` cells.
	pub fn resize(&mut self, width: u16, height: u16) {
		self.grid_width = usize::from(width.saturating_sub(2));
		let separator = u16::from(self.panel.has_separator());
		let budget = usize::from(height.saturating_sub(CHROME_ROWS + separator)).max(1);
		self.max_rows = Some(match self.max_height {
			Some(rows) => rows.clamp(1, budget),
			None => budget,
		});
		self.stack.resize(self.grid_width);
		self.stack.set_max_rows(self.max_rows);
		tracing::trace!(width, height, rows = ?self.max_rows, "resized");
		self.redisplay(true);
	}

	/// Whether the screen has to be drawn again. Clears the flag.
	pub fn take_redraw(&mut self) -> bool {
		std::mem::take(&mut self.redraw)
	}

	fn redisplay(&mut self, force: bool) {
		if let Some(session) = self.stack.active() {
			let text = session.visible_text();
			if self.panel.display(&text, force) {
				self.redraw = true;
			}
		}
	}

	fn set_info(&mut self, message: impl Into<String>) {
		self.status = Some(Status {
			message: message.into(),
			is_error: false,
		});
		self.redraw = true;
	}

	fn set_error(&mut self, message: impl Into<String>) {
		self.status = Some(Status {
			message: message.into(),
			is_error: true,
		});
		self.redraw = true;
	}

	fn selected(&self, index: usize) -> Option<Selected> {
		let session = self.stack.active()?;
		Some(Selected {
			candidate: session.candidates().get(index)?.clone(),
			index,
			context: session.context().map(PathBuf::from),
		})
	}
}
