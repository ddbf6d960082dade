//! Grid-style movement over a list that is visually 2D but logically 1D.
//!
//! Vertical moves jump a whole grid row (`step * column_count` candidates) and
//! stay inside the current visual column. Horizontal moves are plain
//! sequential shifts. Every result is clamped into range; nothing wraps except
//! the single transition from the first candidate up to a selectable prompt.

/// What the user currently has selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
	/// The input prompt itself (`-1`).
	Prompt,
	/// A candidate by logical index.
	Candidate(usize),
}

impl Selection {
	/// Signed offset where the prompt is `-1`.
	pub fn offset(self) -> isize {
		match self {
			Self::Prompt => -1,
			Self::Candidate(index) => index as isize,
		}
	}

	fn from_offset(offset: isize) -> Self {
		if offset < 0 {
			Self::Prompt
		} else {
			Self::Candidate(offset as usize)
		}
	}
}

/// Tracks the selection for one candidate list and moves it around the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
	selection: Selection,
	column_count: usize,
	len: usize,
	prompt_selectable: bool,
}

impl Navigator {
	pub fn new(len: usize, column_count: usize, prompt_selectable: bool) -> Self {
		let mut navigator = Self {
			selection: Selection::Candidate(0),
			column_count: column_count.max(1),
			len,
			prompt_selectable,
		};
		navigator.clamp();
		navigator
	}

	pub fn selection(&self) -> Selection {
		self.selection
	}

	/// Selected candidate index, if it names an existing candidate.
	pub fn index(&self) -> Option<usize> {
		match self.selection {
			Selection::Candidate(index) if index < self.len => Some(index),
			_ => None,
		}
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn column_count(&self) -> usize {
		self.column_count
	}

	pub fn prompt_selectable(&self) -> bool {
		self.prompt_selectable
	}

	/// Adopt the column count of a fresh layout pass.
	pub fn set_column_count(&mut self, column_count: usize) {
		self.column_count = column_count.max(1);
	}

	/// Adopt a new candidate count, clamping the selection into range.
	pub fn set_len(&mut self, len: usize) {
		self.len = len;
		self.clamp();
	}

	/// Select `selection`, clamped into the valid range.
	pub fn select(&mut self, selection: Selection) {
		self.selection = selection;
		self.clamp();
	}

	/// Move down (`step > 0`) or up (`step < 0`) by whole grid rows.
	pub fn move_vertically_by(&mut self, step: isize) {
		if step > 0 {
			self.move_down(step.unsigned_abs());
		} else if step < 0 {
			self.move_up(step.unsigned_abs());
		}
	}

	/// Shift the selection sequentially by `step` candidates.
	pub fn move_horizontally_by(&mut self, step: isize) {
		let Some(max) = self.max_offset() else {
			return;
		};
		let target = self.selection.offset().saturating_add(step);
		self.selection = Selection::from_offset(target.clamp(self.min_offset(), max));
	}

	fn move_down(&mut self, rows: usize) {
		if self.len == 0 {
			return;
		}
		let current = match self.selection {
			Selection::Prompt => {
				self.selection = Selection::Candidate(0);
				return;
			}
			Selection::Candidate(index) => index,
		};
		let stride = rows.saturating_mul(self.column_count);
		let max = self.len - 1;
		let column_max = max - (max - current) % stride;
		self.selection = Selection::Candidate(column_max.min(current.saturating_add(stride)));
	}

	fn move_up(&mut self, rows: usize) {
		let current = match self.selection {
			Selection::Prompt => return,
			Selection::Candidate(index) => index,
		};
		if current == 0 && self.prompt_selectable {
			self.selection = Selection::Prompt;
			return;
		}
		let stride = rows.saturating_mul(self.column_count);
		let column_min = current % stride;
		self.selection = Selection::Candidate(column_min.max(current.saturating_sub(stride)));
	}

	fn min_offset(&self) -> isize {
		if self.prompt_selectable { -1 } else { 0 }
	}

	/// Largest selectable offset, `None` when nothing at all is selectable.
	fn max_offset(&self) -> Option<isize> {
		match self.len {
			0 if self.prompt_selectable => Some(-1),
			0 => None,
			len => Some(len as isize - 1),
		}
	}

	fn clamp(&mut self) {
		self.selection = match (self.selection, self.max_offset()) {
			(Selection::Prompt, _) if self.prompt_selectable => Selection::Prompt,
			(_, None) => Selection::Candidate(0),
			(selection, Some(max)) => {
				Selection::from_offset(selection.offset().clamp(self.min_offset(), max))
			}
		};
	}
}
