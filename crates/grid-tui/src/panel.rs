//! The bottom-of-screen region the grid is drawn into.

use frz_grid_core::{RenderSurface, Session};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// Holds the text last handed to the screen and sizes the region to it.
#[derive(Debug, Clone, Default)]
pub struct GridPanel {
	text: String,
	lines: usize,
	separator: bool,
	shown: bool,
}

impl GridPanel {
	/// `separator` reserves a rule line above the grid.
	pub fn new(separator: bool) -> Self {
		Self {
			separator,
			..Self::default()
		}
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn has_separator(&self) -> bool {
		self.separator
	}

	/// Rows the region needs, separator included.
	pub fn height(&self) -> u16 {
		let height = self.lines + usize::from(self.separator);
		u16::try_from(height).unwrap_or(u16::MAX)
	}
}

impl RenderSurface for GridPanel {
	fn display(&mut self, text: &str, force: bool) -> bool {
		if self.shown && !force && self.text == text {
			return false;
		}
		self.text.clear();
		self.text.push_str(text);
		self.lines = if text.is_empty() {
			0
		} else {
			text.split('\n').count()
		};
		self.shown = true;
		true
	}
}

/// Draws the panel text with the selected cell highlighted and, while a
/// jump is pending, the remaining part of each matching label over its cell.
pub struct GridWidget<'a> {
	panel: &'a GridPanel,
	session: &'a Session,
	theme: &'a Theme,
}

impl<'a> GridWidget<'a> {
	pub fn new(panel: &'a GridPanel, session: &'a Session, theme: &'a Theme) -> Self {
		Self {
			panel,
			session,
			theme,
		}
	}
}

impl Widget for GridWidget<'_> {
	fn render(self, area: Rect, buf: &mut Buffer) {
		if area.is_empty() {
			return;
		}
		let mut grid = area;
		if self.panel.has_separator() {
			let rule = "─".repeat(usize::from(area.width));
			buf.set_string(area.x, area.y, rule, self.theme.separator);
			grid.y += 1;
			grid.height = grid.height.saturating_sub(1);
		}

		for (row, line) in self.panel.text().split('\n').enumerate() {
			let Some(y) = row_y(grid, row) else { break };
			buf.set_stringn(grid.x, y, line, usize::from(grid.width), self.theme.grid);
		}

		let first_row = self.session.visible_rows().start;
		if let Some(cell) = self.session.selected_cell() {
			if let (Some(row), true) = (cell.row.checked_sub(first_row), cell.width > 0) {
				if let (Some(y), Some(x)) = (row_y(grid, row), column_x(grid, cell.column)) {
					let width = cell.width.min(usize::from(grid.right() - x));
					let highlight = Rect::new(x, y, width as u16, 1);
					buf.set_style(highlight, self.theme.selected_style());
				}
			}
		}

		if let Some(pending) = self.session.pending_jump() {
			let typed = pending.typed().len();
			for labeled in pending.matching() {
				let position = labeled.target.position;
				let (Some(y), Some(x)) =
					(row_y(grid, position.row), column_x(grid, position.column))
				else {
					continue;
				};
				let rest = &labeled.label[typed..];
				let room = usize::from(grid.right() - x);
				buf.set_stringn(x, y, rest, room.min(rest.width()), self.theme.label_style());
			}
		}
	}
}

fn row_y(area: Rect, row: usize) -> Option<u16> {
	let row = u16::try_from(row).ok()?;
	(row < area.height).then(|| area.y + row)
}

fn column_x(area: Rect, column: usize) -> Option<u16> {
	let column = u16::try_from(column).ok()?;
	(column < area.width).then(|| area.x + column)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn redisplaying_the_same_text_is_a_no_op() {
		let mut panel = GridPanel::new(false);
		assert!(panel.display("a  b\nc", false));
		assert_eq!(panel.height(), 2);
		assert!(!panel.display("a  b\nc", false));
		assert!(panel.display("a  b\nc", true));
		assert!(panel.display("a", false));
		assert_eq!(panel.height(), 1);
	}

	#[test]
	fn separator_adds_a_row() {
		let mut panel = GridPanel::new(true);
		panel.display("", false);
		assert_eq!(panel.height(), 1);
		panel.display("x\ny\nz", false);
		assert_eq!(panel.height(), 4);
	}

	#[test]
	fn first_empty_display_still_counts() {
		let mut panel = GridPanel::new(false);
		assert!(panel.display("", false));
		assert!(!panel.display("", false));
	}
}
