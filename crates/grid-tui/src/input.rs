use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};
use unicode_width::UnicodeWidthStr;

/// Single-line editor for the session query.
#[derive(Debug, Clone)]
pub struct QueryInput<'a> {
	textarea: TextArea<'a>,
}

impl Default for QueryInput<'_> {
	fn default() -> Self {
		Self::new("")
	}
}

impl QueryInput<'_> {
	pub fn new(text: impl Into<String>) -> Self {
		let mut textarea = TextArea::new(vec![text.into()]);
		textarea.set_cursor_line_style(Style::default());
		// The terminal cursor marks the insertion point.
		textarea.set_cursor_style(Style::default());
		textarea.move_cursor(CursorMove::End);
		Self { textarea }
	}

	pub fn text(&self) -> &str {
		self.textarea
			.lines()
			.first()
			.map(String::as_str)
			.unwrap_or_default()
	}

	/// Display width of the text left of the cursor.
	pub fn cursor_width(&self) -> usize {
		let text = self.text();
		let (_, column) = self.textarea.cursor();
		let end = text
			.char_indices()
			.nth(column)
			.map_or(text.len(), |(index, _)| index);
		text[..end].width()
	}

	/// Apply an editing key. Returns whether the text changed.
	///
	/// Keys that are not editing keys are left for the caller.
	pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		let alt = key.modifiers.contains(KeyModifiers::ALT);
		let textarea = &mut self.textarea;
		match key.code {
			KeyCode::Char('a') if ctrl => {
				textarea.move_cursor(CursorMove::Head);
				false
			}
			KeyCode::Char('e') if ctrl => {
				textarea.move_cursor(CursorMove::End);
				false
			}
			KeyCode::Char('u') if ctrl => textarea.delete_line_by_head(),
			KeyCode::Char('k') if ctrl => textarea.delete_line_by_end(),
			KeyCode::Char('w') if ctrl => textarea.delete_word(),
			KeyCode::Char(c) if !ctrl && !alt => {
				textarea.insert_char(c);
				true
			}
			KeyCode::Backspace => textarea.delete_char(),
			KeyCode::Delete => textarea.delete_next_char(),
			KeyCode::Left => {
				textarea.move_cursor(CursorMove::Back);
				false
			}
			KeyCode::Right => {
				textarea.move_cursor(CursorMove::Forward);
				false
			}
			KeyCode::Home => {
				textarea.move_cursor(CursorMove::Head);
				false
			}
			KeyCode::End => {
				textarea.move_cursor(CursorMove::End);
				false
			}
			_ => false,
		}
	}

	/// Draw the query into `area` with `style`.
	pub fn render_textarea(&self, frame: &mut Frame, area: Rect, style: Style) {
		let mut textarea = self.textarea.clone();
		textarea.set_style(style);
		frame.render_widget(&textarea, area);
	}
}

#[cfg(test)]
mod tests {
	use ratatui::Terminal;
	use ratatui::backend::TestBackend;
	use ratatui::layout::Position;

	use super::*;

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	fn ctrl(c: char) -> KeyEvent {
		KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
	}

	#[test]
	fn inserts_at_the_cursor() {
		let mut input = QueryInput::new("ac");
		input.handle_key(&key(KeyCode::Left));
		assert!(input.handle_key(&key(KeyCode::Char('b'))));
		assert_eq!(input.text(), "abc");
		assert_eq!(input.cursor_width(), 2);
	}

	#[test]
	fn backspace_removes_whole_characters() {
		let mut input = QueryInput::new("añ");
		assert!(input.handle_key(&key(KeyCode::Backspace)));
		assert_eq!(input.text(), "a");
		input.handle_key(&key(KeyCode::Backspace));
		assert!(!input.handle_key(&key(KeyCode::Backspace)));
		assert_eq!(input.text(), "");
	}

	#[test]
	fn ctrl_w_deletes_the_last_word() {
		let mut input = QueryInput::new("src/grid ");
		assert!(input.handle_key(&ctrl('w')));
		assert_eq!(input.text(), "src/");
	}

	#[test]
	fn control_chords_are_not_typed() {
		let mut input = QueryInput::new("abc");
		assert!(!input.handle_key(&ctrl('n')));
		assert!(!input.handle_key(&KeyEvent::new(KeyCode::Char('j'), KeyModifiers::ALT)));
		assert!(!input.handle_key(&key(KeyCode::Enter)));
		assert_eq!(input.text(), "abc");
	}

	#[test]
	fn kill_to_start_and_end() {
		let mut input = QueryInput::new("abcd");
		input.handle_key(&key(KeyCode::Left));
		input.handle_key(&key(KeyCode::Left));
		assert!(input.handle_key(&ctrl('k')));
		assert_eq!(input.text(), "ab");
		assert!(input.handle_key(&ctrl('u')));
		assert_eq!(input.text(), "");
	}

	#[test]
	fn cursor_width_counts_display_cells() {
		let mut input = QueryInput::new("日本");
		assert_eq!(input.cursor_width(), 4);
		input.handle_key(&ctrl('a'));
		assert_eq!(input.cursor_width(), 0);
	}

	#[test]
	fn renders_the_query_text() {
		let input = QueryInput::new("main");
		let mut terminal = Terminal::new(TestBackend::new(8, 1)).expect("test terminal");
		terminal
			.draw(|frame| input.render_textarea(frame, frame.area(), Style::default()))
			.expect("draw");
		let buffer = terminal.backend().buffer();
		let text: String = (0..4)
			.map(|x| buffer[Position::new(x, 0)].symbol())
			.collect();
		assert_eq!(text, "main");
	}
}
