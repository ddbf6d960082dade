use frz_grid_core::{Mode, Selection, Session};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use super::App;
use crate::panel::GridWidget;

impl App<'_> {
	pub(crate) fn draw(&self, frame: &mut Frame) {
		let area = frame.area().inner(Margin {
			vertical: 0,
			horizontal: 1,
		});
		let Some(session) = self.stack.active() else {
			return;
		};

		let layout = Layout::vertical([
			Constraint::Fill(1),
			Constraint::Length(self.panel.height()),
			Constraint::Length(1),
			Constraint::Length(1),
		])
		.split(area);

		frame.render_widget(GridWidget::new(&self.panel, session, &self.theme), layout[1]);
		self.render_prompt(frame, session, layout[2]);
		frame.render_widget(self.status_line(session), layout[3]);
	}

	fn prompt_prefix(&self, session: &Session) -> String {
		let depth = self.stack.depth();
		let nesting = if depth > 1 {
			format!("[{depth}] ")
		} else {
			String::new()
		};
		match session.title() {
			"" => format!("{nesting}> "),
			title => format!("{nesting}{title}: "),
		}
	}

	fn render_prompt(&self, frame: &mut Frame, session: &Session, area: Rect) {
		let prefix = self.prompt_prefix(session);
		let query_style = match session.selection() {
			Selection::Prompt => self.theme.selected_style(),
			Selection::Candidate(_) => self.theme.grid,
		};
		let prefix_width = prefix.width();
		let cursor_x = area.x as usize + prefix_width + self.input.cursor_width();
		let [prefix_area, input_area] = Layout::horizontal([
			Constraint::Length(u16::try_from(prefix_width).unwrap_or(u16::MAX)),
			Constraint::Fill(1),
		])
		.areas(area);
		frame.render_widget(Span::styled(prefix, self.theme.prompt), prefix_area);
		self.input.render_textarea(frame, input_area, query_style);

		if matches!(session.mode(), Mode::Browsing) && cursor_x < usize::from(area.right()) {
			frame.set_cursor_position(Position::new(cursor_x as u16, area.y));
		}
	}

	fn status_line(&self, session: &Session) -> Paragraph<'static> {
		let line = match session.mode() {
			Mode::Dispatching { index } => {
				let candidate = session.candidates().get(*index).cloned().unwrap_or_default();
				let mut spans = vec![Span::styled(format!("{candidate}: "), self.theme.prompt)];
				for entry in session.dispatch_entries() {
					spans.push(Span::styled(format!("[{}]", entry.key), self.theme.label_style()));
					spans.push(Span::styled(format!(" {}  ", entry.name), self.theme.status));
				}
				Line::from(spans)
			}
			Mode::Jumping(pending) => Line::from(vec![
				Span::styled("jump: ", self.theme.prompt),
				Span::styled(pending.typed().to_string(), self.theme.label_style()),
				Span::styled(
					format!("  {} targets", pending.matching().count()),
					self.theme.status,
				),
			]),
			Mode::Browsing => match &self.status {
				Some(status) if status.is_error => {
					Line::styled(status.message.clone(), self.theme.error)
				}
				Some(status) => Line::styled(status.message.clone(), self.theme.status),
				None => Line::styled(
					format!("{} candidates", session.candidates().len()),
					self.theme.status,
				),
			},
		};
		Paragraph::new(line)
	}
}
