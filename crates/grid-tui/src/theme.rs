use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
	pub grid: Style,
	pub selected: Style,
	pub label: Style,
	pub separator: Style,
	pub prompt: Style,
	pub status: Style,
	pub error: Style,
}

impl Theme {
	#[must_use]
	pub fn selected_style(&self) -> Style {
		self.grid.patch(self.selected)
	}

	#[must_use]
	pub fn label_style(&self) -> Style {
		self.label
	}

	/// Look up a bundled theme, ignoring case.
	pub fn by_name(name: &str) -> Option<Theme> {
		BUILTINS
			.iter()
			.find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
			.map(|(_, theme)| *theme)
	}

	pub fn names() -> impl Iterator<Item = &'static str> {
		BUILTINS.iter().map(|(name, _)| *name)
	}
}

impl Default for Theme {
	fn default() -> Self {
		SLATE
	}
}

pub const SLATE: Theme = Theme {
	grid: Style::new().fg(Color::Rgb(203, 213, 225)),
	selected: Style::new()
		.fg(Color::Rgb(15, 23, 42))
		.bg(Color::Rgb(148, 163, 184))
		.add_modifier(Modifier::BOLD),
	label: Style::new()
		.fg(Color::Rgb(250, 204, 21))
		.bg(Color::Rgb(30, 41, 59))
		.add_modifier(Modifier::BOLD),
	separator: Style::new().fg(Color::Rgb(71, 85, 105)),
	prompt: Style::new().fg(Color::Rgb(125, 211, 252)),
	status: Style::new().fg(Color::Rgb(100, 116, 139)),
	error: Style::new().fg(Color::Rgb(248, 113, 113)),
};

pub const LIGHT: Theme = Theme {
	grid: Style::new().fg(Color::Rgb(15, 23, 42)),
	selected: Style::new()
		.bg(Color::Rgb(200, 200, 200))
		.fg(Color::Rgb(120, 120, 0)),
	label: Style::new()
		.fg(Color::Rgb(255, 255, 255))
		.bg(Color::Rgb(0, 102, 153))
		.add_modifier(Modifier::BOLD),
	separator: Style::new().fg(Color::Rgb(148, 163, 184)),
	prompt: Style::new().fg(Color::Rgb(0, 102, 153)),
	status: Style::new().fg(Color::Rgb(100, 100, 100)),
	error: Style::new().fg(Color::Rgb(185, 28, 28)),
};

const BUILTINS: [(&str, Theme); 2] = [("slate", SLATE), ("light", LIGHT)];

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn looks_themes_up_by_name() {
		assert_eq!(Theme::by_name("Light"), Some(LIGHT));
		assert_eq!(Theme::by_name("slate"), Some(Theme::default()));
		assert_eq!(Theme::by_name("neon"), None);
	}
}
