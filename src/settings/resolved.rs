use std::path::PathBuf;

use frz_grid_core::layout::DEFAULT_COLUMN_CAP;
use frz_grid_tui::{Keymap, Theme};

/// Where candidates come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateInput {
	/// Browse this directory, one level at a time.
	Directory { root: PathBuf },
	/// Pick from lines read on standard input.
	Stdin,
}

/// An entry of the jump-and-dispatch menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionConfig {
	pub key: char,
	pub name: String,
	pub description: String,
}

/// Application-ready configuration.
#[derive(Debug)]
pub struct ResolvedConfig {
	pub input: CandidateInput,
	pub include_hidden: bool,
	pub git_ignore: bool,
	pub title: Option<String>,
	pub query: String,
	pub max_columns: Option<usize>,
	pub prompt_selectable: bool,
	pub separator: bool,
	pub max_height: Option<usize>,
	pub jump_keys: String,
	pub keymap: Keymap,
	pub theme_name: String,
	pub theme: Theme,
	pub actions: Vec<ActionConfig>,
}

impl ResolvedConfig {
	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		println!("Effective configuration:");
		match &self.input {
			CandidateInput::Directory { root } => println!("  Root: {}", root.display()),
			CandidateInput::Stdin => println!("  Candidates: standard input"),
		}
		println!("  Include hidden: {}", bool_to_word(self.include_hidden));
		println!("  Git ignore: {}", bool_to_word(self.git_ignore));
		println!(
			"  Max columns: {}",
			self.max_columns.unwrap_or(DEFAULT_COLUMN_CAP)
		);
		match self.max_height {
			Some(rows) => println!("  Max height: {rows} rows"),
			None => println!("  Max height: fit the terminal"),
		}
		println!(
			"  Prompt selectable: {}",
			bool_to_word(self.prompt_selectable)
		);
		println!("  Separator: {}", bool_to_word(self.separator));
		println!("  Jump keys: {}", self.jump_keys);
		println!("  Theme: {}", self.theme_name);
		if let Some(title) = &self.title {
			println!("  Prompt title: {title}");
		}
		if !self.query.is_empty() {
			println!("  Initial query: {}", self.query);
		}
		if self.actions.is_empty() {
			println!("  Actions: (defaults)");
		}
		for action in &self.actions {
			println!("  Action [{}]: {} ({})", action.key, action.name, action.description);
		}
	}
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bool_to_word_matches_expectations() {
		assert_eq!(bool_to_word(true), "yes");
		assert_eq!(bool_to_word(false), "no");
	}
}
