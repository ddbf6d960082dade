use std::fmt::Write;
use std::path::PathBuf;

use clap::{
	ArgAction, ColorChoice, CommandFactory, FromArgMatches, Parser, ValueEnum,
	builder::{
		BoolishValueParser, Styles,
		styling::{AnsiColor, Effects},
	},
};
use frz_grid::{app_dirs, logging};

/// Version banner with the directories the binary reads and writes.
fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};
	let log_file = match logging::log_path() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("frz-grid {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");
	let _ = writeln!(details, "log file: {log_file}");

	Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

pub(crate) fn parse_cli() -> CliArgs {
	let mut matches = CliArgs::command().get_matches();
	CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

#[derive(Parser, Debug, Default)]
#[command(
	name = "frz-grid",
	version,
	long_version = long_version(),
	about = "Pick a file or a line from a column-aligned grid with 2D moves and jump labels",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
/// Command-line arguments accepted by the `frz-grid` binary.
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "FRZ_GRID_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'r',
		long,
		value_name = "PATH",
		help = "Directory to browse (default: current directory)"
	)]
	pub(crate) root: Option<PathBuf>,
	#[arg(
		short = 's',
		long,
		conflicts_with = "root",
		help = "Pick from lines read on standard input instead of browsing (default: disabled)"
	)]
	pub(crate) stdin: bool,
	#[arg(
		short = 'q',
		long,
		value_name = "QUERY",
		help = "Initial query (default: empty)"
	)]
	pub(crate) query: Option<String>,
	#[arg(
		short = 't',
		long,
		value_name = "TITLE",
		help = "Prompt title (default: the browsed directory)"
	)]
	pub(crate) title: Option<String>,
	#[arg(
		short = 'C',
		long,
		value_name = "NUM",
		help = "Maximum number of grid columns (default: 4)"
	)]
	pub(crate) columns: Option<usize>,
	#[arg(
		long = "max-height",
		value_name = "ROWS",
		help = "Maximum number of grid rows shown at once (default: fit the terminal)"
	)]
	pub(crate) max_height: Option<usize>,
	#[arg(
		short = 'H',
		long = "hidden",
		value_parser = BoolishValueParser::new(),
		help = "Include hidden files (default: disabled)"
	)]
	pub(crate) hidden: Option<bool>,
	#[arg(
		long = "prompt-selectable",
		value_parser = BoolishValueParser::new(),
		help = "Let the selection move onto the prompt itself (default: disabled)"
	)]
	pub(crate) prompt_selectable: Option<bool>,
	#[arg(
		short = 'j',
		long = "jump-keys",
		value_name = "KEYS",
		help = "Characters used for jump labels, in priority order (default: asdfghjkl)"
	)]
	pub(crate) jump_keys: Option<String>,
	#[arg(long, value_name = "THEME", help = "Select a theme by name (default: slate)")]
	pub(crate) theme: Option<String>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'l',
		long = "list-themes",
		help = "List supported themes and exit (default: disabled)"
	)]
	pub(crate) list_themes: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how to print the result"
	)]
	pub(crate) output: OutputFormat,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
/// Output formats supported by the CLI utility.
pub(crate) enum OutputFormat {
	#[default]
	Plain,
	Json,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_cli_accepts_default_arguments() {
		let command = CliArgs::command();
		let mut matches = command.get_matches_from(vec!["frz-grid"]);
		let parsed = CliArgs::from_arg_matches_mut(&mut matches).expect("parses");
		assert_eq!(parsed.output, OutputFormat::Plain);
		assert!(!parsed.stdin);
	}

	#[test]
	fn stdin_conflicts_with_root() {
		let result =
			CliArgs::command().try_get_matches_from(["frz-grid", "--stdin", "--root", "."]);
		assert!(result.is_err());
	}

	#[test]
	fn boolish_flags_take_values() {
		let mut matches = CliArgs::command()
			.get_matches_from(["frz-grid", "--hidden", "yes", "--columns", "6", "-o", "json"]);
		let parsed = CliArgs::from_arg_matches_mut(&mut matches).expect("parses");
		assert_eq!(parsed.hidden, Some(true));
		assert_eq!(parsed.columns, Some(6));
		assert_eq!(parsed.output, OutputFormat::Json);
	}
}
