mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use frz_grid::logging;
use frz_grid_tui::Theme;
use settings::ResolvedConfig;
use workflow::GridWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();

	if cli.list_themes {
		for name in Theme::names() {
			println!("{name}");
		}
		return Ok(());
	}

	let _log_guard = logging::initialize()?;
	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	run_grid(cli.output, resolved)
}

/// Run the overlay and print its outcome in the chosen format.
fn run_grid(format: OutputFormat, settings: ResolvedConfig) -> Result<()> {
	let workflow = GridWorkflow::from_config(settings)?;
	let outcome = workflow.run()?;
	tracing::info!(
		accepted = outcome.accepted,
		action = ?outcome.action,
		acted = outcome.acted.len(),
		"overlay closed"
	);

	match format {
		OutputFormat::Plain => print_plain(&outcome),
		OutputFormat::Json => print_json(&outcome)?,
	}

	Ok(())
}
