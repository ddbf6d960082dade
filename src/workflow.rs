use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use directories::BaseDirs;
use frz_grid::sources::{
	DirectoryListing, FilteredList, ListingOptions, SELF_ENTRY, resolve_directory,
};
use frz_grid_core::{
	ActionMenu, ActionResult, CandidateSource, Session, SessionBuilder, TreeLabeler,
};
use frz_grid_tui::{App, Outcome, SessionOpener};

use crate::settings::{ActionConfig, CandidateInput, ResolvedConfig};

/// Width used for the first layout pass, before the terminal size is known.
const INITIAL_WIDTH: usize = 80;

/// Session settings shared by the root session and every nested one.
#[derive(Debug, Clone)]
struct SessionTemplate {
	column_cap: Option<usize>,
	prompt_selectable: bool,
	jump_keys: String,
	actions: Vec<ActionConfig>,
}

impl SessionTemplate {
	fn from_config(config: &ResolvedConfig) -> Self {
		let actions = if config.actions.is_empty() {
			default_actions()
		} else {
			config.actions.clone()
		};
		Self {
			column_cap: config.max_columns,
			prompt_selectable: config.prompt_selectable,
			jump_keys: config.jump_keys.clone(),
			actions,
		}
	}

	fn menu(&self) -> ActionMenu {
		self.actions.iter().fold(ActionMenu::new(), |menu, action| {
			let name = action.name.clone();
			menu.with_action(
				action.key,
				action.name.clone(),
				action.description.clone(),
				move |_, _| ActionResult::Accept {
					action: name.clone(),
				},
			)
		})
	}

	fn builder(
		&self,
		source: impl CandidateSource + 'static,
		title: String,
		query: &str,
	) -> Result<SessionBuilder> {
		let labels = TreeLabeler::new(self.jump_keys.chars())
			.with_context(|| format!("invalid jump keys `{}`", self.jump_keys))?;
		Ok(Session::builder(source)
			.title(title)
			.query(query)
			.column_cap(self.column_cap)
			.prompt_selectable(self.prompt_selectable)
			.labels(Box::new(labels))
			.dispatcher(Box::new(self.menu())))
	}

	fn directory_session(
		&self,
		listing: DirectoryListing,
		title: Option<String>,
		query: &str,
		width: usize,
	) -> Result<Session> {
		let root = listing.root().to_path_buf();
		let title = title.unwrap_or_else(|| display_title(&root));
		Ok(self
			.builder(listing, title, query)?
			.context(root)
			.self_entry(SELF_ENTRY)
			.build(width))
	}
}

fn default_actions() -> Vec<ActionConfig> {
	vec![
		ActionConfig {
			key: 'o',
			name: "open".into(),
			description: "Open the candidate".into(),
		},
		ActionConfig {
			key: 'e',
			name: "edit".into(),
			description: "Edit the candidate".into(),
		},
	]
}

/// Directory path for a prompt title, with the home directory shown as `~`.
fn display_title(path: &Path) -> String {
	let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
	match home.as_deref().and_then(|home| path.strip_prefix(home).ok()) {
		Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
		Some(rest) => format!("~/{}", rest.display()),
		None => path.display().to_string(),
	}
}

/// Opens directory candidates as nested sessions.
struct DirectoryOpener {
	template: SessionTemplate,
	options: ListingOptions,
}

impl SessionOpener for DirectoryOpener {
	fn open(&mut self, parent: &Session, index: usize, width: usize) -> Result<Option<Session>> {
		let (Some(root), Some(candidate)) = (parent.context(), parent.candidates().get(index))
		else {
			return Ok(None);
		};
		let Some(directory) = resolve_directory(root, candidate) else {
			return Ok(None);
		};
		let directory = directory
			.canonicalize()
			.with_context(|| format!("failed to resolve {}", directory.display()))?;
		let listing = DirectoryListing::read(&directory, self.options)?;
		tracing::info!(directory = %directory.display(), "opening nested session");
		self.template
			.directory_session(listing, None, "", width)
			.map(Some)
	}
}

/// Coordinates building and running the overlay from resolved settings.
pub(crate) struct GridWorkflow {
	app: App<'static>,
}

impl GridWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
		let template = SessionTemplate::from_config(&config);
		let options = ListingOptions {
			include_hidden: config.include_hidden,
			git_ignore: config.git_ignore,
		};

		let app = match &config.input {
			CandidateInput::Directory { root } => {
				let listing = DirectoryListing::read(root, options)?;
				let session = template.directory_session(
					listing,
					config.title.clone(),
					&config.query,
					INITIAL_WIDTH,
				)?;
				App::new(session).with_opener(Box::new(DirectoryOpener {
					template: template.clone(),
					options,
				}))
			}
			CandidateInput::Stdin => {
				let list = FilteredList::from_reader(io::stdin().lock())?;
				tracing::info!(candidates = list.len(), "read candidates from stdin");
				let title = config.title.clone().unwrap_or_default();
				App::new(
					template
						.builder(list, title, &config.query)?
						.build(INITIAL_WIDTH),
				)
			}
		};

		let app = app
			.with_keymap(config.keymap)
			.with_theme(config.theme)
			.with_separator(config.separator)
			.with_max_height(config.max_height);
		Ok(Self { app })
	}

	pub(crate) fn run(self) -> Result<Outcome> {
		let outcome = frz_grid_tui::run(self.app)?;
		for selected in &outcome.acted {
			tracing::info!(
				candidate = %selected.candidate,
				path = %selected.path().display(),
				"acted"
			);
		}
		Ok(outcome)
	}
}
