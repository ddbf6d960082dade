use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail, ensure};
use frz_grid_core::{Operation, TreeLabeler};
use frz_grid_tui::{KeySpec, Keymap, Theme};
use serde::Deserialize;

use super::resolved::{ActionConfig, CandidateInput, ResolvedConfig};
use crate::cli::CliArgs;

const DEFAULT_JUMP_KEYS: &str = "asdfghjkl";
const DEFAULT_THEME: &str = "slate";

/// Mirror of the configuration files before CLI overrides and validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	grid: GridSection,
	jump: JumpSection,
	/// Operation name to the keys that run it.
	keys: BTreeMap<String, KeyList>,
	actions: Vec<ActionSection>,
	browse: BrowseSection,
	#[serde(skip)]
	stdin: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct GridSection {
	max_columns: Option<usize>,
	prompt_selectable: Option<bool>,
	separator: Option<bool>,
	max_height: Option<usize>,
	title: Option<String>,
	query: Option<String>,
	theme: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct JumpSection {
	keys: Option<String>,
	cancel_key: Option<KeyList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct BrowseSection {
	root: Option<PathBuf>,
	include_hidden: Option<bool>,
	git_ignore: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
struct ActionSection {
	key: String,
	name: String,
	#[serde(default)]
	description: Option<String>,
}

/// A single key spec or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum KeyList {
	One(String),
	Many(Vec<String>),
}

impl KeyList {
	fn specs(&self) -> Vec<&str> {
		match self {
			KeyList::One(spec) => vec![spec.as_str()],
			KeyList::Many(specs) => specs.iter().map(String::as_str).collect(),
		}
	}

	fn parse(&self, setting: &str) -> Result<Vec<KeySpec>> {
		self.specs()
			.into_iter()
			.map(|spec| {
				spec.parse::<KeySpec>()
					.with_context(|| format!("invalid key `{spec}` for {setting}"))
			})
			.collect()
	}
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(root) = cli.root.clone() {
			self.browse.root = Some(root);
		}
		if let Some(value) = cli.hidden {
			self.browse.include_hidden = Some(value);
		}
		if let Some(value) = cli.columns {
			self.grid.max_columns = Some(value);
		}
		if let Some(value) = cli.max_height {
			self.grid.max_height = Some(value);
		}
		if let Some(value) = cli.prompt_selectable {
			self.grid.prompt_selectable = Some(value);
		}
		if let Some(title) = cli.title.clone() {
			self.grid.title = Some(title);
		}
		if let Some(query) = cli.query.clone() {
			self.grid.query = Some(query);
		}
		if let Some(theme) = cli.theme.clone() {
			self.grid.theme = Some(theme);
		}
		if let Some(keys) = cli.jump_keys.clone() {
			self.jump.keys = Some(keys);
		}
		self.stdin = cli.stdin;
	}

	/// Validate and fill defaults.
	pub(super) fn resolve(self) -> Result<ResolvedConfig> {
		let input = if self.stdin {
			CandidateInput::Stdin
		} else {
			CandidateInput::Directory {
				root: resolve_root(self.browse.root)?,
			}
		};

		if let Some(columns) = self.grid.max_columns {
			ensure!(columns > 0, "grid.max_columns must be at least 1");
		}
		if let Some(rows) = self.grid.max_height {
			ensure!(rows > 0, "grid.max_height must be at least 1");
		}

		let jump_keys = self
			.jump
			.keys
			.unwrap_or_else(|| DEFAULT_JUMP_KEYS.to_string());
		TreeLabeler::new(jump_keys.chars())
			.with_context(|| format!("invalid jump keys `{jump_keys}`"))?;

		let theme_name = self
			.grid
			.theme
			.unwrap_or_else(|| DEFAULT_THEME.to_string());
		let Some(theme) = Theme::by_name(&theme_name) else {
			let known: Vec<_> = Theme::names().collect();
			bail!("unknown theme `{theme_name}` (known: {})", known.join(", "));
		};

		let mut keymap = Keymap::default();
		for (name, keys) in &self.keys {
			let operation: Operation = name.parse()?;
			keymap.bind(operation, keys.parse(&format!("keys.{name}"))?);
		}
		if let Some(cancel) = &self.jump.cancel_key {
			keymap.set_jump_cancel(cancel.parse("jump.cancel_key")?);
		}

		let actions = self
			.actions
			.into_iter()
			.map(ActionSection::resolve)
			.collect::<Result<Vec<_>>>()?;

		Ok(ResolvedConfig {
			input,
			include_hidden: self.browse.include_hidden.unwrap_or(false),
			git_ignore: self.browse.git_ignore.unwrap_or(true),
			title: self.grid.title,
			query: self.grid.query.unwrap_or_default(),
			max_columns: self.grid.max_columns,
			prompt_selectable: self.grid.prompt_selectable.unwrap_or(false),
			separator: self.grid.separator.unwrap_or(true),
			max_height: self.grid.max_height,
			jump_keys,
			keymap,
			theme_name,
			theme,
			actions,
		})
	}
}

impl ActionSection {
	fn resolve(self) -> Result<ActionConfig> {
		let mut chars = self.key.chars();
		let (Some(key), None) = (chars.next(), chars.next()) else {
			bail!(
				"action `{}` needs a single-character key, got `{}`",
				self.name,
				self.key
			);
		};
		ensure!(!self.name.trim().is_empty(), "action bound to `{key}` has no name");
		Ok(ActionConfig {
			key,
			description: self.description.unwrap_or_else(|| self.name.clone()),
			name: self.name,
		})
	}
}

fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
	let mut root = match root {
		Some(path) => path,
		None => env::current_dir().context("failed to determine working directory")?,
	};
	if root.is_relative() {
		root = env::current_dir()
			.context("failed to resolve current directory for root")?
			.join(root);
	}
	root = fs::canonicalize(&root)
		.with_context(|| format!("failed to canonicalize root {}", root.display()))?;

	let metadata = fs::metadata(&root)
		.with_context(|| format!("failed to inspect root {}", root.display()))?;
	ensure!(metadata.is_dir(), "root must be a directory");
	Ok(root)
}
