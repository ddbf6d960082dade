//! One directory level as a candidate list.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use frz_grid_core::CandidateSource;
use ignore::WalkBuilder;

use super::matcher;

/// Candidate naming the listed directory itself.
pub const SELF_ENTRY: &str = "./";
/// Candidate naming the parent directory.
pub const PARENT_ENTRY: &str = "../";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOptions {
	pub include_hidden: bool,
	pub git_ignore: bool,
}

impl Default for ListingOptions {
	fn default() -> Self {
		Self {
			include_hidden: false,
			git_ignore: true,
		}
	}
}

/// The entries of one directory, directories first and suffixed with `/`.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
	root: PathBuf,
	has_parent: bool,
	entries: Vec<String>,
}

impl DirectoryListing {
	pub fn read(root: impl Into<PathBuf>, options: ListingOptions) -> Result<Self> {
		let root = root.into();
		let metadata = std::fs::metadata(&root)
			.with_context(|| format!("failed to inspect {}", root.display()))?;
		ensure!(metadata.is_dir(), "{} is not a directory", root.display());

		let mut directories = Vec::new();
		let mut files = Vec::new();
		let walker = WalkBuilder::new(&root)
			.hidden(!options.include_hidden)
			.git_ignore(options.git_ignore)
			.git_exclude(options.git_ignore)
			.max_depth(Some(1))
			.build();
		for entry in walker {
			let entry = match entry {
				Ok(entry) => entry,
				Err(error) => {
					tracing::debug!(%error, root = %root.display(), "skipping unreadable entry");
					continue;
				}
			};
			if entry.depth() == 0 {
				continue;
			}
			let name = entry.file_name().to_string_lossy().into_owned();
			// Symlinks to directories browse like directories.
			if entry.path().is_dir() {
				directories.push(format!("{name}/"));
			} else {
				files.push(name);
			}
		}
		directories.sort();
		files.sort();

		let has_parent = root.parent().is_some();
		tracing::debug!(
			root = %root.display(),
			directories = directories.len(),
			files = files.len(),
			"listed directory"
		);
		directories.append(&mut files);
		Ok(Self {
			root,
			has_parent,
			entries: directories,
		})
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Directory entries without the `./` and `../` navigation entries.
	pub fn entries(&self) -> &[String] {
		&self.entries
	}
}

impl CandidateSource for DirectoryListing {
	fn candidates(&mut self, query: &str) -> Vec<String> {
		let mut candidates = vec![SELF_ENTRY.to_string()];
		if self.has_parent {
			candidates.push(PARENT_ENTRY.to_string());
		}
		candidates.extend(matcher::filter(query, &self.entries));
		candidates
	}
}

/// Resolve a candidate of a listing rooted at `root` to the directory it
/// names, or `None` when it names something else.
pub fn resolve_directory(root: &Path, candidate: &str) -> Option<PathBuf> {
	let path = match candidate {
		SELF_ENTRY => root.to_path_buf(),
		PARENT_ENTRY => root.parent()?.to_path_buf(),
		name => root.join(name.trim_end_matches('/')),
	};
	path.is_dir().then_some(path)
}

#[cfg(test)]
mod tests {
	use std::fs;

	use pretty_assertions::assert_eq;
	use tempfile::tempdir;

	use super::*;

	fn fixture() -> tempfile::TempDir {
		let dir = tempdir().expect("tempdir");
		fs::create_dir(dir.path().join("b_dir")).unwrap();
		fs::create_dir(dir.path().join("a_dir")).unwrap();
		fs::write(dir.path().join("z.txt"), "z").unwrap();
		fs::write(dir.path().join("m.rs"), "m").unwrap();
		fs::write(dir.path().join(".hidden"), "h").unwrap();
		dir
	}

	#[test]
	fn lists_directories_first_behind_navigation_entries() {
		let dir = fixture();
		let mut listing = DirectoryListing::read(dir.path(), ListingOptions::default()).unwrap();
		assert_eq!(
			listing.candidates(""),
			vec!["./", "../", "a_dir/", "b_dir/", "m.rs", "z.txt"]
		);
	}

	#[test]
	fn hidden_entries_are_opt_in() {
		let dir = fixture();
		let options = ListingOptions {
			include_hidden: true,
			..ListingOptions::default()
		};
		let listing = DirectoryListing::read(dir.path(), options).unwrap();
		assert!(listing.entries().iter().any(|entry| entry == ".hidden"));
	}

	#[test]
	fn query_filters_entries_but_keeps_navigation() {
		let dir = fixture();
		let mut listing = DirectoryListing::read(dir.path(), ListingOptions::default()).unwrap();
		assert_eq!(listing.candidates("txt"), vec!["./", "../", "z.txt"]);
	}

	#[test]
	fn files_are_not_listable() {
		let dir = fixture();
		let error = DirectoryListing::read(dir.path().join("m.rs"), ListingOptions::default())
			.unwrap_err();
		assert!(error.to_string().contains("is not a directory"));
	}

	#[test]
	fn resolves_navigation_and_directory_candidates() {
		let dir = fixture();
		let root = dir.path();
		assert_eq!(resolve_directory(root, "./"), Some(root.to_path_buf()));
		assert_eq!(resolve_directory(root, "../"), root.parent().map(Path::to_path_buf));
		assert_eq!(resolve_directory(root, "a_dir/"), Some(root.join("a_dir")));
		assert_eq!(resolve_directory(root, "m.rs"), None);
	}
}
