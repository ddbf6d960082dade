use std::io::BufRead;

use anyhow::{Context, Result};
use frz_grid_core::CandidateSource;

use super::matcher;

/// A fixed list of items, fuzzy filtered by the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredList {
	items: Vec<String>,
}

impl FilteredList {
	pub fn new(items: Vec<String>) -> Self {
		Self { items }
	}

	/// Read one item per line, skipping blank lines.
	pub fn from_reader(reader: impl BufRead) -> Result<Self> {
		let mut items = Vec::new();
		for line in reader.lines() {
			let line = line.context("failed to read candidate list")?;
			let line = line.trim_end_matches('\r');
			if !line.trim().is_empty() {
				items.push(line.to_string());
			}
		}
		tracing::debug!(items = items.len(), "read candidate list");
		Ok(Self { items })
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

impl CandidateSource for FilteredList {
	fn candidates(&mut self, query: &str) -> Vec<String> {
		matcher::filter(query, &self.items)
	}
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use super::*;

	#[test]
	fn reads_non_blank_lines() {
		let list = FilteredList::from_reader(Cursor::new("alpha\r\n\n  \nbeta\n")).unwrap();
		assert_eq!(list.len(), 2);
		assert_eq!(list.clone().candidates(""), vec!["alpha", "beta"]);
	}
}
