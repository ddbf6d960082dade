//! Fuzzy filtering of candidate names.

use frizbee::{Config, match_list};

/// Lists at least this long are prefiltered before scoring.
pub const PREFILTER_ENABLE_THRESHOLD: usize = 1_000;

/// Builds fuzzy matching options for the provided query and list size.
pub fn config_for_query(query: &str, dataset_len: usize) -> Config {
	let mut config = Config {
		prefilter: false,
		..Config::default()
	};

	let length = query.chars().count();
	let mut allowed_typos: u16 = match length {
		0 | 1 => 0,
		2..=4 => 1,
		5..=7 => 2,
		8..=12 => 3,
		_ => 4,
	};
	if let Ok(max_reasonable) = u16::try_from(length.saturating_sub(1)) {
		allowed_typos = allowed_typos.min(max_reasonable);
	}

	config.prefilter = dataset_len >= PREFILTER_ENABLE_THRESHOLD;
	config.max_typos = Some(allowed_typos);
	config.sort = false;
	config
}

/// Filter `items` by `query`, best match first.
///
/// Equal scores keep their original relative order, and an empty query keeps
/// every item in its original order.
pub fn filter<S: AsRef<str>>(query: &str, items: &[S]) -> Vec<String> {
	let query = query.trim();
	if query.is_empty() {
		return items.iter().map(|item| item.as_ref().to_string()).collect();
	}

	let haystacks: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
	let config = config_for_query(query, haystacks.len());
	let mut ranked: Vec<(u16, usize)> = match_list(query, &haystacks, &config)
		.into_iter()
		.filter(|entry| entry.score > 0)
		.map(|entry| (entry.score, entry.index as usize))
		.collect();
	ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
	ranked
		.into_iter()
		.map(|(_, index)| haystacks[index].to_string())
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn typo_budget_grows_with_the_query() {
		let config = config_for_query("a", PREFILTER_ENABLE_THRESHOLD);
		assert!(config.prefilter);
		assert_eq!(config.max_typos, Some(0));

		let config = config_for_query("grid", PREFILTER_ENABLE_THRESHOLD);
		assert_eq!(config.max_typos, Some(1));

		let config = config_for_query("grid", 10);
		assert!(!config.prefilter);
		assert_eq!(config.max_typos, Some(1));
	}

	#[test]
	fn empty_query_keeps_order() {
		let items = ["b", "a", "c"];
		assert_eq!(filter("  ", &items), vec!["b", "a", "c"]);
	}

	#[test]
	fn non_matching_items_are_dropped() {
		let items = ["cargo.toml", "src/", "readme.md"];
		let matched = filter("src", &items);
		assert_eq!(matched.first().map(String::as_str), Some("src/"));
		assert!(!matched.iter().any(|item| item == "readme.md"));
	}
}
