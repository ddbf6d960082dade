use anyhow::Result;
use frz_grid_tui::{Outcome, Selected};
use serde_json::json;

/// Print a plain-text representation of the outcome.
pub(crate) fn print_plain(outcome: &Outcome) {
	if !outcome.accepted {
		println!("Cancelled (query: '{}')", outcome.query);
		return;
	}

	match &outcome.selection {
		Some(selected) => println!("{}", selected.path().display()),
		// The prompt itself was accepted.
		None => println!("{}", outcome.query),
	}
}

fn selected_json(selected: &Selected) -> serde_json::Value {
	json!({
		"candidate": selected.candidate,
		"index": selected.index,
		"path": selected.path().display().to_string(),
	})
}

pub(crate) fn format_outcome_json(outcome: &Outcome) -> Result<String> {
	let selection = match &outcome.selection {
		Some(selected) => selected_json(selected),
		None => serde_json::Value::Null,
	};
	let acted: Vec<_> = outcome.acted.iter().map(selected_json).collect();

	let payload = json!({
		"accepted": outcome.accepted,
		"query": outcome.query,
		"selection": selection,
		"action": outcome.action,
		"acted": acted,
	});

	Ok(serde_json::to_string_pretty(&payload)?)
}

pub(crate) fn print_json(outcome: &Outcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use serde_json::Value;

	use super::*;

	#[test]
	fn json_format_includes_selection_and_action() {
		let outcome = Outcome {
			accepted: true,
			query: "ma".into(),
			selection: Some(Selected {
				candidate: "main.rs".into(),
				index: 3,
				context: Some(PathBuf::from("src")),
			}),
			action: Some("edit".into()),
			acted: Vec::new(),
		};

		let json = format_outcome_json(&outcome).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value["selection"]["candidate"], "main.rs");
		assert_eq!(value["selection"]["path"], "src/main.rs");
		assert_eq!(value["action"], "edit");
		assert_eq!(value["acted"], Value::Array(Vec::new()));
	}

	#[test]
	fn cancelled_outcome_has_null_selection() {
		let outcome = Outcome {
			query: "x".into(),
			..Outcome::default()
		};
		let value: Value = serde_json::from_str(&format_outcome_json(&outcome).unwrap()).unwrap();
		assert_eq!(value["accepted"], false);
		assert_eq!(value["selection"], Value::Null);
	}
}
