use std::io::{self, Write};

use anyhow::Result;
use frisk::ResultSet;
use serde_json::json;

/// Print one result per line, best first.
pub(crate) fn print_plain(results: &ResultSet<String>) -> Result<()> {
	let mut out = io::BufWriter::new(io::stdout().lock());
	for item in &results.items {
		writeln!(out, "{}", item.text())?;
	}
	out.flush()?;
	Ok(())
}

/// Format the result set as a JSON document.
pub(crate) fn format_results_json(results: &ResultSet<String>) -> Result<String> {
	let items: Vec<_> = results
		.items
		.iter()
		.map(|item| {
			json!({
				"text": item.text(),
				"index": item.index(),
				"positions": item.positions(),
			})
		})
		.collect();

	let payload = json!({
		"query": results.query,
		"items": items,
		"items_read": results.items_read,
		"items_scored": results.items_scored,
	});

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the result set.
pub(crate) fn print_json(results: &ResultSet<String>) -> Result<()> {
	println!("{}", format_results_json(results)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use frisk::{PassKind, QueryDefinition, SearchOptions, Session};
	use serde_json::Value;

	use super::*;

	fn ranked(query: &str, lines: &[&str]) -> std::sync::Arc<ResultSet<String>> {
		let (session, updates) = Session::<String>::new(QueryDefinition::default(), SearchOptions::default())
			.expect("session");
		let injector = session.injector().expect("injector");
		injector.extend(lines.iter().map(|line| line.to_string()));
		drop(injector);
		let generation = session.set_query(query);
		updates
			.iter()
			.find(|update| update.complete && update.id == generation)
			.map(|update| update.payload)
			.expect("complete update")
	}

	#[test]
	fn json_lists_text_positions_and_counters() {
		let results = ranked("fb", &["foo/bar", "nothing"]);
		assert_eq!(results.kind, PassKind::Ranked);

		let json = format_results_json(&results).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value["query"], "fb");
		assert_eq!(value["items"][0]["text"], "foo/bar");
		assert_eq!(value["items"][0]["positions"], json!([4, 0]));
		assert_eq!(value["items_read"], 2);
		assert_eq!(value["items_scored"], 1);
		assert!(value["items"][0].get("score").is_none());
	}
}
