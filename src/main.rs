mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use workflow::SearchWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();
	frisk::logging::initialize(cli.verbose);

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let results = SearchWorkflow::from_config(resolved).run()?;

	match cli.output {
		OutputFormat::Plain => print_plain(&results)?,
		OutputFormat::Json => print_json(&results)?,
	}

	Ok(())
}
