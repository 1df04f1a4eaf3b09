use clap::{CommandFactory, Parser};

use super::options::{AlgorithmArg, CaseArg};
use super::{CliArgs, OutputFormat};

#[test]
fn command_definition_is_consistent() {
	CliArgs::command().debug_assert();
}

#[test]
fn defaults_read_stdin_as_plain_text() {
	let parsed = CliArgs::try_parse_from(["frisk"]).expect("parses");
	assert_eq!(parsed.output, OutputFormat::Plain);
	assert!(parsed.input.is_none() && parsed.cmd.is_none() && parsed.walk.is_none());
	assert_eq!(parsed.verbose, 0);
}

#[test]
fn search_flags_are_parsed() {
	let parsed = CliArgs::try_parse_from([
		"frisk", "-q", "!test", "--case", "respect", "--algo", "greedy", "--min-score", "-5",
		"-vv", "-o", "json",
	])
	.expect("parses");
	assert_eq!(parsed.query.as_deref(), Some("!test"));
	assert_eq!(parsed.case, Some(CaseArg::Respect));
	assert_eq!(parsed.algorithm, Some(AlgorithmArg::Greedy));
	assert_eq!(parsed.min_score, Some(-5));
	assert_eq!(parsed.verbose, 2);
	assert_eq!(parsed.output, OutputFormat::Json);
}

#[test]
fn sources_are_mutually_exclusive() {
	assert!(CliArgs::try_parse_from(["frisk", "--input", "a.txt", "--walk", "."]).is_err());
	assert!(CliArgs::try_parse_from(["frisk", "--reverse"]).is_err());
	assert!(CliArgs::try_parse_from(["frisk", "--input", "a.txt", "--reverse"]).is_ok());
}
