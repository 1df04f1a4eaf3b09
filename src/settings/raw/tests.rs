use std::time::Duration;

use clap::Parser;
use config::{Config, File, FileFormat};
use frisk::{CaseMode, FuzzyAlgorithm};
use tempfile::tempdir;

use super::RawConfig;
use crate::cli::CliArgs;
use crate::settings::InputSource;

fn from_toml(toml: &str) -> RawConfig {
	Config::builder()
		.add_source(File::from_str(toml, FileFormat::Toml))
		.build()
		.expect("config builds")
		.try_deserialize()
		.expect("config deserializes")
}

#[test]
fn cli_overrides_take_precedence() {
	let cli = CliArgs::parse_from([
		"frisk",
		"--case",
		"respect",
		"--algo",
		"greedy",
		"--limit",
		"20",
		"--exact",
		"--hidden",
		"false",
		"--max-depth",
		"3",
		"--extensions",
		"rs,toml",
	]);
	let mut config = from_toml(
		r#"
		[search]
		case = "smart"
		limit = 100
		min_score = 4

		[walk]
		max_depth = 9
		"#,
	);
	config.apply_cli_overrides(&cli);

	assert_eq!(config.search.case.as_deref(), Some("respect"));
	assert_eq!(config.search.algorithm.as_deref(), Some("greedy"));
	assert_eq!(config.search.limit, Some(20));
	assert_eq!(config.search.min_score, Some(4));
	assert_eq!(config.search.exact, Some(true));
	assert_eq!(config.walk.include_hidden, Some(false));
	assert_eq!(config.walk.max_depth, Some(3));
	assert_eq!(
		config.walk.allowed_extensions,
		Some(vec!["rs".to_string(), "toml".to_string()])
	);
}

#[test]
fn resolves_file_values_into_options() {
	let cli = CliArgs::parse_from(["frisk", "-q", "main"]);
	let config = from_toml(
		r#"
		[search]
		case = "Respect"
		algorithm = "greedy"
		debounce_ms = 15
		"#,
	);
	let resolved = config.resolve(&cli).expect("valid configuration");

	assert_eq!(resolved.query, "main");
	assert_eq!(resolved.source, InputSource::Stdin);
	assert_eq!(resolved.search.case_mode, CaseMode::Respect);
	assert_eq!(resolved.search.algorithm, FuzzyAlgorithm::Greedy);
	assert_eq!(resolved.search.debounce, Some(Duration::from_millis(15)));
}

#[test]
fn unknown_case_mode_names_its_origin() {
	let cli = CliArgs::parse_from(["frisk"]);
	let config = from_toml("[search]\ncase = \"loud\"\n");
	let err = config.resolve(&cli).expect_err("invalid case");
	let message = err.to_string();
	assert!(message.contains("search.case"));
	assert!(message.contains("configuration key"));
	assert!(message.contains("loud"));
}

#[test]
fn zero_limit_from_cli_is_rejected() {
	let cli = CliArgs::parse_from(["frisk", "--limit", "0"]);
	let mut config = RawConfig::default();
	config.apply_cli_overrides(&cli);
	let err = config.resolve(&cli).expect_err("zero limit");
	assert!(err.to_string().contains("CLI flag `--limit`"));
}

#[test]
fn walk_root_is_canonicalized() {
	let dir = tempdir().expect("tempdir");
	let cli = CliArgs::parse_from(["frisk".as_ref(), "--walk".as_ref(), dir.path().as_os_str()]);
	let resolved = RawConfig::default().resolve(&cli).expect("valid");
	let expected = dir.path().canonicalize().expect("canonical");
	assert_eq!(resolved.source, InputSource::Walk(expected));
}

#[test]
fn walk_root_must_be_a_directory() {
	let dir = tempdir().expect("tempdir");
	let file = dir.path().join("file.txt");
	std::fs::write(&file, "x").expect("write");
	let cli = CliArgs::parse_from(["frisk".as_ref(), "--walk".as_ref(), file.as_os_str()]);
	assert!(RawConfig::default().resolve(&cli).is_err());
}
