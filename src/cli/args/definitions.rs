use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, ArgGroup, ColorChoice, Parser};

use super::options::{AlgorithmArg, CaseArg, OutputFormat};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `frisk` binary.
#[derive(Parser, Debug)]
#[command(
	name = "frisk",
	version,
	long_version = long_version(),
	about = "Fuzzy filter for lines from stdin, a file, a command, or a directory walk",
	color = ColorChoice::Auto,
	styles = cli_styles(),
	group = ArgGroup::new("source").args(["input", "cmd", "walk"]).multiple(false)
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "FRISK_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'q',
		long,
		value_name = "QUERY",
		allow_hyphen_values = true,
		help = "Query to filter with (default: empty, lists input in order)"
	)]
	pub(crate) query: Option<String>,
	#[arg(
		short = 'i',
		long,
		value_name = "FILE",
		help = "Read candidates from a file (default: stdin)"
	)]
	pub(crate) input: Option<PathBuf>,
	#[arg(
		long,
		requires = "input",
		help = "Read the input file newest line first (default: disabled)"
	)]
	pub(crate) reverse: bool,
	#[arg(
		long,
		value_name = "COMMAND",
		help = "Read candidates from the output of a shell command"
	)]
	pub(crate) cmd: Option<String>,
	#[arg(
		short = 'w',
		long,
		value_name = "DIR",
		help = "Read candidates from a recursive directory walk"
	)]
	pub(crate) walk: Option<PathBuf>,
	#[arg(
		short = 'e',
		long,
		help = "Match plain terms as exact substrings (default: fuzzy)"
	)]
	pub(crate) exact: bool,
	#[arg(
		long,
		value_enum,
		help = "Case handling for query terms (default: smart)"
	)]
	pub(crate) case: Option<CaseArg>,
	#[arg(
		long = "algo",
		value_enum,
		help = "Fuzzy matching algorithm (default: dp)"
	)]
	pub(crate) algorithm: Option<AlgorithmArg>,
	#[arg(
		short = 'l',
		long,
		value_name = "NUM",
		help = "Maximum number of results (default: 512)"
	)]
	pub(crate) limit: Option<usize>,
	#[arg(
		long = "min-score",
		value_name = "SCORE",
		allow_hyphen_values = true,
		help = "Only keep candidates scoring above this (default: 0)"
	)]
	pub(crate) min_score: Option<i32>,
	#[arg(
		short = 'j',
		long,
		value_name = "NUM",
		help = "Number of ranking threads (default: automatic)"
	)]
	pub(crate) threads: Option<usize>,
	#[arg(
		short = 'H',
		long = "hidden",
		value_parser = BoolishValueParser::new(),
		help = "Include hidden files in walks (default: enabled)"
	)]
	pub(crate) hidden: Option<bool>,
	#[arg(
		short = 's',
		long = "follow-symlinks",
		value_parser = BoolishValueParser::new(),
		help = "Follow symbolic links while walking (default: disabled)"
	)]
	pub(crate) follow_symlinks: Option<bool>,
	#[arg(
		long = "respect-ignore-files",
		value_parser = BoolishValueParser::new(),
		help = "Respect .ignore files (default: enabled)"
	)]
	pub(crate) respect_ignore_files: Option<bool>,
	#[arg(
		long = "git-ignore",
		value_parser = BoolishValueParser::new(),
		help = "Respect .gitignore files (default: enabled)"
	)]
	pub(crate) git_ignore: Option<bool>,
	#[arg(
		long = "git-global",
		value_parser = BoolishValueParser::new(),
		help = "Respect global gitignore settings (default: enabled)"
	)]
	pub(crate) git_global: Option<bool>,
	#[arg(
		long = "git-exclude",
		value_parser = BoolishValueParser::new(),
		help = "Respect git exclude files (default: enabled)"
	)]
	pub(crate) git_exclude: Option<bool>,
	#[arg(
		long = "walk-threads",
		value_name = "NUM",
		help = "Number of directory walker threads (default: automatic)"
	)]
	pub(crate) walk_threads: Option<usize>,
	#[arg(
		short = 'd',
		long = "max-depth",
		value_name = "NUM",
		help = "Limit directory traversal depth (default: unlimited)"
	)]
	pub(crate) max_depth: Option<usize>,
	#[arg(
		long = "extensions",
		value_delimiter = ',',
		value_name = "EXT",
		help = "Restrict walks to specific file extensions (default: all)"
	)]
	pub(crate) extensions: Option<Vec<String>>,
	#[arg(
		long = "global-ignores",
		value_delimiter = ',',
		value_name = "NAME",
		help = "Comma-separated directory names to always skip (default: .git,node_modules,target,.venv,__pycache__)"
	)]
	pub(crate) global_ignores: Option<Vec<String>>,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how to print the results"
	)]
	pub(crate) output: OutputFormat,
	#[arg(
		short = 'v',
		long = "verbose",
		action = ArgAction::Count,
		help = "Log more detail to stderr; repeat for more (default: warnings only)"
	)]
	pub(crate) verbose: u8,
}
