use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use frisk::{SearchOptions, WalkOptions};

use crate::cli::CliArgs;

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Where candidates come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
	Stdin,
	File { path: PathBuf, reverse: bool },
	Command(String),
	/// Canonical root of a directory walk.
	Walk(PathBuf),
}

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
	pub query: String,
	pub source: InputSource,
	pub search: SearchOptions,
	pub walk: WalkOptions,
}

impl ResolvedConfig {
	pub(super) fn new(cli: &CliArgs, search: SearchOptions, walk: WalkOptions) -> Result<Self> {
		let source = if let Some(path) = &cli.input {
			InputSource::File {
				path: path.clone(),
				reverse: cli.reverse,
			}
		} else if let Some(command) = &cli.cmd {
			InputSource::Command(command.clone())
		} else if let Some(root) = &cli.walk {
			InputSource::Walk(resolve_root(root.clone())?)
		} else {
			InputSource::Stdin
		};

		Ok(Self {
			query: cli.query.clone().unwrap_or_default(),
			source,
			search,
			walk,
		})
	}

	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
		validation::validate(self, sources)
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		summary::print_summary(self);
	}
}

/// Absolute, canonical walk root; must be a directory.
fn resolve_root(mut root: PathBuf) -> Result<PathBuf> {
	if root.is_relative() {
		root = env::current_dir()
			.context("failed to resolve current directory for the walk root")?
			.join(root);
	}
	let root = fs::canonicalize(&root)
		.with_context(|| format!("failed to canonicalize walk root {}", root.display()))?;

	let metadata = fs::metadata(&root)
		.with_context(|| format!("failed to inspect walk root {}", root.display()))?;
	ensure!(metadata.is_dir(), "walk root {} must be a directory", root.display());

	Ok(root)
}
