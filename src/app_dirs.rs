//! Resolve configuration, cache, and data directories for `frisk`.
//!
//! Environment overrides win over the platform locations provided by the
//! `directories` crate.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "frisk";
const APPLICATION: &str = "frisk";

pub const CONFIG_DIR_ENV: &str = "FRISK_CONFIG_DIR";
pub const DATA_DIR_ENV: &str = "FRISK_DATA_DIR";
pub const CACHE_DIR_ENV: &str = "FRISK_CACHE_DIR";

fn project_dirs() -> Result<ProjectDirs> {
	ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
		.ok_or_else(|| anyhow!("no home directory to place frisk files in"))
}

/// An empty value counts as unset.
fn dir_from_env(name: &str) -> Option<PathBuf> {
	env::var_os(name)
		.filter(|value| !value.is_empty())
		.map(PathBuf::from)
}

/// Directory holding `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
	match dir_from_env(CONFIG_DIR_ENV) {
		Some(dir) => Ok(dir),
		None => Ok(project_dirs()?.config_local_dir().to_path_buf()),
	}
}

pub fn get_data_dir() -> Result<PathBuf> {
	match dir_from_env(DATA_DIR_ENV) {
		Some(dir) => Ok(dir),
		None => Ok(project_dirs()?.data_local_dir().to_path_buf()),
	}
}

pub fn get_cache_dir() -> Result<PathBuf> {
	match dir_from_env(CACHE_DIR_ENV) {
		Some(dir) => Ok(dir),
		None => Ok(project_dirs()?.cache_dir().to_path_buf()),
	}
}

