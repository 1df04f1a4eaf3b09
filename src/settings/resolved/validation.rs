use super::{ConfigError, ConfigSources, ResolvedConfig};

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	let search = &config.search;
	if search.limit == 0 {
		return Err(ConfigError::invalid(
			"search.limit",
			"0",
			sources.source_for_limit(),
			"must be greater than zero",
		));
	}

	if search.threads == Some(0) {
		return Err(ConfigError::invalid(
			"search.threads",
			"0",
			sources.source_for_threads(),
			"must be greater than zero",
		));
	}

	if search.slab_capacity == 0 {
		return Err(ConfigError::invalid(
			"search.slab_capacity",
			"0",
			sources.source_for_slab_capacity(),
			"must be greater than zero",
		));
	}

	if config.walk.threads == Some(0) {
		return Err(ConfigError::invalid(
			"walk.threads",
			"0",
			sources.source_for_walk_threads(),
			"must be greater than zero",
		));
	}

	if config.walk.max_depth == Some(0) {
		return Err(ConfigError::invalid(
			"walk.max_depth",
			"0",
			sources.source_for_max_depth(),
			"must be at least 1",
		));
	}

	Ok(())
}
