use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Where each validated setting came from, when it was set at all.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) search_case: Option<SettingSource>,
	pub(crate) search_algorithm: Option<SettingSource>,
	pub(crate) search_limit: Option<SettingSource>,
	pub(crate) search_threads: Option<SettingSource>,
	pub(crate) search_slab_capacity: Option<SettingSource>,
	pub(crate) walk_threads: Option<SettingSource>,
	pub(crate) walk_max_depth: Option<SettingSource>,
}

fn or_key(source: &Option<SettingSource>, key: &'static str) -> SettingSource {
	source.clone().unwrap_or(SettingSource::ConfigKey(key))
}

impl ConfigSources {
	pub(crate) fn source_for_case(&self) -> SettingSource {
		or_key(&self.search_case, "search.case")
	}

	pub(crate) fn source_for_algorithm(&self) -> SettingSource {
		or_key(&self.search_algorithm, "search.algorithm")
	}

	pub(crate) fn source_for_limit(&self) -> SettingSource {
		or_key(&self.search_limit, "search.limit")
	}

	pub(crate) fn source_for_threads(&self) -> SettingSource {
		or_key(&self.search_threads, "search.threads")
	}

	pub(crate) fn source_for_slab_capacity(&self) -> SettingSource {
		or_key(&self.search_slab_capacity, "search.slab_capacity")
	}

	pub(crate) fn source_for_walk_threads(&self) -> SettingSource {
		or_key(&self.walk_threads, "walk.threads")
	}

	pub(crate) fn source_for_max_depth(&self) -> SettingSource {
		or_key(&self.walk_max_depth, "walk.max_depth")
	}
}
