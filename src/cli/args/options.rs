use clap::ValueEnum;

/// Case handling accepted via the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum CaseArg {
	Smart,
	Respect,
}

impl CaseArg {
	/// Return the string representation consumed by configuration loading.
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			CaseArg::Smart => "smart",
			CaseArg::Respect => "respect",
		}
	}
}

/// Fuzzy matching algorithms selectable from the CLI.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum AlgorithmArg {
	Dp,
	Greedy,
}

impl AlgorithmArg {
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			AlgorithmArg::Dp => "dp",
			AlgorithmArg::Greedy => "greedy",
		}
	}
}

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}
