//! Pattern compilation and fzf-compatible scoring.

pub mod algo;
pub mod chars;
mod pattern;
mod score;
mod slab;

pub use algo::{MatchMode, MatchResult};
pub use pattern::{CaseMode, FuzzyAlgorithm, Pattern, PatternOptions, Term, TermSet};
pub use slab::{DEFAULT_SLAB_CAPACITY, Slab, SlabError};
