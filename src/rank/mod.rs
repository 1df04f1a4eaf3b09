//! Scoring chunks in parallel and keeping the best candidates.

mod definition;
mod entry;
mod pass;
mod pool;
mod topk;

pub use definition::{HighlightFn, QueryDefinition, ScoreFn, score_text};
pub use entry::{
	Comparator, Entry, Item, Ranked, by_score_length_then_text, by_score_then_index,
	by_score_then_length,
};
pub(crate) use pass::{Pass, PassOutcome, first_items};
pub(crate) use pool::ScratchPool;
pub use topk::TopK;
