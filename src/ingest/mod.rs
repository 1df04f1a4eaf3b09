//! Turning a live stream of candidates into sealed, shareable chunks.

mod chunk;
mod injector;
pub mod sources;
mod store;

pub use chunk::{CHUNK_CAPACITY, Chunk};
pub use injector::Injector;
pub use sources::SourceError;
pub use store::{ChunkBuilder, ChunkStore, item_index};
