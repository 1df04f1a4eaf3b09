//! Incremental fuzzy search over a live stream of candidates.
//!
//! Queries compile into a [`Pattern`] of AND-ed sets of OR-ed terms. Items are
//! ingested into fixed-size chunks and ranked by a [`Session`], which reruns a
//! parallel scoring pass whenever the query changes or a chunk is sealed and
//! publishes a capped, stably ordered [`ResultSet`] with highlight positions.
//!
//! ```no_run
//! use frisk::{QueryDefinition, SearchOptions, Session};
//!
//! let (session, updates) =
//! 	Session::<String>::new(QueryDefinition::default(), SearchOptions::default())?;
//! let injector = session.injector()?;
//! injector.extend(["src/main.rs", "src/lib.rs", "README.md"].map(String::from));
//! drop(injector);
//!
//! session.set_query("srcmain");
//! for update in updates {
//! 	if update.complete && update.id == session.generation() {
//! 		println!("{:?}", update.payload.items.first().map(|item| item.text()));
//! 		break;
//! 	}
//! }
//! # Ok::<(), frisk::SessionError>(())
//! ```

pub mod app_dirs;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod matcher;
pub mod rank;
pub mod session;

pub use config::{DEFAULT_LIMIT, SearchOptions, WalkOptions};
pub use ingest::{CHUNK_CAPACITY, Chunk, Injector, SourceError};
pub use matcher::{CaseMode, FuzzyAlgorithm, Pattern, PatternOptions, Slab, SlabError};
pub use rank::{Item, QueryDefinition};
pub use session::{
	PassKind, ResultItem, ResultSet, ResultUpdate, Session, SessionError, StatusSnapshot,
};
