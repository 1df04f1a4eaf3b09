use std::io;
use std::sync::Arc;
use std::sync::mpsc::RecvTimeoutError;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use frisk::ingest::sources;
use frisk::{Injector, QueryDefinition, ResultSet, Session, SourceError, WalkOptions};
use log::{debug, warn};

use crate::settings::{InputSource, ResolvedConfig};

/// How often the wait for the final pass checks for an aborted pass.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Feeds the configured source into a session and waits for the ranked
/// results of the query over the complete input.
pub(crate) struct SearchWorkflow {
	config: ResolvedConfig,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Self {
		Self { config }
	}

	pub(crate) fn run(self) -> Result<Arc<ResultSet<String>>> {
		let ResolvedConfig {
			query,
			source,
			search,
			walk,
		} = self.config;

		let definition = QueryDefinition::from_options(&search);
		let (session, updates) =
			Session::<String>::new(definition, search).context("failed to start the search session")?;
		let injector = session.injector()?;
		let feeder = spawn_feeder(source, walk, injector)?;
		let generation = session.set_query(query);

		let results = loop {
			match updates.recv_timeout(POLL_INTERVAL) {
				Ok(update) if update.id == generation && update.complete => break update.payload,
				Ok(update) => debug!(
					"skipping pass {} ({} results, complete: {})",
					update.id,
					update.payload.len(),
					update.complete
				),
				Err(RecvTimeoutError::Timeout) => {
					if let Some((failed, err)) = session.last_failure() {
						if failed == generation {
							bail!("search aborted: {err}");
						}
					}
				}
				Err(RecvTimeoutError::Disconnected) => bail!("search session stopped unexpectedly"),
			}
		};

		match feeder.join() {
			Ok(Ok(count)) => debug!("source delivered {count} items"),
			Ok(Err(err @ SourceError::CommandFailed { .. })) => warn!("{err}"),
			Ok(Err(err)) => return Err(err).context("failed to read candidates"),
			Err(_) => return Err(anyhow!("candidate source panicked")),
		}

		Ok(results)
	}
}

/// Run the source on its own thread; the injector drops when it finishes,
/// which completes ingestion.
fn spawn_feeder(
	source: InputSource,
	walk: WalkOptions,
	injector: Injector<String>,
) -> Result<JoinHandle<Result<usize, SourceError>>> {
	thread::Builder::new()
		.name("frisk-source".into())
		.spawn(move || match source {
			InputSource::Stdin => sources::read_lines(io::stdin().lock(), "stdin", &injector),
			InputSource::File { path, reverse } => sources::read_file(&path, reverse, &injector),
			InputSource::Command(command) => sources::run_command(&command, &injector),
			InputSource::Walk(root) => sources::walk(&root, &walk, &injector),
		})
		.context("failed to spawn the source thread")
}
