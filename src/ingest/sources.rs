//! Candidate producers.
//!
//! Each source pushes display strings into an [`Injector`] and returns the
//! number of items it delivered. A source stops early, without error, as soon
//! as the injector reports that the session is gone.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use ignore::{DirEntry, Error as IgnoreError, WalkBuilder, WalkState};
use log::{debug, warn};
use thiserror::Error;

use super::Injector;
use crate::config::WalkOptions;

#[derive(Debug, Error)]
pub enum SourceError {
	#[error("failed to read {origin}")]
	Read {
		origin: String,
		#[source]
		source: io::Error,
	},
	#[error("failed to open {}", path.display())]
	Open {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("failed to run `{command}`")]
	Spawn {
		command: String,
		#[source]
		source: io::Error,
	},
	#[error("`{command}` exited with {status}")]
	CommandFailed { command: String, status: ExitStatus },
	#[error("walk root {} is not a directory", path.display())]
	NotADirectory { path: PathBuf },
}

/// Push every line of `reader`. Line terminators (`\n`, `\r\n`) are dropped
/// and invalid UTF-8 is replaced.
pub fn read_lines<R, T>(reader: R, origin: &str, injector: &Injector<T>) -> Result<usize, SourceError>
where
	R: BufRead,
	T: From<String>,
{
	let mut delivered = 0;
	for line in lines(reader) {
		let line = line.map_err(|source| SourceError::Read {
			origin: origin.to_owned(),
			source,
		})?;
		if !injector.push(T::from(line)) {
			break;
		}
		delivered += 1;
	}
	Ok(delivered)
}

/// Push the lines of the file at `path`, newest (last) line first when
/// `reverse` is set.
pub fn read_file<T>(path: &Path, reverse: bool, injector: &Injector<T>) -> Result<usize, SourceError>
where
	T: From<String>,
{
	let file = File::open(path).map_err(|source| SourceError::Open {
		path: path.to_path_buf(),
		source,
	})?;
	let reader = BufReader::new(file);
	let origin = path.display().to_string();
	if !reverse {
		return read_lines(reader, &origin, injector);
	}

	let mut all = lines(reader)
		.collect::<io::Result<Vec<_>>>()
		.map_err(|source| SourceError::Read { origin, source })?;
	all.reverse();
	Ok(injector.extend(all.into_iter().map(T::from)))
}

/// Run `command` through the platform shell and push its standard output
/// line by line. The child is killed when the session hangs up.
pub fn run_command<T>(command: &str, injector: &Injector<T>) -> Result<usize, SourceError>
where
	T: From<String>,
{
	let spawn_error = |source| SourceError::Spawn {
		command: command.to_owned(),
		source,
	};
	let mut child = shell(command)
		.stdin(Stdio::null())
		.stdout(Stdio::piped())
		.stderr(Stdio::inherit())
		.spawn()
		.map_err(spawn_error)?;

	let Some(stdout) = child.stdout.take() else {
		reap(&mut child);
		return Ok(0);
	};

	let mut delivered = 0;
	let mut hung_up = false;
	for line in lines(BufReader::new(stdout)) {
		let line = match line {
			Ok(line) => line,
			Err(source) => {
				reap(&mut child);
				return Err(SourceError::Read {
					origin: format!("output of `{command}`"),
					source,
				});
			}
		};
		if !injector.push(T::from(line)) {
			hung_up = true;
			break;
		}
		delivered += 1;
	}

	if hung_up {
		debug!("session closed, stopping `{command}`");
		reap(&mut child);
		return Ok(delivered);
	}

	let status = child.wait().map_err(spawn_error)?;
	if !status.success() {
		return Err(SourceError::CommandFailed {
			command: command.to_owned(),
			status,
		});
	}
	Ok(delivered)
}

/// Walk `root` in parallel and push the path of every file relative to it,
/// using forward slashes.
pub fn walk<T>(root: &Path, options: &WalkOptions, injector: &Injector<T>) -> Result<usize, SourceError>
where
	T: From<String> + Send,
{
	if !root.is_dir() {
		return Err(SourceError::NotADirectory {
			path: root.to_path_buf(),
		});
	}

	let root = Arc::new(root.to_path_buf());
	let extension_filter = options.extension_filter().map(Arc::new);
	let global_ignores = Arc::new(options.global_ignore_set());
	let delivered = Arc::new(AtomicUsize::new(0));
	let hung_up = Arc::new(AtomicBool::new(false));

	WalkBuilder::new(root.as_path())
		.hidden(!options.include_hidden)
		.follow_links(options.follow_symlinks)
		.git_ignore(options.git_ignore)
		.git_global(options.git_global)
		.git_exclude(options.git_exclude)
		.ignore(options.respect_ignore_files)
		.parents(true)
		.threads(options.thread_count())
		.max_depth(options.max_depth)
		.build_parallel()
		.run(|| {
			let injector = injector.clone();
			let root = Arc::clone(&root);
			let extension_filter = extension_filter.clone();
			let global_ignores = Arc::clone(&global_ignores);
			let delivered = Arc::clone(&delivered);
			let hung_up = Arc::clone(&hung_up);
			Box::new(move |entry: Result<DirEntry, IgnoreError>| {
				let entry = match entry {
					Ok(entry) => entry,
					Err(err) => {
						debug!("skipping walk entry: {err}");
						return WalkState::Continue;
					}
				};
				if !entry.file_type().is_some_and(|kind| kind.is_file()) {
					return WalkState::Continue;
				}

				let path = entry.path();
				if path
					.components()
					.any(|component| global_ignores.contains(component.as_os_str()))
				{
					return WalkState::Continue;
				}
				let relative = path.strip_prefix(root.as_path()).unwrap_or(path);
				if let Some(filter) = extension_filter.as_ref() {
					let extension = relative
						.extension()
						.and_then(|ext| ext.to_str())
						.map(|ext| ext.to_ascii_lowercase());
					if extension.as_ref().is_none_or(|ext| !filter.contains(ext)) {
						return WalkState::Continue;
					}
				}

				let display = relative.to_string_lossy().replace('\\', "/");
				if !injector.push(T::from(display)) {
					hung_up.store(true, Ordering::Relaxed);
					return WalkState::Quit;
				}
				delivered.fetch_add(1, Ordering::Relaxed);
				WalkState::Continue
			})
		});

	if hung_up.load(Ordering::Relaxed) {
		debug!("session closed, walk of {} stopped early", root.display());
	}
	Ok(delivered.load(Ordering::Relaxed))
}

fn lines<R: BufRead>(mut reader: R) -> impl Iterator<Item = io::Result<String>> {
	let mut buffer = Vec::new();
	std::iter::from_fn(move || {
		buffer.clear();
		match reader.read_until(b'\n', &mut buffer) {
			Ok(0) => None,
			Ok(_) => {
				if buffer.last() == Some(&b'\n') {
					buffer.pop();
					if buffer.last() == Some(&b'\r') {
						buffer.pop();
					}
				}
				Some(Ok(String::from_utf8_lossy(&buffer).into_owned()))
			}
			Err(err) => Some(Err(err)),
		}
	})
}

#[cfg(unix)]
fn shell(command: &str) -> Command {
	let mut shell = Command::new("sh");
	shell.arg("-c").arg(command);
	shell
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
	let mut shell = Command::new("cmd");
	shell.arg("/C").arg(command);
	shell
}

fn reap(child: &mut Child) {
	if let Err(err) = child.kill() {
		debug!("failed to kill command: {err}");
	}
	if let Err(err) = child.wait() {
		warn!("failed to wait for command: {err}");
	}
}
