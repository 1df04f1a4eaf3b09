use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::thread;
use std::time::{Duration, Instant};

use frisk::matcher::SlabError;
use frisk::{
	PassKind, QueryDefinition, ResultSet, ResultUpdate, SearchOptions, Session, SessionError,
};

const TIMEOUT: Duration = Duration::from_secs(10);

fn session<T: frisk::Item>(
	definition: QueryDefinition<T>,
) -> (Session<T>, Receiver<ResultUpdate<T>>) {
	let options = SearchOptions {
		threads: Some(2),
		..SearchOptions::default()
	};
	Session::new(definition, options).expect("session starts")
}

/// Wait for the pass of `generation` over the complete input. Streams must be
/// opened before `generation` starts for their items to be included.
fn settled<T>(updates: &Receiver<ResultUpdate<T>>, generation: u64) -> Arc<ResultSet<T>> {
	let deadline = Instant::now() + TIMEOUT;
	loop {
		let left = deadline.saturating_duration_since(Instant::now());
		let update = updates.recv_timeout(left).expect("update before the deadline");
		if update.id == generation && update.complete {
			return update.payload;
		}
	}
}

fn texts(results: &ResultSet<String>) -> Vec<&str> {
	results.items.iter().map(|item| item.text()).collect()
}

fn feed(session: &Session<String>, lines: impl IntoIterator<Item = String>) {
	let injector = session.injector().expect("injector");
	injector.extend(lines);
}

#[test]
fn empty_query_lists_in_arrival_order() {
	let (session, updates) = session(QueryDefinition::default());
	feed(&session, ["gamma", "alpha", "beta"].map(String::from));

	let results = settled(&updates, session.set_query(""));
	assert_eq!(results.kind, PassKind::Listing);
	assert_eq!(texts(&results), vec!["gamma", "alpha", "beta"]);
	assert!(results.items.iter().all(|item| item.positions().is_empty()));
	assert_eq!(results.items_scored, 0);
}

#[test]
fn streamed_items_are_ranked_and_highlighted() {
	let (session, updates) = session(QueryDefinition::default());
	let injector = session.injector().expect("injector");
	let producer = thread::spawn(move || {
		let noise = (0..2497).map(|n| format!("noise/{n:04}.txt"));
		let wanted = ["src/foo.rs", "lib/food.rs", "x/f_o_o"].into_iter().map(String::from);
		injector.extend(noise.chain(wanted))
	});
	let generation = session.set_query("foo");
	assert_eq!(producer.join().expect("producer"), 2500);

	let results = settled(&updates, generation);
	assert_eq!(results.kind, PassKind::Ranked);
	assert_eq!(results.query, "foo");
	assert_eq!(texts(&results), vec!["src/foo.rs", "lib/food.rs", "x/f_o_o"]);
	assert_eq!(results.items[0].positions(), &[6, 5, 4]);
	assert_eq!(results.items[0].index(), 2497);
	assert_eq!(results.items_read, 2500);
	assert_eq!(results.items_scored, 3);

	let status = session.status();
	assert_eq!(status.chunks, 3);
	assert!(!status.reading);
}

#[test]
fn results_are_capped_at_the_limit() {
	let definition = QueryDefinition {
		limit: 10,
		..QueryDefinition::default()
	};
	let (session, updates) = session(definition);
	feed(&session, (0..3000).map(|n| format!("item{n}")));
	let generation = session.set_query("item");

	let results = settled(&updates, generation);
	assert_eq!(results.len(), 10);
	// equal scores: shortest first, then text order
	assert_eq!(&texts(&results)[..3], &["item0", "item1", "item2"]);
}

#[test]
fn only_the_latest_query_is_published() {
	let (session, updates) = session(QueryDefinition::default());
	feed(&session, ["apple", "banana", "cherry"].map(String::from));

	session.set_query("a");
	session.set_query("ban");
	let generation = session.set_query("che");
	let results = settled(&updates, generation);
	assert_eq!(texts(&results), vec!["cherry"]);
	assert_eq!(results.generation, generation);
	assert_eq!(session.results().map(|latest| latest.generation), Some(generation));
}

#[test]
fn selection_is_clamped_and_carried_over() {
	let (session, updates) = session(QueryDefinition::default());
	feed(&session, ["one", "two", "three", "four"].map(String::from));
	let results = settled(&updates, session.set_query(""));
	assert_eq!(results.selected, Some(0));

	assert_eq!(session.select(99), Some(3));
	assert_eq!(session.selected_item().map(|item| item.text().to_owned()), Some("four".into()));

	let generation = session.set_query("o");
	let results = settled(&updates, generation);
	assert_eq!(results.len(), 3);
	assert_eq!(results.selected, Some(0));
	assert_eq!(session.selected(), Some(0));
}

#[test]
fn clear_drops_items_and_restarts() {
	let (session, updates) = session(QueryDefinition::default());
	feed(&session, ["old one", "old two"].map(String::from));
	assert_eq!(settled(&updates, session.set_query("")).len(), 2);

	session.clear();
	let cleared = settled(&updates, session.generation());
	assert!(cleared.is_empty());
	assert_eq!(session.status().items_read, 0);

	feed(&session, ["new".to_string()]);
	let results = settled(&updates, session.set_query(""));
	assert_eq!(texts(&results), vec!["new"]);
}

#[test]
fn custom_items_and_highlighter() {
	fn everything(item: &Arc<str>, _: &frisk::Pattern, _: &mut frisk::Slab) -> Result<Vec<usize>, SlabError> {
		Ok((0..item.chars().count()).rev().collect())
	}

	let definition: QueryDefinition<Arc<str>> = QueryDefinition {
		highlight: Some(everything),
		..QueryDefinition::default()
	};
	let (session, updates) = session(definition);
	let injector = session.injector().expect("injector");
	injector.push(Arc::from("abc"));
	injector.push(Arc::from("xyz"));
	drop(injector);

	let generation = session.set_query("b");
	let results = settled(&updates, generation);
	assert_eq!(results.len(), 1);
	assert_eq!(results.items[0].positions(), &[2, 1, 0]);
}

#[test]
fn slab_overflow_aborts_without_publishing() {
	let definition: QueryDefinition<String> = QueryDefinition {
		score: |_, _, _| {
			Err(SlabError::OutOfInts {
				requested: 10,
				remaining: 0,
			})
		},
		..QueryDefinition::default()
	};
	let (session, updates) = session(definition);
	feed(&session, ["anything".to_string()]);
	let listing = settled(&updates, session.set_query(""));
	assert_eq!(listing.len(), 1);

	let generation = session.set_query("any");
	let deadline = Instant::now() + TIMEOUT;
	while session.last_failure().map(|(failed, _)| failed) != Some(generation) {
		assert!(Instant::now() < deadline, "pass never failed");
		thread::sleep(Duration::from_millis(10));
	}
	assert_eq!(session.results().map(|latest| latest.kind), Some(PassKind::Listing));
}

#[test]
fn shutdown_refuses_new_streams() {
	let (mut session, _updates) = session::<String>(QueryDefinition::default());
	let injector = session.injector().expect("injector");
	session.shutdown();

	assert!(matches!(session.injector(), Err(SessionError::Closed)));
	// the stream notices the shutdown on its next poll
	thread::sleep(Duration::from_millis(200));
	assert!(!session.status().reading);
	assert!(!injector.push("late".to_string()));
}

#[test]
fn shutdown_stops_a_busy_stream() {
	let (mut session, _updates) = session::<String>(QueryDefinition::default());
	let injector = session.injector().expect("injector");
	let producer = thread::spawn(move || {
		let deadline = Instant::now() + TIMEOUT;
		let mut pushed = 0usize;
		while injector.push(format!("line {pushed}")) {
			pushed += 1;
			if Instant::now() >= deadline {
				return None;
			}
			thread::sleep(Duration::from_micros(200));
		}
		Some(pushed)
	});

	thread::sleep(Duration::from_millis(100));
	session.shutdown();
	let pushed = producer.join().expect("producer");
	assert!(pushed.is_some(), "stream kept accepting items after shutdown");
	assert!(!session.status().reading);
}
