use std::path::Path;

use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, fmt::time::ChronoUtc};

use crate::{storage::{FileBackend, NotePersistence}, store::NoteStore, types::Note};

pub mod clock;
pub mod config;
pub mod data_locator;
pub mod error;
pub mod id_generator;
pub mod storage;
pub mod store;
pub mod types;
pub mod view;

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init_tracing(level: &str) {
	let filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(level))
		.unwrap_or_else(|_| EnvFilter::new("warn"));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_timer(ChronoUtc::rfc_3339())
		.with_writer(std::io::stderr)
		.init();
}

/// Opens a store backed by `<dir>/<key>.json`.
#[instrument]
pub fn open_file_store(dir: &Path, key: &str) -> NoteStore<FileBackend> {
	info!("Opening notes in {:?}", dir);
	NoteStore::open(NotePersistence::with_key(FileBackend::new(dir), key))
}

/// One line per note for list output: id, last update and title.
pub fn summary_line(note: &Note) -> String {
	format!("{}  {}  {}", note.id, note.updated_at.format("%Y-%m-%d %H:%M"), note.display_title())
}
