use std::collections::HashSet;

use tracing::{debug, info, instrument, warn};

use crate::{error::Result, storage::KeyValueBackend, types::Note};

/// Default key the collection lives under.
pub const STORAGE_KEY: &str = "notekeeper.notes";

/// Best-effort bridge between the in-memory collection and a backend.
///
/// Neither [`load`](Self::load) nor [`save`](Self::save) can fail from the
/// caller's point of view: unreadable data loads as an empty collection and a
/// rejected write leaves whatever was stored before.
#[derive(Debug)]
pub struct NotePersistence<B> {
	backend: B,
	key:     String,
}

impl<B: KeyValueBackend> NotePersistence<B> {
	pub fn new(backend: B) -> Self { Self::with_key(backend, STORAGE_KEY) }

	pub fn with_key(backend: B, key: impl Into<String>) -> Self {
		Self { backend, key: key.into() }
	}

	pub fn backend(&self) -> &B { &self.backend }

	#[instrument(skip(self), fields(key = %self.key))]
	pub fn load(&self) -> Vec<Note> {
		match self.try_load() {
			Ok(Some(notes)) => {
				info!("Loaded {} notes", notes.len());
				repair(notes)
			}
			Ok(None) => {
				debug!("Nothing stored yet, starting empty");
				Vec::new()
			}
			Err(err) => {
				warn!("Discarding unreadable notes: {}", err);
				Vec::new()
			}
		}
	}

	#[instrument(skip(self, notes), fields(key = %self.key, count = notes.len()))]
	pub fn save(&self, notes: &[Note]) {
		if let Err(err) = self.try_save(notes) {
			warn!("Notes were not persisted: {}", err);
		}
	}

	fn try_load(&self) -> Result<Option<Vec<Note>>> {
		let Some(raw) = self.backend.get(&self.key)? else {
			return Ok(None);
		};
		Ok(Some(serde_json::from_str(&raw)?))
	}

	fn try_save(&self, notes: &[Note]) -> Result<()> {
		let raw = serde_json::to_string(notes)?;
		self.backend.set(&self.key, &raw)
	}
}

/// Drops repeated ids (first wins) and fixes inverted timestamps.
fn repair(notes: Vec<Note>) -> Vec<Note> {
	let mut seen = HashSet::new();
	let mut kept = Vec::with_capacity(notes.len());

	for mut note in notes {
		if !seen.insert(note.id.clone()) {
			warn!("Dropping duplicate stored note {}", note.id);
			continue;
		}
		if note.repair_timestamps() {
			warn!("Stored note {} was updated before it was created", note.id);
		}
		kept.push(note);
	}

	kept
}
