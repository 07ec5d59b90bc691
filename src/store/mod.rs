//! The note store: canonical collection, the note open for editing, and the
//! current search query.
//!
//! Creating a note lands in the collection (and storage) immediately. Field
//! edits only touch the staged copy until [`NoteStore::commit_staged`].

use std::collections::HashSet;

use tracing::{debug, info, instrument};

use crate::{clock::{Clock, SystemClock}, id_generator::generate_note_id, storage::{KeyValueBackend, NotePersistence}, types::{Note, NoteId, NotePatch}, view};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
	Idle,
	Editing,
}

#[derive(Debug)]
pub struct NoteStore<B, C = SystemClock> {
	collection:  Vec<Note>,
	staged:      Option<Note>,
	query:       String,
	persistence: NotePersistence<B>,
	clock:       C,
}

impl<B: KeyValueBackend> NoteStore<B> {
	/// Builds a store on the system clock and loads whatever was persisted.
	pub fn open(persistence: NotePersistence<B>) -> Self { Self::open_with_clock(persistence, SystemClock) }
}

impl<B: KeyValueBackend, C: Clock> NoteStore<B, C> {
	pub fn open_with_clock(persistence: NotePersistence<B>, clock: C) -> Self {
		let mut store =
			Self { collection: Vec::new(), staged: None, query: String::new(), persistence, clock };
		store.initialize();
		store
	}

	/// Replaces the collection with the persisted one. A staged copy survives
	/// the reload and is matched by id on commit or delete.
	#[instrument(skip(self))]
	pub fn initialize(&mut self) {
		self.collection = self.persistence.load();
		info!("Store initialized with {} notes", self.collection.len());
	}

	/// Creates an empty note, puts it at the front of the collection, stages a
	/// copy of it and persists.
	#[instrument(skip(self))]
	pub fn create_and_stage(&mut self) -> NoteId {
		let existing: HashSet<&NoteId> = self.collection.iter().map(|note| &note.id).collect();
		let id = generate_note_id(&existing);
		let note = Note::blank(id.clone(), self.clock.now());

		self.collection.insert(0, note.clone());
		self.staged = Some(note);
		info!("Created note {}", id);

		self.persist();
		id
	}

	/// Opens a copy of note `id` for editing, discarding any uncommitted copy.
	/// Returns `false`, leaving the store untouched, when `id` is unknown.
	#[instrument(skip(self))]
	pub fn stage(&mut self, id: &NoteId) -> bool {
		let Some(note) = self.get(id) else {
			debug!("Cannot stage unknown note {}", id);
			return false;
		};
		self.staged = Some(note.clone());
		true
	}

	#[instrument(skip(self))]
	pub fn edit_staged(&mut self, patch: NotePatch) {
		let now = self.clock.now();
		match self.staged.as_mut() {
			Some(note) => note.apply(patch, now),
			None => debug!("Nothing staged, ignoring edit"),
		}
	}

	/// Writes the staged copy back into the collection and persists.
	#[instrument(skip(self))]
	pub fn commit_staged(&mut self) {
		let Some(note) = self.staged.take() else {
			debug!("Nothing staged, ignoring commit");
			return;
		};

		match self.collection.iter_mut().find(|existing| existing.id == note.id) {
			Some(existing) => *existing = note,
			None => self.collection.insert(0, note),
		}
		self.persist();
	}

	pub fn cancel_staged(&mut self) {
		if let Some(note) = self.staged.take() {
			debug!("Discarded staged edits of {}", note.id);
		}
	}

	/// Removes note `id` and drops its staged copy, if any. Storage is only
	/// written when the collection actually held the note.
	#[instrument(skip(self))]
	pub fn delete(&mut self, id: &NoteId) {
		if self.staged.as_ref().is_some_and(|note| &note.id == id) {
			self.staged = None;
		}

		let Some(position) = self.collection.iter().position(|note| &note.id == id) else {
			debug!("Cannot delete unknown note {}", id);
			return;
		};

		self.collection.remove(position);
		info!("Deleted note {}", id);

		self.persist();
	}

	pub fn set_query(&mut self, text: impl Into<String>) { self.query = text.into(); }

	/// Notes matching the current query, most recently updated first.
	pub fn visible_notes(&self) -> impl Iterator<Item = &Note> + Clone + '_ {
		view::visible(&self.collection, &self.query)
	}

	pub fn notes(&self) -> &[Note] { &self.collection }

	pub fn get(&self, id: &NoteId) -> Option<&Note> { self.collection.iter().find(|note| &note.id == id) }

	pub fn staged(&self) -> Option<&Note> { self.staged.as_ref() }

	pub fn query(&self) -> &str { &self.query }

	pub fn len(&self) -> usize { self.collection.len() }

	pub fn is_empty(&self) -> bool { self.collection.is_empty() }

	pub fn state(&self) -> EditState {
		if self.staged.is_some() { EditState::Editing } else { EditState::Idle }
	}

	fn persist(&self) { self.persistence.save(&self.collection); }
}
