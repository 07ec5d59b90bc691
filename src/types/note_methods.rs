use chrono::{DateTime, Utc};

use crate::types::note::{Note, NoteId, NotePatch};

impl Note {
	/// A blank note stamped with the same creation and update time.
	pub fn blank(id: NoteId, now: DateTime<Utc>) -> Self {
		Self { id, title: String::new(), content: String::new(), created_at: now, updated_at: now }
	}

	/// Merges `patch` into the note and refreshes `updated_at`.
	///
	/// The new stamp never precedes `created_at`, even if the clock moved
	/// backwards since creation.
	pub fn apply(&mut self, patch: NotePatch, now: DateTime<Utc>) {
		if let Some(title) = patch.title {
			self.title = title;
		}
		if let Some(content) = patch.content {
			self.content = content;
		}
		self.updated_at = now.max(self.created_at);
	}

	/// Case-insensitive substring match against title or content. `needle`
	/// must already be lowercased.
	pub fn contains_lowercase(&self, needle: &str) -> bool {
		needle.is_empty()
			|| self.title.to_lowercase().contains(needle)
			|| self.content.to_lowercase().contains(needle)
	}

	/// Raises `updated_at` to `created_at` when a stored record violates the
	/// ordering. Returns whether a repair was needed.
	pub(crate) fn repair_timestamps(&mut self) -> bool {
		if self.updated_at < self.created_at {
			self.updated_at = self.created_at;
			return true;
		}
		false
	}

	/// Short single-line label used by list renderers.
	pub fn display_title(&self) -> &str {
		let title = self.title.trim();
		if title.is_empty() { "(untitled)" } else { title }
	}
}

#[cfg(test)]
mod tests {
	use chrono::{Duration, TimeZone};

	use super::*;

	fn at(secs: i64) -> DateTime<Utc> { Utc.timestamp_opt(secs, 0).unwrap() }

	#[test]
	fn apply_merges_only_given_fields() {
		let mut note = Note::blank(NoteId::from("a"), at(10));
		note.apply(NotePatch::title("Groceries"), at(20));
		note.apply(NotePatch::content("Milk, eggs"), at(30));

		assert_eq!(note.title, "Groceries");
		assert_eq!(note.content, "Milk, eggs");
		assert_eq!(note.created_at, at(10));
		assert_eq!(note.updated_at, at(30));
	}

	#[test]
	fn apply_never_stamps_before_creation() {
		let mut note = Note::blank(NoteId::from("a"), at(100));
		note.apply(NotePatch::title("x"), at(100) - Duration::seconds(5));

		assert_eq!(note.updated_at, note.created_at);
	}

	#[test]
	fn matching_is_case_insensitive_on_both_fields() {
		let mut note = Note::blank(NoteId::from("a"), at(0));
		note.apply(NotePatch::title("Shopping List").with_content("Buy MILK"), at(1));

		assert!(note.contains_lowercase("shopping"));
		assert!(note.contains_lowercase("milk"));
		assert!(note.contains_lowercase(""));
		assert!(!note.contains_lowercase("bread"));
	}

	#[test]
	fn untitled_notes_get_a_placeholder_label() {
		let note = Note::blank(NoteId::from("a"), at(0));
		assert_eq!(note.display_title(), "(untitled)");
	}
}
