//! Derivation of the display list from the collection and the search query.

use crate::types::Note;

/// Whether `note` matches `query`, ignoring case. An empty query matches all.
pub fn matches(note: &Note, query: &str) -> bool { note.contains_lowercase(&query.to_lowercase()) }

/// Notes matching `query`, most recently updated first.
///
/// Notes with equal `updated_at` keep their relative order from `notes`.
/// Each call recomputes from scratch; nothing is cached.
pub fn visible<'a>(notes: &'a [Note], query: &str) -> impl Iterator<Item = &'a Note> + Clone + use<'a> {
	let needle = query.to_lowercase();
	let mut matching: Vec<&Note> = notes.iter().filter(|note| note.contains_lowercase(&needle)).collect();

	// Stable, so ties fall back to collection order
	matching.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
	matching.into_iter()
}
