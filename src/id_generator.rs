use std::collections::HashSet;

use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::types::NoteId;

/// Draws a random id that does not collide with any id in `existing`.
#[instrument(skip(existing))]
pub fn generate_note_id(existing: &HashSet<&NoteId>) -> NoteId {
	loop {
		let candidate = NoteId::new(Uuid::new_v4().to_string());
		if !existing.contains(&candidate) {
			debug!("Generated note id {}", candidate);
			return candidate;
		}
		warn!("Note id {} already in use, drawing again", candidate);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn generated_ids_are_distinct() {
		let first = generate_note_id(&HashSet::new());
		let second = generate_note_id(&HashSet::from([&first]));

		assert_ne!(first, second);
		assert!(Uuid::parse_str(first.as_str()).is_ok());
	}
}
