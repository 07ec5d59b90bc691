pub mod note;
pub mod note_methods;

pub use note::{Note, NoteId, NotePatch};
