//! Key-value substrate and the adapter that keeps the note collection in it.
//!
//! Backends report failures as [`NotesError`]; [`NotePersistence`] is the only
//! caller and turns every such failure into a logged no-op.

use crate::error::Result;

pub mod file;
pub mod memory;
pub mod persistence;

pub use file::FileBackend;
pub use memory::{FailureMode, MemoryBackend};
pub use persistence::{NotePersistence, STORAGE_KEY};

/// A string-keyed store of string values.
pub trait KeyValueBackend {
	/// Returns `None` when nothing has been stored under `key`.
	fn get(&self, key: &str) -> Result<Option<String>>;

	fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for &B {
	fn get(&self, key: &str) -> Result<Option<String>> { (**self).get(key) }

	fn set(&self, key: &str, value: &str) -> Result<()> { (**self).set(key, value) }
}
