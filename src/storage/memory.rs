use std::{cell::{Cell, RefCell}, collections::HashMap};

use tracing::{debug, instrument};

use crate::{error::{NotesError, Result}, storage::KeyValueBackend};

/// Which operations a [`MemoryBackend`] refuses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
	#[default]
	Healthy,
	RejectWrites,
	RejectReads,
	RejectAll,
}

/// In-process backend. Can be told to fail to mimic a full or broken store.
#[derive(Debug, Default)]
pub struct MemoryBackend {
	entries: RefCell<HashMap<String, String>>,
	mode:    Cell<FailureMode>,
}

impl MemoryBackend {
	pub fn new() -> Self { Self::default() }

	pub fn with_entry(key: &str, value: &str) -> Self {
		let backend = Self::new();
		backend.entries.borrow_mut().insert(key.to_string(), value.to_string());
		backend
	}

	pub fn set_failure_mode(&self, mode: FailureMode) { self.mode.set(mode); }

	/// Raw stored value, bypassing the failure mode.
	pub fn raw(&self, key: &str) -> Option<String> { self.entries.borrow().get(key).cloned() }
}

impl KeyValueBackend for MemoryBackend {
	#[instrument(skip(self))]
	fn get(&self, key: &str) -> Result<Option<String>> {
		if matches!(self.mode.get(), FailureMode::RejectReads | FailureMode::RejectAll) {
			return Err(NotesError::StorageUnavailable { operation: "read", key: key.to_string() });
		}
		Ok(self.raw(key))
	}

	#[instrument(skip(self, value))]
	fn set(&self, key: &str, value: &str) -> Result<()> {
		if matches!(self.mode.get(), FailureMode::RejectWrites | FailureMode::RejectAll) {
			return Err(NotesError::StorageUnavailable { operation: "write", key: key.to_string() });
		}
		debug!("Storing {} bytes", value.len());
		self.entries.borrow_mut().insert(key.to_string(), value.to_string());
		Ok(())
	}
}
