use std::{io::ErrorKind, path::{Path, PathBuf}};

use tracing::{debug, instrument};

use crate::{error::Result, storage::KeyValueBackend};

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileBackend {
	dir: PathBuf,
}

impl FileBackend {
	pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

	pub fn dir(&self) -> &Path { &self.dir }

	pub fn path_for(&self, key: &str) -> PathBuf { self.dir.join(format!("{key}.json")) }
}

impl KeyValueBackend for FileBackend {
	#[instrument(skip(self), fields(dir = ?self.dir))]
	fn get(&self, key: &str) -> Result<Option<String>> {
		match fs_err::read_to_string(self.path_for(key)) {
			Ok(raw) => Ok(Some(raw)),
			Err(err) if err.kind() == ErrorKind::NotFound => {
				debug!("No entry stored yet");
				Ok(None)
			}
			Err(err) => Err(err.into()),
		}
	}

	#[instrument(skip(self, value), fields(dir = ?self.dir))]
	fn set(&self, key: &str, value: &str) -> Result<()> {
		fs_err::create_dir_all(&self.dir)?;

		// Write beside the target and swap it in, so a torn write never
		// replaces the last good copy
		let target = self.path_for(key);
		let staging = self.dir.join(format!("{key}.json.tmp"));
		fs_err::write(&staging, value)?;
		fs_err::rename(&staging, &target)?;

		debug!("Wrote {} bytes to {:?}", value.len(), target);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_entry_reads_as_none() {
		let dir = tempfile::tempdir().unwrap();
		let backend = FileBackend::new(dir.path());

		assert_eq!(backend.get("notes").unwrap(), None);
	}

	#[test]
	fn set_creates_directory_and_overwrites() {
		let dir = tempfile::tempdir().unwrap();
		let backend = FileBackend::new(dir.path().join("nested"));

		backend.set("notes", "[]").unwrap();
		backend.set("notes", "[1]").unwrap();

		assert_eq!(backend.get("notes").unwrap().as_deref(), Some("[1]"));
		assert!(!backend.dir().join("notes.json.tmp").exists());
	}

	#[test]
	fn unreadable_entry_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let backend = FileBackend::new(dir.path());
		// A directory where the file should be
		fs_err::create_dir_all(backend.path_for("notes")).unwrap();

		assert!(backend.get("notes").is_err());
	}
}
