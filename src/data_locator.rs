use std::{env, path::{Path, PathBuf}};

use tracing::{debug, info, instrument};

/// Name of the data directory searched for in the working tree.
pub const DATA_DIR_NAME: &str = ".notekeeper";

/// Environment variable that overrides directory discovery.
pub const DATA_DIR_ENV: &str = "NOTEKEEPER_DIR";

/// Picks the directory notes are stored in.
///
/// Order: an explicit path (the `--dir` flag), then the configured
/// `storage.dir`, then `NOTEKEEPER_DIR`, then the nearest `.notekeeper`
/// directory in `start` or one of its ancestors, and finally
/// `start/.notekeeper` (created on first write).
#[instrument]
pub fn resolve_data_directory(explicit: Option<&Path>, configured: Option<&Path>, start: &Path) -> PathBuf {
	if let Some(dir) = explicit {
		debug!("Using explicit data directory");
		return dir.to_path_buf();
	}

	if let Some(dir) = configured {
		debug!("Using data directory from config");
		return dir.to_path_buf();
	}

	if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty()) {
		debug!("Using data directory from {}", DATA_DIR_ENV);
		return PathBuf::from(dir);
	}

	find_data_directory(start).unwrap_or_else(|| {
		let fallback = start.join(DATA_DIR_NAME);
		info!("No data directory found, defaulting to {:?}", fallback);
		fallback
	})
}

/// Walks up from `start` looking for an existing `.notekeeper` directory.
#[instrument]
pub fn find_data_directory(start: &Path) -> Option<PathBuf> {
	fn is_data_dir(path: &Path) -> bool { path.is_dir() }

	start.ancestors().map(|dir| dir.join(DATA_DIR_NAME)).find(|candidate| is_data_dir(candidate)).inspect(
		|found| {
			info!("Found data directory at {:?}", found);
		},
	)
}

#[cfg(test)]
mod tests {
	use serial_test::serial;

	use super::*;

	struct EnvDir;

	impl EnvDir {
		fn set(value: &Path) -> Self {
			unsafe {
				env::set_var(DATA_DIR_ENV, value);
			}
			EnvDir
		}

		fn unset() -> Self {
			unsafe {
				env::remove_var(DATA_DIR_ENV);
			}
			EnvDir
		}
	}

	impl Drop for EnvDir {
		fn drop(&mut self) {
			unsafe {
				env::remove_var(DATA_DIR_ENV);
			}
		}
	}

	#[test]
	#[serial]
	fn explicit_path_wins() {
		let dir = tempfile::tempdir().unwrap();
		fs_err::create_dir_all(dir.path().join(DATA_DIR_NAME)).unwrap();
		let _env = EnvDir::set(Path::new("/from-env"));

		let chosen =
			resolve_data_directory(Some(Path::new("/elsewhere")), Some(Path::new("/configured")), dir.path());

		assert_eq!(chosen, PathBuf::from("/elsewhere"));
	}

	#[test]
	#[serial]
	fn configured_directory_beats_environment() {
		let dir = tempfile::tempdir().unwrap();
		let _env = EnvDir::set(Path::new("/from-env"));

		let chosen = resolve_data_directory(None, Some(Path::new("/configured")), dir.path());

		assert_eq!(chosen, PathBuf::from("/configured"));
	}

	#[test]
	#[serial]
	fn environment_beats_discovery() {
		let dir = tempfile::tempdir().unwrap();
		fs_err::create_dir_all(dir.path().join(DATA_DIR_NAME)).unwrap();
		let _env = EnvDir::set(Path::new("/from-env"));

		assert_eq!(resolve_data_directory(None, None, dir.path()), PathBuf::from("/from-env"));
	}

	#[test]
	#[serial]
	fn empty_environment_value_is_ignored() {
		let dir = tempfile::tempdir().unwrap();
		let data = dir.path().join(DATA_DIR_NAME);
		fs_err::create_dir_all(&data).unwrap();
		let _env = EnvDir::set(Path::new(""));

		assert_eq!(resolve_data_directory(None, None, dir.path()), data);
	}

	#[test]
	#[serial]
	fn falls_back_to_data_directory_under_start() {
		let dir = tempfile::tempdir().unwrap();
		let _env = EnvDir::unset();

		let chosen = resolve_data_directory(None, None, dir.path());

		assert_eq!(chosen, dir.path().join(DATA_DIR_NAME));
		assert!(!chosen.exists());
	}

	#[test]
	fn finds_directory_in_an_ancestor() {
		let root = tempfile::tempdir().unwrap();
		let data = root.path().join(DATA_DIR_NAME);
		let nested = root.path().join("a").join("b");
		fs_err::create_dir_all(&data).unwrap();
		fs_err::create_dir_all(&nested).unwrap();

		assert_eq!(find_data_directory(&nested), Some(data));
	}

	#[test]
	fn a_plain_file_is_not_a_data_directory() {
		let root = tempfile::tempdir().unwrap();
		fs_err::write(root.path().join(DATA_DIR_NAME), "").unwrap();

		assert_eq!(find_data_directory(root.path()), None);
	}
}
