use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{error::{NotesError, Result}, storage::STORAGE_KEY};

/// File name looked up inside the data directory when no config is given.
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub storage: Storage,
	pub log:     Log,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Storage {
	// Falls back to directory discovery when unset
	pub dir: Option<PathBuf>,
	pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Log {
	/// A `tracing_subscriber::EnvFilter` directive.
	pub level: String,
}

impl Default for Storage {
	fn default() -> Self { Self { dir: None, key: STORAGE_KEY.to_string() } }
}

impl Default for Log {
	fn default() -> Self { Self { level: "warn".to_string() } }
}

#[instrument]
pub fn load(path: &Path) -> Result<Config> {
	let raw = fs_err::read_to_string(path)
		.map_err(|source| NotesError::ReadConfig { path: path.to_path_buf(), source })?;

	let config: Config = toml::from_str(&raw)
		.map_err(|source| NotesError::ParseConfig { path: path.to_path_buf(), source })?;

	validate(&config)?;
	Ok(config)
}

/// Loads `explicit` if given, else `config.toml` in `data_dir` if present,
/// else the defaults.
#[instrument]
pub fn load_or_default(explicit: Option<&Path>, data_dir: &Path) -> Result<Config> {
	if let Some(path) = explicit {
		return load(path);
	}

	let candidate = data_dir.join(CONFIG_FILE_NAME);
	if candidate.is_file() {
		return load(&candidate);
	}

	debug!("No config file, using defaults");
	Ok(Config::default())
}

pub fn validate(config: &Config) -> Result<()> {
	let key = config.storage.key.as_str();

	if key.trim().is_empty() {
		return Err(NotesError::InvalidConfig("storage.key must be non-empty".to_string()));
	}
	if key.contains(['/', '\\']) || key == "." || key == ".." {
		return Err(NotesError::InvalidConfig(format!(
			"storage.key '{key}' must not contain path separators"
		)));
	}
	if config.log.level.trim().is_empty() {
		return Err(NotesError::InvalidConfig("log.level must be non-empty".to_string()));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join(CONFIG_FILE_NAME);
		fs_err::write(&path, contents).unwrap();
		(dir, path)
	}

	#[test]
	fn empty_file_yields_defaults() {
		let (_dir, path) = write_config("");

		assert_eq!(load(&path).unwrap(), Config::default());
	}

	#[test]
	fn values_override_defaults() {
		let (_dir, path) = write_config(
			r#"
			[storage]
			dir = "/srv/notes"
			key = "mine"

			[log]
			level = "debug"
			"#,
		);

		let config = load(&path).unwrap();

		assert_eq!(config.storage.dir, Some(PathBuf::from("/srv/notes")));
		assert_eq!(config.storage.key, "mine");
		assert_eq!(config.log.level, "debug");
	}

	#[test]
	fn bad_keys_are_rejected() {
		for key in ["", "  ", "a/b", ".."] {
			let mut config = Config::default();
			config.storage.key = key.to_string();
			assert!(matches!(validate(&config), Err(NotesError::InvalidConfig(_))), "key {key:?}");
		}
	}

	#[test]
	fn unknown_fields_fail_to_parse() {
		let (_dir, path) = write_config("[storage]\nbucket = \"x\"\n");

		assert!(matches!(load(&path), Err(NotesError::ParseConfig { .. })));
	}

	#[test]
	fn missing_explicit_file_is_a_read_error() {
		let dir = tempfile::tempdir().unwrap();

		let result = load_or_default(Some(&dir.path().join("absent.toml")), dir.path());

		assert!(matches!(result, Err(NotesError::ReadConfig { .. })));
	}

	#[test]
	fn config_in_data_directory_is_picked_up() {
		let (dir, _path) = write_config("[log]\nlevel = \"trace\"\n");

		assert_eq!(load_or_default(None, dir.path()).unwrap().log.level, "trace");
		let empty = tempfile::tempdir().unwrap();
		assert_eq!(load_or_default(None, empty.path()).unwrap(), Config::default());
	}
}
