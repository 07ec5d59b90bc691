use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotesError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Failed to (de)serialize notes: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("Failed to read config file at {path:?}")]
	ReadConfig { path: PathBuf, source: std::io::Error },

	#[error("Failed to parse config file at {path:?}")]
	ParseConfig { path: PathBuf, source: toml::de::Error },

	#[error("Invalid config: {0}")]
	InvalidConfig(String),

	#[error("Storage rejected {operation} for key '{key}'")]
	StorageUnavailable { operation: &'static str, key: String },
}

pub type Result<T, E = NotesError> = std::result::Result<T, E>;
