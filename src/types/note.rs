use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier of a note. Persisted as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
	pub id:         NoteId,
	pub title:      String,
	pub content:    String,
	pub created_at: DateTime<Utc>,
	// Sole sort key for display
	pub updated_at: DateTime<Utc>,
}

/// A partial edit. Fields left as `None` keep their current value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NotePatch {
	pub title:   Option<String>,
	pub content: Option<String>,
}

impl NoteId {
	pub fn new(raw: impl Into<String>) -> Self { Self(raw.into()) }

	pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for NoteId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for NoteId {
	fn from(raw: &str) -> Self { Self(raw.to_string()) }
}

impl From<String> for NoteId {
	fn from(raw: String) -> Self { Self(raw) }
}

impl NotePatch {
	pub fn title(title: impl Into<String>) -> Self {
		Self { title: Some(title.into()), content: None }
	}

	pub fn content(content: impl Into<String>) -> Self {
		Self { title: None, content: Some(content.into()) }
	}

	pub fn with_content(mut self, content: impl Into<String>) -> Self {
		self.content = Some(content.into());
		self
	}

	pub fn is_empty(&self) -> bool { self.title.is_none() && self.content.is_none() }
}
