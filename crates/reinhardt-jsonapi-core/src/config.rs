//! Transformer configuration.
//!
//! Everything the transformer needs besides the mapping registry lives in a
//! [`TransformerConfig`] value: top-level `meta`, the JSON:API version, a
//! fallback `related` URL, static relationship metadata and key casing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::naming::KeyCase;

/// Configuration consumed by every transformation.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::config::TransformerConfig;
/// use serde_json::json;
///
/// let config = TransformerConfig::new()
///     .with_api_version("1.0")
///     .with_meta_entry("copyright", json!("Acme"));
///
/// assert_eq!(config.api_version(), Some("1.0"));
/// assert_eq!(config.meta().get("copyright"), Some(&json!("Acme")));
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformerConfig {
	meta: Map<String, Value>,
	api_version: Option<String>,
	related_url: Option<String>,
	relationships: Map<String, Value>,
	key_case: KeyCase,
}

impl TransformerConfig {
	/// Creates a configuration with defaults.
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the top-level meta.
	pub fn with_meta(mut self, meta: Map<String, Value>) -> Self {
		self.set_meta(meta);
		self
	}

	/// Adds one meta entry.
	pub fn with_meta_entry(mut self, key: impl Into<String>, value: Value) -> Self {
		self.add_meta(key, value);
		self
	}

	/// Sets the JSON:API version.
	pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
		self.set_api_version(version);
		self
	}

	/// Sets the fallback `related` URL.
	pub fn with_related_url(mut self, url: impl Into<String>) -> Self {
		self.set_related_url(url);
		self
	}

	/// Sets the static relationship metadata.
	pub fn with_relationships(mut self, relationships: Map<String, Value>) -> Self {
		self.set_relationships(relationships);
		self
	}

	/// Sets the attribute key casing.
	pub fn with_key_case(mut self, key_case: KeyCase) -> Self {
		self.key_case = key_case;
		self
	}

	/// Replaces the top-level meta.
	pub fn set_meta(&mut self, meta: Map<String, Value>) {
		self.meta = meta;
	}

	/// Adds one meta entry, replacing a previous value under the same key.
	pub fn add_meta(&mut self, key: impl Into<String>, value: Value) {
		self.meta.insert(key.into(), value);
	}

	/// Sets the JSON:API version.
	pub fn set_api_version(&mut self, version: impl Into<String>) {
		self.api_version = Some(version.into());
	}

	/// Sets the fallback `related` URL.
	pub fn set_related_url(&mut self, url: impl Into<String>) {
		self.related_url = Some(url.into());
	}

	/// Sets the static relationship metadata.
	pub fn set_relationships(&mut self, relationships: Map<String, Value>) {
		self.relationships = relationships;
	}

	/// Sets the attribute key casing.
	pub fn set_key_case(&mut self, key_case: KeyCase) {
		self.key_case = key_case;
	}

	/// Returns the top-level meta.
	pub fn meta(&self) -> &Map<String, Value> {
		&self.meta
	}

	/// Returns the JSON:API version, if set and non-empty.
	pub fn api_version(&self) -> Option<&str> {
		self.api_version.as_deref().filter(|v| !v.is_empty())
	}

	/// Returns the fallback `related` URL, if set and non-empty.
	pub fn related_url(&self) -> Option<&str> {
		self.related_url.as_deref().filter(|u| !u.is_empty())
	}

	/// Returns the static relationship metadata.
	pub fn relationships(&self) -> &Map<String, Value> {
		&self.relationships
	}

	/// Returns the attribute key casing.
	pub fn key_case(&self) -> KeyCase {
		self.key_case
	}
}
