//! Error types for the JSON:API transformer.
//!
//! This module defines the error types used throughout the reinhardt-jsonapi-core crate.

use thiserror::Error;

/// Errors that can occur while building or running a transformation.
///
/// Every variant aborts the current call: no partial document is ever
/// returned to the caller.
#[derive(Debug, Error)]
pub enum TransformError {
	/// No usable mapping table was supplied.
	#[error("Configuration error: {0}")]
	Configuration(String),

	/// A class identifier has no mapping where one is mandatory.
	#[error("Unmapped type: {0}")]
	UnmappedType(String),

	/// The input is not a valid value tree.
	#[error("Malformed value tree at {path}: {message}")]
	MalformedTree {
		/// JSON path of the offending node.
		path: String,
		/// What was wrong with it.
		message: String,
	},

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// YAML deserialization error (when yaml feature is enabled).
	#[cfg(feature = "yaml")]
	#[error("YAML error: {0}")]
	Yaml(#[from] serde_yaml::Error),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// Mapping file not found.
	#[error("Mapping file not found: {0}")]
	FileNotFound(String),

	/// Unsupported file extension.
	#[error("Unsupported file extension: {0}")]
	UnsupportedExtension(String),
}

impl TransformError {
	/// Creates a [`TransformError::MalformedTree`] for the node at `path`.
	pub fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
		Self::MalformedTree {
			path: path.into(),
			message: message.into(),
		}
	}

	/// Returns true for errors caused by the supplied configuration.
	pub fn is_configuration_error(&self) -> bool {
		matches!(self, Self::Configuration(_))
	}
}

/// Result type alias for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_unmapped_type_error() {
		let error = TransformError::UnmappedType("Acme\\Post".to_string());
		assert_eq!(error.to_string(), "Unmapped type: Acme\\Post");
	}

	#[rstest]
	fn test_malformed_tree_error() {
		let error = TransformError::malformed("$.author", "object node without class identifier");
		assert_eq!(
			error.to_string(),
			"Malformed value tree at $.author: object node without class identifier"
		);
	}

	#[rstest]
	fn test_configuration_error_kind() {
		let error = TransformError::Configuration("no mappings were supplied".to_string());
		assert!(error.is_configuration_error());
		assert!(!TransformError::UnmappedType("User".to_string()).is_configuration_error());
	}

	#[rstest]
	fn test_json_error_from() {
		let json_error: serde_json::Error =
			serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
		let error: TransformError = json_error.into();
		assert!(matches!(error, TransformError::Json(_)));
	}
}
