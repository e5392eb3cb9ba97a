//! Mapping table loading.
//!
//! The transformer only consumes a built [`MappingRegistry`]; where the table
//! comes from is up to the caller. [`MappingLoader::load_value`] is the one
//! validation point for tables (object keyed by class identifier, well-formed
//! entries). File reading and format detection are conveniences layered on
//! top of it and are not needed to run a transformation.
//!
//! Mapping tables are JSON (or YAML, with the `yaml` feature) objects keyed
//! by class identifier:
//!
//! ```json
//! {
//!   "Acme\\User": {
//!     "alias": "users",
//!     "id_properties": ["id"],
//!     "resource_url": "/users/{id}"
//!   }
//! }
//! ```

use std::path::Path;

use serde_json::Value;

use super::{Mapping, MappingRegistry};
use crate::error::{TransformError, TransformResult};

/// Supported mapping file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum MappingFormat {
	/// JSON format (default).
	#[default]
	Json,

	/// YAML format (requires `yaml` feature).
	Yaml,
}

impl MappingFormat {
	/// Determines the format from a file extension.
	///
	/// # Example
	///
	/// ```
	/// # use reinhardt_jsonapi_core::mapping::MappingFormat;
	/// assert_eq!(MappingFormat::from_extension("json"), Some(MappingFormat::Json));
	/// assert_eq!(MappingFormat::from_extension("YML"), Some(MappingFormat::Yaml));
	/// assert_eq!(MappingFormat::from_extension("toml"), None);
	/// ```
	pub fn from_extension(ext: &str) -> Option<Self> {
		match ext.to_lowercase().as_str() {
			"json" => Some(Self::Json),
			"yaml" | "yml" => Some(Self::Yaml),
			_ => None,
		}
	}

	/// Determines the format from a file path.
	pub fn from_path(path: &Path) -> Option<Self> {
		path.extension()
			.and_then(|ext| ext.to_str())
			.and_then(Self::from_extension)
	}
}

/// Loader for mapping tables.
#[derive(Debug, Default)]
pub struct MappingLoader;

impl MappingLoader {
	/// Creates a new mapping loader.
	pub fn new() -> Self {
		Self
	}

	/// Loads a registry from a mapping file.
	///
	/// The format is detected from the file extension.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - The file extension is not recognized
	/// - The file cannot be read
	/// - The content is not a valid mapping table
	pub fn load_file(&self, path: &Path) -> TransformResult<MappingRegistry> {
		let format = MappingFormat::from_path(path).ok_or_else(|| {
			TransformError::UnsupportedExtension(
				path.extension()
					.and_then(|e| e.to_str())
					.unwrap_or("(none)")
					.to_string(),
			)
		})?;

		let content = std::fs::read_to_string(path).map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				TransformError::FileNotFound(path.display().to_string())
			} else {
				TransformError::Io(e)
			}
		})?;

		let registry = self.load_str(&content, format)?;
		tracing::debug!(
			"Loaded {} mappings from {}",
			registry.len(),
			path.display()
		);
		Ok(registry)
	}

	/// Loads a registry from a string in the given format.
	pub fn load_str(&self, content: &str, format: MappingFormat) -> TransformResult<MappingRegistry> {
		let table = match format {
			MappingFormat::Json => serde_json::from_str(content)?,
			MappingFormat::Yaml => self.parse_yaml(content)?,
		};
		self.load_value(table)
	}

	/// Loads a registry from an already parsed mapping table.
	///
	/// # Errors
	///
	/// Returns a configuration error if the table is not an object keyed by
	/// class identifier or if an entry is not a valid mapping.
	pub fn load_value(&self, table: Value) -> TransformResult<MappingRegistry> {
		let Value::Object(entries) = table else {
			return Err(TransformError::Configuration(
				"mapping table must be an object keyed by class identifier".to_string(),
			));
		};

		let mut mappings = Vec::with_capacity(entries.len());
		for (class, body) in entries {
			let mut mapping: Mapping = serde_json::from_value(body).map_err(|e| {
				TransformError::Configuration(format!("invalid mapping for '{}': {}", class, e))
			})?;
			mapping.set_class(class);
			mappings.push(mapping);
		}
		MappingRegistry::from_mappings(mappings)
	}

	#[cfg(feature = "yaml")]
	fn parse_yaml(&self, content: &str) -> TransformResult<Value> {
		Ok(serde_yaml::from_str(content)?)
	}

	/// Stub for YAML parsing when the feature is not enabled.
	#[cfg(not(feature = "yaml"))]
	fn parse_yaml(&self, _content: &str) -> TransformResult<Value> {
		Err(TransformError::UnsupportedExtension(
			"YAML support requires the 'yaml' feature".to_string(),
		))
	}
}
