//! Test data loader helper.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use reinhardt_jsonapi_core::mapping::{MappingLoader, MappingRegistry};
use reinhardt_jsonapi_core::tree::ValueNode;
use serde_json::Value;

/// Loads test data files from the `tests/data` directory.
pub struct TestDataLoader {
	base_path: PathBuf,
}

impl TestDataLoader {
	/// Create a loader over `tests/data`.
	pub fn new() -> Self {
		Self {
			base_path: Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data"),
		}
	}

	/// Path of a data file.
	pub fn path(&self, file_name: &str) -> PathBuf {
		self.base_path.join(file_name)
	}

	/// Load a JSON data file by name (without the `.json` extension).
	///
	/// # Panics
	///
	/// Panics if the file cannot be read or parsed.
	pub fn load_json(&self, name: &str) -> Value {
		let path = self.path(&format!("{}.json", name));
		let content = std::fs::read_to_string(&path)
			.unwrap_or_else(|_| panic!("Failed to load test data: {:?}", path));
		serde_json::from_str(&content)
			.unwrap_or_else(|e| panic!("Invalid JSON in {:?}: {}", path, e))
	}

	/// Load a mapping table into a registry.
	pub fn registry(&self, name: &str) -> MappingRegistry {
		MappingLoader::new()
			.load_file(&self.path(&format!("{}.json", name)))
			.unwrap_or_else(|e| panic!("Failed to load mappings '{}': {}", name, e))
	}

	/// Load a tagged value tree.
	pub fn tree(&self, name: &str) -> ValueNode {
		ValueNode::from_tagged_json(&self.load_json(name))
			.unwrap_or_else(|e| panic!("Failed to parse tree '{}': {}", name, e))
	}
}

impl Default for TestDataLoader {
	fn default() -> Self {
		Self::new()
	}
}
