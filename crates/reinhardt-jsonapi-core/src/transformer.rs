//! The transformation entry point.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::assembler::DocumentAssembler;
use crate::config::TransformerConfig;
use crate::document::JsonApiDocument;
use crate::error::TransformResult;
use crate::mapping::MappingRegistry;
use crate::naming::KeyCase;
use crate::postprocess::finalize;
use crate::preprocess::preprocess;
use crate::tree::{TreeParser, ValueNode};

/// Turns value trees into JSON:API documents.
///
/// The registry is shared and never mutated. Transformations hold no state
/// between calls, so one transformer may serve concurrent callers.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::prelude::*;
/// use serde_json::json;
///
/// let registry = MappingRegistry::new().with_mapping(
///     Mapping::new("Acme\\User").with_alias("users").with_id_properties(["id"]),
/// );
/// let transformer = JsonApiTransformer::new(registry);
///
/// let user = ValueNode::object("Acme\\User")
///     .with_property("id", ValueNode::scalar(1))
///     .with_property("name", ValueNode::scalar("Joe"));
///
/// let document = transformer.transform(user.into()).unwrap();
/// assert_eq!(
///     document,
///     json!({"data": {"type": "users", "id": "1", "attributes": {"name": "Joe"}}})
/// );
/// ```
#[derive(Debug, Clone)]
pub struct JsonApiTransformer {
	registry: Arc<MappingRegistry>,
	config: TransformerConfig,
}

impl JsonApiTransformer {
	/// Creates a transformer with the default configuration.
	pub fn new(registry: impl Into<Arc<MappingRegistry>>) -> Self {
		Self {
			registry: registry.into(),
			config: TransformerConfig::default(),
		}
	}

	/// Replaces the configuration.
	pub fn with_config(mut self, config: TransformerConfig) -> Self {
		self.config = config;
		self
	}

	/// Returns the mapping registry.
	pub fn registry(&self) -> &MappingRegistry {
		&self.registry
	}

	/// Returns the configuration.
	pub fn config(&self) -> &TransformerConfig {
		&self.config
	}

	/// Replaces the top-level meta.
	pub fn set_meta(&mut self, meta: Map<String, Value>) {
		self.config.set_meta(meta);
	}

	/// Adds one top-level meta entry.
	pub fn add_meta(&mut self, key: impl Into<String>, value: Value) {
		self.config.add_meta(key, value);
	}

	/// Sets the JSON:API version emitted under `jsonapi`.
	pub fn set_api_version(&mut self, version: impl Into<String>) {
		self.config.set_api_version(version);
	}

	/// Sets the fallback top-level `related` URL.
	pub fn set_related_url(&mut self, url: impl Into<String>) {
		self.config.set_related_url(url);
	}

	/// Sets static metadata merged into every relationship summary.
	pub fn set_relationships(&mut self, relationships: Map<String, Value>) {
		self.config.set_relationships(relationships);
	}

	/// Sets the attribute key casing.
	pub fn set_key_case(&mut self, key_case: KeyCase) {
		self.config.set_key_case(key_case);
	}

	/// Transforms a value tree into a typed document.
	///
	/// # Errors
	///
	/// - [`TransformError::Configuration`](crate::TransformError::Configuration)
	///   if the registry is empty. Nothing is walked in that case.
	/// - Any error of [`DocumentAssembler::assemble`].
	pub fn transform_document(&self, mut tree: ValueNode) -> TransformResult<JsonApiDocument> {
		self.registry.validate()?;
		tracing::debug!(
			"Transforming value tree rooted at '{}'",
			tree.class().unwrap_or("<list>")
		);

		preprocess(&mut tree, &self.registry);
		let document = DocumentAssembler::new(&self.registry, &self.config).assemble(&tree)?;

		tracing::debug!(
			"Assembled document with {} included resources",
			document.included.len()
		);
		Ok(document)
	}

	/// Transforms a value tree into the final JSON document.
	///
	/// The result carries no class identifiers or scalar wrappers.
	pub fn transform(&self, tree: ValueNode) -> TransformResult<Value> {
		let document = self.transform_document(tree)?;
		Ok(finalize(serde_json::to_value(&document)?))
	}

	/// Parses a tagged JSON value tree and transforms it.
	pub fn transform_tagged_json(&self, tagged: &Value) -> TransformResult<Value> {
		self.registry.validate()?;
		let tree = TreeParser::new().parse(tagged)?;
		self.transform(tree)
	}

	/// Transforms a value tree and renders it as pretty-printed JSON.
	pub fn serialize(&self, tree: ValueNode) -> TransformResult<String> {
		Ok(serde_json::to_string_pretty(&self.transform(tree)?)?)
	}
}
