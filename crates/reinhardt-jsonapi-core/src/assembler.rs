//! Document assembly.
//!
//! Builds the complete document for a preprocessed root: primary data,
//! included resources, top-level links, meta and the `jsonapi` member.

use crate::config::TransformerConfig;
use crate::document::{JsonApiDocument, JsonApiObject, Links, PrimaryData, ResourceObject};
use crate::error::{TransformError, TransformResult};
use crate::included::IncludedCollector;
use crate::mapping::{Mapping, MappingRegistry};
use crate::projector::ResourceProjector;
use crate::tree::{CollectionNode, ObjectNode, ValueNode};

/// Key of the top-level link that falls back to the configured related URL.
const RELATED_LINK: &str = "related";

/// Assembles JSON:API documents.
#[derive(Debug, Clone, Copy)]
pub struct DocumentAssembler<'a> {
	config: &'a TransformerConfig,
	projector: ResourceProjector<'a>,
}

impl<'a> DocumentAssembler<'a> {
	/// Creates an assembler.
	pub fn new(registry: &'a MappingRegistry, config: &'a TransformerConfig) -> Self {
		Self {
			config,
			projector: ResourceProjector::new(registry, config.key_case()),
		}
	}

	/// Assembles the document of a preprocessed tree.
	///
	/// # Errors
	///
	/// - [`TransformError::UnmappedType`] if the root object, or an item of a
	///   root collection, has no mapping.
	/// - [`TransformError::MalformedTree`] if the root is a scalar or a
	///   collection item is not an object.
	pub fn assemble(&self, tree: &ValueNode) -> TransformResult<JsonApiDocument> {
		let (data, included, links) = match tree {
			ValueNode::Object(root) => self.assemble_object(root)?,
			ValueNode::Collection(collection) => self.assemble_collection(collection)?,
			ValueNode::Scalar(scalar) => {
				return Err(TransformError::malformed(
					"$",
					format!(
						"a '{}' scalar cannot be the primary data of a document",
						scalar.scalar_type()
					),
				));
			}
		};

		Ok(JsonApiDocument {
			data,
			included,
			links,
			meta: self.config.meta().clone(),
			jsonapi: self.config.api_version().map(|version| JsonApiObject {
				version: version.to_string(),
			}),
		})
	}

	fn assemble_object(
		&self,
		root: &ObjectNode,
	) -> TransformResult<(PrimaryData, Vec<ResourceObject>, Links)> {
		let mapping = self.projector.registry().require(root.class())?;
		let data = PrimaryData::One(Box::new(self.projector.project(root)));
		let included = self.collector().collect(root)?;
		let links = self.top_level_links(Some(mapping), Some(root));
		Ok((data, included, links))
	}

	fn assemble_collection(
		&self,
		collection: &CollectionNode,
	) -> TransformResult<(PrimaryData, Vec<ResourceObject>, Links)> {
		let collector = self.collector();
		let mut data = Vec::with_capacity(collection.items().len());
		let mut included = Vec::new();

		for (index, item) in collection.items().iter().enumerate() {
			let Some(object) = item.as_object() else {
				return Err(TransformError::malformed(
					format!("$[{}]", index),
					"collection items must be objects",
				));
			};
			self.projector.registry().require(object.class())?;
			data.push(self.projector.project(object));
			included.extend(collector.collect(object)?);
		}

		let registry = self.projector.registry();
		let mapping = registry.get(collection.map_type()).or_else(|| {
			collection
				.items()
				.first()
				.and_then(ValueNode::class)
				.and_then(|class| registry.get(class))
		});
		let links = self.top_level_links(mapping, None);
		Ok((PrimaryData::Many(data), included, links))
	}

	fn collector(&self) -> IncludedCollector<'a> {
		IncludedCollector::new(self.projector, self.config.relationships())
	}

	/// Builds the top-level links from the owning mapping.
	///
	/// Id placeholders are only substituted for object roots; without a root
	/// a templated URL has nothing to expand and is dropped. `related` falls
	/// back to the configured URL and empty entries are dropped.
	fn top_level_links(&self, mapping: Option<&Mapping>, root: Option<&ObjectNode>) -> Links {
		let mut links = Links::new();
		if let Some(mapping) = mapping {
			for (name, template) in mapping.urls().entries() {
				let url = match root {
					Some(root) => self.projector.expand_url(template, root),
					None if has_id_placeholder(template, mapping) => {
						tracing::debug!(
							"Dropping templated '{}' link of '{}' for a collection root",
							name,
							mapping.class()
						);
						continue;
					}
					None => template.to_string(),
				};
				if !url.is_empty() {
					links.insert(name.to_string(), url);
				}
			}
		}
		if !links.contains_key(RELATED_LINK) {
			if let Some(url) = self.config.related_url() {
				links.insert(RELATED_LINK.to_string(), url.to_string());
			}
		}
		links
	}
}

fn has_id_placeholder(template: &str, mapping: &Mapping) -> bool {
	mapping
		.id_properties()
		.iter()
		.any(|name| template.contains(&format!("{{{}}}", name)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mapping::MappingUrls;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn registry() -> MappingRegistry {
		MappingRegistry::new()
			.with_mapping(
				Mapping::new("Acme\\Comment")
					.with_alias("comments")
					.with_id_properties(["id"])
					.with_urls(
						MappingUrls::new()
							.with_self("/comments/{id}")
							.with_first("/comments?page=1"),
					),
			)
			.with_mapping(
				Mapping::new("Acme\\User")
					.with_alias("users")
					.with_id_properties(["id"])
					.with_resource_url("/users/{id}"),
			)
	}

	fn comment(id: i64, author_id: i64) -> ObjectNode {
		ValueNode::object("Acme\\Comment")
			.with_property("id", ValueNode::scalar(id))
			.with_property("body", ValueNode::scalar("hi"))
			.with_property(
				"author",
				ValueNode::object("Acme\\User")
					.with_property("id", ValueNode::scalar(author_id))
					.with_property("name", ValueNode::scalar("Joe")),
			)
	}

	#[rstest]
	fn test_object_root_links_are_expanded(registry: MappingRegistry) {
		let config = TransformerConfig::new().with_related_url("/related");
		let document = DocumentAssembler::new(&registry, &config)
			.assemble(&comment(9, 1).into())
			.unwrap();

		assert_eq!(
			serde_json::to_value(&document.links).unwrap(),
			json!({"self": "/comments/9", "first": "/comments?page=1", "related": "/related"})
		);
		assert_eq!(document.included.len(), 1);
		assert!(document.jsonapi.is_none());
	}

	#[rstest]
	fn test_collection_root(registry: MappingRegistry) {
		let config = TransformerConfig::new().with_api_version("1.0");
		let tree = ValueNode::list(vec![comment(1, 5).into(), comment(2, 6).into()]);
		let document = DocumentAssembler::new(&registry, &config)
			.assemble(&tree)
			.unwrap();

		let PrimaryData::Many(data) = &document.data else {
			panic!("expected a resource list");
		};
		assert_eq!(data.len(), 2);
		assert_eq!(document.included.len(), 2);
		assert!(!document.links.contains_key("self"));
		assert_eq!(
			serde_json::to_value(&document.links).unwrap(),
			json!({"first": "/comments?page=1"})
		);
		assert_eq!(document.jsonapi, Some(JsonApiObject { version: "1.0".to_string() }));
	}

	#[rstest]
	fn test_collection_map_type_owns_links(registry: MappingRegistry) {
		let config = TransformerConfig::new();
		let tree = ValueNode::collection("Acme\\User", vec![comment(1, 5).into()]);
		let document = DocumentAssembler::new(&registry, &config)
			.assemble(&tree)
			.unwrap();
		assert!(document.links.is_empty());
	}

	#[rstest]
	fn test_empty_collection(registry: MappingRegistry) {
		let config = TransformerConfig::new();
		let document = DocumentAssembler::new(&registry, &config)
			.assemble(&ValueNode::list(vec![]))
			.unwrap();
		assert_eq!(serde_json::to_value(&document).unwrap(), json!({"data": []}));
	}

	#[rstest]
	fn test_unmapped_root(registry: MappingRegistry) {
		let config = TransformerConfig::new();
		let result = DocumentAssembler::new(&registry, &config)
			.assemble(&ValueNode::object("Acme\\Audit").into());
		assert!(matches!(result, Err(TransformError::UnmappedType(class)) if class == "Acme\\Audit"));
	}

	#[rstest]
	#[case(ValueNode::scalar("loose"), "$")]
	#[case(ValueNode::list(vec![ValueNode::scalar(1)]), "$[0]")]
	fn test_malformed_roots(
		registry: MappingRegistry,
		#[case] tree: ValueNode,
		#[case] expected_path: &str,
	) {
		let config = TransformerConfig::new();
		let result = DocumentAssembler::new(&registry, &config).assemble(&tree);
		assert!(
			matches!(result, Err(TransformError::MalformedTree { path, .. }) if path == expected_path)
		);
	}
}
