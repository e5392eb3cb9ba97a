//! Collection of the `included` member.
//!
//! Walks the subtree below a root resource and summarizes every object of a
//! mapped class reached through relationships. Entries are appended after
//! their own related objects, so nested resources come first. Nothing is
//! deduplicated: a resource reached twice is listed twice.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::document::{Relationship, RelationshipData, ResourceObject};
use crate::error::TransformResult;
use crate::mapping::Mapping;
use crate::postprocess::flatten_node;
use crate::projector::{PropertyKind, ResourceProjector};
use crate::tree::{ObjectNode, ValueNode};

/// Collects included resources below a root object.
#[derive(Debug, Clone, Copy)]
pub struct IncludedCollector<'a> {
	projector: ResourceProjector<'a>,
	relationship_metadata: &'a Map<String, Value>,
}

impl<'a> IncludedCollector<'a> {
	/// Creates a collector.
	///
	/// `relationship_metadata` is merged into every relationship summary,
	/// underneath the metadata of the mapping being visited.
	pub fn new(
		projector: ResourceProjector<'a>,
		relationship_metadata: &'a Map<String, Value>,
	) -> Self {
		Self {
			projector,
			relationship_metadata,
		}
	}

	/// Collects the included resources of a root object.
	///
	/// The root itself is never part of the result; its id properties are
	/// skipped and every other property is visited.
	///
	/// # Errors
	///
	/// Returns [`TransformError::UnmappedType`](crate::TransformError::UnmappedType)
	/// if the root's class has no mapping.
	pub fn collect(&self, root: &ObjectNode) -> TransformResult<Vec<ResourceObject>> {
		let mapping = self.projector.registry().require(root.class())?;
		let mut included = Vec::new();
		for (name, value) in root.properties() {
			if mapping.is_id_property(name) {
				continue;
			}
			self.visit_value(value, &mut included);
		}
		Ok(included)
	}

	fn visit_value(&self, node: &ValueNode, included: &mut Vec<ResourceObject>) {
		match node {
			ValueNode::Object(object) => self.visit_object(object, included),
			other => {
				for child in other.children() {
					self.visit_value(child, included);
				}
			}
		}
	}

	fn visit_object(&self, object: &ObjectNode, included: &mut Vec<ResourceObject>) {
		let Some(mapping) = self.projector.registry().get(object.class()) else {
			for child in object.properties().values() {
				self.visit_value(child, included);
			}
			return;
		};

		let metadata = self.metadata_for(mapping);
		let key_case = self.projector.key_case();
		let mut attributes = Map::new();
		let mut relationships = IndexMap::new();

		for (name, value) in self.projector.non_id_properties(object) {
			match self.projector.classify(value) {
				PropertyKind::Attribute => {
					attributes.insert(key_case.apply(name), flatten_node(value));
					// Unmapped objects may still hold resources further down.
					if self.projector.contains_mapped_object(value) {
						self.visit_value(value, included);
					}
				}
				PropertyKind::ToOne(related) => {
					self.visit_object(related, included);
					let mut keyed = IndexMap::new();
					keyed.insert(name.clone(), self.projector.identifier(related));
					let mut relationship = Relationship::new(
						self.projector.self_link(related),
						RelationshipData::Keyed(keyed),
					);
					relationship.merge_extra(&metadata);
					relationships.insert(name.clone(), relationship);
				}
				PropertyKind::ToMany => {
					self.visit_value(value, included);
					let mut relationship = Relationship::new(
						None,
						RelationshipData::ToMany(self.projector.related_identifiers(value)),
					);
					relationship.merge_extra(&metadata);
					relationships.insert(name.clone(), relationship);
				}
			}
		}

		if attributes.is_empty() {
			return;
		}
		let id = self.projector.resource_id(object);
		if id.is_empty() {
			tracing::trace!(
				"Not including '{}' resource without an id",
				object.class()
			);
			return;
		}

		let resource = ResourceObject {
			resource_type: self.projector.resource_type(object.class()),
			id,
			attributes,
			links: self.projector.self_link(object),
			relationships,
		};
		tracing::trace!(
			"Including resource {}:{}",
			resource.resource_type,
			resource.id
		);
		included.push(resource);
	}

	fn metadata_for(&self, mapping: &Mapping) -> Map<String, Value> {
		let mut metadata = self.relationship_metadata.clone();
		for (key, value) in mapping.relationships() {
			metadata.insert(key.clone(), value.clone());
		}
		metadata
	}
}
