//! Resource projection.
//!
//! Projects one object node into a JSON:API resource object: resolves its
//! `type` and `id`, splits its properties into attributes and relationships,
//! and expands its resource URL template into a `self` link.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::document::{
	Relationship, RelationshipData, ResourceIdentifier, ResourceLinks, ResourceObject,
};
use crate::mapping::MappingRegistry;
use crate::naming::{KeyCase, namespace_as_key};
use crate::postprocess::flatten_node;
use crate::tree::{ObjectNode, ScalarValue, ValueNode};

/// Separator joining the parts of a composite id.
pub const ID_SEPARATOR: &str = ".";

/// How a non-id property of a mapped object is emitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyKind<'n> {
	/// Emitted under `attributes`.
	Attribute,
	/// An object of a mapped class.
	ToOne(&'n ObjectNode),
	/// A list (or mapped-type scalar) holding objects of mapped classes.
	ToMany,
}

/// Projects object nodes into resource objects.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::mapping::{Mapping, MappingRegistry};
/// use reinhardt_jsonapi_core::naming::KeyCase;
/// use reinhardt_jsonapi_core::projector::ResourceProjector;
/// use reinhardt_jsonapi_core::tree::ValueNode;
///
/// let registry = MappingRegistry::new().with_mapping(
///     Mapping::new("Acme\\User")
///         .with_alias("users")
///         .with_id_properties(["id"])
///         .with_resource_url("/users/{id}"),
/// );
/// let user = ValueNode::object("Acme\\User")
///     .with_property("id", ValueNode::scalar(1))
///     .with_property("name", ValueNode::scalar("Joe"));
///
/// let resource = ResourceProjector::new(&registry, KeyCase::Snake).project(&user);
/// assert_eq!(resource.resource_type, "users");
/// assert_eq!(resource.id, "1");
/// assert_eq!(resource.links.unwrap().self_link, "/users/1");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ResourceProjector<'a> {
	registry: &'a MappingRegistry,
	key_case: KeyCase,
}

impl<'a> ResourceProjector<'a> {
	/// Creates a projector over a registry.
	pub fn new(registry: &'a MappingRegistry, key_case: KeyCase) -> Self {
		Self { registry, key_case }
	}

	/// Returns the registry this projector reads.
	pub fn registry(&self) -> &'a MappingRegistry {
		self.registry
	}

	/// Returns the attribute key casing.
	pub fn key_case(&self) -> KeyCase {
		self.key_case
	}

	/// Projects an object node into `{ type, id, attributes, links?, relationships? }`.
	///
	/// Callers must make sure the class is mapped; an unmapped class projects
	/// into an empty id and no attributes filtering by id properties.
	pub fn project(&self, object: &ObjectNode) -> ResourceObject {
		ResourceObject {
			resource_type: self.resource_type(object.class()),
			id: self.resource_id(object),
			attributes: self.attributes(object),
			links: self.self_link(object),
			relationships: self.relationships(object),
		}
	}

	/// Resolves the emitted `type` of a class.
	pub fn resource_type(&self, class: &str) -> String {
		let name = self
			.registry
			.get(class)
			.and_then(|mapping| mapping.alias())
			.unwrap_or(class);
		namespace_as_key(name).to_string()
	}

	/// Resolves the id of an object: its id property values joined with
	/// [`ID_SEPARATOR`] in declaration order.
	///
	/// Missing id properties are skipped; an object without any yields an
	/// empty string.
	pub fn resource_id(&self, object: &ObjectNode) -> String {
		join_parts(self.id_values(object).into_values())
	}

	/// Returns the `{ type, id }` pair of an object.
	pub fn identifier(&self, object: &ObjectNode) -> ResourceIdentifier {
		ResourceIdentifier::new(self.resource_type(object.class()), self.resource_id(object))
	}

	/// Resolves each present id property of an object, in declaration order.
	pub fn id_values(&self, object: &ObjectNode) -> IndexMap<String, String> {
		let Some(mapping) = self.registry.get(object.class()) else {
			return IndexMap::new();
		};
		mapping
			.id_properties()
			.iter()
			.filter_map(|name| {
				object
					.get(name)
					.map(|value| (name.clone(), self.resolve_value(value)))
			})
			.collect()
	}

	/// Resolves any node to the string used inside ids.
	///
	/// Objects of mapped classes resolve to their own id, so ids may nest.
	pub fn resolve_value(&self, node: &ValueNode) -> String {
		match node {
			ValueNode::Object(object) if self.registry.contains(object.class()) => {
				self.resource_id(object)
			}
			ValueNode::Scalar(scalar) => match scalar.value() {
				ScalarValue::Primitive(value) => primitive_to_id(value),
				ScalarValue::List(_) => join_parts(node.children().map(|c| self.resolve_value(c))),
			},
			_ => join_parts(node.children().map(|c| self.resolve_value(c))),
		}
	}

	/// Expands the class's resource URL template for this object.
	///
	/// Returns `None` when the class has no template.
	pub fn self_link(&self, object: &ObjectNode) -> Option<ResourceLinks> {
		let template = self.registry.get(object.class())?.resource_url()?;
		Some(ResourceLinks::new(self.expand_url(template, object)))
	}

	/// Substitutes every `{idProperty}` placeholder of `template`.
	///
	/// Absent id properties are substituted with an empty string.
	pub fn expand_url(&self, template: &str, object: &ObjectNode) -> String {
		let Some(mapping) = self.registry.get(object.class()) else {
			return template.to_string();
		};
		let values = self.id_values(object);
		mapping
			.id_properties()
			.iter()
			.fold(template.to_string(), |url, name| {
				let value = values.get(name).map(String::as_str).unwrap_or("");
				url.replace(&format!("{{{}}}", name), value)
			})
	}

	/// Returns true if the node is an object of a mapped class.
	pub fn is_mapped_object(&self, node: &ValueNode) -> bool {
		node.class().is_some_and(|class| self.registry.contains(class))
	}

	/// Returns true if an object of a mapped class occurs anywhere in the node.
	pub fn contains_mapped_object(&self, node: &ValueNode) -> bool {
		self.is_mapped_object(node) || node.children().any(|c| self.contains_mapped_object(c))
	}

	/// Classifies a non-id property value.
	///
	/// The three kinds partition every possible value.
	pub fn classify<'n>(&self, node: &'n ValueNode) -> PropertyKind<'n> {
		match node {
			ValueNode::Object(object) if self.registry.contains(object.class()) => {
				PropertyKind::ToOne(object)
			}
			ValueNode::Object(_) => PropertyKind::Attribute,
			ValueNode::Scalar(scalar) if self.registry.contains(scalar.scalar_type()) => {
				PropertyKind::ToMany
			}
			other if self.contains_mapped_object(other) => PropertyKind::ToMany,
			_ => PropertyKind::Attribute,
		}
	}

	/// Collects the identifiers of mapped objects reachable through lists.
	///
	/// Lists are descended into, objects are not.
	pub fn related_identifiers(&self, node: &ValueNode) -> Vec<ResourceIdentifier> {
		match node {
			ValueNode::Object(object) if self.registry.contains(object.class()) => {
				vec![self.identifier(object)]
			}
			ValueNode::Object(_) => Vec::new(),
			other => other
				.children()
				.flat_map(|c| self.related_identifiers(c))
				.collect(),
		}
	}

	/// Builds the `attributes` member of an object.
	pub fn attributes(&self, object: &ObjectNode) -> Map<String, Value> {
		self.non_id_properties(object)
			.filter(|(_, value)| self.classify(value) == PropertyKind::Attribute)
			.map(|(name, value)| (self.key_case.apply(name), flatten_node(value)))
			.collect()
	}

	/// Builds the `relationships` member of an object from its immediate children.
	pub fn relationships(&self, object: &ObjectNode) -> IndexMap<String, Relationship> {
		self.non_id_properties(object)
			.filter_map(|(name, value)| {
				let relationship = match self.classify(value) {
					PropertyKind::Attribute => return None,
					PropertyKind::ToOne(related) => Relationship::new(
						self.self_link(related),
						RelationshipData::ToOne(self.identifier(related)),
					),
					PropertyKind::ToMany => Relationship::new(
						None,
						RelationshipData::ToMany(self.related_identifiers(value)),
					),
				};
				Some((name.clone(), relationship))
			})
			.collect()
	}

	/// Iterates over the properties that are not id properties of the class.
	pub fn non_id_properties<'n>(
		&self,
		object: &'n ObjectNode,
	) -> impl Iterator<Item = (&'n String, &'n ValueNode)> + use<'a, 'n> {
		let mapping = self.registry.get(object.class());
		object
			.properties()
			.iter()
			.filter(move |(name, _)| !mapping.is_some_and(|m| m.is_id_property(name)))
	}
}

fn primitive_to_id(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		Value::Array(items) => join_parts(items.iter().map(primitive_to_id)),
		Value::Object(map) => join_parts(map.values().map(primitive_to_id)),
		other => other.to_string(),
	}
}

fn join_parts(parts: impl Iterator<Item = String>) -> String {
	parts
		.filter(|part| !part.is_empty())
		.collect::<Vec<_>>()
		.join(ID_SEPARATOR)
}
