//! JSON:API document model.
//!
//! Typed form of the document produced by the assembler. Serializing it with
//! serde yields the wire shape:
//!
//! ```json
//! {
//!   "data": { "type": "comments", "id": "9", "attributes": { "body": "hi" } },
//!   "included": [],
//!   "links": { "self": "/comments/9" },
//!   "meta": {},
//!   "jsonapi": { "version": "1.0" }
//! }
//! ```
//!
//! Empty `included`, `links`, `meta` and `relationships` members are omitted.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Top-level `links` member.
pub type Links = IndexMap<String, String>;

/// A complete JSON:API document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonApiDocument {
	/// Primary data.
	pub data: PrimaryData,
	/// Resources discovered through relationships, in discovery order.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub included: Vec<ResourceObject>,
	/// Top-level links.
	#[serde(skip_serializing_if = "IndexMap::is_empty")]
	pub links: Links,
	/// Top-level meta.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub meta: Map<String, Value>,
	/// JSON:API implementation information.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub jsonapi: Option<JsonApiObject>,
}

/// Primary data: one resource or a list of resources.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PrimaryData {
	/// Root was an object node.
	One(Box<ResourceObject>),
	/// Root was a collection node.
	Many(Vec<ResourceObject>),
}

/// A resource object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceObject {
	/// Resource type.
	#[serde(rename = "type")]
	pub resource_type: String,
	/// Resource id; empty when no id property resolved.
	pub id: String,
	/// Attribute members.
	pub attributes: Map<String, Value>,
	/// Resource links.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub links: Option<ResourceLinks>,
	/// Relationship members.
	#[serde(skip_serializing_if = "IndexMap::is_empty")]
	pub relationships: IndexMap<String, Relationship>,
}

impl ResourceObject {
	/// Returns the `{ type, id }` pair identifying this resource.
	pub fn identifier(&self) -> ResourceIdentifier {
		ResourceIdentifier::new(self.resource_type.clone(), self.id.clone())
	}
}

/// Links of a single resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceLinks {
	/// URL of the resource itself.
	#[serde(rename = "self")]
	pub self_link: String,
}

impl ResourceLinks {
	/// Creates links pointing at `self_link`.
	pub fn new(self_link: impl Into<String>) -> Self {
		Self {
			self_link: self_link.into(),
		}
	}
}

/// A resource identifier object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceIdentifier {
	/// Resource type.
	#[serde(rename = "type")]
	pub resource_type: String,
	/// Resource id.
	pub id: String,
}

impl ResourceIdentifier {
	/// Creates an identifier.
	pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
		Self {
			resource_type: resource_type.into(),
			id: id.into(),
		}
	}
}

/// Linkage data of a relationship.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RelationshipData {
	/// A single related resource.
	ToOne(ResourceIdentifier),
	/// A list of related resources.
	ToMany(Vec<ResourceIdentifier>),
	/// A single related resource keyed by the property it was found under.
	Keyed(IndexMap<String, ResourceIdentifier>),
}

/// A relationship member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship {
	/// Links of the related resource.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub links: Option<ResourceLinks>,
	/// Resource linkage.
	pub data: RelationshipData,
	/// Static metadata merged into the member.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Relationship {
	/// Creates a relationship without metadata.
	pub fn new(links: Option<ResourceLinks>, data: RelationshipData) -> Self {
		Self {
			links,
			data,
			extra: Map::new(),
		}
	}

	/// Merges static metadata into the member.
	///
	/// Later entries override earlier ones; `links` and `data` keys are
	/// skipped so the computed linkage always wins.
	pub fn merge_extra(&mut self, metadata: &Map<String, Value>) {
		for (key, value) in metadata {
			if key == "links" || key == "data" {
				tracing::debug!("Skipping relationship metadata key '{}'", key);
				continue;
			}
			self.extra.insert(key.clone(), value.clone());
		}
	}
}

/// The `jsonapi` member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonApiObject {
	/// Highest JSON:API version supported.
	pub version: String,
}
