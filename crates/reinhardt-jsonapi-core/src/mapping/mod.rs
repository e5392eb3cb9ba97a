//! Per-type mapping configuration.
//!
//! A [`Mapping`] tells the transformer how to project objects of one class:
//! which properties form the identity, which `type` string to emit, which
//! URLs to publish, and how to filter or rename properties beforehand.

mod loader;
mod registry;

pub use loader::{MappingFormat, MappingLoader};
pub use registry::MappingRegistry;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mapping entry for one class identifier.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::mapping::Mapping;
///
/// let mapping = Mapping::new("Acme\\User")
///     .with_alias("users")
///     .with_id_properties(["id"])
///     .with_resource_url("/users/{id}");
///
/// assert!(mapping.is_id_property("id"));
/// assert_eq!(mapping.alias(), Some("users"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Mapping {
	/// Class identifier, taken from the mapping table key.
	#[serde(skip)]
	class: String,
	alias: Option<String>,
	id_properties: Vec<String>,
	resource_url: Option<String>,
	urls: MappingUrls,
	relationships: Map<String, Value>,
	properties: Option<Vec<String>>,
	hidden_properties: Vec<String>,
	aliased_properties: IndexMap<String, String>,
}

impl Mapping {
	/// Creates an empty mapping for a class identifier.
	pub fn new(class: impl Into<String>) -> Self {
		Self {
			class: class.into(),
			..Self::default()
		}
	}

	pub(crate) fn set_class(&mut self, class: impl Into<String>) {
		self.class = class.into();
	}

	/// Sets the alias emitted as the resource `type`.
	pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
		self.alias = Some(alias.into());
		self
	}

	/// Sets the id properties, in declaration order.
	pub fn with_id_properties<I, S>(mut self, properties: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.id_properties = properties.into_iter().map(Into::into).collect();
		self
	}

	/// Sets the resource URL template, e.g. `/users/{id}`.
	pub fn with_resource_url(mut self, template: impl Into<String>) -> Self {
		self.resource_url = Some(template.into());
		self
	}

	/// Sets the top-level document URLs.
	pub fn with_urls(mut self, urls: MappingUrls) -> Self {
		self.urls = urls;
		self
	}

	/// Sets the static relationship metadata.
	pub fn with_relationships(mut self, relationships: Map<String, Value>) -> Self {
		self.relationships = relationships;
		self
	}

	/// Restricts properties to an allow-list. Id properties are always kept.
	pub fn with_properties<I, S>(mut self, properties: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.properties = Some(properties.into_iter().map(Into::into).collect());
		self
	}

	/// Sets properties that are always removed.
	pub fn with_hidden_properties<I, S>(mut self, properties: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.hidden_properties = properties.into_iter().map(Into::into).collect();
		self
	}

	/// Adds a rename rule.
	pub fn with_aliased_property(
		mut self,
		original: impl Into<String>,
		alias: impl Into<String>,
	) -> Self {
		self.aliased_properties.insert(original.into(), alias.into());
		self
	}

	/// Returns the class identifier.
	pub fn class(&self) -> &str {
		&self.class
	}

	/// Returns the class alias, if set.
	pub fn alias(&self) -> Option<&str> {
		self.alias.as_deref()
	}

	/// Returns the id properties in declaration order.
	pub fn id_properties(&self) -> &[String] {
		&self.id_properties
	}

	/// Returns true if `name` is one of the id properties.
	pub fn is_id_property(&self, name: &str) -> bool {
		self.id_properties.iter().any(|p| p == name)
	}

	/// Returns the resource URL template, ignoring empty templates.
	pub fn resource_url(&self) -> Option<&str> {
		self.resource_url.as_deref().filter(|t| !t.is_empty())
	}

	/// Returns the top-level document URLs.
	pub fn urls(&self) -> &MappingUrls {
		&self.urls
	}

	/// Returns the static relationship metadata.
	pub fn relationships(&self) -> &Map<String, Value> {
		&self.relationships
	}

	/// Returns the attribute allow-list, if one is configured.
	pub fn properties(&self) -> Option<&[String]> {
		self.properties.as_deref()
	}

	/// Returns true if the allow-list admits `name`.
	pub fn admits(&self, name: &str) -> bool {
		match &self.properties {
			Some(allowed) => self.is_id_property(name) || allowed.iter().any(|p| p == name),
			None => true,
		}
	}

	/// Returns true if `name` is hidden.
	pub fn is_hidden(&self, name: &str) -> bool {
		self.hidden_properties.iter().any(|p| p == name)
	}

	/// Returns the rename rules in declaration order.
	pub fn aliased_properties(&self) -> &IndexMap<String, String> {
		&self.aliased_properties
	}
}

/// Top-level document URLs declared on a mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingUrls {
	#[serde(rename = "self")]
	self_url: Option<String>,
	first: Option<String>,
	last: Option<String>,
	prev: Option<String>,
	next: Option<String>,
	related: Option<String>,
}

impl MappingUrls {
	/// Creates an empty URL set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the `self` URL.
	pub fn with_self(mut self, url: impl Into<String>) -> Self {
		self.self_url = Some(url.into());
		self
	}

	/// Sets the `first` URL.
	pub fn with_first(mut self, url: impl Into<String>) -> Self {
		self.first = Some(url.into());
		self
	}

	/// Sets the `last` URL.
	pub fn with_last(mut self, url: impl Into<String>) -> Self {
		self.last = Some(url.into());
		self
	}

	/// Sets the `prev` URL.
	pub fn with_prev(mut self, url: impl Into<String>) -> Self {
		self.prev = Some(url.into());
		self
	}

	/// Sets the `next` URL.
	pub fn with_next(mut self, url: impl Into<String>) -> Self {
		self.next = Some(url.into());
		self
	}

	/// Sets the `related` URL.
	pub fn with_related(mut self, url: impl Into<String>) -> Self {
		self.related = Some(url.into());
		self
	}

	/// Returns the `related` URL, if set and non-empty.
	pub fn related(&self) -> Option<&str> {
		non_empty(&self.related)
	}

	/// Returns the non-empty URLs as `(name, url)` pairs.
	///
	/// Order is `self`, `first`, `last`, `prev`, `next`, `related`.
	pub fn entries(&self) -> Vec<(&'static str, &str)> {
		[
			("self", &self.self_url),
			("first", &self.first),
			("last", &self.last),
			("prev", &self.prev),
			("next", &self.next),
			("related", &self.related),
		]
		.into_iter()
		.filter_map(|(name, url)| non_empty(url).map(|url| (name, url)))
		.collect()
	}
}

fn non_empty(url: &Option<String>) -> Option<&str> {
	url.as_deref().filter(|u| !u.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_allow_list_keeps_id_properties() {
		let mapping = Mapping::new("Acme\\User")
			.with_id_properties(["id"])
			.with_properties(["name"]);

		assert!(mapping.admits("id"));
		assert!(mapping.admits("name"));
		assert!(!mapping.admits("password"));
	}

	#[rstest]
	fn test_no_allow_list_admits_everything() {
		let mapping = Mapping::new("Acme\\User");
		assert!(mapping.admits("anything"));
		assert!(mapping.properties().is_none());
	}

	#[rstest]
	fn test_empty_resource_url_is_absent() {
		let mapping = Mapping::new("Acme\\User").with_resource_url("");
		assert_eq!(mapping.resource_url(), None);
	}

	#[rstest]
	fn test_url_entries_skip_empty() {
		let urls = MappingUrls::new()
			.with_self("/posts")
			.with_first("")
			.with_next("/posts?page=2");

		assert_eq!(
			urls.entries(),
			vec![("self", "/posts"), ("next", "/posts?page=2")]
		);
	}

	#[rstest]
	fn test_mapping_deserialization() {
		let mapping: Mapping = serde_json::from_value(json!({
			"alias": "users",
			"id_properties": ["id"],
			"urls": {"self": "/users"},
			"aliased_properties": {"firstName": "givenName"}
		}))
		.unwrap();

		assert_eq!(mapping.alias(), Some("users"));
		assert_eq!(mapping.urls().entries(), vec![("self", "/users")]);
		assert_eq!(
			mapping.aliased_properties().get("firstName").map(String::as_str),
			Some("givenName")
		);
	}

	#[rstest]
	fn test_mapping_rejects_unknown_fields() {
		let result = serde_json::from_value::<Mapping>(json!({"id_property": "id"}));
		assert!(result.is_err());
	}
}
