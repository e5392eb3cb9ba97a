//! Tree preprocessing.
//!
//! Applies each mapping's property filters to every object node of that
//! class before projection: allow-list filtering, deletion of hidden
//! properties, then renaming.

use crate::mapping::{Mapping, MappingRegistry};
use crate::tree::{ObjectNode, ValueNode};

/// Applies the registry's property filters to the whole tree, in place.
///
/// Object nodes are found by class identifier wherever they occur. A parent
/// is processed before its children, so subtrees removed from the parent are
/// never visited. Classes without a mapping are left untouched.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::mapping::{Mapping, MappingRegistry};
/// use reinhardt_jsonapi_core::preprocess::preprocess;
/// use reinhardt_jsonapi_core::tree::ValueNode;
///
/// let registry = MappingRegistry::new().with_mapping(
///     Mapping::new("Acme\\User")
///         .with_id_properties(["id"])
///         .with_hidden_properties(["password"]),
/// );
/// let mut tree: ValueNode = ValueNode::object("Acme\\User")
///     .with_property("id", ValueNode::scalar(1))
///     .with_property("password", ValueNode::scalar("secret"))
///     .into();
///
/// preprocess(&mut tree, &registry);
/// assert!(tree.as_object().unwrap().get("password").is_none());
/// ```
pub fn preprocess(tree: &mut ValueNode, registry: &MappingRegistry) {
	if let ValueNode::Object(object) = tree {
		if let Some(mapping) = registry.get(object.class()) {
			apply_mapping(object, mapping);
		}
	}
	for child in tree.children_mut() {
		preprocess(child, registry);
	}
}

fn apply_mapping(object: &mut ObjectNode, mapping: &Mapping) {
	let properties = object.properties_mut();
	if mapping.properties().is_some() {
		properties.retain(|name, _| mapping.admits(name));
	}
	properties.retain(|name, _| !mapping.is_hidden(name));

	for (original, alias) in mapping.aliased_properties() {
		if mapping.is_id_property(original) {
			tracing::warn!(
				"Refusing to rename id property '{}' of '{}' to '{}'",
				original,
				mapping.class(),
				alias
			);
			continue;
		}
		if let Some(index) = properties.get_index_of(original.as_str()) {
			let value = properties.shift_remove_index(index).map(|(_, value)| value);
			if let Some(value) = value {
				let (new_index, _) = properties.insert_full(alias.clone(), value);
				properties.move_index(new_index, index.min(properties.len() - 1));
			}
		}
	}
}
