//! Mapping registry.
//!
//! This module provides the table of mappings consulted throughout a
//! transformation, keyed by class identifier.

use std::collections::HashMap;

use super::Mapping;
use crate::error::{TransformError, TransformResult};

/// Table of mappings keyed by class identifier.
///
/// The registry is read-only during transformations and can be shared
/// between transformer instances.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::mapping::{Mapping, MappingRegistry};
///
/// let mut registry = MappingRegistry::new();
/// registry.register(Mapping::new("Acme\\User").with_id_properties(["id"]));
///
/// assert!(registry.contains("Acme\\User"));
/// assert!(registry.get("Acme\\Post").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MappingRegistry {
	mappings: HashMap<String, Mapping>,
}

impl MappingRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a registry from a list of mappings.
	///
	/// # Errors
	///
	/// Returns a configuration error if a mapping has an empty class
	/// identifier or if two mappings share one.
	pub fn from_mappings<I>(mappings: I) -> TransformResult<Self>
	where
		I: IntoIterator<Item = Mapping>,
	{
		let mut registry = Self::new();
		for mapping in mappings {
			if mapping.class().is_empty() {
				return Err(TransformError::Configuration(
					"mapping without class identifier".to_string(),
				));
			}
			if registry.contains(mapping.class()) {
				return Err(TransformError::Configuration(format!(
					"duplicate mapping for '{}'",
					mapping.class()
				)));
			}
			registry.register(mapping);
		}
		Ok(registry)
	}

	/// Registers a mapping, returning the one it replaces.
	pub fn register(&mut self, mapping: Mapping) -> Option<Mapping> {
		self.mappings.insert(mapping.class().to_string(), mapping)
	}

	/// Adds a mapping, builder style.
	pub fn with_mapping(mut self, mapping: Mapping) -> Self {
		self.register(mapping);
		self
	}

	/// Gets the mapping for a class identifier.
	pub fn get(&self, class: &str) -> Option<&Mapping> {
		self.mappings.get(class)
	}

	/// Gets the mapping for a class identifier, failing if it is absent.
	///
	/// # Errors
	///
	/// Returns [`TransformError::UnmappedType`] naming the class.
	pub fn require(&self, class: &str) -> TransformResult<&Mapping> {
		self.get(class)
			.ok_or_else(|| TransformError::UnmappedType(class.to_string()))
	}

	/// Checks if a mapping is registered for the class identifier.
	pub fn contains(&self, class: &str) -> bool {
		self.mappings.contains_key(class)
	}

	/// Returns all registered class identifiers, sorted.
	pub fn classes(&self) -> Vec<&str> {
		let mut classes: Vec<&str> = self.mappings.keys().map(String::as_str).collect();
		classes.sort_unstable();
		classes
	}

	/// Iterates over the registered mappings in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = &Mapping> {
		self.mappings.values()
	}

	/// Returns the number of registered mappings.
	pub fn len(&self) -> usize {
		self.mappings.len()
	}

	/// Returns true if no mappings are registered.
	pub fn is_empty(&self) -> bool {
		self.mappings.is_empty()
	}

	/// Checks that the registry can drive a transformation.
	///
	/// # Errors
	///
	/// Returns a configuration error when the registry is empty.
	pub fn validate(&self) -> TransformResult<()> {
		if self.is_empty() {
			return Err(TransformError::Configuration(
				"no mappings were supplied".to_string(),
			));
		}
		Ok(())
	}
}

impl FromIterator<Mapping> for MappingRegistry {
	fn from_iter<I: IntoIterator<Item = Mapping>>(iter: I) -> Self {
		let mut registry = Self::new();
		for mapping in iter {
			registry.register(mapping);
		}
		registry
	}
}
