//! Tagged JSON parsing.
//!
//! This module turns the tagged JSON emitted by the upstream serializer into
//! a [`ValueNode`] tree.

use serde_json::{Map, Value};

use super::{
	CLASS_IDENTIFIER_KEY, CollectionNode, DEFAULT_MAP_TYPE, MAP_TYPE_KEY, ObjectNode,
	SCALAR_TYPE_KEY, SCALAR_VALUE_KEY, ScalarNode, ScalarValue, ValueNode, infer_scalar_type,
};
use crate::error::{TransformError, TransformResult};
use crate::postprocess;

/// Parser for tagged JSON value trees.
///
/// Accepted shapes:
///
/// - `{"@type": "<class>", ...properties}` becomes an object node
/// - `{"@scalar": "<type>", "@value": v}` becomes a scalar; an array `v` is
///   parsed into a node list
/// - `{"@map": "<type>", "@value": [...]}` becomes a collection; an object
///   `v` is kept as an opaque scalar of that type
/// - bare arrays become collections of type `array`, bare primitives become
///   scalars with an inferred type
///
/// Objects carrying none of the markers are rejected.
#[derive(Debug, Default)]
pub struct TreeParser;

impl TreeParser {
	/// Creates a new tree parser.
	pub fn new() -> Self {
		Self
	}

	/// Parses a tree from a JSON string.
	pub fn parse_str(&self, content: &str) -> TransformResult<ValueNode> {
		let value: Value = serde_json::from_str(content)?;
		self.parse(&value)
	}

	/// Parses a tree from a JSON value.
	pub fn parse(&self, value: &Value) -> TransformResult<ValueNode> {
		self.parse_at(value, "$")
	}

	fn parse_at(&self, value: &Value, path: &str) -> TransformResult<ValueNode> {
		match value {
			Value::Object(map) => self.parse_map(map, path),
			Value::Array(items) => Ok(ValueNode::Collection(CollectionNode::new(
				DEFAULT_MAP_TYPE,
				self.parse_items(items, path)?,
			))),
			primitive => Ok(ValueNode::Scalar(ScalarNode::new(
				infer_scalar_type(primitive),
				ScalarValue::Primitive(primitive.clone()),
			))),
		}
	}

	fn parse_map(&self, map: &Map<String, Value>, path: &str) -> TransformResult<ValueNode> {
		if let Some(class) = map.get(CLASS_IDENTIFIER_KEY) {
			let class = marker_str(class, CLASS_IDENTIFIER_KEY, path)?;
			let mut object = ObjectNode::new(class);
			for (name, child) in map {
				if name == CLASS_IDENTIFIER_KEY {
					continue;
				}
				let child_path = format!("{}.{}", path, name);
				object.insert(name.clone(), self.parse_at(child, &child_path)?);
			}
			return Ok(ValueNode::Object(object));
		}

		if let Some(scalar_type) = map.get(SCALAR_TYPE_KEY) {
			let scalar_type = marker_str(scalar_type, SCALAR_TYPE_KEY, path)?;
			let value = wrapped_value(map, path)?;
			let value = match value {
				Value::Array(items) => ScalarValue::List(self.parse_items(items, path)?),
				other => ScalarValue::Primitive(postprocess::finalize(other.clone())),
			};
			return Ok(ValueNode::Scalar(ScalarNode::new(scalar_type, value)));
		}

		if let Some(map_type) = map.get(MAP_TYPE_KEY) {
			let map_type = marker_str(map_type, MAP_TYPE_KEY, path)?;
			return match wrapped_value(map, path)? {
				Value::Array(items) => Ok(ValueNode::Collection(CollectionNode::new(
					map_type,
					self.parse_items(items, path)?,
				))),
				keyed @ Value::Object(_) => Ok(ValueNode::Scalar(ScalarNode::new(
					map_type,
					ScalarValue::Primitive(postprocess::finalize(keyed.clone())),
				))),
				_ => Err(TransformError::malformed(
					path,
					format!("'{}' must be an array or an object", SCALAR_VALUE_KEY),
				)),
			};
		}

		Err(TransformError::malformed(
			path,
			format!(
				"object carries none of '{}', '{}', '{}'",
				CLASS_IDENTIFIER_KEY, SCALAR_TYPE_KEY, MAP_TYPE_KEY
			),
		))
	}

	fn parse_items(&self, items: &[Value], path: &str) -> TransformResult<Vec<ValueNode>> {
		items
			.iter()
			.enumerate()
			.map(|(idx, item)| self.parse_at(item, &format!("{}[{}]", path, idx)))
			.collect()
	}
}

fn marker_str<'a>(value: &'a Value, key: &str, path: &str) -> TransformResult<&'a str> {
	value
		.as_str()
		.ok_or_else(|| TransformError::malformed(path, format!("'{}' must be a string", key)))
}

fn wrapped_value<'a>(map: &'a Map<String, Value>, path: &str) -> TransformResult<&'a Value> {
	map.get(SCALAR_VALUE_KEY).ok_or_else(|| {
		TransformError::malformed(path, format!("wrapper without '{}'", SCALAR_VALUE_KEY))
	})
}
