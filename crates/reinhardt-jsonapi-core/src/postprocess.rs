//! Final cleanup of transformation output.
//!
//! Class identifiers and scalar wrappers are internal to the transformation
//! and never reach the emitted document.

use serde_json::{Map, Value};

use crate::tree::{
	CLASS_IDENTIFIER_KEY, MAP_TYPE_KEY, SCALAR_TYPE_KEY, SCALAR_VALUE_KEY, ScalarValue, ValueNode,
};

/// Renders a node as plain JSON.
///
/// Scalars become their bare values, lists become arrays, and objects
/// become maps without their class identifier.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::postprocess::flatten_node;
/// use reinhardt_jsonapi_core::tree::ValueNode;
/// use serde_json::json;
///
/// let node = ValueNode::list(vec![ValueNode::scalar("a"), ValueNode::scalar(1)]);
/// assert_eq!(flatten_node(&node), json!(["a", 1]));
/// ```
pub fn flatten_node(node: &ValueNode) -> Value {
	match node {
		ValueNode::Object(object) => Value::Object(
			object
				.properties()
				.iter()
				.map(|(name, child)| (name.clone(), flatten_node(child)))
				.collect(),
		),
		ValueNode::Scalar(scalar) => match scalar.value() {
			ScalarValue::Primitive(value) => value.clone(),
			ScalarValue::List(items) => Value::Array(items.iter().map(flatten_node).collect()),
		},
		ValueNode::Collection(collection) => {
			Value::Array(collection.items().iter().map(flatten_node).collect())
		}
	}
}

/// Strips every residual tag from a JSON value.
///
/// Scalar and collection wrappers are replaced by their (cleaned) wrapped
/// value and `@type` keys are removed. Applying it twice yields the same
/// value as applying it once.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::postprocess::finalize;
/// use serde_json::json;
///
/// let tagged = json!({"@type": "Acme\\User", "name": {"@scalar": "string", "@value": "Joe"}});
/// assert_eq!(finalize(tagged), json!({"name": "Joe"}));
/// ```
pub fn finalize(value: Value) -> Value {
	match value {
		Value::Object(mut map) => {
			if is_wrapper(&map) {
				let inner = map.remove(SCALAR_VALUE_KEY).unwrap_or(Value::Null);
				return finalize(inner);
			}
			map.remove(CLASS_IDENTIFIER_KEY);
			Value::Object(
				map.into_iter()
					.map(|(key, child)| (key, finalize(child)))
					.collect::<Map<String, Value>>(),
			)
		}
		Value::Array(items) => Value::Array(items.into_iter().map(finalize).collect()),
		primitive => primitive,
	}
}

fn is_wrapper(map: &Map<String, Value>) -> bool {
	map.contains_key(SCALAR_VALUE_KEY)
		&& (map.contains_key(SCALAR_TYPE_KEY) || map.contains_key(MAP_TYPE_KEY))
}
