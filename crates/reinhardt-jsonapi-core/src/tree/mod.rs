//! Value tree definitions.
//!
//! The upstream serializer turns domain objects into a tagged tree. Every
//! node is one of three shapes, modelled here as [`ValueNode`]:
//!
//! ```json
//! {
//!   "@type": "Acme\\Comment",
//!   "id": { "@scalar": "integer", "@value": 9 },
//!   "tags": { "@map": "array", "@value": [{ "@scalar": "string", "@value": "news" }] }
//! }
//! ```

mod parser;

pub use parser::TreeParser;

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Key carrying the class identifier of an object node.
pub const CLASS_IDENTIFIER_KEY: &str = "@type";

/// Key carrying the scalar type of a scalar-wrapper node.
pub const SCALAR_TYPE_KEY: &str = "@scalar";

/// Key carrying the collection type of a collection-wrapper node.
pub const MAP_TYPE_KEY: &str = "@map";

/// Key carrying the wrapped value of scalar and collection wrappers.
pub const SCALAR_VALUE_KEY: &str = "@value";

/// Map type given to bare JSON arrays.
pub const DEFAULT_MAP_TYPE: &str = "array";

/// One node of the value tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
	/// A domain entity tagged with its class identifier.
	Object(ObjectNode),
	/// A primitive value, or a wrapped list of nodes.
	Scalar(ScalarNode),
	/// A homogeneous list of nodes.
	Collection(CollectionNode),
}

/// An object node: ordered properties tagged with a class identifier.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::tree::{ObjectNode, ValueNode};
///
/// let user = ObjectNode::new("Acme\\User")
///     .with_property("id", ValueNode::scalar(1))
///     .with_property("name", ValueNode::scalar("Joe"));
///
/// assert_eq!(user.class(), "Acme\\User");
/// assert_eq!(user.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
	class: String,
	properties: IndexMap<String, ValueNode>,
}

impl ObjectNode {
	/// Creates an object node without properties.
	pub fn new(class: impl Into<String>) -> Self {
		Self {
			class: class.into(),
			properties: IndexMap::new(),
		}
	}

	/// Appends a property, replacing any previous value under that name.
	pub fn with_property(mut self, name: impl Into<String>, value: impl Into<ValueNode>) -> Self {
		self.properties.insert(name.into(), value.into());
		self
	}

	/// Returns the class identifier.
	pub fn class(&self) -> &str {
		&self.class
	}

	/// Returns the properties in stored order.
	pub fn properties(&self) -> &IndexMap<String, ValueNode> {
		&self.properties
	}

	/// Returns the properties for in-place edits.
	pub fn properties_mut(&mut self) -> &mut IndexMap<String, ValueNode> {
		&mut self.properties
	}

	/// Gets a property by name.
	pub fn get(&self, name: &str) -> Option<&ValueNode> {
		self.properties.get(name)
	}

	/// Inserts a property, keeping the position of an existing key.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ValueNode>) -> Option<ValueNode> {
		self.properties.insert(name.into(), value.into())
	}

	/// Removes a property, preserving the order of the remaining ones.
	pub fn remove(&mut self, name: &str) -> Option<ValueNode> {
		self.properties.shift_remove(name)
	}

	/// Returns the number of properties.
	pub fn len(&self) -> usize {
		self.properties.len()
	}

	/// Returns true if the object has no properties.
	pub fn is_empty(&self) -> bool {
		self.properties.is_empty()
	}
}

/// Payload of a scalar-wrapper node.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
	/// A bare JSON value (string, number, bool, null, or an opaque structure).
	Primitive(Value),
	/// A wrapped list of nodes.
	List(Vec<ValueNode>),
}

/// A scalar-wrapper node.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarNode {
	scalar_type: String,
	value: ScalarValue,
}

impl ScalarNode {
	/// Creates a scalar node.
	pub fn new(scalar_type: impl Into<String>, value: ScalarValue) -> Self {
		Self {
			scalar_type: scalar_type.into(),
			value,
		}
	}

	/// Returns the declared scalar type, which may name a mapped class.
	pub fn scalar_type(&self) -> &str {
		&self.scalar_type
	}

	/// Returns the wrapped value.
	pub fn value(&self) -> &ScalarValue {
		&self.value
	}
}

/// A collection-wrapper node.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionNode {
	map_type: String,
	items: Vec<ValueNode>,
}

impl CollectionNode {
	/// Creates a collection node.
	pub fn new(map_type: impl Into<String>, items: Vec<ValueNode>) -> Self {
		Self {
			map_type: map_type.into(),
			items,
		}
	}

	/// Returns the declared collection type.
	pub fn map_type(&self) -> &str {
		&self.map_type
	}

	/// Returns the items in order.
	pub fn items(&self) -> &[ValueNode] {
		&self.items
	}
}

impl ValueNode {
	/// Starts an object node; finish with `.into()`.
	pub fn object(class: impl Into<String>) -> ObjectNode {
		ObjectNode::new(class)
	}

	/// Wraps a primitive, inferring its scalar type.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_jsonapi_core::tree::{ScalarValue, ValueNode};
	/// use serde_json::json;
	///
	/// let node = ValueNode::scalar("hi");
	/// let ValueNode::Scalar(scalar) = node else { unreachable!() };
	/// assert_eq!(scalar.scalar_type(), "string");
	/// assert_eq!(scalar.value(), &ScalarValue::Primitive(json!("hi")));
	/// ```
	pub fn scalar(value: impl Into<Value>) -> Self {
		let value = value.into();
		let scalar_type = infer_scalar_type(&value);
		Self::Scalar(ScalarNode::new(scalar_type, ScalarValue::Primitive(value)))
	}

	/// Wraps a primitive under an explicit scalar type.
	pub fn typed_scalar(scalar_type: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::Scalar(ScalarNode::new(
			scalar_type,
			ScalarValue::Primitive(value.into()),
		))
	}

	/// Wraps a list of nodes under a scalar type.
	pub fn scalar_list(scalar_type: impl Into<String>, items: Vec<ValueNode>) -> Self {
		Self::Scalar(ScalarNode::new(scalar_type, ScalarValue::List(items)))
	}

	/// Creates a collection node.
	pub fn collection(map_type: impl Into<String>, items: Vec<ValueNode>) -> Self {
		Self::Collection(CollectionNode::new(map_type, items))
	}

	/// Creates a collection node with the default map type.
	pub fn list(items: Vec<ValueNode>) -> Self {
		Self::collection(DEFAULT_MAP_TYPE, items)
	}

	/// Returns the object node, if this is one.
	pub fn as_object(&self) -> Option<&ObjectNode> {
		match self {
			Self::Object(object) => Some(object),
			_ => None,
		}
	}

	/// Returns the class identifier of an object node.
	pub fn class(&self) -> Option<&str> {
		self.as_object().map(ObjectNode::class)
	}

	/// Iterates over the direct children of this node.
	pub fn children(&self) -> Box<dyn Iterator<Item = &ValueNode> + '_> {
		match self {
			Self::Object(object) => Box::new(object.properties.values()),
			Self::Scalar(ScalarNode {
				value: ScalarValue::List(items),
				..
			})
			| Self::Collection(CollectionNode { items, .. }) => Box::new(items.iter()),
			Self::Scalar(_) => Box::new(std::iter::empty()),
		}
	}

	/// Iterates mutably over the direct children of this node.
	pub fn children_mut(&mut self) -> Box<dyn Iterator<Item = &mut ValueNode> + '_> {
		match self {
			Self::Object(object) => Box::new(object.properties.values_mut()),
			Self::Scalar(ScalarNode {
				value: ScalarValue::List(items),
				..
			})
			| Self::Collection(CollectionNode { items, .. }) => Box::new(items.iter_mut()),
			Self::Scalar(_) => Box::new(std::iter::empty()),
		}
	}

	/// Parses a node from its tagged JSON form.
	///
	/// See [`TreeParser`] for the accepted shapes.
	pub fn from_tagged_json(value: &Value) -> crate::TransformResult<Self> {
		TreeParser::new().parse(value)
	}

	/// Renders the node back into its tagged JSON form.
	pub fn to_tagged_json(&self) -> Value {
		match self {
			Self::Object(object) => {
				let mut map = Map::new();
				map.insert(
					CLASS_IDENTIFIER_KEY.to_string(),
					Value::String(object.class.clone()),
				);
				for (name, child) in &object.properties {
					map.insert(name.clone(), child.to_tagged_json());
				}
				Value::Object(map)
			}
			Self::Scalar(scalar) => {
				let value = match &scalar.value {
					ScalarValue::Primitive(value) => value.clone(),
					ScalarValue::List(items) => {
						Value::Array(items.iter().map(Self::to_tagged_json).collect())
					}
				};
				wrapper(SCALAR_TYPE_KEY, &scalar.scalar_type, value)
			}
			Self::Collection(collection) => wrapper(
				MAP_TYPE_KEY,
				&collection.map_type,
				Value::Array(collection.items.iter().map(Self::to_tagged_json).collect()),
			),
		}
	}
}

impl From<ObjectNode> for ValueNode {
	fn from(object: ObjectNode) -> Self {
		Self::Object(object)
	}
}

fn wrapper(type_key: &str, type_name: &str, value: Value) -> Value {
	let mut map = Map::new();
	map.insert(type_key.to_string(), Value::String(type_name.to_string()));
	map.insert(SCALAR_VALUE_KEY.to_string(), value);
	Value::Object(map)
}

/// Names the scalar type of a bare JSON value.
pub fn infer_scalar_type(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(number) if number.is_f64() => "float",
		Value::Number(_) => "integer",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}
