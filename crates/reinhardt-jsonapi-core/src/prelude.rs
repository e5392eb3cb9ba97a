//! Convenience re-exports for common usage.
//!
//! ```
//! use reinhardt_jsonapi_core::prelude::*;
//!
//! let transformer = JsonApiTransformer::new(MappingRegistry::new());
//! assert!(transformer.registry().is_empty());
//! ```

// Error types
pub use crate::error::{TransformError, TransformResult};

// Configuration
pub use crate::config::TransformerConfig;
pub use crate::mapping::{Mapping, MappingFormat, MappingLoader, MappingRegistry, MappingUrls};
pub use crate::naming::KeyCase;

// Value trees
pub use crate::tree::{CollectionNode, ObjectNode, ScalarNode, ScalarValue, TreeParser, ValueNode};

// Output
pub use crate::document::{
	JsonApiDocument, PrimaryData, Relationship, RelationshipData, ResourceIdentifier,
	ResourceLinks, ResourceObject,
};

// Transformation
pub use crate::transformer::JsonApiTransformer;
