//! # Reinhardt JSON:API
//!
//! JSON:API document transformation for the Reinhardt framework.
//!
//! This facade re-exports [`reinhardt_jsonapi_core`]. A value tree produced
//! by an object serializer goes in, a JSON:API document comes out:
//!
//! ```
//! use reinhardt_jsonapi::prelude::*;
//!
//! let registry = MappingRegistry::new().with_mapping(
//!     Mapping::new("Acme\\Post")
//!         .with_alias("posts")
//!         .with_id_properties(["id"])
//!         .with_urls(MappingUrls::new().with_self("/posts/{id}")),
//! );
//! let mut transformer = JsonApiTransformer::new(registry);
//! transformer.set_api_version("1.0");
//!
//! let post = ValueNode::object("Acme\\Post")
//!     .with_property("id", ValueNode::scalar(3))
//!     .with_property("title", ValueNode::scalar("Hello"));
//!
//! let document = transformer.transform(post.into())?;
//! assert_eq!(document["links"]["self"], "/posts/3");
//! assert_eq!(document["jsonapi"]["version"], "1.0");
//! # Ok::<(), TransformError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `yaml` - Load mapping tables from YAML files
//! - `full` - All features enabled

#![warn(missing_docs)]

pub use reinhardt_jsonapi_core::*;
