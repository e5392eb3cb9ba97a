//! JSON:API document transformation for the Reinhardt framework.
//!
//! This crate turns a tagged value tree (the output of an upstream object
//! serializer) into a JSON:API document with `data`, `included`, `links`,
//! `meta` and `jsonapi` members.
//!
//! # Features
//!
//! - `yaml` - YAML mapping table support
//! - `full` - All features enabled
//!
//! # Quick Start
//!
//! Describe how each class is projected:
//!
//! ```json
//! {
//!   "Acme\\Comment": { "alias": "comments", "id_properties": ["id"] },
//!   "Acme\\User": {
//!     "alias": "users",
//!     "id_properties": ["id"],
//!     "resource_url": "/users/{id}"
//!   }
//! }
//! ```
//!
//! Then transform a tree:
//!
//! ```
//! use reinhardt_jsonapi_core::prelude::*;
//! use serde_json::json;
//!
//! let registry = MappingLoader::new().load_value(json!({
//!     "Acme\\Comment": { "alias": "comments", "id_properties": ["id"] },
//!     "Acme\\User": { "alias": "users", "id_properties": ["id"], "resource_url": "/users/{id}" }
//! }))?;
//! let transformer = JsonApiTransformer::new(registry);
//!
//! let comment = ValueNode::object("Acme\\Comment")
//!     .with_property("id", ValueNode::scalar(9))
//!     .with_property("body", ValueNode::scalar("hi"))
//!     .with_property(
//!         "author",
//!         ValueNode::object("Acme\\User")
//!             .with_property("id", ValueNode::scalar(1))
//!             .with_property("name", ValueNode::scalar("Joe")),
//!     );
//!
//! let document = transformer.transform(comment.into())?;
//! assert_eq!(document["data"]["relationships"]["author"]["links"]["self"], "/users/1");
//! assert_eq!(document["included"][0]["attributes"]["name"], "Joe");
//! # Ok::<(), TransformError>(())
//! ```
//!
//! # Architecture
//!
//! A transformation runs in stages:
//!
//! - [`preprocess`](preprocess::preprocess) - Filter and rename properties per mapping
//! - [`ResourceProjector`](projector::ResourceProjector) - Project one object into a resource
//! - [`IncludedCollector`](included::IncludedCollector) - Gather related resources
//! - [`DocumentAssembler`](assembler::DocumentAssembler) - Build the document
//! - [`finalize`](postprocess::finalize) - Strip residual tags
//!
//! [`JsonApiTransformer`] runs all of them.

#![warn(missing_docs)]

pub mod assembler;
pub mod config;
pub mod document;
pub mod error;
pub mod included;
pub mod mapping;
pub mod naming;
pub mod postprocess;
pub mod prelude;
pub mod preprocess;
pub mod projector;
pub mod transformer;
pub mod tree;

pub use config::TransformerConfig;
pub use document::JsonApiDocument;
pub use error::{TransformError, TransformResult};
pub use mapping::{Mapping, MappingRegistry};
pub use transformer::JsonApiTransformer;
pub use tree::ValueNode;
