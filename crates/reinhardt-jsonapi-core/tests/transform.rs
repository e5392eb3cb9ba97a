//! End-to-end transformation tests.

mod helpers;

use assert_json_diff::assert_json_eq;
use helpers::test_data::TestDataLoader;
use reinhardt_jsonapi_core::prelude::*;
use rstest::{fixture, rstest};
use serde_json::{Map, Value, json};

#[fixture]
fn comment_registry() -> MappingRegistry {
	MappingRegistry::new()
		.with_mapping(
			Mapping::new("Acme\\Comment")
				.with_alias("comments")
				.with_id_properties(["id"]),
		)
		.with_mapping(
			Mapping::new("Acme\\User")
				.with_alias("users")
				.with_id_properties(["id"])
				.with_resource_url("/users/{id}"),
		)
}

fn user(id: i64, name: &str) -> ObjectNode {
	ValueNode::object("Acme\\User")
		.with_property("id", ValueNode::scalar(id))
		.with_property("name", ValueNode::scalar(name))
}

fn comment(id: i64, body: &str, author: ObjectNode) -> ObjectNode {
	ValueNode::object("Acme\\Comment")
		.with_property("id", ValueNode::scalar(id))
		.with_property("body", ValueNode::scalar(body))
		.with_property("author", author)
}

#[rstest]
fn test_comment_with_author(comment_registry: MappingRegistry) {
	let transformer = JsonApiTransformer::new(comment_registry);
	let document = transformer
		.transform(comment(9, "hi", user(1, "Joe")).into())
		.unwrap();

	assert_json_eq!(
		document,
		json!({
			"data": {
				"type": "comments",
				"id": "9",
				"attributes": {"body": "hi"},
				"relationships": {
					"author": {
						"links": {"self": "/users/1"},
						"data": {"type": "users", "id": "1"}
					}
				}
			},
			"included": [{
				"type": "users",
				"id": "1",
				"attributes": {"name": "Joe"},
				"links": {"self": "/users/1"}
			}]
		})
	);
}

#[rstest]
fn test_empty_registry_is_a_configuration_error() {
	let transformer = JsonApiTransformer::new(MappingRegistry::new());
	let error = transformer
		.transform(comment(9, "hi", user(1, "Joe")).into())
		.unwrap_err();
	assert!(matches!(error, TransformError::Configuration(_)));
}

#[rstest]
fn test_collection_root(comment_registry: MappingRegistry) {
	let mut config = TransformerConfig::new().with_api_version("1.0");
	config.add_meta("total", json!(2));
	let transformer = JsonApiTransformer::new(comment_registry).with_config(config);

	let tree = ValueNode::list(vec![
		comment(1, "first", user(5, "Ann")).into(),
		comment(2, "second", user(6, "Bob")).into(),
	]);
	let document = transformer.transform(tree).unwrap();

	assert_json_eq!(
		document,
		json!({
			"data": [
				{
					"type": "comments",
					"id": "1",
					"attributes": {"body": "first"},
					"relationships": {"author": {
						"links": {"self": "/users/5"},
						"data": {"type": "users", "id": "5"}
					}}
				},
				{
					"type": "comments",
					"id": "2",
					"attributes": {"body": "second"},
					"relationships": {"author": {
						"links": {"self": "/users/6"},
						"data": {"type": "users", "id": "6"}
					}}
				}
			],
			"included": [
				{"type": "users", "id": "5", "attributes": {"name": "Ann"}, "links": {"self": "/users/5"}},
				{"type": "users", "id": "6", "attributes": {"name": "Bob"}, "links": {"self": "/users/6"}}
			],
			"meta": {"total": 2},
			"jsonapi": {"version": "1.0"}
		})
	);
}

#[rstest]
fn test_composite_ids() {
	let registry = MappingRegistry::new()
		.with_mapping(
			Mapping::new("Acme\\Membership")
				.with_alias("memberships")
				.with_id_properties(["group", "user"])
				.with_resource_url("/groups/{group}/users/{user}"),
		)
		.with_mapping(Mapping::new("Acme\\User").with_alias("users").with_id_properties(["id"]));
	let membership = ValueNode::object("Acme\\Membership")
		.with_property("group", ValueNode::scalar("admins"))
		.with_property("user", user(3, "Cy"))
		.with_property("since", ValueNode::scalar(2020));

	let document = JsonApiTransformer::new(registry)
		.transform(membership.into())
		.unwrap();

	assert_json_eq!(
		document,
		json!({
			"data": {
				"type": "memberships",
				"id": "admins.3",
				"attributes": {"since": 2020},
				"links": {"self": "/groups/admins/users/3"}
			}
		})
	);
}

#[rstest]
fn test_properties_are_partitioned(comment_registry: MappingRegistry) {
	let tree = comment(1, "text", user(2, "Dee"))
		.with_property("score", ValueNode::scalar(4.5))
		.with_property("likedBy", ValueNode::list(vec![user(3, "Eli").into()]))
		.with_property("labels", ValueNode::list(vec![ValueNode::scalar("a")]));

	let document = JsonApiTransformer::new(comment_registry)
		.transform(tree.into())
		.unwrap();
	let data = &document["data"];

	let attributes: Vec<&String> = data["attributes"].as_object().unwrap().keys().collect();
	let relationships: Vec<&String> = data["relationships"].as_object().unwrap().keys().collect();
	assert_eq!(attributes, vec!["body", "score", "labels"]);
	assert_eq!(relationships, vec!["author", "likedBy"]);
	assert!(data["attributes"].get("id").is_none());
}

#[rstest]
fn test_included_has_no_dedup(comment_registry: MappingRegistry) {
	let tree = comment(1, "text", user(2, "Dee"))
		.with_property("editor", user(2, "Dee"));

	let document = JsonApiTransformer::new(comment_registry)
		.transform(tree.into())
		.unwrap();

	let included = document["included"].as_array().unwrap();
	assert_eq!(included.len(), 2);
	assert_eq!(included[0], included[1]);
}

#[rstest]
fn test_resources_without_id_are_never_included(comment_registry: MappingRegistry) {
	let anonymous = ValueNode::object("Acme\\User").with_property("name", ValueNode::scalar("?"));
	let document = JsonApiTransformer::new(comment_registry)
		.transform(comment(1, "text", anonymous).into())
		.unwrap();

	assert!(document.get("included").is_none());
	assert_json_eq!(
		document["data"]["relationships"]["author"],
		json!({"links": {"self": "/users/"}, "data": {"type": "users", "id": ""}})
	);
}

#[rstest]
fn test_top_level_links_omitted_without_urls(comment_registry: MappingRegistry) {
	let document = JsonApiTransformer::new(comment_registry)
		.transform(comment(1, "text", user(2, "Dee")).into())
		.unwrap();
	assert!(document.get("links").is_none());
	assert!(document.get("meta").is_none());
	assert!(document.get("jsonapi").is_none());
}

#[rstest]
fn test_relationship_metadata(comment_registry: MappingRegistry) {
	let mut relationships = Map::new();
	relationships.insert("meta".to_string(), json!({"lazy": true}));
	let mut transformer = JsonApiTransformer::new(comment_registry);
	transformer.set_relationships(relationships);

	let author = user(2, "Dee").with_property("mentor", user(3, "Eli"));
	let document = transformer
		.transform(comment(1, "text", author).into())
		.unwrap();

	assert_json_eq!(
		document["included"][1]["relationships"]["mentor"],
		json!({
			"links": {"self": "/users/3"},
			"data": {"mentor": {"type": "users", "id": "3"}},
			"meta": {"lazy": true}
		})
	);
}

#[rstest]
fn test_output_is_free_of_tags(comment_registry: MappingRegistry) {
	let tree = comment(1, "text", user(2, "Dee"))
		.with_property("extra", ValueNode::typed_scalar("json", json!({"nested": [1, 2]})));
	let document = JsonApiTransformer::new(comment_registry)
		.transform(tree.into())
		.unwrap();

	let rendered = serde_json::to_string(&document).unwrap();
	assert!(!rendered.contains("@type"));
	assert!(!rendered.contains("@scalar"));
	assert!(!rendered.contains("@value"));
	assert_eq!(finalize_twice(document.clone()), document);
}

fn finalize_twice(value: Value) -> Value {
	use reinhardt_jsonapi_core::postprocess::finalize;
	finalize(finalize(value))
}

#[rstest]
fn test_blog_fixture_end_to_end() {
	let data = TestDataLoader::new();
	let transformer = JsonApiTransformer::new(data.registry("blog_mappings"));
	let document = transformer.transform(data.tree("comment_tree")).unwrap();

	assert_json_eq!(
		document,
		json!({
			"data": {
				"type": "comments",
				"id": "9",
				"attributes": {"body": "hi", "flags": ["pinned"]},
				"relationships": {
					"author": {
						"links": {"self": "/users/1"},
						"data": {"type": "users", "id": "1"}
					},
					"tags": {"data": [{"type": "Tag", "id": "rust"}]}
				}
			},
			"included": [
				{
					"type": "users",
					"id": "1",
					"attributes": {"name": "Joe"},
					"links": {"self": "/users/1"}
				},
				{"type": "Tag", "id": "rust", "attributes": {"label": "Rust"}}
			],
			"links": {
				"self": "/comments/9",
				"related": "/comments/9/author"
			}
		})
	);
}

#[rstest]
fn test_tagged_json_entry_point() {
	let data = TestDataLoader::new();
	let transformer = JsonApiTransformer::new(data.registry("blog_mappings"));
	assert_eq!(
		transformer
			.transform_tagged_json(&data.load_json("comment_tree"))
			.unwrap(),
		transformer.transform(data.tree("comment_tree")).unwrap()
	);
}

#[rstest]
fn test_malformed_tagged_json() {
	let data = TestDataLoader::new();
	let transformer = JsonApiTransformer::new(data.registry("blog_mappings"));
	let error = transformer
		.transform_tagged_json(&json!({"plain": "object"}))
		.unwrap_err();
	assert!(matches!(error, TransformError::MalformedTree { .. }));
}

#[rstest]
fn test_missing_mapping_file() {
	let data = TestDataLoader::new();
	let error = MappingLoader::new()
		.load_file(&data.path("does_not_exist.json"))
		.unwrap_err();
	assert!(matches!(error, TransformError::FileNotFound(_)));
}
