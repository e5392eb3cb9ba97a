//! Naming rules for emitted keys.
//!
//! Two transforms live here: reducing a namespaced class identifier to the
//! flat `type` key, and converting property names to the casing used for
//! attribute members.

use convert_case::{Boundary, Case, Converter};
use serde::{Deserialize, Serialize};

/// Reduces a namespaced class identifier to a flat key.
///
/// The trailing segment after the last `\`, `::`, `/` or `.` is kept
/// verbatim. Classes sharing a trailing segment therefore collide and need
/// an alias.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::naming::namespace_as_key;
///
/// assert_eq!(namespace_as_key("Acme\\Domain\\Comment"), "Comment");
/// assert_eq!(namespace_as_key("blog::models::Post"), "Post");
/// assert_eq!(namespace_as_key("auth.User"), "User");
/// assert_eq!(namespace_as_key("users"), "users");
/// ```
pub fn namespace_as_key(class: &str) -> &str {
	match class
		.rsplit(['\\', '/', '.', ':'])
		.next()
		.filter(|segment| !segment.is_empty())
	{
		Some(segment) => segment,
		None => class,
	}
}

/// Word boundaries recognised in property names.
///
/// Digits stay attached to the word they follow (`address1`, `sha256`); only
/// an uppercase letter after a digit starts a new word.
const WORD_BOUNDARIES: [Boundary; 6] = [
	Boundary::Underscore,
	Boundary::Hyphen,
	Boundary::Space,
	Boundary::LowerUpper,
	Boundary::DigitUpper,
	Boundary::Acronym,
];

/// Casing applied to attribute member names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCase {
	/// Keep property names untouched.
	AsIs,
	/// `firstName` becomes `first_name`.
	#[default]
	Snake,
	/// `firstName` becomes `first-name`.
	Kebab,
	/// `first_name` becomes `firstName`.
	Camel,
}

impl KeyCase {
	/// Converts a property name to this casing.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_jsonapi_core::naming::KeyCase;
	///
	/// assert_eq!(KeyCase::Snake.apply("firstName"), "first_name");
	/// assert_eq!(KeyCase::Kebab.apply("firstName"), "first-name");
	/// assert_eq!(KeyCase::Camel.apply("first_name"), "firstName");
	/// assert_eq!(KeyCase::AsIs.apply("first_Name"), "first_Name");
	/// ```
	pub fn apply(&self, name: &str) -> String {
		let case = match self {
			Self::AsIs => return name.to_string(),
			Self::Snake => Case::Snake,
			Self::Kebab => Case::Kebab,
			Self::Camel => Case::Camel,
		};
		Converter::new()
			.set_boundaries(&WORD_BOUNDARIES)
			.to_case(case)
			.convert(name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("Acme\\Domain\\Comment", "Comment")]
	#[case("blog::models::Post", "Post")]
	#[case("app/models/Tag", "Tag")]
	#[case("auth.User", "User")]
	#[case("comments", "comments")]
	#[case("Acme\\", "Acme\\")]
	fn test_namespace_as_key(#[case] class: &str, #[case] expected: &str) {
		assert_eq!(namespace_as_key(class), expected);
	}

	#[rstest]
	#[case(KeyCase::Snake, "createdAt", "created_at")]
	#[case(KeyCase::Snake, "body", "body")]
	#[case(KeyCase::Kebab, "createdAt", "created-at")]
	#[case(KeyCase::Camel, "created_at", "createdAt")]
	#[case(KeyCase::AsIs, "createdAt", "createdAt")]
	#[case(KeyCase::Snake, "address1", "address1")]
	#[case(KeyCase::Snake, "sha256", "sha256")]
	#[case(KeyCase::Snake, "sha256Digest", "sha256_digest")]
	#[case(KeyCase::Kebab, "line2Text", "line2-text")]
	#[case(KeyCase::Camel, "address_line2", "addressLine2")]
	fn test_key_case(#[case] case: KeyCase, #[case] name: &str, #[case] expected: &str) {
		assert_eq!(case.apply(name), expected);
	}

	#[rstest]
	fn test_key_case_deserialization() {
		let case: KeyCase = serde_json::from_str("\"kebab\"").unwrap();
		assert_eq!(case, KeyCase::Kebab);
		assert_eq!(KeyCase::default(), KeyCase::Snake);
	}
}
