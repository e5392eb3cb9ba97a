//! Test helpers for reinhardt-jsonapi-core tests.
//!
//! This module provides utility functions for loading mapping tables and
//! value trees stored under `tests/data`.

#[path = "helpers/test_data.rs"]
pub mod test_data;
