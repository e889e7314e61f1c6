//! Style integration tests.

mod length_test;
mod shape_parse_test;
