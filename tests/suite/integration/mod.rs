//! Integration tests against a stub recipe API

pub mod auth_test;
pub mod recipes_test;
