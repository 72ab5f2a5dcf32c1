//! Test suite for recipebox
//!
//! This module organizes all tests

pub mod common;
pub mod integration;
