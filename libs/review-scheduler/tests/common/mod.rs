//! Shared helpers for scheduler integration tests.

#![allow(dead_code)]

pub mod fixtures;
