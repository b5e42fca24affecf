//! Shared helpers for the workspace's tests.

pub mod fixture;
pub mod mock;
