//! Shared utilities.
//!
//! File hashing for the bundle manifest and test helpers.

pub mod hash;

#[cfg(test)]
pub mod testutil;
