//! Shared foundational types used across the gosling analysis toolchain.
//!
//! This crate provides structural content hashing and the common result
//! types used by the lint engine and its support crates.

#![warn(missing_docs)]

pub mod hash;
pub mod result;

pub use hash::ContentHash;
pub use result::{GoslingResult, InternalError};
