//! Common types and utilities shared across the crate.
//!
//! - Configuration constants
//! - Error types

pub mod config;
pub mod error;

pub use error::{Error, Result};
