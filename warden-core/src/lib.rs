//! Warden Core Library
//!
//! This crate provides configuration management and error handling for the
//! Warden endpoint tooling.

pub mod config;
pub mod error;

pub use error::{Error, Result};

/// Warden version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
