//! scaffolds-common — Shared error type and HTTP client used across the scaffolds crates.

pub mod error;
pub mod sandbox;

pub use error::{Result, ScaffoldError};
