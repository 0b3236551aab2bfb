//! # daybook-core
//!
//! Core types, traits, and abstractions for daybook, a personal
//! notes-and-todos manager.
//!
//! This crate provides the domain models, repository trait definitions,
//! validation rules and error type that the other daybook crates depend on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;
pub mod validation;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
pub use validation::{dedup_tag_ids, non_blank, validate_tag_name};
