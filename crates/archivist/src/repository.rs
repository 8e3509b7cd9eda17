//! Storage operations for the mirrored entities.
//!
//! Free async functions over a [`sea_orm::DatabaseConnection`], grouped
//! into one submodule per entity. Every function maps database failures
//! into [`RepositoryError`].

pub mod build;
pub mod configuration;
mod errors;
pub mod job;
pub mod test_case;
pub mod test_log;

pub use errors::{RepositoryError, Result};
