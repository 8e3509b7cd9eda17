//! Archivist mirrors Jenkins build history into a local database.
//!
//! A sync pass reads each tracked job over the Jenkins JSON API, records
//! newly appeared builds, re-checks builds that were still running last
//! time, and stores the test report of every finished build. Finished
//! builds are immutable; the mirror only ever grows.
//!
//! Modules:
//! - [`jenkins`] - read-only REST client
//! - [`entity`] / [`repository`] - SeaORM models and storage operations
//! - [`sync`] - the pass itself
//! - [`db`] / [`migration`] - connection helpers and schema migrations
//! - [`http`] - transport abstraction underneath the client

pub mod db;
pub mod entity;
pub mod http;
pub mod jenkins;
#[cfg(feature = "migrate")]
pub mod migration;
pub mod repository;
pub mod sync;

pub use db::connect;
#[cfg(feature = "migrate")]
pub use db::connect_and_migrate;
pub use jenkins::{JenkinsClient, JenkinsError};
pub use repository::RepositoryError;
pub use sync::{SyncError, SyncOptions, SyncReport};
