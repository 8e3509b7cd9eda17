//! Synchronization engine.
//!
//! Mirrors job, build, and test history from the configured Jenkins
//! server into the local store. One pass walks every tracked job
//! sequentially; failures are contained at the smallest sensible scope
//! (one build, one job) and collected into the final [`SyncReport`]
//! instead of aborting the pass.
//!
//! Module structure:
//! - `engine` - the pass itself: [`run`], [`run_with_client`], [`sync_job`]
//! - `reconcile` - single-build fetch-and-persist
//! - `types` - [`SyncOptions`], [`SyncReport`]
//! - `errors` - [`SyncError`]

mod engine;
mod errors;
mod reconcile;
mod types;

pub use engine::{run, run_with_client, sync_job};
pub use errors::SyncError;
pub use types::{DEFAULT_HISTORY_LIMIT, SyncOptions, SyncReport};
