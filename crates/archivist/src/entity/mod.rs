//! Database entities.
//!
//! SeaORM models for the mirrored Jenkins data:
//! - [`configuration`] - connection settings singleton
//! - [`job`] - tracked jobs
//! - [`build`] - per-job build history
//! - [`test_case`] - per-build test results
//! - [`test_log`] - captured output per test case

pub mod build;
pub mod configuration;
pub mod job;
pub mod prelude;
pub mod test_case;
pub mod test_log;
