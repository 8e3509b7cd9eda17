//! Command handlers, one module per subcommand group.

pub(crate) mod configure;
pub(crate) mod job;
pub(crate) mod meta;
pub(crate) mod migrate;
pub(crate) mod sync;
