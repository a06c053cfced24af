//! Library side of the `acct-prioritizer` command.

pub mod commands;
pub mod logging;
pub mod types;
