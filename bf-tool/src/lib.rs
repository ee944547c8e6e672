//! bf-tool library
//!
//! Command definitions and helpers behind the `bf-tool` binary.

pub mod cli;
pub mod commands;
pub mod utils;
