//! Shared utilities for the bf-tool CLI

pub mod format;

pub use format::*;
