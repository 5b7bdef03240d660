//! CLI subcommand implementations.

pub mod catalog;
