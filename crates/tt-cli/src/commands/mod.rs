//! CLI subcommand implementations.

pub mod run;
