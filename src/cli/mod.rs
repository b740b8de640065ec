//! CLI module for loadwatch - command-line interface and subcommands.

pub mod commands;

pub use commands::Cli;
