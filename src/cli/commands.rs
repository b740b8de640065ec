//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - simulate: run concurrent jobs against one loading store
//! - config: print the effective configuration

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Loadwatch - shared loading state with an overlay observer
#[derive(Parser, Debug)]
#[command(name = "loadwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run concurrent jobs that share one loading flag
    Simulate {
        /// Number of concurrent jobs (defaults to simulate.tasks)
        #[arg(short, long)]
        tasks: Option<usize>,

        /// Force the loading flag for the whole run
        #[arg(short = 'o', long = "override", value_enum, default_value_t = OverrideArg::Auto)]
        mode: OverrideArg,

        /// Print every change event as a JSON line
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverrideArg {
    On,
    Off,
    Auto,
}

impl OverrideArg {
    pub fn as_state(self) -> Option<bool> {
        match self {
            OverrideArg::On => Some(true),
            OverrideArg::Off => Some(false),
            OverrideArg::Auto => None,
        }
    }
}
