//! CLI argument definitions using clap derive

use crate::config::MatrixFormat;
use crate::linalg::InvertMethod;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// matcache - Memoized matrix inversion
///
/// Inverts matrices through a single-entry cache: the first request
/// computes the inverse, repeated requests are served from the cache.
#[derive(Parser, Debug)]
#[command(name = "matcache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MATCACHE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local .matcache.toml discovery
    #[arg(long, global = true)]
    pub no_local: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Invert a matrix read from a JSON file
    Invert(InvertArgs),

    /// Invert a matrix and check A*A^-1 and A^-1*A against the identity
    Verify(VerifyArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Solver overrides shared by invert and verify
#[derive(Args, Debug)]
pub struct SolverArgs {
    /// Numerical method (default: from config)
    #[arg(short, long)]
    pub method: Option<InvertMethod>,

    /// Singular pivot threshold (default: from config)
    #[arg(short, long)]
    pub tolerance: Option<f64>,
}

/// Arguments for the invert command
#[derive(Parser, Debug)]
pub struct InvertArgs {
    /// JSON file holding an array of rows, e.g. [[1, 0], [1, 2]]
    pub file: PathBuf,

    #[command(flatten)]
    pub solver: SolverArgs,

    /// Request the inverse N times through the same cache
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,

    /// Output format (default: from config)
    #[arg(short, long)]
    pub format: Option<MatrixFormat>,

    /// Decimal places for table output (default: from config)
    #[arg(short, long)]
    pub precision: Option<usize>,
}

/// Arguments for the verify command
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// JSON file holding an array of rows
    pub file: PathBuf,

    #[command(flatten)]
    pub solver: SolverArgs,

    /// Largest allowed deviation from the identity
    #[arg(long, default_value = "1e-9")]
    pub max_error: f64,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., solver.method)
        key: String,
        /// Value to set
        value: String,
        /// Write to project-local .matcache.toml instead of global config
        #[arg(long)]
        local: bool,
    },
}
