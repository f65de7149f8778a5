//! Configuration schema for matcache
//!
//! Configuration is stored at `~/.config/matcache/config.toml`, optionally
//! overridden per project by a `.matcache.toml`.

use crate::linalg::{InvertMethod, InvertOptions, DEFAULT_TOLERANCE};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Inversion defaults
    pub solver: SolverConfig,

    /// Result rendering
    pub output: OutputConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
        }
    }
}

/// Solver defaults, overridable per invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Numerical method: "lu" or "gauss-jordan"
    pub method: InvertMethod,

    /// Pivot magnitude at or below which a matrix is treated as singular
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            method: InvertMethod::Lu,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Inverter options from config, with optional per-call overrides
    pub fn options(&self, method: Option<InvertMethod>, tolerance: Option<f64>) -> InvertOptions {
        InvertOptions::default()
            .with_method(method.unwrap_or(self.method))
            .with_tolerance(tolerance.unwrap_or(self.tolerance))
    }
}

/// How matrices are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatrixFormat {
    /// Aligned rows
    #[default]
    Table,
    /// JSON array of rows
    Json,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: MatrixFormat,

    /// Decimal places for table output
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: MatrixFormat::Table,
            precision: 4,
        }
    }
}
