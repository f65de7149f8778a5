//! Inversion capability
//!
//! [`Invert`] is the seam the cache solves through: any backend that can
//! turn a matrix plus backend-specific options into its inverse. The crate
//! ships [`DenseInverter`], a CPU reference backend with two methods:
//!
//! | Method | Algorithm |
//! |--------|-----------|
//! | `lu` | LU factorization with partial pivoting, then forward/back substitution per column |
//! | `gauss-jordan` | Gauss-Jordan elimination on the augmented matrix `[A \| I]` |

mod gauss_jordan;
mod lu;

use crate::matrix::Matrix;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Default relative pivot tolerance
///
/// A pivot is treated as zero when its magnitude is at or below
/// `tolerance * max|a_ij|`, so scaling a matrix never changes whether it
/// counts as singular.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// A matrix inversion backend
///
/// `Options` carries whatever configuration the backend accepts (tolerance,
/// method selection). Callers pass it through opaquely.
pub trait Invert {
    /// Backend-specific configuration
    type Options;

    /// Failure raised for non-invertible input
    type Error: std::error::Error;

    /// Compute the inverse of `matrix`
    fn invert(&self, matrix: &Matrix, options: &Self::Options) -> Result<Matrix, Self::Error>;
}

/// Errors raised by [`DenseInverter`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InversionError {
    #[error("Matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Singular matrix: pivot at index {index} is zero or too small (value: {value})")]
    Singular { index: usize, value: f64 },

    #[error("Matrix contains NaN or infinite values")]
    NonFinite,

    #[error("Numerical overflow during elimination")]
    Overflow,

    #[error("Invalid tolerance {0}: must be a finite non-negative number")]
    InvalidTolerance(f64),
}

/// Numerical method used by [`DenseInverter`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum InvertMethod {
    /// LU factorization with partial pivoting
    #[default]
    Lu,
    /// Gauss-Jordan elimination with partial pivoting
    GaussJordan,
}

impl fmt::Display for InvertMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvertMethod::Lu => write!(f, "lu"),
            InvertMethod::GaussJordan => write!(f, "gauss-jordan"),
        }
    }
}

/// Options accepted by [`DenseInverter`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvertOptions {
    pub method: InvertMethod,
    pub tolerance: f64,
}

impl InvertOptions {
    pub fn with_method(mut self, method: InvertMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for InvertOptions {
    fn default() -> Self {
        Self {
            method: InvertMethod::Lu,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// CPU reference inversion backend for dense `f64` matrices
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseInverter;

impl Invert for DenseInverter {
    type Options = InvertOptions;
    type Error = InversionError;

    fn invert(&self, matrix: &Matrix, options: &InvertOptions) -> Result<Matrix, InversionError> {
        if !options.tolerance.is_finite() || options.tolerance < 0.0 {
            return Err(InversionError::InvalidTolerance(options.tolerance));
        }
        if !matrix.is_square() {
            return Err(InversionError::NotSquare {
                rows: matrix.rows(),
                cols: matrix.cols(),
            });
        }
        if !matrix.is_finite() {
            return Err(InversionError::NonFinite);
        }

        let n = matrix.rows();
        let scale = matrix
            .as_slice()
            .iter()
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let threshold = options.tolerance * scale;
        debug!(
            "Inverting {}x{} matrix via {} (pivot threshold {:e})",
            n, n, options.method, threshold
        );

        let data = match options.method {
            InvertMethod::Lu => lu::invert(matrix.as_slice(), n, threshold)?,
            InvertMethod::GaussJordan => gauss_jordan::invert(matrix.as_slice(), n, threshold)?,
        };

        Ok(Matrix::square(n, data))
    }
}
