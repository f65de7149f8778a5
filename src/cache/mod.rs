//! Single-entry inverse cache
//!
//! A [`CacheMatrix`] holds a matrix and, once solved, its inverse.
//! [`cache_solve`] computes the inverse on first request and serves the
//! stored value afterwards.
//!
//! # Cache States
//!
//! | State | Inverse | Entered by |
//! |-------|---------|------------|
//! | Empty | absent | construction, `set_matrix` |
//! | Populated | present | successful `cache_solve` (via `set_inverse`) |
//!
//! Replacing the matrix always returns the container to `Empty`, even when
//! the new matrix equals the old one.

pub mod shared;
pub mod solve;

pub use shared::SharedCacheMatrix;
pub use solve::cache_solve;

use crate::matrix::Matrix;

/// Whether a container currently holds an inverse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Empty,
    Populated,
}

/// A matrix paired with its lazily computed inverse
#[derive(Debug, Clone)]
pub struct CacheMatrix {
    matrix: Matrix,
    inverse: Option<Matrix>,
}

impl CacheMatrix {
    /// Wrap a matrix; no inverse is cached yet
    pub fn new(matrix: Matrix) -> Self {
        Self {
            matrix,
            inverse: None,
        }
    }

    /// Replace the matrix and discard any cached inverse
    pub fn set_matrix(&mut self, matrix: Matrix) {
        self.matrix = matrix;
        self.inverse = None;
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Store an inverse for the current matrix
    ///
    /// The value is trusted as-is; [`cache_solve`] is the intended caller.
    pub fn set_inverse(&mut self, inverse: Matrix) {
        self.inverse = Some(inverse);
    }

    pub fn inverse(&self) -> Option<&Matrix> {
        self.inverse.as_ref()
    }

    pub fn state(&self) -> CacheState {
        if self.inverse.is_some() {
            CacheState::Populated
        } else {
            CacheState::Empty
        }
    }

    pub fn is_cached(&self) -> bool {
        self.state() == CacheState::Populated
    }

    /// Consume the container, returning the matrix and any cached inverse
    pub fn into_parts(self) -> (Matrix, Option<Matrix>) {
        (self.matrix, self.inverse)
    }
}

impl From<Matrix> for CacheMatrix {
    fn from(matrix: Matrix) -> Self {
        Self::new(matrix)
    }
}
