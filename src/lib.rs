//! matcache - Memoized matrix inversion
//!
//! Holds a matrix alongside its lazily computed inverse so repeated
//! requests for the inverse of an unchanged matrix are served without
//! recomputation.
//!
//! ```
//! use matcache::{cache_solve, CacheMatrix, DenseInverter, InvertOptions, Matrix};
//!
//! let m = Matrix::from_rows(vec![vec![1.0, 0.0], vec![1.0, 2.0]]).unwrap();
//! let mut cache = CacheMatrix::new(m);
//!
//! let inv = cache_solve(&mut cache, &DenseInverter, &InvertOptions::default()).unwrap();
//! assert_eq!(inv.to_rows(), vec![vec![1.0, 0.0], vec![-0.5, 0.5]]);
//!
//! // Served from the cache
//! let again = cache_solve(&mut cache, &DenseInverter, &InvertOptions::default()).unwrap();
//! assert_eq!(inv, again);
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod linalg;
pub mod matrix;
pub mod ui;

pub use cache::{cache_solve, CacheMatrix, CacheState, SharedCacheMatrix};
pub use error::{MatcacheError, MatcacheResult};
pub use linalg::{DenseInverter, InversionError, Invert, InvertMethod, InvertOptions};
pub use matrix::{Matrix, MatrixError};
