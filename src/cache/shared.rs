//! Thread-safe wrapper around [`CacheMatrix`]
//!
//! The plain container is single-threaded: two callers observing an empty
//! cache would both compute and the last write would win. `SharedCacheMatrix`
//! holds a lock across the whole check-compute-store sequence so concurrent
//! callers trigger exactly one computation per matrix.

use super::{cache_solve, CacheMatrix, CacheState};
use crate::linalg::Invert;
use crate::matrix::Matrix;
use std::sync::{Mutex, MutexGuard};

/// A [`CacheMatrix`] guarded by a mutex
#[derive(Debug)]
pub struct SharedCacheMatrix {
    inner: Mutex<CacheMatrix>,
}

impl SharedCacheMatrix {
    pub fn new(matrix: Matrix) -> Self {
        Self {
            inner: Mutex::new(CacheMatrix::new(matrix)),
        }
    }

    // Every mutation is a single field assignment, so a panic while the lock
    // was held cannot leave a half-written container behind.
    fn lock(&self) -> MutexGuard<'_, CacheMatrix> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Atomic [`cache_solve`]
    ///
    /// The inverter runs while the lock is held; other callers block until
    /// the result is stored and then receive it from the cache.
    pub fn solve<I>(&self, inverter: &I, options: &I::Options) -> Result<Matrix, I::Error>
    where
        I: Invert + ?Sized,
    {
        let mut cache = self.lock();
        cache_solve(&mut cache, inverter, options)
    }

    /// Replace the matrix, discarding any cached inverse
    pub fn set_matrix(&self, matrix: Matrix) {
        self.lock().set_matrix(matrix);
    }

    pub fn matrix(&self) -> Matrix {
        self.lock().matrix().clone()
    }

    pub fn inverse(&self) -> Option<Matrix> {
        self.lock().inverse().cloned()
    }

    pub fn state(&self) -> CacheState {
        self.lock().state()
    }

    pub fn into_inner(self) -> CacheMatrix {
        self.inner
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl From<CacheMatrix> for SharedCacheMatrix {
    fn from(cache: CacheMatrix) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }
}
