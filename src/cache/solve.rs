//! Cache-aware inversion

use super::CacheMatrix;
use crate::linalg::Invert;
use crate::matrix::Matrix;
use tracing::{debug, info};

/// Return the inverse of the container's matrix, computing it at most once
///
/// On a hit the stored inverse is returned and `options` is ignored. On a
/// miss the matrix is inverted with `inverter`, forwarding `options`
/// unchanged, and the result is stored before returning. Inverter errors
/// propagate as-is and leave the container untouched, so a later call
/// retries the computation.
pub fn cache_solve<I>(
    cache: &mut CacheMatrix,
    inverter: &I,
    options: &I::Options,
) -> Result<Matrix, I::Error>
where
    I: Invert + ?Sized,
{
    if let Some(inverse) = cache.inverse() {
        info!("getting cached data");
        return Ok(inverse.clone());
    }

    let matrix = cache.matrix();
    debug!(
        "No cached inverse, computing for {}x{} matrix",
        matrix.rows(),
        matrix.cols()
    );
    let inverse = inverter.invert(matrix, options)?;
    cache.set_inverse(inverse.clone());

    Ok(inverse)
}
