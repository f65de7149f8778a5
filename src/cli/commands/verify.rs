//! Verify command - check an inverse against the identity

use crate::cache::{cache_solve, CacheMatrix};
use crate::cli::args::VerifyArgs;
use crate::cli::load_matrix;
use crate::config::Config;
use crate::error::{MatcacheError, MatcacheResult};
use crate::linalg::DenseInverter;
use crate::matrix::Matrix;
use crate::ui::{self, UiContext};

/// Execute the verify command
pub async fn execute(args: VerifyArgs, config: &Config) -> MatcacheResult<()> {
    let ctx = UiContext::detect();
    let matrix = load_matrix(&args.file).await?;
    let options = config
        .solver
        .options(args.solver.method, args.solver.tolerance);

    let mut cache = CacheMatrix::new(matrix);
    let inverse = cache_solve(&mut cache, &DenseInverter, &options)?;

    let residual = round_trip_residual(cache.matrix(), &inverse)?;

    ui::section(&ctx, "Round trip");
    ui::key_value(&ctx, "method", &options.method.to_string());
    ui::key_value(&ctx, "max |A*inv(A) - I|", &format!("{:e}", residual));

    check_residual(residual, args.max_error)?;

    ui::step_ok(
        &ctx,
        &format!("Inverse within {:e} of identity", args.max_error),
    );
    Ok(())
}

/// Fail unless `residual` is a number no larger than `max_error`
fn check_residual(residual: f64, max_error: f64) -> MatcacheResult<()> {
    if residual.is_nan() || residual > max_error {
        return Err(MatcacheError::VerificationFailed {
            residual,
            max_error,
        });
    }
    Ok(())
}

/// Largest deviation of `A * inv` or `inv * A` from the identity
pub fn round_trip_residual(matrix: &Matrix, inverse: &Matrix) -> MatcacheResult<f64> {
    let identity = Matrix::identity(matrix.rows());
    let left = matrix.mul(inverse)?;
    let right = inverse.mul(matrix)?;

    let deviation = |product: &Matrix| {
        product.max_abs_diff(&identity).ok_or_else(|| {
            MatcacheError::Internal(format!(
                "product is {}x{}, expected {}x{}",
                product.rows(),
                product.cols(),
                identity.rows(),
                identity.cols()
            ))
        })
    };

    Ok(deviation(&left)?.max(deviation(&right)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_inverse_has_zero_residual() {
        let a = Matrix::from_rows(vec![vec![1.0, 0.0], vec![1.0, 2.0]]).unwrap();
        let inv = Matrix::from_rows(vec![vec![1.0, 0.0], vec![-0.5, 0.5]]).unwrap();
        assert_eq!(round_trip_residual(&a, &inv).unwrap(), 0.0);
    }

    #[test]
    fn wrong_inverse_has_large_residual() {
        let a = Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 2.0]]).unwrap();
        let residual = round_trip_residual(&a, &Matrix::identity(2)).unwrap();
        assert_eq!(residual, 1.0);
    }

    #[test]
    fn nan_residual_fails_verification() {
        let a = Matrix::identity(2);
        let inv = Matrix::from_rows(vec![vec![f64::NAN, 0.0], vec![0.0, 1.0]]).unwrap();
        let residual = round_trip_residual(&a, &inv).unwrap();
        assert!(residual.is_nan());
        assert!(matches!(
            check_residual(residual, 1e-9),
            Err(MatcacheError::VerificationFailed { .. })
        ));
    }

    #[test]
    fn check_residual_boundary() {
        assert!(check_residual(1e-9, 1e-9).is_ok());
        assert!(check_residual(2e-9, 1e-9).is_err());
    }

    #[test]
    fn mismatched_shapes_error() {
        let a = Matrix::identity(2);
        assert!(round_trip_residual(&a, &Matrix::identity(3)).is_err());
    }
}
