//! Gauss-Jordan elimination on the augmented matrix `[A | I]`.
//!
//! Each column is pivoted on its largest remaining entry, normalized, and
//! eliminated from every other row. When the left half reaches `I` the
//! right half holds `A^-1`.

use super::InversionError;

/// Invert a row-major `n x n` matrix via Gauss-Jordan
pub(super) fn invert(a: &[f64], n: usize, threshold: f64) -> Result<Vec<f64>, InversionError> {
    let width = 2 * n;
    let mut aug = vec![0.0; n * width];
    for i in 0..n {
        aug[i * width..i * width + n].copy_from_slice(&a[i * n..(i + 1) * n]);
        aug[i * width + n + i] = 1.0;
    }

    for i in 0..n {
        let mut pivot_row = i;
        let mut max_val = aug[i * width + i].abs();
        for r in (i + 1)..n {
            let val = aug[r * width + i].abs();
            if val > max_val {
                max_val = val;
                pivot_row = r;
            }
        }

        if !max_val.is_finite() {
            return Err(InversionError::Overflow);
        }
        if max_val <= threshold {
            return Err(InversionError::Singular {
                index: i,
                value: max_val,
            });
        }

        if pivot_row != i {
            for j in 0..width {
                aug.swap(i * width + j, pivot_row * width + j);
            }
        }

        let pivot = aug[i * width + i];
        for j in 0..width {
            aug[i * width + j] /= pivot;
        }

        for k in 0..n {
            if k == i {
                continue;
            }
            let factor = aug[k * width + i];
            if factor == 0.0 {
                continue;
            }
            for j in 0..width {
                aug[k * width + j] -= factor * aug[i * width + j];
            }
        }
    }

    if !aug.iter().all(|v| v.is_finite()) {
        return Err(InversionError::Overflow);
    }

    let mut inverse = Vec::with_capacity(n * n);
    for i in 0..n {
        inverse.extend_from_slice(&aug[i * width + n..(i + 1) * width]);
    }
    Ok(inverse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverts_upper_triangular() {
        let a = [1.0, 2.0, 0.0, 1.0];
        let inv = invert(&a, 2, 1e-10).unwrap();
        assert_eq!(inv, vec![1.0, -2.0, 0.0, 1.0]);
    }

    #[test]
    fn zero_column_is_singular() {
        let a = [0.0, 1.0, 0.0, 2.0];
        let err = invert(&a, 2, 1e-10).unwrap_err();
        assert_eq!(err, InversionError::Singular { index: 0, value: 0.0 });
    }

    #[test]
    fn overflowing_elimination_is_reported() {
        let a = [1e308, 1e308, 1e308, -1e308];
        assert_eq!(invert(&a, 2, 0.0).unwrap_err(), InversionError::Overflow);
    }
}
