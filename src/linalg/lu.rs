//! LU factorization with partial pivoting for general square matrices.
//!
//! Computes `P * A = L * U` where `L` is unit lower triangular and `U` is
//! upper triangular, both packed into a single buffer. The inverse is then
//! recovered column by column by solving `A * x = e_j`:
//!
//! ```text
//! for each column j of I:
//!   1. b = P * e_j
//!   2. L * y = b   (forward substitution, unit diagonal)
//!   3. U * x = y   (backward substitution)
//!   4. A^-1[:, j] = x
//! ```

use super::InversionError;

/// Packed LU factors and the row permutation applied during pivoting
#[derive(Debug)]
struct LuFactors {
    lu: Vec<f64>,
    perm: Vec<usize>,
    n: usize,
}

/// Factor `a` (row-major, `n x n`) in place
///
/// Fails with `Singular` on the first column whose largest remaining
/// magnitude is `<= threshold`, and with `Overflow` once elimination leaves
/// a non-finite entry behind.
fn factor(a: &[f64], n: usize, threshold: f64) -> Result<LuFactors, InversionError> {
    let mut lu = a.to_vec();
    let mut perm: Vec<usize> = (0..n).collect();

    for k in 0..n {
        let mut pivot_row = k;
        let mut max_val = lu[k * n + k].abs();

        for i in (k + 1)..n {
            let val = lu[i * n + k].abs();
            if val > max_val {
                max_val = val;
                pivot_row = i;
            }
        }

        if !max_val.is_finite() {
            return Err(InversionError::Overflow);
        }
        if max_val <= threshold {
            return Err(InversionError::Singular {
                index: k,
                value: max_val,
            });
        }

        if pivot_row != k {
            for j in 0..n {
                lu.swap(k * n + j, pivot_row * n + j);
            }
            perm.swap(k, pivot_row);
        }

        let pivot = lu[k * n + k];
        for i in (k + 1)..n {
            let factor = lu[i * n + k] / pivot;
            lu[i * n + k] = factor;

            for j in (k + 1)..n {
                lu[i * n + j] -= factor * lu[k * n + j];
            }
        }
    }

    if !lu.iter().all(|v| v.is_finite()) {
        return Err(InversionError::Overflow);
    }

    Ok(LuFactors { lu, perm, n })
}

impl LuFactors {
    /// Solve `A * x = e_col`
    fn solve_unit_column(&self, col: usize) -> Vec<f64> {
        let n = self.n;
        let lu = &self.lu;

        // Forward substitution on the permuted unit vector
        let mut x: Vec<f64> = self
            .perm
            .iter()
            .map(|&p| if p == col { 1.0 } else { 0.0 })
            .collect();
        for i in 0..n {
            for j in 0..i {
                x[i] -= lu[i * n + j] * x[j];
            }
        }

        for i in (0..n).rev() {
            for j in (i + 1)..n {
                x[i] -= lu[i * n + j] * x[j];
            }
            x[i] /= lu[i * n + i];
        }

        x
    }
}

/// Invert a row-major `n x n` matrix via LU
pub(super) fn invert(a: &[f64], n: usize, threshold: f64) -> Result<Vec<f64>, InversionError> {
    let factors = factor(a, n, threshold)?;
    let mut inverse = vec![0.0; n * n];

    for col in 0..n {
        let x = factors.solve_unit_column(col);
        for (row, value) in x.into_iter().enumerate() {
            inverse[row * n + col] = value;
        }
    }

    if !inverse.iter().all(|v| v.is_finite()) {
        return Err(InversionError::Overflow);
    }
    Ok(inverse)
}
