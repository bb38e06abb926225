//! Dense Gaussian elimination with partial pivoting.

use crate::error::{CircuitError, Result};

/// Solve `a x = b` in place.
///
/// `a` is an `n x n` row-major matrix and `b` has length `n`; both are
/// destroyed. Returns `SingularMatrix` if a pivot is zero (or not finite)
/// after row exchange, instead of dividing by it.
pub fn solve_dense(a: &mut [f64], b: &mut [f64], n: usize) -> Result<Vec<f64>> {
    debug_assert_eq!(a.len(), n * n);
    debug_assert_eq!(b.len(), n);

    for i in 0..n {
        // Find pivot
        let mut max_val = a[i * n + i].abs();
        let mut max_row = i;
        for k in (i + 1)..n {
            let val = a[k * n + i].abs();
            if val > max_val {
                max_val = val;
                max_row = k;
            }
        }

        if max_val == 0.0 || !max_val.is_finite() {
            return Err(CircuitError::SingularMatrix { column: i });
        }

        // Swap rows if needed
        if max_row != i {
            for j in 0..n {
                a.swap(i * n + j, max_row * n + j);
            }
            b.swap(i, max_row);
        }

        // Eliminate
        let pivot = a[i * n + i];
        for k in (i + 1)..n {
            let c = -a[k * n + i] / pivot;
            if c == 0.0 {
                continue;
            }
            a[k * n + i] = 0.0;
            for j in (i + 1)..n {
                a[k * n + j] += c * a[i * n + j];
            }
            b[k] += c * b[i];
        }
    }

    // Back substitution
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= a[i * n + j] * x[j];
        }
        x[i] = sum / a[i * n + i];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_2x2() {
        // 2x + y = 5, x + 3y = 10  =>  x = 1, y = 3
        let mut a = vec![2.0, 1.0, 1.0, 3.0];
        let mut b = vec![5.0, 10.0];
        let x = solve_dense(&mut a, &mut b, 2).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_natural_pivot_needs_swap() {
        // 0x + y = 2, x + y = 3  =>  x = 1, y = 2
        let mut a = vec![0.0, 1.0, 1.0, 1.0];
        let mut b = vec![2.0, 3.0];
        let x = solve_dense(&mut a, &mut b, 2).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_tiny_pivot_is_not_amplified() {
        // Without pivoting the 1e-20 entry would wipe out the answer.
        let mut a = vec![1e-20, 1.0, 1.0, 1.0];
        let mut b = vec![1.0, 2.0];
        let x = solve_dense(&mut a, &mut b, 2).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_singular_matrix_reported() {
        let mut a = vec![1.0, -1.0, -1.0, 1.0];
        let mut b = vec![0.0, 0.0];
        let err = solve_dense(&mut a, &mut b, 2).unwrap_err();
        assert_eq!(err, CircuitError::SingularMatrix { column: 1 });
    }

    #[test]
    fn test_empty_column_reported() {
        let mut a = vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        let mut b = vec![1.0, 0.0, 1.0];
        let err = solve_dense(&mut a, &mut b, 3).unwrap_err();
        assert_eq!(err, CircuitError::SingularMatrix { column: 1 });
    }

    #[test]
    fn test_empty_system() {
        let x = solve_dense(&mut [], &mut [], 0).unwrap();
        assert!(x.is_empty());
    }
}
