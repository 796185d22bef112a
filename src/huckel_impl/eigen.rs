//! Real symmetric eigenproblem for the secular matrix

use crate::error::{HuckelError, Result};
use nalgebra::{DMatrix, DVector};
use std::cmp::Ordering;
use tracing::{debug, warn};

const SYMMETRY_TOLERANCE: f64 = 1e-10;
const MAX_SWEEPS: usize = 1000;

/// Eigenvalues with matching unit eigenvectors stored as columns.
#[derive(Debug, Clone)]
pub struct Eigendecomposition {
    pub eigenvalues: DVector<f64>,
    pub eigenvectors: DMatrix<f64>,
}

/// Diagonalize a real symmetric matrix.
///
/// Uses nalgebra's symmetric QR iteration; if that does not converge on a
/// 2x2 matrix the closed form is used instead. Eigenvector signs are fixed
/// so that the largest component of each vector is positive.
pub fn diagonalize(h: &DMatrix<f64>) -> Result<Eigendecomposition> {
    check_symmetric(h)?;

    let n = h.nrows();
    if n == 1 {
        return Ok(Eigendecomposition {
            eigenvalues: DVector::from_element(1, h[(0, 0)]),
            eigenvectors: DMatrix::identity(1, 1),
        });
    }

    let decomposition = match h.clone().try_symmetric_eigen(f64::EPSILON, MAX_SWEEPS) {
        Some(eig) => Eigendecomposition {
            eigenvalues: eig.eigenvalues,
            eigenvectors: eig.eigenvectors,
        },
        None if n == 2 => {
            warn!("Symmetric eigensolver did not converge, using closed-form 2x2 solution");
            closed_form_2x2(h)
        }
        None => {
            return Err(HuckelError::diagonalization(format!(
                "no convergence after {} iterations on a {}x{} matrix",
                MAX_SWEEPS, n, n
            )))
        }
    };

    if decomposition.eigenvalues.iter().any(|v| !v.is_finite())
        || decomposition.eigenvectors.iter().any(|v| !v.is_finite())
    {
        return Err(HuckelError::diagonalization(
            "eigensolver produced non-finite values",
        ));
    }

    debug!("Eigenvalues: {:?}", decomposition.eigenvalues.as_slice());
    Ok(Eigendecomposition {
        eigenvalues: decomposition.eigenvalues,
        eigenvectors: align_eigenvectors(decomposition.eigenvectors),
    })
}

fn check_symmetric(h: &DMatrix<f64>) -> Result<()> {
    if h.nrows() == 0 {
        return Err(HuckelError::diagonalization("empty matrix"));
    }
    if !h.is_square() {
        return Err(HuckelError::diagonalization(format!(
            "matrix is {}x{}, not square",
            h.nrows(),
            h.ncols()
        )));
    }
    if h.iter().any(|v| !v.is_finite()) {
        return Err(HuckelError::diagonalization("matrix has non-finite entries"));
    }
    for i in 0..h.nrows() {
        for j in (i + 1)..h.ncols() {
            if (h[(i, j)] - h[(j, i)]).abs() > SYMMETRY_TOLERANCE {
                return Err(HuckelError::diagonalization(format!(
                    "matrix is not symmetric at ({}, {})",
                    i, j
                )));
            }
        }
    }
    Ok(())
}

/// Closed-form eigenpairs of `[[a, b], [b, d]]`, larger eigenvalue first.
pub fn closed_form_2x2(h: &DMatrix<f64>) -> Eigendecomposition {
    let (a, b, d) = (h[(0, 0)], h[(0, 1)], h[(1, 1)]);

    if b == 0.0 {
        let (first, second) = if a >= d { (0, 1) } else { (1, 0) };
        let mut vectors = DMatrix::zeros(2, 2);
        vectors[(first, 0)] = 1.0;
        vectors[(second, 1)] = 1.0;
        return Eigendecomposition {
            eigenvalues: DVector::from_vec(vec![a.max(d), a.min(d)]),
            eigenvectors: vectors,
        };
    }

    let mean = 0.5 * (a + d);
    let radius = (0.25 * (a - d) * (a - d) + b * b).sqrt();
    let eigenvalues = [mean + radius, mean - radius];

    let mut vectors = DMatrix::zeros(2, 2);
    for (k, lambda) in eigenvalues.iter().enumerate() {
        let (x, y) = (b, lambda - a);
        let norm = (x * x + y * y).sqrt();
        vectors[(0, k)] = x / norm;
        vectors[(1, k)] = y / norm;
    }

    Eigendecomposition {
        eigenvalues: DVector::from_vec(eigenvalues.to_vec()),
        eigenvectors: vectors,
    }
}

/// Flip each eigenvector (column) so that its largest-magnitude entry is positive.
pub fn align_eigenvectors(mut eigvecs: DMatrix<f64>) -> DMatrix<f64> {
    for j in 0..eigvecs.ncols() {
        let max_val = eigvecs
            .column(j)
            .iter()
            .copied()
            .max_by(|a, b| a.abs().partial_cmp(&b.abs()).unwrap_or(Ordering::Less))
            .unwrap_or(0.0);
        if max_val < 0.0 {
            eigvecs.column_mut(j).neg_mut();
        }
    }
    eigvecs
}
