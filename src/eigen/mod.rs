use anyhow::bail;
use log::warn;
use ndarray::{Array1, Array2, ArrayView2, Axis};
use nshare::{IntoNalgebra, IntoNdarray2};

const SYMMETRY_TOLERANCE: f64 = 1e-8;

/// Eigendecomposition of a real symmetric matrix, such as a covariance matrix.
///
/// Eigenvalues are stored in non-increasing order and column `i` of `eigenvectors`
/// belongs to `eigenvalues[i]`.
pub struct SymmetricEigen {
    eigenvalues: Option<Array1<f64>>,
    eigenvectors: Option<Array2<f64>>,
}

impl SymmetricEigen {
    pub fn new() -> Self {
        SymmetricEigen {
            eigenvalues: None,
            eigenvectors: None,
        }
    }

    pub fn compute(&mut self, x: ArrayView2<f64>) -> anyhow::Result<()> {
        let (nrows, ncols) = x.dim();
        if nrows != ncols {
            bail!("Eigendecomposition needs a square matrix, got {} x {}", nrows, ncols);
        }
        if nrows == 0 {
            bail!("Eigendecomposition of an empty matrix");
        }
        let scale = x.iter().fold(0.0f64, |acc, v| acc.max(v.abs())).max(1.0);
        for i in 0..nrows {
            for j in (i + 1)..ncols {
                if (x[[i, j]] - x[[j, i]]).abs() > SYMMETRY_TOLERANCE * scale {
                    bail!("Matrix is not symmetric at ({}, {})", i, j);
                }
            }
        }

        let eigen = nalgebra::linalg::SymmetricEigen::new(x.to_owned().into_nalgebra());
        let values = eigen.eigenvalues.as_slice().to_vec();
        let vectors = eigen.eigenvectors.into_ndarray2().into_owned();

        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

        let negatives = values.iter().filter(|&&v| v < 0.0).count();
        if negatives > 0 {
            warn!(
                "{} of {} eigenvalues are negative, smallest is {:e}",
                negatives,
                values.len(),
                values.iter().cloned().fold(f64::INFINITY, f64::min)
            );
        }

        self.eigenvalues = Some(order.iter().map(|&i| values[i]).collect());
        self.eigenvectors = Some(vectors.select(Axis(1), &order));

        Ok(())
    }

    pub fn eigenvalues(&self) -> Option<&Array1<f64>> {
        self.eigenvalues.as_ref()
    }

    pub fn eigenvectors(&self) -> Option<&Array2<f64>> {
        self.eigenvectors.as_ref()
    }
}

impl Default for SymmetricEigen {
    fn default() -> Self {
        Self::new()
    }
}
