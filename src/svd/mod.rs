//! # Singular Value Decomposition back ends
//!
//! [`SVDImplementation`] is the seam PCA uses to obtain `(U, S, Vᵗ)` of a dense
//! matrix. [`NalgebraSVD`] is always available; [`FaerSVD`] and [`LapackSVD`] are
//! enabled by the `faer` and `lapack` features.
//!
//! Every implementation returns the thin decomposition with singular values in
//! non-increasing order.

use ndarray::{Array1, Array2, ArrayView2};

pub mod dense;
#[cfg(feature = "faer")]
pub mod faer;
#[cfg(feature = "lapack")]
pub mod lapack;

pub trait SVDImplementation: Send + Sync {
    fn compute(
        &self,
        matrix: ArrayView2<f64>,
    ) -> anyhow::Result<(Array2<f64>, Array1<f64>, Array2<f64>)>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NalgebraSVD;

impl SVDImplementation for NalgebraSVD {
    fn compute(
        &self,
        matrix: ArrayView2<f64>,
    ) -> anyhow::Result<(Array2<f64>, Array1<f64>, Array2<f64>)> {
        let mut svd = dense::SVD::new();
        svd.compute(matrix)?;
        svd.into_parts()
    }
}

#[cfg(feature = "lapack")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LapackSVD;

#[cfg(feature = "lapack")]
impl SVDImplementation for LapackSVD {
    fn compute(
        &self,
        matrix: ArrayView2<f64>,
    ) -> anyhow::Result<(Array2<f64>, Array1<f64>, Array2<f64>)> {
        let mut svd = lapack::SVD::new();
        svd.compute(matrix)?;
        svd.into_parts()
    }
}

#[cfg(feature = "faer")]
#[derive(Debug, Clone, Copy, Default)]
pub struct FaerSVD;

#[cfg(feature = "faer")]
impl SVDImplementation for FaerSVD {
    fn compute(
        &self,
        matrix: ArrayView2<f64>,
    ) -> anyhow::Result<(Array2<f64>, Array1<f64>, Array2<f64>)> {
        let svd = faer::SVD::new(&matrix);
        Ok((svd.u().clone(), svd.s().clone(), svd.vt().clone()))
    }
}
