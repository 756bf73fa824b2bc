//! Column-wise preprocessing and covariance for dense sample × feature matrices.

use crate::utils::Standardize;
use anyhow::bail;
use ndarray::{Array1, Array2, ArrayView2, Axis};
use rayon::prelude::*;

impl Standardize for Array2<f64> {
    fn standardize(&mut self) -> anyhow::Result<()> {
        if self.nrows() < 2 {
            bail!(
                "Standardizing needs at least two samples, got {}",
                self.nrows()
            );
        }
        self.center()?;

        let std_dev = self.std_axis(Axis(0), 1.0).mapv(|s| if s > 0.0 { s } else { 1.0 });
        self.axis_iter_mut(Axis(0))
            .into_par_iter()
            .for_each(|mut row| {
                row /= &std_dev;
            });

        Ok(())
    }

    fn center(&mut self) -> anyhow::Result<()> {
        let mean = column_means(self.view())?;
        self.axis_iter_mut(Axis(0))
            .into_par_iter()
            .for_each(|mut row| {
                row -= &mean;
            });

        Ok(())
    }
}

pub fn column_means(x: ArrayView2<f64>) -> anyhow::Result<Array1<f64>> {
    if x.ncols() == 0 {
        bail!("Matrix has no features");
    }
    match x.mean_axis(Axis(0)) {
        Some(mean) => Ok(mean),
        None => bail!("Matrix has no samples"),
    }
}

/// Second-moment matrix `(1/(n-1))·XᵗX` of the input as given, without centering.
///
/// For column-centered input this is the sample covariance matrix.
pub fn second_moment(x: ArrayView2<f64>) -> anyhow::Result<Array2<f64>> {
    let n_samples = x.nrows();
    if n_samples < 2 {
        bail!("Covariance needs at least two samples, got {}", n_samples);
    }
    if x.ncols() == 0 {
        bail!("Matrix has no features");
    }

    Ok(x.t().dot(&x) / (n_samples as f64 - 1.0))
}

/// Sample covariance `(1/(n-1))·XcᵗXc` of the column-centered input.
pub fn covariance(x: ArrayView2<f64>) -> anyhow::Result<Array2<f64>> {
    if x.nrows() < 2 {
        bail!("Covariance needs at least two samples, got {}", x.nrows());
    }

    let mut centered = x.to_owned();
    centered.center()?;
    second_moment(centered.view())
}
