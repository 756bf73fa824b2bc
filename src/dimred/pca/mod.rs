use crate::dense::{column_means, second_moment};
use crate::eigen::SymmetricEigen;
use crate::svd::{NalgebraSVD, SVDImplementation};
use crate::variance::VarianceShares;
use anyhow::{anyhow, bail};
use log::debug;
use ndarray::{s, Array1, Array2, ArrayView2, Axis};
use rayon::prelude::*;
use std::sync::Arc;

/// Where the spectrum of the preprocessed data comes from.
///
/// - `Svd`: singular values `s` of the data, eigenvalues `s² / (n - 1)`
/// - `Covariance`: eigenvalues of `(1 / (n - 1))·XᵗX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpectrumMethod {
    #[default]
    Svd,
    Covariance,
}

pub struct PCABuilder<S: SVDImplementation> {
    n_components: Option<usize>,
    center: bool,
    scale: bool,
    method: SpectrumMethod,
    svd_implementation: Arc<S>,
}

impl Default for PCABuilder<NalgebraSVD> {
    fn default() -> Self {
        PCABuilder::new(NalgebraSVD)
    }
}

impl<S: SVDImplementation> PCABuilder<S> {
    pub fn new(svd_implementation: S) -> Self {
        PCABuilder {
            n_components: None,
            center: true,
            scale: false,
            method: SpectrumMethod::default(),
            svd_implementation: Arc::new(svd_implementation),
        }
    }

    pub fn n_components(mut self, n_components: usize) -> Self {
        self.n_components = Some(n_components);
        self
    }

    pub fn center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    /// Divide every feature by its sample standard deviation after centering, which
    /// makes the analysis run on the correlation rather than the covariance matrix.
    pub fn scale(mut self, scale: bool) -> Self {
        self.scale = scale;
        self
    }

    pub fn method(mut self, method: SpectrumMethod) -> Self {
        self.method = method;
        self
    }

    pub fn build(self) -> Pca<S> {
        Pca {
            n_components: self.n_components,
            center: self.center,
            scale: self.scale,
            method: self.method,
            svd_implementation: self.svd_implementation,
            components: None,
            mean: None,
            std_dev: None,
            eigenvalues: None,
            singular_values: None,
            shares: None,
            total_variance: None,
        }
    }
}

/// Principal Component Analysis over a dense samples × features matrix.
///
/// The full spectrum is always analysed, so the explained-variance ratios are relative
/// to the total variance even when only `n_components` components are kept.
pub struct Pca<S: SVDImplementation> {
    n_components: Option<usize>,
    center: bool,
    scale: bool,
    method: SpectrumMethod,
    svd_implementation: Arc<S>,
    components: Option<Array2<f64>>,
    mean: Option<Array1<f64>>,
    std_dev: Option<Array1<f64>>,
    eigenvalues: Option<Array1<f64>>,
    singular_values: Option<Array1<f64>>,
    shares: Option<VarianceShares<f64>>,
    total_variance: Option<f64>,
}

impl<S: SVDImplementation> Pca<S> {
    pub fn fit(&mut self, x: ArrayView2<f64>) -> anyhow::Result<()> {
        let (n_samples, n_features) = x.dim();
        if n_samples < 2 {
            bail!("PCA needs at least two samples, got {}", n_samples);
        }
        if n_features == 0 {
            bail!("PCA needs at least one feature");
        }

        let mean = if self.center {
            Some(column_means(x)?)
        } else {
            None
        };

        let std_dev = if self.scale {
            Some(
                x.std_axis(Axis(0), 1.0)
                    .mapv(|s| if s > 0.0 { s } else { 1.0 }),
            )
        } else {
            None
        };

        let x_preprocessed = preprocess(x, &mean, &std_dev);
        let n_minus_1 = n_samples as f64 - 1.0;

        let (eigenvalues, components, singular_values) = match self.method {
            SpectrumMethod::Svd => {
                let (_u, s, vt) = self
                    .svd_implementation
                    .compute(x_preprocessed.view())?;
                let eigenvalues = s.mapv(|v| v * v / n_minus_1);
                (eigenvalues, vt, Some(s))
            }
            SpectrumMethod::Covariance => {
                let cov = second_moment(x_preprocessed.view())?;
                let mut eigen = SymmetricEigen::new();
                eigen.compute(cov.view())?;
                let eigenvalues = eigen
                    .eigenvalues()
                    .cloned()
                    .ok_or_else(|| anyhow!("Eigendecomposition returned no eigenvalues"))?;
                let components = eigen
                    .eigenvectors()
                    .map(|v| v.t().to_owned())
                    .ok_or_else(|| anyhow!("Eigendecomposition returned no eigenvectors"))?;
                (eigenvalues, components, None)
            }
        };

        let eigenvalues = clamp_negative_eigenvalues(eigenvalues);
        let available = eigenvalues.len();
        let n_components = self.n_components.unwrap_or(available);
        if n_components == 0 || n_components > available {
            bail!(
                "n_components={} must be between 1 and the {} available components",
                n_components,
                available
            );
        }

        let shares = VarianceShares::from_eigenvalues(&eigenvalues.to_vec())?;
        let total_variance = eigenvalues.sum();

        debug!(
            "PCA ({:?}): {} samples × {} features, keeping {} of {} components ({:.2}% of variance)",
            self.method,
            n_samples,
            n_features,
            n_components,
            available,
            shares.prefix()[n_components - 1] * 100.0
        );

        self.components = Some(components.slice(s![..n_components, ..]).to_owned());
        self.mean = mean;
        self.std_dev = std_dev;
        self.eigenvalues = Some(eigenvalues.slice(s![..n_components]).to_owned());
        self.singular_values = singular_values.map(|s| s.slice(s![..n_components]).to_owned());
        self.shares = Some(shares);
        self.total_variance = Some(total_variance);

        Ok(())
    }

    pub fn transform(&self, x: ArrayView2<f64>) -> anyhow::Result<Array2<f64>> {
        let components = self
            .components
            .as_ref()
            .ok_or_else(|| anyhow!("PCA has not been fitted yet"))?;

        if x.ncols() != components.ncols() {
            bail!(
                "Number of features ({}) does not match the fitted data ({})",
                x.ncols(),
                components.ncols()
            );
        }

        let x_preprocessed = preprocess(x, &self.mean, &self.std_dev);
        Ok(x_preprocessed.dot(&components.t()))
    }

    pub fn fit_transform(&mut self, x: ArrayView2<f64>) -> anyhow::Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Smallest number of leading components that together explain at least `target`
    /// of the total variance, counted over the full spectrum.
    pub fn n_components_for_variance(&self, target: f64) -> anyhow::Result<usize> {
        let shares = self
            .shares
            .as_ref()
            .ok_or_else(|| anyhow!("PCA has not been fitted yet"))?;
        Ok(shares.components_for(target)?)
    }

    pub fn components(&self) -> Option<&Array2<f64>> {
        self.components.as_ref()
    }

    pub fn eigenvalues(&self) -> Option<&Array1<f64>> {
        self.eigenvalues.as_ref()
    }

    /// Only set when fitted with [`SpectrumMethod::Svd`].
    pub fn singular_values(&self) -> Option<&Array1<f64>> {
        self.singular_values.as_ref()
    }

    /// Full-spectrum variance shares, including components that were not kept.
    pub fn variance_shares(&self) -> Option<&VarianceShares<f64>> {
        self.shares.as_ref()
    }

    pub fn explained_variance_ratio(&self) -> Option<Array1<f64>> {
        let kept = self.components.as_ref()?.nrows();
        self.shares
            .as_ref()
            .map(|s| s.percent().slice(s![..kept]).to_owned())
    }

    pub fn cumulative_explained_variance_ratio(&self) -> Option<Array1<f64>> {
        let kept = self.components.as_ref()?.nrows();
        self.shares
            .as_ref()
            .map(|s| s.prefix().slice(s![..kept]).to_owned())
    }

    pub fn total_variance(&self) -> Option<f64> {
        self.total_variance
    }
}

/// Covariance eigendecomposition can produce small negative eigenvalues (already
/// reported by [`SymmetricEigen`]). They carry no variance, so they become zero, which
/// keeps eigenvalues, components and variance shares in the same order.
fn clamp_negative_eigenvalues(eigenvalues: Array1<f64>) -> Array1<f64> {
    eigenvalues.mapv(|v| v.max(0.0))
}

fn preprocess(
    x: ArrayView2<f64>,
    mean: &Option<Array1<f64>>,
    std_dev: &Option<Array1<f64>>,
) -> Array2<f64> {
    let mut x_preprocessed = x.to_owned();

    if let Some(m) = mean {
        x_preprocessed
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .for_each(|mut row| {
                row -= m;
            });
    }

    if let Some(s) = std_dev {
        x_preprocessed
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .for_each(|mut row| {
                row /= s;
            });
    }

    x_preprocessed
}
