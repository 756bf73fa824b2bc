//! # Explained Variance
//!
//! Turns a spectrum (eigenvalues of a covariance matrix, or singular values of a
//! centered data matrix) into the share of total variance carried by each ranked
//! component, the cumulative curve over those shares, and the smallest number of
//! leading components that reaches a target fraction of the total.
//!
//! Everything here is a pure function over its inputs.
//!
//! ## Eigenvalues vs. singular values
//! Squared singular values of a centered matrix `X` are proportional to the
//! eigenvalues of its covariance matrix `(1/(n-1))·XᵗX`, and the normalization is
//! scale invariant, so [`VarianceShares::from_eigenvalues`] and
//! [`VarianceShares::from_singular_values`] agree on the same data. Passing raw
//! singular values to [`compute_variance_shares`] is allowed but answers a different
//! question.

use log::warn;
use ndarray::Array1;
use num_traits::Float;
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("input vector is empty")]
    Empty,
    #[error("sum of absolute magnitudes is zero")]
    ZeroTotal,
    #[error("magnitude at index {index} is not finite")]
    NonFinite { index: usize },
    #[error("target fraction {target} is outside (0, 1]")]
    TargetOutOfRange { target: f64 },
}

/// Per-component variance shares of a spectrum together with their running total.
///
/// `percent` is non-increasing and sums to one, `prefix[i]` is the sum of
/// `percent[..=i]` and its last entry is one (both within floating point rounding).
#[derive(Debug, Clone, PartialEq)]
pub struct VarianceShares<T> {
    percent: Array1<T>,
    prefix: Array1<T>,
}

impl<T: Float> VarianceShares<T> {
    pub fn from_eigenvalues(eigenvalues: &[T]) -> Result<Self, InvalidInputError> {
        compute_variance_shares(eigenvalues)
    }

    /// Squares the singular values before normalizing, which yields the same shares as
    /// the eigenvalues of the covariance matrix of the decomposed (centered) data.
    pub fn from_singular_values(singular_values: &[T]) -> Result<Self, InvalidInputError> {
        let squared: Vec<T> = singular_values.iter().map(|&s| s * s).collect();
        compute_variance_shares(&squared)
    }

    pub fn percent(&self) -> &Array1<T> {
        &self.percent
    }

    pub fn prefix(&self) -> &Array1<T> {
        &self.prefix
    }

    pub fn len(&self) -> usize {
        self.percent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.percent.is_empty()
    }

    pub fn into_parts(self) -> (Array1<T>, Array1<T>) {
        (self.percent, self.prefix)
    }

    /// Smallest number of leading components whose cumulative share reaches `target`.
    pub fn components_for(&self, target: T) -> Result<usize, InvalidInputError> {
        min_components_for_variance(&self.prefix.to_vec(), target)
    }
}

/// Ranks the absolute magnitudes in non-increasing order and normalizes them by their
/// sum.
///
/// Numerical eigendecomposition can return tiny negative eigenvalues, so only the
/// magnitude of each entry is used. Equal magnitudes end up in no particular order.
///
/// # Errors
/// - [`InvalidInputError::Empty`] for an empty slice
/// - [`InvalidInputError::NonFinite`] if any entry is NaN or infinite
/// - [`InvalidInputError::ZeroTotal`] if every entry is zero
pub fn compute_variance_shares<T: Float>(
    magnitudes: &[T],
) -> Result<VarianceShares<T>, InvalidInputError> {
    if magnitudes.is_empty() {
        return Err(InvalidInputError::Empty);
    }
    if let Some(index) = magnitudes.iter().position(|m| !m.is_finite()) {
        return Err(InvalidInputError::NonFinite { index });
    }

    let mut ranked: Vec<T> = magnitudes.iter().map(|m| m.abs()).collect();
    ranked.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    let largest = ranked[0];
    if largest == T::zero() {
        return Err(InvalidInputError::ZeroTotal);
    }

    // Relative to the largest entry the total stays within `len`, so large finite
    // magnitudes cannot overflow the sum.
    let relative: Vec<T> = ranked.iter().map(|&m| m / largest).collect();
    let total = relative.iter().fold(T::zero(), |acc, &m| acc + m);

    let percent = Array1::from_iter(relative.iter().map(|&m| m / total));

    let mut prefix = Array1::zeros(percent.len());
    let mut running = T::zero();
    for (i, &share) in percent.iter().enumerate() {
        running = running + share;
        prefix[i] = running;
    }

    Ok(VarianceShares { percent, prefix })
}

/// Returns the smallest `k` (1-based) such that `prefix[k - 1] >= target`.
///
/// `prefix` must be non-decreasing, as produced by [`compute_variance_shares`]. When
/// rounding leaves the last entry just below `target`, the full length is returned.
///
/// # Errors
/// - [`InvalidInputError::Empty`] for an empty prefix
/// - [`InvalidInputError::TargetOutOfRange`] unless `0 < target <= 1`
pub fn min_components_for_variance<T: Float>(
    prefix: &[T],
    target: T,
) -> Result<usize, InvalidInputError> {
    if !(target > T::zero() && target <= T::one()) {
        return Err(InvalidInputError::TargetOutOfRange {
            target: target.to_f64().unwrap_or(f64::NAN),
        });
    }
    if prefix.is_empty() {
        return Err(InvalidInputError::Empty);
    }

    let first_reaching = prefix.partition_point(|&p| p < target);
    if first_reaching == prefix.len() {
        warn!(
            "Cumulative variance tops out at {:?}, below target {:?}; using all {} components",
            prefix[prefix.len() - 1].to_f64(),
            target.to_f64(),
            prefix.len()
        );
        return Ok(prefix.len());
    }

    Ok(first_reaching + 1)
}
