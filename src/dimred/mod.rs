//! # Dimensionality Reduction
//!
//! Linear dimensionality reduction with explained-variance bookkeeping.
//!
//! ## Currently Available
//! - **PCA** ([`pca`]): Principal Component Analysis over dense matrices, with the
//!   spectrum taken either from an SVD of the data or from an eigendecomposition of
//!   its covariance matrix
//!
//! Both routes feed the same [`crate::variance`] analysis, so the explained-variance
//! ratios and the number of components needed for a variance target agree between
//! them.

pub mod pca;
