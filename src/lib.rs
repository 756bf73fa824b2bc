pub mod variance;
pub mod dense;
pub mod dimred;
pub mod eigen;
pub mod svd;
mod utils;

pub use utils::Standardize;
pub use variance::{
    compute_variance_shares, min_components_for_variance, InvalidInputError, VarianceShares,
};
