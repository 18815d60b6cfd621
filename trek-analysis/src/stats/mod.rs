//! Statistics kernels for the correlation and regression layers.

pub mod correlation;

pub use correlation::{
    average_ranks, mean, pearson, sample_covariance, spearman, zscore, SpearmanResult,
};
