//! Quantile breaks via order statistics.

use statrs::statistics::{Data, OrderStatistics};

/// Upper bound of each of the `k` equal-count classes of `sorted`.
///
/// Interior bounds are the `i/k` quantiles (linear interpolation of order
/// statistics); the last bound is the maximum. Heavily tied data can produce
/// tied bounds; the caller collapses those.
pub(crate) fn break_values(sorted: &[f64], k: usize) -> Vec<f64> {
    debug_assert!(k >= 1 && !sorted.is_empty());
    let mut data = Data::new(sorted.to_vec());
    let mut uppers = Vec::with_capacity(k);
    for i in 1..k {
        let tau = i as f64 / k as f64;
        uppers.push(data.quantile(tau));
    }
    uppers.push(sorted[sorted.len() - 1]);
    uppers
}
