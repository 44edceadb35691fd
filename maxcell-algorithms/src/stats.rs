//! Order statistics and summary statistics over spacing samples.
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]

/// Extracts the spacing at the given tail fraction of the sample.
///
/// The sample is ranked descending and indexed at
/// `floor(percentile * len)`: percentile 0 returns the maximum and the
/// result approaches the minimum as the percentile approaches 1.
///
/// # Panics
///
/// Panics if `sample` is empty; the estimator never calls this with fewer
/// than the minimum viable sample size.
pub fn percentile_spacing(sample: &[f64], percentile: f64) -> f64 {
    assert!(!sample.is_empty());
    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    let index = ((percentile * sorted.len() as f64) as usize).min(sorted.len() - 1);
    sorted[index]
}

/// Returns `(mean, standard deviation)` of the sample, for diagnostics.
///
/// Uses the unweighted sample standard deviation (N − 1 denominator);
/// a single-element sample reports zero deviation.
pub fn mean_and_std(sample: &[f64]) -> (f64, f64) {
    let n = sample.len() as f64;
    let mean = sample.iter().sum::<f64>() / n;
    if sample.len() < 2 {
        return (mean, 0.0);
    }
    let var = sample.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.0);
    (mean, var.sqrt())
}
