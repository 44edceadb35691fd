//! Nearest-neighbor analysis driver: grouping, spacing aggregation,
//! outlier rejection, and the final cell-bound estimates.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use rayon::prelude::*;

use maxcell_core::{CellEstimate, Error, EstimatorConfig, Observation, Result};

use crate::histogram::Histogram;
use crate::partition::partition;
use crate::spatial::nearest_neighbor_distances_sq;
use crate::stats::percentile_spacing;

/// Full result of a nearest-neighbor spacing analysis.
///
/// Carries the filtered spacing sample and its histogram alongside the
/// estimate so callers can report diagnostics without recomputing.
#[derive(Debug, Clone)]
pub struct NeighborAnalysis {
    /// The cell-bound estimates.
    pub estimate: CellEstimate,
    /// Filtered direct-space spacing sample, ascending.
    pub spacings: Vec<f64>,
    /// Histogram the mode was extracted from.
    pub histogram: Histogram,
}

/// Estimates an upper bound on the largest real-space cell dimension from
/// observed spot positions.
///
/// # Errors
///
/// Returns [`Error::Config`] for an invalid configuration and
/// [`Error::InsufficientData`] when the usable nearest-neighbor sample is
/// too small to analyze.
pub fn estimate_max_cell(
    observations: &[Observation],
    config: &EstimatorConfig,
) -> Result<CellEstimate> {
    analyze(observations, config).map(|analysis| analysis.estimate)
}

/// Runs the full nearest-neighbor analysis.
///
/// Observations are split into disjoint groups per imageset, rotation
/// window, and entering flag; each group's nearest-neighbor distances are
/// computed independently (in parallel) and inverted into direct-space
/// spacings; the merged sample is trimmed of its longest tail, then the
/// histogram mode and the percentile statistic are extracted.
///
/// # Errors
///
/// See [`estimate_max_cell`].
pub fn analyze(observations: &[Observation], config: &EstimatorConfig) -> Result<NeighborAnalysis> {
    config.validate()?;

    let groups = partition(observations, config.step_size);

    // Groups with fewer than two points or only duplicates contribute
    // nothing and are skipped inside the engine, not errors.
    let mut spacings: Vec<f64> = groups
        .par_iter()
        .flat_map_iter(|group| nearest_neighbor_distances_sq(&group.positions))
        .map(|dist_sq| 1.0 / dist_sq.sqrt())
        .collect();

    if spacings.len() <= config.min_sample_size {
        return Err(Error::InsufficientData {
            observed: spacings.len(),
            required: config.min_sample_size,
        });
    }

    // Reject the longest spacings as outliers, keeping at least the
    // minimum viable sample.
    spacings.sort_by(f64::total_cmp);
    let keep = (((1.0 - config.outlier_fraction) * spacings.len() as f64).floor() as usize)
        .max(config.min_sample_size)
        .min(spacings.len());
    spacings.truncate(keep);

    let n_slots = (spacings.len() / config.samples_per_bin).max(1);
    let histogram = Histogram::from_sample(&spacings, n_slots);

    let max_cell = config.tolerance
        * (histogram.upper_mode_center(config.max_height_fraction) + 0.5 * histogram.bin_width());

    let estimate = CellEstimate {
        max_cell,
        percentile_spacing: percentile_spacing(&spacings, config.percentile),
    };

    Ok(NeighborAnalysis {
        estimate,
        spacings,
        histogram,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line_observations(n: usize, spacing: f64) -> Vec<Observation> {
        (0..n)
            .map(|i| Observation::new(0, 0.0, true, [i as f64 * spacing, 0.0, 0.0]))
            .collect()
    }

    #[test]
    fn test_uniform_grid_estimate() {
        // 15 points spaced 0.5 in reciprocal space: every nearest-neighbor
        // spacing inverts to exactly 2.0 in direct space.
        let observations = line_observations(15, 0.5);
        let analysis = analyze(&observations, &EstimatorConfig::default()).unwrap();

        assert_eq!(analysis.spacings.len(), 14);
        for &s in &analysis.spacings {
            assert_relative_eq!(s, 2.0);
        }
        // Zero-spread sample: degenerate bin, max_cell = tolerance * min.
        assert_relative_eq!(analysis.estimate.max_cell, 3.0);
        assert_relative_eq!(analysis.estimate.percentile_spacing, 2.0);
    }

    #[test]
    fn test_insufficient_sample_is_rejected() {
        let observations = line_observations(10, 0.5);
        let err = estimate_max_cell(&observations, &EstimatorConfig::default()).unwrap_err();
        match err {
            Error::InsufficientData { observed, required } => {
                assert_eq!(observed, 10);
                assert_eq!(required, 10);
            }
            other => panic!("expected InsufficientData, got {other}"),
        }
    }

    #[test]
    fn test_no_pairs_at_all_is_rejected() {
        // Singleton groups only: no nearest-neighbor pairs exist anywhere.
        let observations: Vec<Observation> = (0..20)
            .map(|i| Observation::new(i, 0.0, true, [0.0, 0.0, 0.0]))
            .collect();
        let err = estimate_max_cell(&observations, &EstimatorConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientData { observed: 0, .. }
        ));
    }

    #[test]
    fn test_zero_min_sample_size_is_rejected() {
        // A duplicate pair plus one distinct point yields exactly one
        // usable spacing. With min_sample_size 0 the aggressive outlier
        // cut would empty the sample entirely before histogramming; the
        // configuration check refuses it up front instead.
        let observations = vec![
            Observation::new(0, 0.0, true, [0.0, 0.0, 0.0]),
            Observation::new(0, 0.0, true, [0.0, 0.0, 0.0]),
            Observation::new(0, 0.0, true, [1.0, 0.0, 0.0]),
        ];
        let config = EstimatorConfig::new()
            .with_min_sample_size(0)
            .with_outlier_fraction(0.5);
        let err = estimate_max_cell(&observations, &config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_config_rejected_before_data() {
        let config = EstimatorConfig::new().with_tolerance(0.0);
        let err = estimate_max_cell(&[], &config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_outlier_tail_is_trimmed() {
        // 99 regular spacings and one extreme outlier; the 1% cut drops
        // exactly the outlier.
        let mut observations = line_observations(100, 0.5);
        // An isolated distant pair produces two huge direct spacings, but
        // shifts the regular points' neighbors by nothing.
        observations.push(Observation::new(1, 0.0, true, [0.0, 0.0, 0.0]));
        observations.push(Observation::new(1, 0.0, true, [1e-3, 0.0, 0.0]));

        let analysis = analyze(&observations, &EstimatorConfig::default()).unwrap();
        // 100 + 2 spacings, keep floor(0.99 * 102) = 100.
        assert_eq!(analysis.spacings.len(), 100);
        let max = analysis.spacings.last().copied().unwrap();
        assert!(max < 1000.0, "outlier spacing survived the cut: {max}");
    }
}
