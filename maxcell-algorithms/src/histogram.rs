//! Fixed-width histogram and mode extraction over spacing samples.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

/// Equal-width histogram over a spacing sample.
///
/// Bins span `[min, max]` of the sample; the maximum value is clamped into
/// the last bin. A sample with zero spread produces a single bin of zero
/// width holding every value.
#[derive(Debug, Clone)]
pub struct Histogram {
    min: f64,
    bin_width: f64,
    counts: Vec<usize>,
}

impl Histogram {
    /// Builds a histogram with `n_slots` equal-width bins over `sample`.
    ///
    /// # Panics
    ///
    /// Panics if `sample` is empty or `n_slots` is zero; callers size both
    /// from a validated, non-empty spacing sample.
    pub fn from_sample(sample: &[f64], n_slots: usize) -> Self {
        assert!(!sample.is_empty());
        assert!(n_slots >= 1);

        let min = sample.iter().copied().fold(f64::INFINITY, f64::min);
        let max = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let bin_width = (max - min) / n_slots as f64;

        let mut counts = vec![0usize; n_slots];
        for &value in sample {
            let slot = if bin_width > 0.0 {
                (((value - min) / bin_width) as usize).min(n_slots - 1)
            } else {
                0
            };
            counts[slot] += 1;
        }

        Self {
            min,
            bin_width,
            counts,
        }
    }

    /// Returns the bin width.
    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Returns the per-bin counts.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Returns the center of bin `slot`.
    pub fn slot_center(&self, slot: usize) -> f64 {
        self.min + (slot as f64 + 0.5) * self.bin_width
    }

    /// Returns the highest bin count. Ties resolve to the bin with the
    /// lowest center, which is the first one encountered.
    pub fn peak_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Returns the center of the candidate bin with the largest center.
    ///
    /// Candidates are the bins whose count strictly exceeds
    /// `max_height_fraction` times the peak count. Taking the largest
    /// center among them favors larger-cell candidates over the merely
    /// densest bin. At a height fraction of exactly 1.0 no count strictly
    /// exceeds the peak, so the peak bin itself is selected (the
    /// largest-center one among peak ties).
    pub fn upper_mode_center(&self, max_height_fraction: f64) -> f64 {
        let peak = self.peak_count();
        let threshold = max_height_fraction * peak as f64;
        let slot = self
            .counts
            .iter()
            .rposition(|&count| count as f64 > threshold)
            .or_else(|| self.counts.iter().rposition(|&count| count == peak))
            .unwrap_or(0);
        self.slot_center(slot)
    }
}
