//! Partitioning of observations into comparable spot groups.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use std::collections::BTreeMap;

use maxcell_core::Observation;

/// A disjoint group of spot positions sharing an imageset, one rotation
/// window, and an entering state.
///
/// Groups are transient: built per analysis pass and discarded after the
/// nearest-neighbor queries run.
#[derive(Debug, Clone)]
pub struct SpotGroup {
    /// Imageset the group belongs to.
    pub imageset_id: usize,
    /// Entering flag shared by all members.
    pub entering: bool,
    /// Reciprocal-space positions of the members.
    pub positions: Vec<[f64; 3]>,
}

impl SpotGroup {
    /// Returns the number of spots in the group.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Splits observations into disjoint groups by imageset, rotation window,
/// and entering flag.
///
/// Per imageset, the observed rotation range is divided into
/// `max(ceil((phi_max - phi_min) / step_size), 1)` consecutive half-open
/// windows of `step_size` degrees. Membership is evaluated fresh for every
/// (window, entering) combination rather than narrowing a shared selection,
/// so no combination can steal members from a later one. Only non-empty
/// combinations produce a group; singleton groups are kept.
pub fn partition(observations: &[Observation], step_size: f64) -> Vec<SpotGroup> {
    let mut by_imageset: BTreeMap<usize, Vec<&Observation>> = BTreeMap::new();
    for obs in observations {
        by_imageset.entry(obs.imageset_id).or_default().push(obs);
    }

    let mut groups = Vec::new();

    for (&imageset_id, members) in &by_imageset {
        let phi_min = members.iter().map(|o| o.phi).fold(f64::INFINITY, f64::min);
        let phi_max = members
            .iter()
            .map(|o| o.phi)
            .fold(f64::NEG_INFINITY, f64::max);

        let n_steps = (((phi_max - phi_min) / step_size).ceil() as usize).max(1);

        for n in 0..n_steps {
            let lo = phi_min + n as f64 * step_size;
            let hi = phi_min + (n + 1) as f64 * step_size;

            for entering in [true, false] {
                let positions: Vec<[f64; 3]> = members
                    .iter()
                    .filter(|o| o.phi >= lo && o.phi < hi && o.entering == entering)
                    .map(|o| o.rlp)
                    .collect();

                if positions.is_empty() {
                    continue;
                }

                groups.push(SpotGroup {
                    imageset_id,
                    entering,
                    positions,
                });
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(imageset_id: usize, phi: f64, entering: bool) -> Observation {
        Observation::new(imageset_id, phi, entering, [phi, 0.0, 0.0])
    }

    #[test]
    fn test_single_window_single_group() {
        let observations: Vec<_> = (0..5).map(|i| obs(0, f64::from(i), true)).collect();
        let groups = partition(&observations, 45.0);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 5);
        assert_eq!(groups[0].imageset_id, 0);
        assert!(groups[0].entering);
    }

    #[test]
    fn test_entering_flag_splits_groups() {
        let observations = vec![
            obs(0, 1.0, true),
            obs(0, 2.0, true),
            obs(0, 3.0, false),
            obs(0, 4.0, false),
        ];
        let groups = partition(&observations, 45.0);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().any(|g| g.entering && g.len() == 2));
        assert!(groups.iter().any(|g| !g.entering && g.len() == 2));
    }

    #[test]
    fn test_selection_does_not_compound_across_groups() {
        // One member per (window, entering) combination. A selection that
        // narrows cumulatively across iterations would lose every member
        // after the first combination; independent selection keeps all four.
        let observations = vec![
            obs(0, 10.0, true),
            obs(0, 20.0, false),
            obs(0, 70.0, true),
            obs(0, 80.0, false),
        ];
        let groups = partition(&observations, 45.0);
        assert_eq!(groups.len(), 4);
        assert!(groups.iter().all(|g| g.len() == 1));
    }

    #[test]
    fn test_imagesets_partition_independently() {
        let observations = vec![
            obs(0, 0.0, true),
            obs(0, 1.0, true),
            obs(1, 0.0, true),
            obs(1, 1.0, true),
        ];
        let groups = partition(&observations, 45.0);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().any(|g| g.imageset_id == 0 && g.len() == 2));
        assert!(groups.iter().any(|g| g.imageset_id == 1 && g.len() == 2));
    }

    #[test]
    fn test_half_open_windows_exclude_upper_boundary() {
        // phi range [0, 90] with 45-degree steps gives two windows,
        // [0, 45) and [45, 90); the observation at exactly 90 falls outside
        // both and is excluded rather than mis-assigned.
        let observations = vec![obs(0, 0.0, true), obs(0, 45.0, true), obs(0, 90.0, true)];
        let groups = partition(&observations, 45.0);
        let total: usize = groups.iter().map(SpotGroup::len).sum();
        assert_eq!(groups.len(), 2);
        assert_eq!(total, 2);
    }

    #[test]
    fn test_singleton_groups_are_retained() {
        let observations = vec![obs(0, 0.0, true)];
        let groups = partition(&observations, 45.0);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 1);
    }

    #[test]
    fn test_zero_rotation_range_yields_one_window() {
        let observations = vec![obs(0, 12.5, true), obs(0, 12.5, true)];
        let groups = partition(&observations, 45.0);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
    }
}
