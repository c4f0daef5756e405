use std::collections::BTreeMap;

use crate::model::{Association, Entry};

/// Weighted degree per entry, normalized by the largest degree in the
/// dataset.
///
/// Each association adds its effective weight to both endpoints; endpoints
/// that are not known entries are skipped. Accumulated degrees are floored
/// at 0, so negative weights never yield a result below 0. The denominator
/// is floored at 1, so a dataset whose heaviest node has degree below 1 is
/// not stretched up to 1, and an empty association list leaves every degree
/// at 0.
pub fn compute_weighted_degrees(
    entries: &[Entry],
    associations: &[Association],
) -> BTreeMap<String, f64> {
    let mut degrees: BTreeMap<String, f64> =
        entries.iter().map(|e| (e.label.clone(), 0.0)).collect();

    for assoc in associations {
        let weight = assoc.effective_weight();
        if let Some(d) = degrees.get_mut(&assoc.src) {
            *d += weight;
        }
        if let Some(d) = degrees.get_mut(&assoc.dst) {
            *d += weight;
        }
    }

    for d in degrees.values_mut() {
        *d = d.max(0.0);
    }
    let max_degree = degrees.values().copied().fold(1.0_f64, f64::max);
    for d in degrees.values_mut() {
        *d /= max_degree;
    }
    degrees
}
