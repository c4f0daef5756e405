use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{MAX_SIZE, MIN_SIZE, SIZE_GAMMA};
use crate::model::Entry;

/// Scalar that drives marker size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeMetric {
    Power,
    ValenceAbs,
    #[default]
    PowerXValence,
    WeightedDegree,
}

impl SizeMetric {
    pub const ALL: [SizeMetric; 4] = [
        SizeMetric::Power,
        SizeMetric::ValenceAbs,
        SizeMetric::PowerXValence,
        SizeMetric::WeightedDegree,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::ValenceAbs => "valence_abs",
            Self::PowerXValence => "power_x_valence",
            Self::WeightedDegree => "weighted_degree",
        }
    }

    /// Unknown names fall back to `Power`. `power_x_val` is accepted as an
    /// older spelling of `power_x_valence`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "valence_abs" => Self::ValenceAbs,
            "power_x_valence" | "power_x_val" => Self::PowerXValence,
            "weighted_degree" => Self::WeightedDegree,
            _ => Self::Power,
        }
    }
}

impl fmt::Display for SizeMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SizeMetric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_str_lossy(&name))
    }
}

/// Pick the scalar for `entry`. Entries missing from `degrees` count as 0.
pub fn resolve_metric(entry: &Entry, metric: SizeMetric, degrees: &BTreeMap<String, f64>) -> f64 {
    match metric {
        SizeMetric::Power => entry.power,
        SizeMetric::ValenceAbs => entry.valence.abs(),
        SizeMetric::PowerXValence => entry.power * entry.valence.abs(),
        SizeMetric::WeightedDegree => degrees.get(&entry.label).copied().unwrap_or(0.0),
    }
}

/// Size mapping parameters: `min + (max - min) * value^gamma`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
    pub gamma: f64,
}

impl Default for SizeRange {
    fn default() -> Self {
        Self {
            min: MIN_SIZE,
            max: MAX_SIZE,
            gamma: SIZE_GAMMA,
        }
    }
}

impl SizeRange {
    /// Map `value` (clamped to [0, 1], NaN treated as 0) to a marker size.
    pub fn size(&self, value: f64) -> f64 {
        let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        self.min + (self.max - self.min) * v.powf(self.gamma)
    }
}

/// [`SizeRange::size`] with the default range.
pub fn metric_to_size(value: f64) -> f64 {
    SizeRange::default().size(value)
}

/// Marker size per entry, aligned with `entries`, multiplied by `scale`.
pub fn sizes_for_entries(
    entries: &[Entry],
    metric: SizeMetric,
    degrees: &BTreeMap<String, f64>,
    scale: f64,
) -> Vec<f64> {
    let range = SizeRange::default();
    entries
        .iter()
        .map(|e| range.size(resolve_metric(e, metric, degrees)) * scale)
        .collect()
}
