use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::category::Category;

/// A labeled item on the map. The label is the only cross-reference key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Entry {
    pub label: String,
    pub category: Category,
    /// Perceived strength, conventionally in [0, 1].
    pub power: f64,
    /// Emotional polarity, conventionally in [-1, 1].
    pub valence: f64,
}

impl Entry {
    pub fn new(label: &str, category: Category, power: f64, valence: f64) -> Self {
        Self {
            label: label.to_string(),
            category,
            power,
            valence,
        }
    }
}

/// Kind of link between two entries. Unrecognized names decode to
/// `AssociatesWith`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Affirms,
    Threatens,
    #[default]
    AssociatesWith,
}

impl Relation {
    /// Edge drawing order.
    pub const ALL: [Relation; 3] = [
        Relation::Affirms,
        Relation::Threatens,
        Relation::AssociatesWith,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Affirms => "affirms",
            Self::Threatens => "threatens",
            Self::AssociatesWith => "associates_with",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }

    pub fn from_str_lossy(s: &str) -> Self {
        Self::from_name(s).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for Relation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_str_lossy(&name))
    }
}

/// Weighted link between two entry labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Association {
    pub src: String,
    pub dst: String,
    #[serde(default)]
    pub relation: Relation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Association {
    pub fn new(src: &str, dst: &str, relation: Relation, weight: f64) -> Self {
        Self {
            src: src.to_string(),
            dst: dst.to_string(),
            relation,
            weight: Some(weight),
        }
    }

    /// Weight used for degree aggregation: 1.0 when absent, zero or NaN.
    pub fn effective_weight(&self) -> f64 {
        match self.weight {
            Some(w) if w != 0.0 && !w.is_nan() => w,
            _ => 1.0,
        }
    }

    pub fn touches(&self, label: &str) -> bool {
        self.src == label || self.dst == label
    }
}

/// The exchanged dataset: entries plus optional associations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Dataset {
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub associations: Vec<Association>,
}

impl Dataset {
    pub fn new(entries: Vec<Entry>, associations: Vec<Association>) -> Self {
        Self {
            entries,
            associations,
        }
    }

    pub fn entry(&self, label: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.label == label)
    }
}
