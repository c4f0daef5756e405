//! Categorical radial layout.
//!
//! Each category owns an angular sector; its entries are sorted by label and
//! spread over equal cells of that sector. Distance from the center comes
//! from one attribute, selected by [`RadiusMode`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::{Category, SectorTable};
use crate::model::Entry;

/// Which attribute drives the radius.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusMode {
    /// valence +1 sits at the center, -1 on the rim.
    #[default]
    Valence,
    /// power 1 sits at the center, 0 on the rim.
    Power,
}

impl RadiusMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valence => "valence",
            Self::Power => "power",
        }
    }

    /// Radius for `entry`. Out-of-range attributes extrapolate linearly and
    /// may land outside `[0, r_max]`.
    pub fn radius(&self, entry: &Entry, r_max: f64) -> f64 {
        match self {
            Self::Valence => valence_radius(entry.valence, r_max),
            Self::Power => (1.0 - entry.power) * r_max,
        }
    }
}

impl fmt::Display for RadiusMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RadiusMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "valence" => Ok(Self::Valence),
            "power" => Ok(Self::Power),
            other => Err(format!("unknown radius mode '{other}' (expected valence or power)")),
        }
    }
}

/// Valence radius formula, shared with the ring guides.
pub fn valence_radius(valence: f64, r_max: f64) -> f64 {
    ((1.0 - valence) / 2.0) * r_max
}

/// Cartesian point on the layout plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at distance `radius` and angle `angle_deg` (counter-clockwise
    /// from +x).
    pub fn polar(radius: f64, angle_deg: f64) -> Self {
        let theta = angle_deg.to_radians();
        Self {
            x: radius * theta.cos(),
            y: radius * theta.sin(),
        }
    }

    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Polar placement of one entry, before conversion to a map keyed by label.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Placement {
    pub label: String,
    pub category: Category,
    pub angle_deg: f64,
    pub radius: f64,
    pub position: Position,
}

/// Place every entry, grouped by category in canonical order and sorted by
/// label within each group.
pub fn place_entries(
    entries: &[Entry],
    mode: RadiusMode,
    sectors: &SectorTable,
    r_max: f64,
) -> Vec<Placement> {
    let mut by_category: BTreeMap<Category, Vec<&Entry>> = BTreeMap::new();
    for entry in entries {
        by_category.entry(entry.category).or_default().push(entry);
    }

    let mut placements = Vec::with_capacity(entries.len());
    for (category, mut items) in by_category {
        let sector = sectors.sector(category);
        // Stable: equal labels keep input order.
        items.sort_by(|a, b| a.label.cmp(&b.label));

        let count = items.len();
        for (index, item) in items.into_iter().enumerate() {
            let angle_deg = sector.cell_center(index, count);
            let radius = mode.radius(item, r_max);
            placements.push(Placement {
                label: item.label.clone(),
                category,
                angle_deg,
                radius,
                position: Position::polar(radius, angle_deg),
            });
        }
    }
    placements
}

/// Label → position. Duplicate labels collapse to the last placement.
pub fn compute_positions(
    entries: &[Entry],
    mode: RadiusMode,
    sectors: &SectorTable,
    r_max: f64,
) -> BTreeMap<String, Position> {
    place_entries(entries, mode, sectors, r_max)
        .into_iter()
        .map(|p| (p.label, p.position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::R_MAX;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn entry(label: &str, category: Category, power: f64, valence: f64) -> Entry {
        Entry::new(label, category, power, valence)
    }

    #[test]
    fn test_single_accomplishment_position() {
        let entries = vec![entry("Work", Category::Accomplishments, 0.8, 0.5)];
        let positions =
            compute_positions(&entries, RadiusMode::Valence, &SectorTable::default(), R_MAX);
        let p = positions["Work"];
        assert_relative_eq!(p.radius(), 30.0, epsilon = 1e-9);
        assert_relative_eq!(p.x, -21.213_203_435_596_43, epsilon = 1e-9);
        assert_relative_eq!(p.y, 21.213_203_435_596_43, epsilon = 1e-9);
    }

    #[test]
    fn test_power_mode_radius() {
        let entries = vec![
            entry("Strong", Category::People, 1.0, 0.0),
            entry("Weak", Category::People, 0.0, 0.0),
        ];
        let positions = compute_positions(&entries, RadiusMode::Power, &SectorTable::default(), R_MAX);
        assert_relative_eq!(positions["Strong"].radius(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(positions["Weak"].radius(), R_MAX, epsilon = 1e-9);
    }

    #[test]
    fn test_valence_extremes() {
        let plus = entry("Plus", Category::People, 0.5, 1.0);
        let minus = entry("Minus", Category::People, 0.5, -1.0);
        assert_relative_eq!(RadiusMode::Valence.radius(&plus, R_MAX), 0.0);
        assert_relative_eq!(RadiusMode::Valence.radius(&minus, R_MAX), R_MAX);
    }

    #[test]
    fn test_out_of_range_extrapolates() {
        let e = entry("Far", Category::People, -0.5, -2.0);
        assert_relative_eq!(RadiusMode::Valence.radius(&e, R_MAX), 180.0);
        assert_relative_eq!(RadiusMode::Power.radius(&e, R_MAX), 180.0);
    }

    #[test]
    fn test_alphabetical_angular_order() {
        let entries = vec![
            entry("Bob", Category::People, 0.5, 0.0),
            entry("Amy", Category::People, 0.5, 0.0),
            entry("Cid", Category::People, 0.5, 0.0),
        ];
        let placements =
            place_entries(&entries, RadiusMode::Valence, &SectorTable::default(), R_MAX);
        let labels: Vec<&str> = placements.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Amy", "Bob", "Cid"]);
        assert!(placements[0].angle_deg < placements[1].angle_deg);
        assert!(placements[1].angle_deg < placements[2].angle_deg);
        assert_relative_eq!(placements[0].angle_deg, 15.0);
        assert_relative_eq!(placements[1].angle_deg, 45.0);
        assert_relative_eq!(placements[2].angle_deg, 75.0);
    }

    #[test]
    fn test_categories_do_not_share_cells() {
        let entries = vec![
            entry("A", Category::People, 0.5, 0.0),
            entry("B", Category::Other, 0.5, 0.0),
        ];
        let placements =
            place_entries(&entries, RadiusMode::Valence, &SectorTable::default(), R_MAX);
        // Each is alone in its own category, so each sits at its sector center.
        assert_relative_eq!(placements[0].angle_deg, 45.0);
        assert_relative_eq!(placements[1].angle_deg, 345.0);
    }

    #[test]
    fn test_duplicate_labels_overlap() {
        let entries = vec![
            entry("Same", Category::People, 0.5, 0.0),
            entry("Same", Category::People, 0.5, 0.0),
        ];
        let placements =
            place_entries(&entries, RadiusMode::Valence, &SectorTable::default(), R_MAX);
        assert_eq!(placements.len(), 2);
        let positions =
            compute_positions(&entries, RadiusMode::Valence, &SectorTable::default(), R_MAX);
        assert_eq!(positions.len(), 1);
    }

    #[test]
    fn test_deterministic() {
        let entries = vec![
            entry("x", Category::LifeStory, 0.3, -0.2),
            entry("y", Category::IdeasLikes, 0.9, 0.7),
            entry("z", Category::LifeStory, 0.1, 0.4),
        ];
        let table = SectorTable::default();
        let a = compute_positions(&entries, RadiusMode::Power, &table, R_MAX);
        let mut reversed = entries.clone();
        reversed.reverse();
        let b = compute_positions(&reversed, RadiusMode::Power, &table, R_MAX);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_input() {
        let positions = compute_positions(&[], RadiusMode::Valence, &SectorTable::default(), R_MAX);
        assert!(positions.is_empty());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("valence".parse::<RadiusMode>().unwrap(), RadiusMode::Valence);
        assert_eq!("power".parse::<RadiusMode>().unwrap(), RadiusMode::Power);
        assert!("degree".parse::<RadiusMode>().is_err());
    }

    fn category_strategy() -> impl Strategy<Value = Category> {
        prop::sample::select(Category::ALL.to_vec())
    }

    fn entries_strategy() -> impl Strategy<Value = Vec<Entry>> {
        prop::collection::vec(
            ("[a-z]{1,6}", category_strategy(), 0.0..=1.0f64, -1.0..=1.0f64)
                .prop_map(|(label, category, power, valence)| {
                    Entry::new(&label, category, power, valence)
                }),
            0..40,
        )
    }

    proptest! {
        #[test]
        fn prop_radius_within_disc(entries in entries_strategy()) {
            for mode in [RadiusMode::Valence, RadiusMode::Power] {
                for p in place_entries(&entries, mode, &SectorTable::default(), R_MAX) {
                    prop_assert!(p.radius >= -1e-9 && p.radius <= R_MAX + 1e-9);
                    prop_assert!((p.position.radius() - p.radius.abs()).abs() < 1e-6);
                }
            }
        }

        #[test]
        fn prop_angle_within_sector(entries in entries_strategy()) {
            let table = SectorTable::default();
            for p in place_entries(&entries, RadiusMode::Valence, &table, R_MAX) {
                prop_assert!(table.sector(p.category).contains(p.angle_deg));
            }
        }
    }
}
