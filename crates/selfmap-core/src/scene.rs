//! Full renderable scene for one dataset and display configuration.
//!
//! The renderer receives plain geometry and color strings: reference rings,
//! crosshair axes, edge polylines grouped by relation, the center marker and
//! one marker trace per non-empty category. Nothing here is cached; every call
//! rebuilds the scene from its inputs.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::category::{Category, SectorTable};
use crate::color::with_alpha;
use crate::constants::{
    AXIS_PADDING, DEFAULT_OPACITY, DEFAULT_SIZE_SCALE, DIMMED_ALPHA, GLOW_ALPHA, GLOW_SIZE_CAP,
    R_MAX,
};
use crate::degree::compute_weighted_degrees;
use crate::layout::{Position, RadiusMode, compute_positions};
use crate::metric::{SizeMetric, sizes_for_entries};
use crate::model::{Dataset, Entry, Relation};
use crate::palette::{CategoryPalette, colors_for_entries};
use crate::rings::{RingGuide, Segment, crosshairs, ring_guides};

const RING_COLOR: &str = "rgba(200,200,200,0.12)";
const AXIS_COLOR: &str = "rgba(200,200,200,0.18)";
const EDGE_WIDTH: f64 = 2.0;
const OUTLINE_COLOR: &str = "rgba(0,0,0,0.45)";
const DIMMED_OUTLINE_COLOR: &str = "rgba(255,255,255,0.15)";
const CENTER_COLOR: &str = "rgba(255,215,0,0.95)";
const CENTER_SIZE: f64 = 20.0;
const CENTER_LABEL: &str = "Self";

/// User-facing display switches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub radius_mode: RadiusMode,
    pub size_metric: SizeMetric,
    pub show_edges: bool,
    pub show_labels: bool,
    /// Marker size multiplier, recommended range [0.3, 3.0].
    pub size_scale: f64,
    /// Marker opacity, recommended range [0.35, 1.0].
    pub opacity: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            radius_mode: RadiusMode::Valence,
            size_metric: SizeMetric::PowerXValence,
            show_edges: true,
            show_labels: true,
            size_scale: DEFAULT_SIZE_SCALE,
            opacity: DEFAULT_OPACITY,
        }
    }
}

/// Immutable lookup tables and the disc radius.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutTables {
    pub sectors: SectorTable,
    pub palette: CategoryPalette,
    pub r_max: f64,
}

impl Default for LayoutTables {
    fn default() -> Self {
        Self {
            sectors: SectorTable::default(),
            palette: CategoryPalette::default(),
            r_max: R_MAX,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GuideTrace {
    pub color: &'static str,
    pub width: f64,
    pub dotted: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeTrace {
    pub relation: Relation,
    pub color: &'static str,
    pub width: f64,
    pub segments: Vec<Segment>,
}

impl Relation {
    pub fn edge_color(&self) -> &'static str {
        match self {
            Relation::Affirms => "rgba(102,187,106,0.45)",
            Relation::Threatens => "rgba(239,83,80,0.50)",
            Relation::AssociatesWith => "rgba(144,202,249,0.40)",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CenterMarker {
    pub position: Position,
    pub label: &'static str,
    pub size: f64,
    pub color: &'static str,
    pub symbol: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub label: String,
    pub position: Position,
    pub size: f64,
    pub color: String,
    pub outline: &'static str,
    pub glow_size: f64,
    pub glow_color: String,
    /// Text drawn next to the marker; absent when labels are hidden.
    pub text: Option<String>,
    pub hover: String,
    pub dimmed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryTrace {
    pub category: Category,
    pub symbol: &'static str,
    pub markers: Vec<Marker>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub title: String,
    /// Half-width of the visible square, centered on the origin.
    pub extent: f64,
    pub ring_style: GuideTrace,
    pub rings: Vec<RingGuide>,
    pub axis_style: GuideTrace,
    pub axes: [Segment; 2],
    pub edges: Vec<EdgeTrace>,
    pub center: CenterMarker,
    pub categories: Vec<CategoryTrace>,
    pub degrees: BTreeMap<String, f64>,
}

/// Labels connected to `label` (including itself), or `None` when the label
/// is not an entry of the dataset.
pub fn connected_labels<'a>(dataset: &'a Dataset, label: &str) -> Option<HashSet<&'a str>> {
    let entry = dataset.entry(label)?;
    let mut connected = HashSet::from([entry.label.as_str()]);
    for assoc in dataset.associations.iter().filter(|a| a.touches(label)) {
        connected.insert(assoc.src.as_str());
        connected.insert(assoc.dst.as_str());
    }
    Some(connected)
}

/// Hover text for one entry.
pub fn hover_text(entry: &Entry) -> String {
    format!(
        "{}<br>Category: {}<br>Power: {:.0}%<br>Valence: {:+.2}",
        entry.label,
        entry.category,
        entry.power * 100.0,
        entry.valence
    )
}

/// Build the scene. `focus` names a hovered entry: every entry not
/// connected to it is dimmed. An unknown focus label dims nothing.
pub fn build_scene(
    dataset: &Dataset,
    config: &DisplayConfig,
    tables: &LayoutTables,
    focus: Option<&str>,
) -> Scene {
    let positions = compute_positions(
        &dataset.entries,
        config.radius_mode,
        &tables.sectors,
        tables.r_max,
    );
    let degrees = compute_weighted_degrees(&dataset.entries, &dataset.associations);
    let connected = focus.and_then(|label| connected_labels(dataset, label));
    let is_dimmed = |label: &str| connected.as_ref().is_some_and(|c| !c.contains(label));

    let edges = if config.show_edges {
        edge_traces(dataset, &positions)
    } else {
        Vec::new()
    };

    let categories = Category::ALL
        .iter()
        .filter_map(|&category| {
            let entries: Vec<Entry> = dataset
                .entries
                .iter()
                .filter(|e| e.category == category)
                .cloned()
                .collect();
            if entries.is_empty() {
                return None;
            }

            let sizes = sizes_for_entries(&entries, config.size_metric, &degrees, config.size_scale);
            let colors = colors_for_entries(&entries, &tables.palette, config.opacity);

            let markers = entries
                .iter()
                .zip(sizes)
                .zip(colors)
                .map(|((entry, size), color)| {
                    let dimmed = is_dimmed(&entry.label);
                    let color = if dimmed {
                        with_alpha(&color, DIMMED_ALPHA)
                    } else {
                        color
                    };
                    Marker {
                        label: entry.label.clone(),
                        position: positions
                            .get(&entry.label)
                            .copied()
                            .unwrap_or(Position::ORIGIN),
                        size,
                        glow_size: (size * 1.55 + 8.0).min(GLOW_SIZE_CAP),
                        glow_color: with_alpha(&color, GLOW_ALPHA),
                        color,
                        outline: if dimmed {
                            DIMMED_OUTLINE_COLOR
                        } else {
                            OUTLINE_COLOR
                        },
                        text: config.show_labels.then(|| entry.label.clone()),
                        hover: hover_text(entry),
                        dimmed,
                    }
                })
                .collect();

            Some(CategoryTrace {
                category,
                symbol: category.symbol(),
                markers,
            })
        })
        .collect();

    Scene {
        title: format!(
            "Self Map — {} entries, {} associations",
            dataset.entries.len(),
            dataset.associations.len()
        ),
        extent: tables.r_max + AXIS_PADDING,
        ring_style: GuideTrace {
            color: RING_COLOR,
            width: 1.0,
            dotted: false,
        },
        rings: ring_guides(tables.r_max),
        axis_style: GuideTrace {
            color: AXIS_COLOR,
            width: 1.0,
            dotted: true,
        },
        axes: crosshairs(tables.r_max),
        edges,
        center: CenterMarker {
            position: Position::ORIGIN,
            label: CENTER_LABEL,
            size: CENTER_SIZE,
            color: CENTER_COLOR,
            symbol: "star",
        },
        categories,
        degrees,
    }
}

fn edge_traces(dataset: &Dataset, positions: &BTreeMap<String, Position>) -> Vec<EdgeTrace> {
    Relation::ALL
        .iter()
        .filter_map(|&relation| {
            let segments: Vec<Segment> = dataset
                .associations
                .iter()
                .filter(|a| a.relation == relation)
                .filter_map(|a| {
                    Some(Segment {
                        from: *positions.get(&a.src)?,
                        to: *positions.get(&a.dst)?,
                    })
                })
                .collect();
            (!segments.is_empty()).then(|| EdgeTrace {
                relation,
                color: relation.edge_color(),
                width: EDGE_WIDTH,
                segments,
            })
        })
        .collect()
}
