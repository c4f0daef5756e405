//! Self map radial layout engine.
//!
//! Places categorized entries on a disc: each category owns an angular
//! sector, distance from the center follows valence or power, marker size
//! follows a selectable metric and color follows the category hue modulated
//! by power and valence.
//!
//! Zero I/O: every function is a pure function of its inputs. Rendering is
//! left to the caller.

pub mod category;
pub mod color;
pub mod constants;
pub mod dataset;
pub mod degree;
pub mod error;
pub mod filter;
pub mod layout;
pub mod metric;
pub mod model;
pub mod palette;
pub mod report;
pub mod rings;
pub mod scene;

pub use category::{Category, Sector, SectorTable};
pub use color::{
    Rgb, hex_to_rgb, hex_to_rgba, hsl_to_rgb, interpolate_hex, to_rgba, valence_color, with_alpha,
};
pub use constants::{MAX_SIZE, MIN_SIZE, R_MAX, RING_LEVELS, RING_POINTS, SIZE_GAMMA};
pub use dataset::{
    dataset_schema, export_json, import_json, sample_dataset, synthetic_dataset, unknown_relations,
};
pub use degree::compute_weighted_degrees;
pub use error::{FormatError, Result};
pub use filter::EntryFilter;
pub use layout::{Placement, Position, RadiusMode, compute_positions, place_entries};
pub use metric::{SizeMetric, SizeRange, metric_to_size, resolve_metric, sizes_for_entries};
pub use model::{Association, Dataset, Entry, Relation};
pub use palette::{CategoryPalette, Hsl, colors_for_entries};
pub use report::{Report, build_report};
pub use rings::{RingGuide, Segment, crosshairs, ring_guides};
pub use scene::{DisplayConfig, LayoutTables, Scene, build_scene, connected_labels};
