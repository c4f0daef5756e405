use serde::Serialize;

use crate::constants::{RING_LEVELS, RING_POINTS, RING_STEP_DEG};
use crate::layout::{Position, valence_radius};

/// Closed reference circle for one valence level.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RingGuide {
    pub level: f64,
    pub radius: f64,
    pub points: Vec<Position>,
}

/// One circle per entry of [`RING_LEVELS`], centered on the origin, with
/// radii from the valence radius formula.
pub fn ring_guides(r_max: f64) -> Vec<RingGuide> {
    RING_LEVELS
        .iter()
        .map(|&level| {
            let radius = valence_radius(level, r_max);
            let points = (0..RING_POINTS)
                .map(|i| Position::polar(radius, i as f64 * RING_STEP_DEG))
                .collect();
            RingGuide {
                level,
                radius,
                points,
            }
        })
        .collect()
}

/// Straight guide segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Segment {
    pub from: Position,
    pub to: Position,
}

/// Horizontal and vertical crosshair through the origin spanning the disc.
pub fn crosshairs(r_max: f64) -> [Segment; 2] {
    [
        Segment {
            from: Position::new(-r_max, 0.0),
            to: Position::new(r_max, 0.0),
        },
        Segment {
            from: Position::new(0.0, -r_max),
            to: Position::new(0.0, r_max),
        },
    ]
}
