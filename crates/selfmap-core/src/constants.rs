/// Outer radius of the layout disc. Shared by both radius modes, the ring
/// guides and the scene extent.
pub const R_MAX: f64 = 120.0;

/// Padding added around `R_MAX` when computing the visible axis range.
pub const AXIS_PADDING: f64 = 16.0;

/// Valence levels drawn as reference rings, innermost first.
pub const RING_LEVELS: [f64; 5] = [0.8, 0.4, 0.0, -0.4, -0.8];

/// Points per ring guide: 0°, 5°, ..., 360° (the last point closes the ring).
pub const RING_POINTS: usize = 73;

/// Angular step between ring guide samples, in degrees.
pub const RING_STEP_DEG: f64 = 5.0;

/// Smallest marker size produced by the size mapper.
pub const MIN_SIZE: f64 = 9.0;

/// Largest marker size produced by the size mapper.
pub const MAX_SIZE: f64 = 42.0;

/// Gamma below 1 spreads out differences near zero.
pub const SIZE_GAMMA: f64 = 0.65;

/// Lightness points added per unit of power.
pub const POWER_LIGHTNESS_GAIN: f64 = 15.0;

/// Saturation points added per unit of valence.
pub const VALENCE_SATURATION_GAIN: f64 = 10.0;

/// Lightness bounds (percent) after power modulation.
pub const LIGHTNESS_RANGE: (f64, f64) = (35.0, 85.0);

/// Saturation bounds (percent) after valence modulation.
pub const SATURATION_RANGE: (f64, f64) = (30.0, 100.0);

/// Default marker opacity.
pub const DEFAULT_OPACITY: f64 = 0.88;

/// Default marker size multiplier.
pub const DEFAULT_SIZE_SCALE: f64 = 1.0;

/// Recommended size scale range. Not enforced by the engine.
pub const SIZE_SCALE_RANGE: (f64, f64) = (0.3, 3.0);

/// Recommended opacity range. Not enforced by the engine.
pub const OPACITY_RANGE: (f64, f64) = (0.35, 1.0);

/// Alpha applied to marker halos.
pub const GLOW_ALPHA: f64 = 0.10;

/// Alpha applied to entries dimmed by a focus.
pub const DIMMED_ALPHA: f64 = 0.15;

/// Upper bound on halo marker size.
pub const GLOW_SIZE_CAP: f64 = 80.0;
