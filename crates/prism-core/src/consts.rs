/// Number of recent intensity lines averaged by the temporal smoother.
pub const HISTORY_DEPTH: usize = 5;

/// Brightness threshold (on the 0-100 value scale) above which a line is
/// flagged as clipped/unreliable.
pub const OVERSATURATION_CEILING: f32 = 98.0;

/// Top of the HSV-style value (brightness) scale.
pub const VALUE_SCALE: f32 = 100.0;

/// Fixed pixel padding applied around the reader box during the crude crop
/// and again in the symmetric rotation padding.
pub const CROP_PADDING_PX: usize = 5;

/// Offset subtracted from a corner pixel's first channel to flag it.
/// Normalized channels sit in [0, 1], so flagged values land in [-2, -1]
/// and survive crop and rotation as the only negative pixels.
pub const CORNER_FLAG_OFFSET: f32 = 2.0;

/// Channel values below this are treated as corner flags when relocating
/// the reader box after rotation.
pub const CORNER_FLAG_THRESHOLD: f32 = -0.5;

/// Minimum number of calibration points for a usable calibration.
pub const MIN_CALIBRATION_POINTS: usize = 2;

/// Maximum number of calibration points a session accepts.
pub const MAX_CALIBRATION_POINTS: usize = 5;

/// Upper bound for reported absorbance. A transmittance of zero has no
/// finite absorbance; the ceiling stands in for it. 4 AU is past the
/// dynamic range a camera sensor can resolve.
pub const ABSORBANCE_CEILING: f64 = 4.0;

/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of channels in a decoded frame (R, G, B).
pub const RGB_CHANNEL_COUNT: usize = 3;

/// Byte budget for scratch buffers kept pooled between frame ticks.
pub const ARENA_POOL_BUDGET_BYTES: usize = 33_554_432;

/// Small epsilon guarding division by zero in slope computations.
pub const SLOPE_EPSILON: f64 = 1e-12;
