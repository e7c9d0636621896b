//! Default limits and tuning values shared across crates.

/// Largest input accepted in one piece (bytes)
pub const MAX_BYTES: usize = 25_000_000;

/// Byte-range size used when fetching in chunks
pub const RANGE_CHUNK: usize = 2_000_000;

/// Bytes compared at each end of a chunk by the duplicate-chunk guard
pub const CHUNK_SIGNATURE_BYTES: usize = 128;

/// Minimum planar length of a retained extrusion segment (mm)
pub const MIN_SEG_LEN: f64 = 0.15;

/// Hard cap on accepted segments across all features
pub const MAX_SEGMENTS: usize = 700_000;

/// Extruder feed above which a move counts as extrusion (mm)
pub const EXTRUSION_EPSILON: f64 = 1e-6;

/// Default ribbon width (mm)
pub const DEFAULT_WIDTH_MM: f32 = 0.46;

/// Z offset added per layer index when building ribbons (mm)
pub const Z_LIFT_PER_LAYER: f32 = 0.003;

/// Vertical field of view used for the default framing (degrees)
pub const DEFAULT_FOV_DEG: f32 = 45.0;

/// Margin multiplier applied to the framing radius
pub const DEFAULT_FIT_FACTOR: f32 = 1.2;

/// Padding around the model on each side of the ground grid (mm)
pub const GRID_PADDING_MM: f64 = 10.0;

/// Smallest ground grid side length (mm)
pub const GRID_MIN_SIZE_MM: f64 = 100.0;

/// Target ground grid cell size (mm)
pub const GRID_CELL_MM: f64 = 10.0;

/// Fewest divisions a ground grid will have
pub const GRID_MIN_DIVISIONS: u32 = 10;
