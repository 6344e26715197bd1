/// Tolerance below which a value counts as numerically zero: rank checks,
/// singularity checks, and the eigenvalue discriminant all use this.
pub const EPSILON: f64 = 1e-9;

/// Grid spacing is always an integer power of this base, so continuous zoom
/// snaps between discrete spacings instead of jittering.
pub const GRID_SPACING_BASE: f64 = 5.0;
/// Minimum desired on-screen distance between adjacent grid lines, in pixels.
pub const MIN_GRID_PIXEL_SPACING: f64 = 50.0;
/// Upper bound on lattice cells drawn per grid per frame. A near-singular
/// basis pulls the view corners back to an enormous lattice range; the
/// renderer clamps to this rather than looping effectively forever.
pub const MAX_GRID_CELLS: i64 = 65_536;

/// Radius of the filled circle marking each axis crossing, in pixels.
pub const ORIGIN_MARKER_RADIUS: f64 = 3.0;
/// Screen-space offset of axis labels from their lattice point, in pixels.
pub const AXIS_LABEL_OFFSET: (f64, f64) = (5.0, 20.0);
/// Length of each arrowhead wing on a drawn vector, in pixels.
pub const ARROWHEAD_SIZE: f64 = 7.0;

/// Default view scale, in pixels per world unit.
pub const DEFAULT_VIEW_SCALE: f64 = 50.0;
