// Floating point comparisons, and the offset for over/under points.
pub const EPSILON: f64 = 0.0001;

// Maximum number of reflection/refraction bounces per camera ray.
pub const DEFAULT_RECURSION_DEPTH: usize = 5;

// Common refraction indices
pub const VACUUM_RI: f64 = 1.0;
pub const GLASS_RI: f64 = 1.5;
