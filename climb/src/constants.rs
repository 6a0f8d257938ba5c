/// Radius of the sphere probe swept along each hand's motion (meters).
///
/// Also the distance a grip point is pushed out of the surface along the hit
/// normal, so the next sweep from the anchor starts just clear of it.
pub const PROBE_RADIUS: f32 = 0.05;

/// Scale applied to [`PROBE_RADIUS`] for the swept sphere.
///
/// The probe is slightly smaller than the push-out distance, so a sweep that
/// starts from a committed anchor does not register the surface it rests on.
pub const PROBE_PRECISION: f32 = 0.995;

/// Sweeps shorter than this (meters, squared) are treated as zero-length.
pub const MIN_SWEEP_SQ: f32 = 1.0e-12;

/// Practical small distance for comparisons (meters).
pub const DIST_EPS: f32 = 1.0e-6;

/// Default ring-buffer capacity for the body velocity history (ticks).
pub const DEFAULT_VELOCITY_HISTORY_SIZE: usize = 8;

/// Default reach of a hand from the head (meters).
pub const DEFAULT_MAX_ARM_LENGTH: f32 = 1.5;

/// Default anchor-to-target distance at which a grip lets go (meters).
pub const DEFAULT_UNSTICK_DISTANCE: f32 = 1.0;

/// Default average body speed above which a gripping push becomes a jump (m/s).
pub const DEFAULT_VELOCITY_LIMIT: f32 = 0.4;

/// Default cap on the jump impulse speed (m/s).
pub const DEFAULT_MAX_JUMP_SPEED: f32 = 6.5;

/// Default scale from the averaged body velocity to the jump impulse.
pub const DEFAULT_JUMP_MULTIPLIER: f32 = 1.1;
