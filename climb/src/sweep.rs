use crate::{
    constants::{MIN_SWEEP_SQ, PROBE_PRECISION, PROBE_RADIUS},
    layers::LayerMask,
    types::{SweepHit, Vec3},
};

/// Swept-sphere collision query used to detect hand contact.
///
/// Implementations cast a sphere of `radius` from `origin` along `movement`
/// (the full translation for this query, not a direction) against colliders on
/// `layers`, and return the first obstruction within `movement.norm()`.
///
/// Colliders the sphere already overlaps at `origin` must not be reported.
pub trait SweepQuery {
    fn sweep(
        &self,
        origin: Vec3,
        radius: f32,
        movement: Vec3,
        layers: LayerMask,
    ) -> Option<SweepHit>;
}

impl<T: SweepQuery + ?Sized> SweepQuery for &T {
    fn sweep(
        &self,
        origin: Vec3,
        radius: f32,
        movement: Vec3,
        layers: LayerMask,
    ) -> Option<SweepHit> {
        (**self).sweep(origin, radius, movement, layers)
    }
}

/// Result of sweeping one hand from its anchor toward its desired position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SweepOutcome {
    /// The hand moved freely; no body reaction.
    Free,
    /// The hand struck a surface. `end` is the contact point pushed out along the
    /// surface normal by the probe radius.
    Contact { end: Vec3, hit: SweepHit },
}

impl SweepOutcome {
    #[inline]
    pub fn is_contact(&self) -> bool {
        matches!(self, SweepOutcome::Contact { .. })
    }

    #[inline]
    pub fn end(&self) -> Option<Vec3> {
        match self {
            SweepOutcome::Contact { end, .. } => Some(*end),
            SweepOutcome::Free => None,
        }
    }
}

/// Sweep the hand probe from `anchor` to `desired`.
///
/// A zero-length displacement returns [`SweepOutcome::Free`] without querying.
pub fn resolve_sweep<Q: SweepQuery + ?Sized>(
    query: &Q,
    anchor: Vec3,
    desired: Vec3,
    layers: LayerMask,
) -> SweepOutcome {
    let movement = desired - anchor;
    if movement.norm_squared() <= MIN_SWEEP_SQ {
        return SweepOutcome::Free;
    }

    match query.sweep(anchor, PROBE_RADIUS * PROBE_PRECISION, movement, layers) {
        Some(hit) => SweepOutcome::Contact {
            end: hit.point + hit.normal * PROBE_RADIUS,
            hit,
        },
        None => SweepOutcome::Free,
    }
}
