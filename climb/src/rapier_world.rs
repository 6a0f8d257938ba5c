//! Rapier-backed sweep world for immutable static geometry.
//!
//! Builds an in-memory Rapier scene from a set of static collider definitions and
//! answers the hand probe's [`SweepQuery`] against it.
//!
//! - Deterministic: given the same inputs (sorted by `id`), build identical in-memory sets.
//! - Immutable world: statics do not move after construction.
//! - Each collider carries its [`LayerMask`] bits in `user_data`, so the sweep filter
//!   can skip colliders outside the locomotion layers without a side table.

pub use rapier3d;

use rapier3d::{
    na::{Translation3, UnitQuaternion},
    parry::query::{PointQuery, ShapeCastOptions},
    prelude::*,
};
use serde::Deserialize;

use crate::{
    constants::DIST_EPS,
    layers::LayerMask,
    sweep::SweepQuery,
    types::{SweepHit, Vec3},
};

/// Canonical definition of an immutable world collider.
///
/// Conventions
/// - Units are meters.
/// - For planes the normal is derived from the pose as `rotation * +Y`, and
///   `dist = dot(normal, translation) + offset_along_normal`.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    pub translation: Vector<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub shape: ColliderShapeDef,
    /// Layers this collider belongs to.
    pub layers: LayerMask,
}

/// Supported static collider shapes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space), offset along its pose-derived normal.
    Plane {
        #[serde(default)]
        offset_along_normal: f32,
    },

    /// Oriented cuboid with given half-extents.
    Cuboid { half_extents: Vector<f32> },

    Sphere { radius: f32 },

    /// Y-aligned capsule.
    CapsuleY { radius: f32, half_height: f32 },
}

/// In-memory Rapier structures needed for sweeps against a static world.
///
/// `NarrowPhase` and `BroadPhaseBvh` are kept to create a borrowed `QueryPipeline`
/// per query. For immutable statics they are built once at startup.
pub struct RapierQueryWorld {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
}

impl RapierQueryWorld {
    /// Build a query world from a list of static collider definitions.
    ///
    /// The input is sorted by `id` before insertion. NaN or otherwise invalid
    /// values should be rejected by the caller.
    pub fn build(mut defs: Vec<WorldStaticDef>) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        for def in defs.into_iter() {
            let iso = Isometry::from_parts(Translation3::from(def.translation), def.rotation);

            let rb = RigidBodyBuilder::fixed().pose(iso).build();
            let rb_handle = bodies.insert(rb);

            let collider = collider_from_def(&def);
            colliders.insert_with_parent(collider, rb_handle, &mut bodies);
        }

        // Collision detection only (no dynamics): updates the broad-phase BVH and
        // the narrow-phase graph so queries can run.
        let mut broad_phase = BroadPhaseBvh::new();
        let mut narrow_phase = NarrowPhase::new();
        let mut collision_pipeline = CollisionPipeline::new();

        collision_pipeline.step(
            0.0,
            &mut broad_phase,
            &mut narrow_phase,
            &mut bodies,
            &mut colliders,
            &(),
            &(),
        );

        log::info!("built query world with {} static colliders", colliders.len());

        Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase,
        }
    }

    /// Borrowed `QueryPipeline` view over the statics.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }
}

impl SweepQuery for RapierQueryWorld {
    fn sweep(
        &self,
        origin: Vec3,
        radius: f32,
        movement: Vec3,
        layers: LayerMask,
    ) -> Option<SweepHit> {
        let start = Point::from(origin);

        // Colliders the probe already overlaps are not obstructions.
        let predicate = |_: ColliderHandle, co: &Collider| {
            layers.intersects(collider_layers(co))
                && co.shape().distance_to_point(co.position(), &start, true) >= radius
        };
        let filter = QueryFilter::default().predicate(&predicate);
        let query_pipeline = self.query_pipeline(filter);

        let probe = Ball::new(radius);
        let pos = Isometry::translation(origin.x, origin.y, origin.z);
        let mut opts = ShapeCastOptions::with_max_time_of_impact(1.0);
        opts.stop_at_penetration = false;

        let (handle, hit) = query_pipeline.cast_shape(&pos, &movement, &probe, opts)?;
        let co = self.colliders.get(handle)?;

        let center = origin + movement * hit.time_of_impact;
        let on_surface = co
            .shape()
            .project_point(co.position(), &Point::from(center), true)
            .point;

        let outward = center - on_surface.coords;
        let normal = if outward.norm() > DIST_EPS {
            outward.normalize()
        } else {
            -movement.normalize()
        };

        Some(SweepHit {
            point: center - normal * radius,
            normal,
        })
    }
}

/// Layer bits stored on a collider by [`RapierQueryWorld::build`].
#[inline]
pub fn collider_layers(co: &Collider) -> LayerMask {
    LayerMask::new(co.user_data as u32)
}

/// Build a Rapier collider from a `WorldStaticDef`.
///
/// The pose lives on the parent rigid-body, so the collider has an identity local
/// transform (except for planes, see below).
pub fn collider_from_def(def: &WorldStaticDef) -> Collider {
    let builder = match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => {
            // n = R * +Y; the plane is n . x = n . t + offset.
            let n = def.rotation * Vector::y();
            let dist = n.dot(&def.translation) + *offset_along_normal;
            let unit_n = UnitVector::new_normalize(n);

            // The half-space is attached in the body's local frame, so express the
            // offset relative to the body translation.
            let local_offset =
                def.rotation.inverse() * (unit_n.into_inner() * dist - def.translation);
            ColliderBuilder::new(SharedShape::new(HalfSpace::new(Vector::y_axis())))
                .translation(local_offset)
        }

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }

        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius),

        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => ColliderBuilder::capsule_y(*half_height, *radius),
    };

    builder.user_data(def.layers.bits as u128).build()
}
