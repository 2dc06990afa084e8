#![warn(missing_docs)]
//! Physics primitives: AABBs, layered raycasts, and character movement.

use glam::Vec3;
use latchkey_core::ObjectId;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box used for collisions and ray queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB ensuring min <= max per axis.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y && min.z <= max.z);
        Self { min, max }
    }

    /// Build an AABB from a center point and full size.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Center point of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Tests intersection with another AABB.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// The box shifted by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Collision/query layer id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layer(pub u8);

impl Layer {
    /// Default layer for level geometry.
    pub const DEFAULT: Self = Self(0);
    /// Layer carrying objects the player can interact with.
    pub const INTERACTABLE: Self = Self(6);
}

/// A box registered for ray queries and movement blocking.
#[derive(Debug, Clone, Copy)]
pub struct Collider {
    /// Owning world object.
    pub object: ObjectId,
    /// Extent of the collider.
    pub aabb: Aabb,
    /// Query layer.
    pub layer: Layer,
}

/// Result of a successful raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Object the ray hit.
    pub object: ObjectId,
    /// Layer of the hit collider.
    pub layer: Layer,
    /// Distance from the ray origin to the entry point.
    pub distance: f32,
    /// World-space entry point.
    pub point: Vec3,
}

/// Flat set of colliders supporting nearest-hit raycasts and removal.
#[derive(Debug, Default)]
pub struct ColliderSet {
    colliders: Vec<Collider>,
}

impl ColliderSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collider.
    pub fn insert(&mut self, collider: Collider) {
        self.colliders.push(collider);
    }

    /// Remove all colliders owned by `object`.
    pub fn remove(&mut self, object: ObjectId) {
        self.colliders.retain(|c| c.object != object);
    }

    /// Number of registered colliders.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Cast a ray and return the nearest hit within `max_distance`.
    ///
    /// With `filter` set, only colliders on that layer are considered; the
    /// focus-detection pass casts unfiltered and inspects the hit layer
    /// itself.
    pub fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: Option<Layer>,
    ) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let mut nearest: Option<RayHit> = None;
        for collider in &self.colliders {
            if let Some(wanted) = filter {
                if collider.layer != wanted {
                    continue;
                }
            }
            let Some(distance) = ray_aabb(origin, direction, &collider.aabb) else {
                continue;
            };
            if distance > max_distance {
                continue;
            }
            if nearest.map_or(true, |hit| distance < hit.distance) {
                nearest = Some(RayHit {
                    object: collider.object,
                    layer: collider.layer,
                    distance,
                    point: origin + direction * distance,
                });
            }
        }
        nearest
    }

    fn iter(&self) -> impl Iterator<Item = &Collider> {
        self.colliders.iter()
    }
}

/// Slab-method ray/AABB intersection returning the entry distance.
fn ray_aabb(origin: Vec3, direction: Vec3, aabb: &Aabb) -> Option<f32> {
    let inv = direction.recip();
    let t1 = (aabb.min - origin) * inv;
    let t2 = (aabb.max - origin) * inv;

    // f32::min/max discard NaN lanes from axis-parallel rays.
    let t_near = t1.min(t2).max_element().max(0.0);
    let t_far = t1.max(t2).min_element();

    if t_far >= t_near {
        Some(t_near)
    } else {
        None
    }
}

/// Result of a collision-aware character move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Displacement actually applied after clamping against colliders.
    pub offset: Vec3,
    /// Whether downward motion was blocked this move.
    pub grounded: bool,
}

// Keeps a hair of clearance so a resting body does not re-collide next tick.
const CONTACT_SKIN: f32 = 1e-4;

/// Move an AABB through the collider set, clamping per axis.
///
/// Horizontal axes resolve before the vertical one so the body slides along
/// walls instead of sticking to them.
pub fn move_character(set: &ColliderSet, body: Aabb, displacement: Vec3) -> MoveResult {
    let mut current = body;
    let mut applied = Vec3::ZERO;
    let mut grounded = false;

    for axis in [0usize, 2, 1] {
        let wanted = displacement[axis];
        if wanted == 0.0 {
            continue;
        }
        let allowed = sweep_axis(set, &current, axis, wanted);
        if axis == 1 && wanted < 0.0 && allowed > wanted {
            grounded = true;
        }
        let mut step = Vec3::ZERO;
        step[axis] = allowed;
        current = current.translated(step);
        applied += step;
    }

    MoveResult {
        offset: applied,
        grounded,
    }
}

/// Largest movement along `axis` before the body touches a collider.
fn sweep_axis(set: &ColliderSet, body: &Aabb, axis: usize, wanted: f32) -> f32 {
    let mut allowed = wanted;
    for collider in set.iter() {
        if !overlaps_other_axes(body, &collider.aabb, axis) {
            continue;
        }
        if wanted > 0.0 {
            let gap = collider.aabb.min[axis] - body.max[axis] - CONTACT_SKIN;
            if gap >= -CONTACT_SKIN && gap < allowed {
                allowed = gap.max(0.0);
            }
        } else {
            let gap = collider.aabb.max[axis] - body.min[axis] + CONTACT_SKIN;
            if gap <= CONTACT_SKIN && gap > allowed {
                allowed = gap.min(0.0);
            }
        }
    }
    allowed
}

fn overlaps_other_axes(a: &Aabb, b: &Aabb, skip: usize) -> bool {
    for axis in 0..3 {
        if axis == skip {
            continue;
        }
        if a.min[axis] >= b.max[axis] || a.max[axis] <= b.min[axis] {
            return false;
        }
    }
    true
}
