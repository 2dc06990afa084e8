//! World container: interactable objects plus their colliders.
//!
//! Colliders are registered once at spawn and never move: an open door's
//! collider keeps its closed footprint, so rays and movement treat the
//! doorway as occupied either way. Reaping an expired object removes its
//! collider with it.

use glam::Vec3;
use latchkey_core::ObjectId;
use latchkey_physics::{Aabb, Collider, ColliderSet, Layer, RayHit};
use tracing::debug;

use crate::interactable::{Interactable, InteractionCtx};

/// Owns every interactable object and the collider set backing ray queries
/// and character movement. Single-threaded; everything happens on the main
/// tick.
#[derive(Default)]
pub struct World {
    objects: Vec<Box<dyn Interactable>>,
    colliders: ColliderSet,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interactable object together with its collider.
    pub fn spawn(&mut self, object: Box<dyn Interactable>, aabb: Aabb, layer: Layer) -> ObjectId {
        let id = object.id();
        debug_assert!(
            !self.objects.iter().any(|o| o.id() == id),
            "duplicate object id {id:?}"
        );
        self.colliders.insert(Collider {
            object: id,
            aabb,
            layer,
        });
        self.objects.push(object);
        id
    }

    /// Add a non-interactable collider (walls, floors).
    pub fn add_scenery(&mut self, id: ObjectId, aabb: Aabb) {
        self.colliders.insert(Collider {
            object: id,
            aabb,
            layer: Layer::DEFAULT,
        });
    }

    /// Resolve an object by id. Removed objects stop resolving.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut (dyn Interactable + 'static)> {
        self.objects
            .iter_mut()
            .find(|o| o.id() == id)
            .map(|o| &mut **o)
    }

    /// Whether an object with `id` is still in the world.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.iter().any(|o| o.id() == id)
    }

    /// Number of live interactable objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Nearest raycast hit against the collider set.
    pub fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: Option<Layer>,
    ) -> Option<RayHit> {
        self.colliders.cast_ray(origin, direction, max_distance, filter)
    }

    /// Colliders for movement queries.
    pub fn colliders(&self) -> &ColliderSet {
        &self.colliders
    }

    /// Advance every object one tick, then reap expired ones.
    pub fn tick(&mut self, dt: f32, ctx: &mut InteractionCtx<'_>) {
        for object in &mut self.objects {
            object.tick(dt, ctx);
        }

        let mut removed = Vec::new();
        self.objects.retain(|object| {
            if object.expired() {
                removed.push(object.id());
                false
            } else {
                true
            }
        });
        for id in removed {
            self.colliders.remove(id);
            debug!(id = id.0, "removed expired object");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pickup::{Pickup, PickupConfig};
    use latchkey_audio::RecordingSink;
    use latchkey_core::{scoped_rng, KeyId, KeyInventory};
    use latchkey_ui::Hud;

    struct Fixture {
        inventory: KeyInventory,
        audio: RecordingSink,
        hud: Hud,
        rng: rand::rngs::StdRng,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                inventory: KeyInventory::new(2),
                audio: RecordingSink::new(),
                hud: Hud::new(),
                rng: scoped_rng(3, 0),
            }
        }

        fn ctx(&mut self) -> InteractionCtx<'_> {
            InteractionCtx {
                inventory: &mut self.inventory,
                audio: &mut self.audio,
                hud: &mut self.hud,
                rng: &mut self.rng,
                actor_position: Vec3::ZERO,
            }
        }
    }

    fn spawn_pickup(world: &mut World, id: u32, key: usize) -> ObjectId {
        let config = PickupConfig {
            key: KeyId(key),
            position: Vec3::new(id as f32, 0.5, 0.0),
        };
        let pickup = Pickup::new(ObjectId(id), &config);
        let aabb = Aabb::from_center_size(config.position, Vec3::splat(0.4));
        world.spawn(Box::new(pickup), aabb, Layer::INTERACTABLE)
    }

    #[test]
    fn consumed_pickup_is_reaped_with_its_collider() {
        let mut fx = Fixture::new();
        let mut world = World::new();
        let id = spawn_pickup(&mut world, 1, 0);

        assert!(world.contains(id));
        assert!(world
            .cast_ray(Vec3::new(1.0, 0.5, -5.0), Vec3::Z, 10.0, None)
            .is_some());

        world.get_mut(id).unwrap().on_interact(&mut fx.ctx());
        world.tick(0.05, &mut fx.ctx());

        assert!(!world.contains(id));
        assert!(world.get_mut(id).is_none());
        assert!(world
            .cast_ray(Vec3::new(1.0, 0.5, -5.0), Vec3::Z, 10.0, None)
            .is_none());
        assert!(fx.inventory.contains(KeyId(0)));
    }

    #[test]
    fn scenery_blocks_rays_but_is_not_interactable() {
        let mut world = World::new();
        world.add_scenery(
            ObjectId(100),
            Aabb::new(Vec3::new(-5.0, 0.0, 1.0), Vec3::new(5.0, 3.0, 2.0)),
        );

        let hit = world
            .cast_ray(Vec3::new(0.0, 1.0, 0.0), Vec3::Z, 10.0, None)
            .unwrap();
        assert_eq!(hit.layer, Layer::DEFAULT);
        assert!(world.get_mut(ObjectId(100)).is_none());
    }

    #[test]
    fn object_count_tracks_spawns() {
        let mut fx = Fixture::new();
        let mut world = World::new();
        spawn_pickup(&mut world, 1, 0);
        spawn_pickup(&mut world, 2, 1);
        assert_eq!(world.object_count(), 2);

        world.get_mut(ObjectId(2)).unwrap().on_interact(&mut fx.ctx());
        world.tick(0.05, &mut fx.ctx());
        assert_eq!(world.object_count(), 1);
    }
}
