//! Top-level simulation: scene instantiation and the fixed-tick loop.

use crate::config::{ControlsConfig, SceneConfig};
use crate::input::ActionState;
use crate::player::PlayerController;
use crate::scripted_input::ScriptedInputPlayer;
use anyhow::Result;
use glam::Vec3;
use latchkey_audio::{AudioSink, ClipId};
use latchkey_core::{scoped_rng, KeyInventory, ObjectId, Tick};
use latchkey_interact::{Door, InteractionCtx, Pickup, World};
use latchkey_physics::{Aabb, Layer};
use latchkey_ui::Hud;
use rand::rngs::StdRng;
use tracing::{debug, info};

/// Door collider footprint (width, height, depth). Colliders stay at the
/// closed pose; an open door still occupies its doorway for rays/movement.
const DOOR_COLLIDER_SIZE: Vec3 = Vec3::new(1.0, 2.0, 0.2);
/// Pickup collider edge length.
const PICKUP_COLLIDER_SIZE: f32 = 0.4;

/// Applies the configured sound-effects volume before forwarding to the
/// real sink.
struct ScaledSink {
    inner: Box<dyn AudioSink>,
    gain: f32,
}

impl AudioSink for ScaledSink {
    fn play(&mut self, clip: &ClipId, position: Vec3, volume: f32) {
        self.inner.play(clip, position, volume * self.gain);
    }
}

/// The running simulation: world, player, and shared interaction state.
pub struct Game {
    world: World,
    player: PlayerController,
    inventory: KeyInventory,
    hud: Hud,
    audio: ScaledSink,
    rng: StdRng,
    tick: Tick,
}

impl Game {
    /// Instantiate a validated scene.
    ///
    /// Object ids are assigned in scene order: doors first, then pickups,
    /// then scenery.
    pub fn new(
        scene: &SceneConfig,
        controls: &ControlsConfig,
        audio: Box<dyn AudioSink>,
        seed: u64,
    ) -> Result<Self> {
        // Re-validated here so callers that skip `load_scene` still fail
        // fast on bad cross-references.
        scene.validate()?;

        let mut world = World::new();
        let mut next_id = 0u32;

        for config in &scene.doors {
            let id = ObjectId(next_id);
            next_id += 1;
            let door = Door::new(id, config)?;
            let aabb = Aabb::from_center_size(config.position + Vec3::Y, DOOR_COLLIDER_SIZE);
            world.spawn(Box::new(door), aabb, Layer::INTERACTABLE);
            debug!(id = id.0, "spawned door");
        }
        for config in &scene.pickups {
            let id = ObjectId(next_id);
            next_id += 1;
            let pickup = Pickup::new(id, config);
            let aabb = Aabb::from_center_size(config.position, Vec3::splat(PICKUP_COLLIDER_SIZE));
            world.spawn(Box::new(pickup), aabb, Layer::INTERACTABLE);
            debug!(id = id.0, "spawned pickup");
        }
        for config in &scene.scenery {
            let id = ObjectId(next_id);
            next_id += 1;
            world.add_scenery(id, Aabb::new(config.min, config.max));
        }

        info!(
            doors = scene.doors.len(),
            pickups = scene.pickups.len(),
            scenery = scene.scenery.len(),
            "scene instantiated"
        );

        Ok(Self {
            world,
            player: PlayerController::new(&scene.player, controls),
            inventory: KeyInventory::new(scene.inventory_slots),
            hud: Hud::new(),
            audio: ScaledSink {
                inner: audio,
                gain: controls.sfx_volume,
            },
            rng: scoped_rng(seed, 0),
            tick: Tick::ZERO,
        })
    }

    /// Advance one fixed tick with the given input.
    pub fn step(&mut self, action: &ActionState) {
        let dt = Tick::SECONDS;
        let mut ctx = InteractionCtx {
            inventory: &mut self.inventory,
            audio: &mut self.audio,
            hud: &mut self.hud,
            rng: &mut self.rng,
            actor_position: self.player.position(),
        };
        self.player.update(dt, action, &mut self.world, &mut ctx);
        self.world.tick(dt, &mut ctx);
        self.tick = self.tick.advance(1);
    }

    /// Drive the simulation from a script until it runs out of steps or the
    /// tick limit is hit.
    pub fn run_scripted(&mut self, script: &mut ScriptedInputPlayer, max_ticks: Option<u64>) {
        while !script.finished() {
            if let Some(limit) = max_ticks {
                if self.tick.0 >= limit {
                    info!(limit, "tick limit reached");
                    break;
                }
            }
            let action = script.advance(Tick::SECONDS);
            self.step(&action);
        }
        info!(ticks = self.tick.0, "script playback done");
    }

    /// Run with no input for `ticks` ticks.
    pub fn run_idle(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step(&ActionState::idle());
        }
    }

    /// Current tick.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Player controller state.
    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    /// Shared key inventory.
    pub fn inventory(&self) -> &KeyInventory {
        &self.inventory
    }

    /// HUD state.
    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    /// World contents.
    pub fn world(&self) -> &World {
        &self.world
    }
}
