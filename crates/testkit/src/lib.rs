#![warn(missing_docs)]
//! Deterministic testing surfaces for the interaction core.
//!
//! [`Harness`] wires a [`World`] to recording collaborators so tests can
//! drive interactions tick by tick and assert on everything that happened.
//! [`JsonlSink`] dumps event streams for offline comparison.

use anyhow::Result;
use glam::Vec3;
use latchkey_audio::RecordingSink;
use latchkey_core::{scoped_rng, KeyInventory, ObjectId, Tick};
use latchkey_interact::{
    Door, DoorConfig, Interactable, InteractionCtx, Pickup, PickupConfig, World,
};
use latchkey_physics::{Aabb, Layer};
use latchkey_ui::Hud;
use rand::rngs::StdRng;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One line of a dumped event stream.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Position in the captured stream.
    pub seq: usize,
    /// Human-readable kind label (`"sound"`, ...).
    pub kind: &'a str,
    /// Free-form payload, e.g. a clip name.
    pub payload: &'a str,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

/// A world wired to recording collaborators, driven tick by tick.
pub struct Harness {
    /// World under test.
    pub world: World,
    /// Shared key inventory.
    pub inventory: KeyInventory,
    /// Captured sound requests.
    pub audio: RecordingSink,
    /// HUD state.
    pub hud: Hud,
    /// Seeded RNG (creak selection).
    pub rng: StdRng,
    /// Current tick.
    pub tick: Tick,
}

impl Harness {
    /// Create a harness with an empty world and `slots` inventory slots.
    pub fn new(slots: usize, seed: u64) -> Self {
        Self {
            world: World::new(),
            inventory: KeyInventory::new(slots),
            audio: RecordingSink::new(),
            hud: Hud::new(),
            rng: scoped_rng(seed, 0),
            tick: Tick::ZERO,
        }
    }

    /// Build an interaction context with the actor at `position`.
    ///
    /// The world itself is not part of the context, so the caller can hold
    /// `&mut self.world` at the same time.
    pub fn ctx_at<'a>(
        inventory: &'a mut KeyInventory,
        audio: &'a mut RecordingSink,
        hud: &'a mut Hud,
        rng: &'a mut StdRng,
        position: Vec3,
    ) -> InteractionCtx<'a> {
        InteractionCtx {
            inventory,
            audio,
            hud,
            rng,
            actor_position: position,
        }
    }

    /// Spawn a door with a door-sized collider at its configured position.
    ///
    /// Panics on an invalid config; harness callers want the failure loud.
    pub fn spawn_door(&mut self, id: u32, config: &DoorConfig) -> ObjectId {
        let door = Door::new(ObjectId(id), config).expect("valid door config");
        let aabb = Aabb::from_center_size(
            config.position + Vec3::Y,
            Vec3::new(1.0, 2.0, 0.2),
        );
        self.world.spawn(Box::new(door), aabb, Layer::INTERACTABLE)
    }

    /// Spawn a pickup with a small collider at its configured position.
    pub fn spawn_pickup(&mut self, id: u32, config: &PickupConfig) -> ObjectId {
        let pickup = Pickup::new(ObjectId(id), config);
        let aabb = Aabb::from_center_size(config.position, Vec3::splat(0.4));
        self.world.spawn(Box::new(pickup), aabb, Layer::INTERACTABLE)
    }

    /// Dispatch `on_interact` to an object, actor standing at `actor`.
    pub fn interact(&mut self, id: ObjectId, actor: Vec3) {
        let mut ctx = Self::ctx_at(
            &mut self.inventory,
            &mut self.audio,
            &mut self.hud,
            &mut self.rng,
            actor,
        );
        if let Some(object) = self.world.get_mut(id) {
            object.on_interact(&mut ctx);
        }
    }

    /// Dispatch `on_alternate_interact` to an object.
    pub fn alternate(&mut self, id: ObjectId, actor: Vec3) {
        let mut ctx = Self::ctx_at(
            &mut self.inventory,
            &mut self.audio,
            &mut self.hud,
            &mut self.rng,
            actor,
        );
        if let Some(object) = self.world.get_mut(id) {
            object.on_alternate_interact(&mut ctx);
        }
    }

    /// Dispatch `on_focus` to an object.
    pub fn focus(&mut self, id: ObjectId) {
        let mut ctx = Self::ctx_at(
            &mut self.inventory,
            &mut self.audio,
            &mut self.hud,
            &mut self.rng,
            Vec3::ZERO,
        );
        if let Some(object) = self.world.get_mut(id) {
            object.on_focus(&mut ctx);
        }
    }

    /// Dispatch `on_lose_focus` to an object.
    pub fn lose_focus(&mut self, id: ObjectId) {
        let mut ctx = Self::ctx_at(
            &mut self.inventory,
            &mut self.audio,
            &mut self.hud,
            &mut self.rng,
            Vec3::ZERO,
        );
        if let Some(object) = self.world.get_mut(id) {
            object.on_lose_focus(&mut ctx);
        }
    }

    /// Advance the whole world by `ticks` fixed ticks.
    pub fn step(&mut self, ticks: u64) {
        for _ in 0..ticks {
            let mut ctx = Self::ctx_at(
                &mut self.inventory,
                &mut self.audio,
                &mut self.hud,
                &mut self.rng,
                Vec3::ZERO,
            );
            self.world.tick(Tick::SECONDS, &mut ctx);
            self.tick = self.tick.advance(1);
        }
    }

    /// Advance by whole seconds of simulated time.
    pub fn step_seconds(&mut self, seconds: f32) {
        let ticks = (seconds / Tick::SECONDS).round() as u64;
        self.step(ticks);
    }

    /// Dump every captured sound request to `path` as JSONL, in playback
    /// order, for offline comparison of runs.
    pub fn dump_audio<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut sink = JsonlSink::create(path)?;
        for (seq, event) in self.audio.events().iter().enumerate() {
            sink.write(&EventRecord {
                seq,
                kind: "sound",
                payload: &event.clip.0,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harness_ticks_advance() {
        let mut harness = Harness::new(1, 42);
        harness.step_seconds(1.0);
        assert_eq!(harness.tick, Tick(20));
    }
}
