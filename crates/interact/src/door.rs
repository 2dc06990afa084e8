//! Door state machine and open/close animations.
//!
//! A door is Closed, Opening, Open, or Closing, with `locked` layered on
//! top as an orthogonal flag. Animations run as an explicit progress value
//! `t` advanced by `dt * speed` each tick; the in-flight animation is the
//! `Option<Animation>` slot, and starting a new one replaces whatever was
//! there (last request wins, nothing is queued).
//!
//! Every accepted interaction arms a fixed 1.0-second cooldown that is
//! deliberately independent of the animation duration (`1/speed`): a fast
//! door finishes moving before it accepts the next interaction, a slow door
//! accepts the next interaction while still moving. The cooldown is never
//! reset by further attempts; those are silent no-ops.

use glam::{EulerRot, Quat, Vec3};
use latchkey_audio::ClipId;
use latchkey_core::{KeyId, ObjectId};
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::interactable::{Interactable, InteractionCtx};

/// Fixed re-entrancy cooldown, in seconds. Not tied to animation length.
const INTERACT_COOLDOWN: f32 = 1.0;

/// Animation progress where the opening creak fires.
const OPEN_CREAK_AT: f32 = 0.5;
/// Animation progress where the closing creak fires (if one is pending).
const CLOSE_CREAK_AT: f32 = 0.2;
/// Animation progress where the close sound fires and the door counts as shut.
const CLOSE_SOUND_AT: f32 = 0.8;

/// How a door moves between closed and open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorKind {
    /// Swings around its hinge, away from the actor.
    Rotating,
    /// Translates along a configured direction.
    Sliding,
}

/// Clips a door plays, configured per door.
#[derive(Debug, Clone, Deserialize)]
pub struct DoorSounds {
    /// Played when an open animation starts.
    pub open: ClipId,
    /// Played late in the close animation.
    pub close: ClipId,
    /// Played when pushing a locked door.
    pub push: ClipId,
    /// Played on a successful lock.
    pub lock: ClipId,
    /// Played on a successful unlock.
    pub unlock: ClipId,
    /// Creak variants; one is chosen uniformly at random per pass.
    pub creaks: Vec<ClipId>,
}

/// Scene-file description of a door.
#[derive(Debug, Clone, Deserialize)]
pub struct DoorConfig {
    /// Rotating or sliding.
    pub kind: DoorKind,
    /// Whether the door starts locked.
    #[serde(default = "default_locked")]
    pub locked: bool,
    /// Consume the key from the inventory on lock/unlock.
    #[serde(default)]
    pub remove_key_on_use: bool,
    /// Animation speed; the animation takes `1/speed` seconds.
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Swing amount in degrees (rotating doors).
    #[serde(default = "default_rotation_degrees")]
    pub rotation_degrees: f32,
    /// Dot-product threshold deciding which side the actor is on.
    #[serde(default)]
    pub forward_threshold: f32,
    /// Slide direction (sliding doors); normalized at load.
    #[serde(default = "default_slide_direction")]
    pub slide_direction: Vec3,
    /// Slide distance (sliding doors).
    #[serde(default = "default_slide_distance")]
    pub slide_distance: f32,
    /// Inventory slot holding this door's key.
    pub key: KeyId,
    /// Hinge position.
    pub position: Vec3,
    /// Resting yaw in degrees.
    #[serde(default)]
    pub yaw_degrees: f32,
    /// Clip set.
    pub sounds: DoorSounds,
}

fn default_locked() -> bool {
    true
}

fn default_speed() -> f32 {
    1.0
}

fn default_rotation_degrees() -> f32 {
    90.0
}

fn default_slide_direction() -> Vec3 {
    Vec3::NEG_Z
}

fn default_slide_distance() -> f32 {
    1.0
}

/// Rejected door configuration. Raised at scene load, never mid-interaction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DoorConfigError {
    /// Speed must be positive so `1/speed` is a finite duration.
    #[error("door speed must be positive (got {0})")]
    NonPositiveSpeed(f32),
    /// A sliding door with a zero direction would never move.
    #[error("slide direction must be non-zero")]
    ZeroSlideDirection,
    /// The creak pick would have nothing to choose from.
    #[error("door needs at least one creak clip")]
    NoCreakClips,
}

/// In-flight animation. At most one per door; replacing it is the
/// cancellation mechanism.
#[derive(Debug, Clone)]
enum Animation {
    RotatingOpen { from: Quat, to: Quat, t: f32 },
    RotatingClose { from: Quat, t: f32 },
    SlidingOpen { from: Vec3, to: Vec3, t: f32 },
    SlidingClose { from: Vec3, t: f32 },
}

/// A door in the world.
#[derive(Debug)]
pub struct Door {
    id: ObjectId,
    kind: DoorKind,
    locked: bool,
    remove_key_on_use: bool,
    speed: f32,
    rotation_degrees: f32,
    forward_threshold: f32,
    slide_offset: Vec3,
    key: KeyId,
    sounds: DoorSounds,
    volume: f32,

    // Baselines captured once at construction.
    base_position: Vec3,
    base_rotation: Quat,
    base_yaw_degrees: f32,
    forward: Vec3,

    // Transient state.
    position: Vec3,
    rotation: Quat,
    is_open: bool,
    creak_pending: bool,
    close_played: bool,
    can_interact: bool,
    cooldown: f32,
    animation: Option<Animation>,
}

impl Door {
    /// Build a door from its scene description, validating the parts that
    /// would otherwise fail silently mid-interaction.
    pub fn new(id: ObjectId, config: &DoorConfig) -> Result<Self, DoorConfigError> {
        if config.speed <= 0.0 {
            return Err(DoorConfigError::NonPositiveSpeed(config.speed));
        }
        if config.sounds.creaks.is_empty() {
            return Err(DoorConfigError::NoCreakClips);
        }
        let slide_direction = config.slide_direction.normalize_or_zero();
        if config.kind == DoorKind::Sliding && slide_direction == Vec3::ZERO {
            return Err(DoorConfigError::ZeroSlideDirection);
        }

        let base_rotation = Quat::from_rotation_y(config.yaw_degrees.to_radians());
        // The swing reference axis is the door's lateral axis at rest,
        // captured once and never re-derived.
        let forward = base_rotation * Vec3::X;

        Ok(Self {
            id,
            kind: config.kind,
            locked: config.locked,
            remove_key_on_use: config.remove_key_on_use,
            speed: config.speed,
            rotation_degrees: config.rotation_degrees,
            forward_threshold: config.forward_threshold,
            slide_offset: slide_direction * config.slide_distance,
            key: config.key,
            sounds: config.sounds.clone(),
            volume: 1.0,
            base_position: config.position,
            base_rotation,
            base_yaw_degrees: config.yaw_degrees,
            forward,
            position: config.position,
            rotation: base_rotation,
            is_open: false,
            creak_pending: false,
            close_played: false,
            can_interact: true,
            cooldown: 0.0,
            animation: None,
        })
    }

    /// Whether the door currently counts as open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether the door is locked.
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Whether a new interaction would be accepted right now.
    pub fn can_interact(&self) -> bool {
        self.can_interact
    }

    /// Whether an animation is in flight.
    pub fn animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Current position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current rotation.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Current yaw in degrees (test/diagnostic convenience).
    pub fn yaw_degrees(&self) -> f32 {
        self.rotation.to_euler(EulerRot::YXZ).0.to_degrees()
    }

    /// Lock the door. No-ops while open or without the matching key.
    pub fn lock(&mut self, ctx: &mut InteractionCtx<'_>) {
        if self.is_open || !ctx.inventory.contains(self.key) {
            return;
        }
        self.locked = true;
        self.play(ctx, &self.sounds.lock);
        if self.remove_key_on_use {
            ctx.inventory.remove(self.key);
        }
        debug!(id = self.id.0, "door locked");
    }

    /// Unlock the door. No-ops without the matching key.
    pub fn unlock(&mut self, ctx: &mut InteractionCtx<'_>) {
        if !ctx.inventory.contains(self.key) {
            return;
        }
        self.locked = false;
        self.play(ctx, &self.sounds.unlock);
        if self.remove_key_on_use {
            ctx.inventory.remove(self.key);
        }
        debug!(id = self.id.0, "door unlocked");
    }

    fn open_or_close(&mut self, ctx: &mut InteractionCtx<'_>) {
        if !self.can_interact {
            return;
        }
        self.arm_cooldown();
        if self.is_open {
            self.close();
        } else {
            self.open(ctx);
        }
    }

    fn open(&mut self, ctx: &mut InteractionCtx<'_>) {
        if self.is_open {
            return;
        }
        // Replacing the slot cancels any in-flight animation.
        self.animation = Some(match self.kind {
            DoorKind::Rotating => {
                let to_actor = (ctx.actor_position - self.base_position).normalize_or_zero();
                let dot = self.forward.dot(to_actor);
                let swing = if dot >= self.forward_threshold {
                    -self.rotation_degrees
                } else {
                    self.rotation_degrees
                };
                let target_yaw = (self.base_yaw_degrees + swing).to_radians();
                Animation::RotatingOpen {
                    from: self.rotation,
                    to: Quat::from_rotation_y(target_yaw),
                    t: 0.0,
                }
            }
            DoorKind::Sliding => Animation::SlidingOpen {
                from: self.position,
                to: self.base_position + self.slide_offset,
                t: 0.0,
            },
        });
        self.close_played = false;
        self.is_open = true;
        self.play(ctx, &self.sounds.open);
        debug!(id = self.id.0, "door opening");
    }

    fn close(&mut self) {
        if !self.is_open {
            return;
        }
        self.animation = Some(match self.kind {
            DoorKind::Rotating => Animation::RotatingClose {
                from: self.rotation,
                t: 0.0,
            },
            DoorKind::Sliding => Animation::SlidingClose {
                from: self.position,
                t: 0.0,
            },
        });
        debug!(id = self.id.0, "door closing");
    }

    fn push(&mut self, ctx: &mut InteractionCtx<'_>) {
        if !self.can_interact {
            return;
        }
        self.arm_cooldown();
        self.play(ctx, &self.sounds.push);
        debug!(id = self.id.0, "pushed a locked door");
    }

    fn arm_cooldown(&mut self) {
        self.can_interact = false;
        self.cooldown = INTERACT_COOLDOWN;
    }

    fn play(&self, ctx: &mut InteractionCtx<'_>, clip: &ClipId) {
        ctx.audio.play(clip, self.position, self.volume);
    }

    fn play_creak(&self, ctx: &mut InteractionCtx<'_>) {
        let index = ctx.rng.gen_range(0..self.sounds.creaks.len());
        ctx.audio.play(&self.sounds.creaks[index], self.position, self.volume);
    }

    /// Advance the animation; returns true when it completed this tick.
    fn advance(&mut self, animation: &mut Animation, dt: f32, ctx: &mut InteractionCtx<'_>) -> bool {
        match animation {
            Animation::RotatingOpen { from, to, t } => {
                *t += dt * self.speed;
                self.rotation = from.slerp(*to, t.min(1.0));
                if *t >= OPEN_CREAK_AT && !self.creak_pending {
                    self.play_creak(ctx);
                    self.creak_pending = true;
                }
                if *t >= 1.0 {
                    self.rotation = *to;
                    return true;
                }
                false
            }
            Animation::RotatingClose { from, t } => {
                *t += dt * self.speed;
                self.rotation = from.slerp(self.base_rotation, t.min(1.0));
                if *t >= CLOSE_CREAK_AT && self.creak_pending {
                    self.play_creak(ctx);
                    self.creak_pending = false;
                }
                if *t >= CLOSE_SOUND_AT && !self.close_played {
                    self.play(ctx, &self.sounds.close);
                    self.close_played = true;
                    self.is_open = false;
                }
                if *t >= 1.0 {
                    self.rotation = self.base_rotation;
                    return true;
                }
                false
            }
            Animation::SlidingOpen { from, to, t } => {
                *t += dt * self.speed;
                self.position = from.lerp(*to, t.min(1.0));
                if *t >= OPEN_CREAK_AT && !self.creak_pending {
                    self.play_creak(ctx);
                    self.creak_pending = true;
                }
                if *t >= 1.0 {
                    self.position = *to;
                    return true;
                }
                false
            }
            Animation::SlidingClose { from, t } => {
                *t += dt * self.speed;
                self.position = from.lerp(self.base_position, t.min(1.0));
                if *t >= CLOSE_CREAK_AT && self.creak_pending {
                    self.play_creak(ctx);
                    self.creak_pending = false;
                }
                if *t >= CLOSE_SOUND_AT && !self.close_played {
                    self.play(ctx, &self.sounds.close);
                    self.close_played = true;
                    self.is_open = false;
                }
                if *t >= 1.0 {
                    self.position = self.base_position;
                    // The original hardware played the close clip a second
                    // time when a slide finished; kept as observed behavior.
                    self.play(ctx, &self.sounds.close);
                    return true;
                }
                false
            }
        }
    }
}

impl Interactable for Door {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn on_focus(&mut self, ctx: &mut InteractionCtx<'_>) {
        ctx.hud.show_prompt("Open the door [E]");
    }

    fn on_lose_focus(&mut self, ctx: &mut InteractionCtx<'_>) {
        ctx.hud.clear_prompt();
    }

    fn on_interact(&mut self, ctx: &mut InteractionCtx<'_>) {
        if self.locked {
            self.push(ctx);
        } else {
            self.open_or_close(ctx);
        }
    }

    fn on_alternate_interact(&mut self, ctx: &mut InteractionCtx<'_>) {
        if self.locked {
            self.unlock(ctx);
        } else {
            self.lock(ctx);
        }
    }

    fn tick(&mut self, dt: f32, ctx: &mut InteractionCtx<'_>) {
        // The cooldown always runs to completion; re-triggering mid-cooldown
        // neither resets nor extends it.
        if !self.can_interact {
            self.cooldown -= dt;
            if self.cooldown <= 0.0 {
                self.cooldown = 0.0;
                self.can_interact = true;
            }
        }

        if let Some(mut animation) = self.animation.take() {
            if !self.advance(&mut animation, dt, ctx) {
                self.animation = Some(animation);
            }
        }
    }
}
