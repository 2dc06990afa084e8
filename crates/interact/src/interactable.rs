//! The interaction capability contract.

use glam::Vec3;
use latchkey_audio::AudioSink;
use latchkey_core::{KeyInventory, ObjectId};
use latchkey_ui::Hud;
use rand::rngs::StdRng;

/// Collaborators threaded through every interactable call.
///
/// The inventory, audio sink and HUD are injected rather than ambient so the
/// whole interaction core runs (and is tested) without a live engine. The
/// RNG drives uniform creak-clip selection and is seeded per run.
pub struct InteractionCtx<'a> {
    /// Shared key inventory.
    pub inventory: &'a mut KeyInventory,
    /// Sound playback destination.
    pub audio: &'a mut dyn AudioSink,
    /// Crosshair/prompt state.
    pub hud: &'a mut Hud,
    /// Deterministic RNG for clip selection.
    pub rng: &'a mut StdRng,
    /// Position of the interacting actor (used for swing direction).
    pub actor_position: Vec3,
}

/// Capability contract for anything the player can target.
///
/// No shared base state; implementors mutate their own state, the inventory,
/// the HUD, and the audio sink. All methods are side-effect only.
pub trait Interactable {
    /// Stable identity used for focus comparison.
    fn id(&self) -> ObjectId;

    /// The player's interaction ray started hitting this object.
    fn on_focus(&mut self, ctx: &mut InteractionCtx<'_>);

    /// The ray moved off this object (or onto another one).
    fn on_lose_focus(&mut self, ctx: &mut InteractionCtx<'_>);

    /// Interact key pressed while focused.
    fn on_interact(&mut self, ctx: &mut InteractionCtx<'_>);

    /// Alternate-interact key pressed while focused.
    fn on_alternate_interact(&mut self, ctx: &mut InteractionCtx<'_>);

    /// Advance time-driven state (animations, cooldowns). Called every tick.
    fn tick(&mut self, _dt: f32, _ctx: &mut InteractionCtx<'_>) {}

    /// Whether the object should be removed from the world after this tick.
    fn expired(&self) -> bool {
        false
    }
}
