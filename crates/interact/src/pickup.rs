//! One-shot key pickup.

use glam::Vec3;
use latchkey_core::{KeyId, ObjectId};
use serde::Deserialize;
use tracing::debug;

use crate::interactable::{Interactable, InteractionCtx};

/// Scene-file description of a key pickup.
#[derive(Debug, Clone, Deserialize)]
pub struct PickupConfig {
    /// Inventory slot this pickup grants.
    pub key: KeyId,
    /// World position.
    pub position: Vec3,
}

/// A key lying in the world. Interacting grants the key and removes the
/// object; there is no re-arm, so the grant is exactly-once.
#[derive(Debug)]
pub struct Pickup {
    id: ObjectId,
    key: KeyId,
    position: Vec3,
    taken: bool,
}

impl Pickup {
    /// Create a pickup from its scene description.
    pub fn new(id: ObjectId, config: &PickupConfig) -> Self {
        Self {
            id,
            key: config.key,
            position: config.position,
            taken: false,
        }
    }

    /// World position.
    pub fn position(&self) -> Vec3 {
        self.position
    }
}

impl Interactable for Pickup {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn on_focus(&mut self, ctx: &mut InteractionCtx<'_>) {
        ctx.hud.show_prompt("Pick up the key [E]");
    }

    fn on_lose_focus(&mut self, ctx: &mut InteractionCtx<'_>) {
        ctx.hud.clear_prompt();
    }

    fn on_interact(&mut self, ctx: &mut InteractionCtx<'_>) {
        ctx.inventory.insert(self.key);
        self.taken = true;
        debug!(id = self.id.0, key = self.key.0, "key picked up");
    }

    // Extension point: examine the object before interacting with it.
    fn on_alternate_interact(&mut self, _ctx: &mut InteractionCtx<'_>) {}

    fn expired(&self) -> bool {
        self.taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use latchkey_audio::RecordingSink;
    use latchkey_core::{scoped_rng, KeyInventory};
    use latchkey_ui::Hud;

    struct Fixture {
        inventory: KeyInventory,
        audio: RecordingSink,
        hud: Hud,
        rng: rand::rngs::StdRng,
    }

    impl Fixture {
        fn new(slots: usize) -> Self {
            Self {
                inventory: KeyInventory::new(slots),
                audio: RecordingSink::new(),
                hud: Hud::new(),
                rng: scoped_rng(1, 0),
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

    fn pickup() -> Pickup {
        Pickup::new(
            ObjectId(1),
            &PickupConfig {
                key: KeyId(0),
                position: Vec3::new(1.0, 0.5, 0.0),
            },
        )
    }

    #[test]
    fn grants_key_and_expires() {
        let mut fx = Fixture::new(1);
        let mut pickup = pickup();
        assert!(!pickup.expired());

        pickup.on_interact(&mut fx.ctx());
        assert!(fx.inventory.contains(KeyId(0)));
        assert!(pickup.expired());
    }

    #[test]
    fn focus_toggles_prompt() {
        let mut fx = Fixture::new(1);
        let mut pickup = pickup();

        pickup.on_focus(&mut fx.ctx());
        assert_eq!(fx.hud.prompt(), Some("Pick up the key [E]"));
        assert!(!fx.hud.crosshair_visible());

        pickup.on_lose_focus(&mut fx.ctx());
        assert!(fx.hud.prompt().is_none());
        assert!(fx.hud.crosshair_visible());
    }

    #[test]
    fn alternate_interact_is_a_no_op() {
        let mut fx = Fixture::new(1);
        let mut pickup = pickup();
        pickup.on_alternate_interact(&mut fx.ctx());
        assert!(!pickup.expired());
        assert!(!fx.inventory.contains(KeyId(0)));
        assert!(fx.audio.events().is_empty());
    }
}
