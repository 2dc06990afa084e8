#![warn(missing_docs)]
//! Interactable objects: the focus/interact contract, the door state
//! machine, key pickups, and the world container that owns them.

pub mod door;
pub mod interactable;
pub mod pickup;
pub mod world;

pub use door::{Door, DoorConfig, DoorConfigError, DoorKind, DoorSounds};
pub use interactable::{Interactable, InteractionCtx};
pub use pickup::{Pickup, PickupConfig};
pub use world::World;
