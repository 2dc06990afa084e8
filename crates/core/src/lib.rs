#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod inventory;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use inventory::{InventoryError, KeyId, KeyInventory};

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Seconds advanced per tick at 20 TPS.
    pub const SECONDS: f32 = 0.05;

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Stable identity for a world object.
///
/// Focus tracking compares ids rather than references, so a focused object
/// that gets removed from the world simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Helper to derive a reproducible RNG seeded by run + domain salts.
pub fn scoped_rng(run_seed: u64, salt: u64) -> StdRng {
    StdRng::seed_from_u64(run_seed ^ salt)
}
