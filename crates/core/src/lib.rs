#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod item;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use item::{ItemKind, ItemStack};

/// Block type identifier in the world grid.
pub type BlockId = u16;

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Integer block coordinates in the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    /// World X coordinate.
    pub x: i32,
    /// World Y coordinate.
    pub y: i32,
    /// World Z coordinate.
    pub z: i32,
}

impl BlockPos {
    /// Construct a block position from its grid coordinates.
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Center of this block's footprint in world space.
    pub fn centered(self) -> (f64, f64, f64) {
        (
            self.x as f64 + 0.5,
            self.y as f64 + 0.5,
            self.z as f64 + 0.5,
        )
    }

    /// Euclidean distance from this block's center to a world-space point.
    pub fn distance_to(self, x: f64, y: f64, z: f64) -> f64 {
        let (cx, cy, cz) = self.centered();
        let (dx, dy, dz) = (cx - x, cy - y, cz - z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Stable entity identity.
///
/// Safe to hold after the entity despawns; resolution through the engine
/// simply fails and callers degrade to "no entity".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Helper to derive a reproducible RNG seeded by world + domain + tick.
pub fn scoped_rng(world_seed: u64, domain_hash: u64, tick: SimTick) -> StdRng {
    let seed = world_seed ^ domain_hash ^ tick.0;
    StdRng::seed_from_u64(seed)
}
