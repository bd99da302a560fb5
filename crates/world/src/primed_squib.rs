//! The live fuse entity and the manager that ticks it.
//!
//! A primed squib is created the instant ignition occurs and always
//! eventually detonates; there is no way to extinguish it. It counts down
//! once per simulation step and, on expiry, asks the engine's detonation
//! service for a blast attributed to whoever lit it, then leaves the
//! live-entity set.

use crate::{DetonationService, EngineWorld};
use serde::{Deserialize, Serialize};
use squib_core::EntityId;

/// A squib with a lit fuse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimedSquib {
    /// World X of the charge center. Fixed at creation.
    pub x: f64,
    /// World Y of the charge center. Fixed at creation.
    pub y: f64,
    /// World Z of the charge center. Fixed at creation.
    pub z: f64,
    /// Stable id of the entity that lit the fuse, if known. Re-resolved at
    /// detonation time; a departed igniter degrades to unattributed.
    pub igniter: Option<EntityId>,
    fuse_ticks: u32,
    /// Latch: once the fuse has ticked, it can no longer be re-cut.
    has_ticked: bool,
}

impl PrimedSquib {
    /// Create a primed squib at a world-space point.
    pub fn new(x: f64, y: f64, z: f64, fuse_ticks: u32, igniter: Option<EntityId>) -> Self {
        Self {
            x,
            y,
            z,
            igniter,
            fuse_ticks,
            has_ticked: false,
        }
    }

    /// Remaining fuse, in ticks.
    pub fn fuse_ticks(&self) -> u32 {
        self.fuse_ticks
    }

    /// Re-cut the fuse. Only valid before the first tick; the chain
    /// reaction path uses this to shorten freshly re-primed squibs.
    ///
    /// # Panics
    /// Panics if the squib has already ticked. That is a programming
    /// error, not a recoverable condition.
    pub fn set_fuse(&mut self, ticks: u32) {
        assert!(
            !self.has_ticked,
            "fuse can only be re-cut before the first tick"
        );
        self.fuse_ticks = ticks;
    }

    /// Burn one tick of fuse.
    ///
    /// Returns `true` when the fuse has run out and the squib must
    /// detonate this step.
    pub fn tick(&mut self) -> bool {
        self.has_ticked = true;
        self.fuse_ticks = self.fuse_ticks.saturating_sub(1);
        self.fuse_ticks == 0
    }
}

/// Live-entity set for primed squibs, advanced once per simulation step.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SquibManager {
    squibs: Vec<PrimedSquib>,
}

impl SquibManager {
    /// Empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a squib to the live set.
    pub fn place(&mut self, squib: PrimedSquib) {
        self.squibs.push(squib);
    }

    /// Move every squib out of `other` into this set, preserving order.
    pub fn absorb(&mut self, other: SquibManager) {
        self.squibs.extend(other.squibs);
    }

    /// Number of live squibs.
    pub fn len(&self) -> usize {
        self.squibs.len()
    }

    /// Whether no squibs are live.
    pub fn is_empty(&self) -> bool {
        self.squibs.is_empty()
    }

    /// Iterate over live squibs in tick order.
    pub fn iter(&self) -> impl Iterator<Item = &PrimedSquib> {
        self.squibs.iter()
    }

    /// Advance every fuse by one step.
    ///
    /// Expired squibs detonate and leave the set within this call; the
    /// igniter is resolved by stable id at this moment, so a departed
    /// igniter yields an unattributed blast. Observer sides count down and
    /// drop expired squibs to mirror the authoritative side, but never
    /// dispatch a detonation.
    ///
    /// The detonation service may spawn fresh squibs back into the world
    /// while this runs; callers that own both the world and this manager
    /// should take the manager out of the world for the duration of the
    /// call and absorb new spawns afterwards.
    pub fn tick<W>(&mut self, world: &mut W)
    where
        W: EngineWorld + DetonationService,
    {
        self.squibs.retain_mut(|squib| {
            if !squib.tick() {
                return true;
            }
            if world.is_authoritative() {
                let attributed = squib.igniter.filter(|id| world.entity_exists(*id));
                tracing::debug!(
                    x = squib.x,
                    y = squib.y,
                    z = squib.z,
                    attributed = ?attributed,
                    "squib detonating"
                );
                world.detonate(squib.x, squib.y, squib.z, attributed);
            }
            false
        });
    }
}
