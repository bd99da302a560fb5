//! Capability seams between this module and the host engine.
//!
//! The module never owns the block grid, the live-entity set, or the blast
//! simulation. Everything it needs from the engine is expressed here as a
//! trait the host (or a test harness) implements.

use crate::PrimedSquib;
use squib_core::{BlockPos, EntityId};

/// Sound cues the module asks the engine to play. Fire-and-forget; the
/// module never consults a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Hiss played the moment a squib's fuse is lit.
    SquibPrimed,
}

/// World-state capabilities supplied by the host engine.
///
/// The engine guarantees that a `remove_block_at` / `place_primed_squib`
/// pair issued together is observed by any same-step query as either
/// both-done or neither-done; the simulation is single-threaded per step,
/// so a synchronous implementation satisfies this for free.
pub trait EngineWorld {
    /// Whether this side owns world state. Observer sides mirror the
    /// authoritative side and must never mutate.
    fn is_authoritative(&self) -> bool;

    /// Whether the grid currently holds a squib block at `pos`.
    fn squib_block_at(&self, pos: BlockPos) -> bool;

    /// Clear the grid cell at `pos`.
    fn remove_block_at(&mut self, pos: BlockPos);

    /// Register a primed squib in the live-entity set.
    fn place_primed_squib(&mut self, squib: PrimedSquib);

    /// Strongest power signal reaching `pos` from adjacent sources (0..=15).
    fn ambient_power_at(&self, pos: BlockPos) -> u8;

    /// Whether the entity with this stable id is still in the simulation.
    fn entity_exists(&self, id: EntityId) -> bool;

    /// Uniform random draw in `[0, bound)` from the world's deterministic
    /// RNG. `bound` must be nonzero.
    fn next_random(&mut self, bound: u32) -> u32;

    /// Play a positional sound cue. Presentation only.
    fn play_sound(&mut self, cue: SoundCue, x: f64, y: f64, z: f64);
}

/// Blast simulation supplied by the host engine.
///
/// A conforming implementation runs the blast and, for every squib block it
/// destroys, dispatches [`SquibEvent::ExternalDestruction`] back through
/// [`SquibBlock::handle`] so the block re-primes with a shortened fuse.
///
/// [`SquibEvent::ExternalDestruction`]: crate::SquibEvent::ExternalDestruction
/// [`SquibBlock::handle`]: crate::SquibBlock::handle
pub trait DetonationService {
    /// Detonate at a world-space point, attributing the blast to
    /// `attributed` when the causing entity is still known.
    fn detonate(&mut self, x: f64, y: f64, z: f64, attributed: Option<EntityId>);
}
