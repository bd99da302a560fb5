#![warn(missing_docs)]
//! Deterministic scripted-world harness for squib tests.
//!
//! [`ScriptedWorld`] is a tiny, synchronous stand-in for the host engine:
//! a block grid, a power map, a stable-id entity registry, and a recorded
//! detonation service whose blast destroys every squib block within a
//! fixed radius (terrain damage and falloff are out of scope). Everything
//! is driven from a seed, so a test that replays the same script sees the
//! same detonation schedule.

use rand::Rng;
use serde::Serialize;
use squib_core::{scoped_rng, BlockId, BlockPos, EntityId, SimTick};
use squib_world::{
    DetonationService, EngineWorld, PrimedSquib, SoundCue, SquibBlock, SquibEvent, SquibManager,
    SquibResponse, BLOCK_SQUIB,
};
use std::collections::{HashMap, HashSet};

/// RNG domain for the scripted world's draw stream.
const WORLD_RNG_DOMAIN: u64 = 0x5153_5742; // "QSWB"

/// One recorded call to the detonation service.
#[derive(Debug, Clone, Serialize)]
pub struct DetonationRecord {
    /// Tick the blast happened on.
    pub tick: u64,
    /// Blast center.
    pub x: f64,
    /// Blast center.
    pub y: f64,
    /// Blast center.
    pub z: f64,
    /// Entity the blast was attributed to, if its igniter still existed.
    pub attributed: Option<EntityId>,
}

/// One recorded fire-and-forget sound cue.
#[derive(Debug, Clone)]
pub struct SoundRecord {
    /// Which cue was played.
    pub cue: SoundCue,
    /// Cue position.
    pub x: f64,
    /// Cue position.
    pub y: f64,
    /// Cue position.
    pub z: f64,
}

/// Scripted engine world: block grid + power map + entity registry +
/// recording detonation service.
pub struct ScriptedWorld {
    /// Whether this side may mutate world state.
    pub authoritative: bool,
    /// The squib block type dispatched by this world's blasts.
    pub block: SquibBlock,
    /// How far a blast reaches when destroying squib blocks.
    pub blast_radius: f64,
    /// Live primed squibs.
    pub squibs: SquibManager,
    /// Every detonation the service was asked for, in order.
    pub detonations: Vec<DetonationRecord>,
    /// Every sound cue played, in order.
    pub sounds: Vec<SoundRecord>,
    tick: SimTick,
    blocks: HashMap<BlockPos, BlockId>,
    power: HashMap<BlockPos, u8>,
    entities: HashSet<EntityId>,
    rng: rand::rngs::StdRng,
}

impl ScriptedWorld {
    /// Authoritative world driven by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            authoritative: true,
            block: SquibBlock::default(),
            blast_radius: 2.0,
            squibs: SquibManager::new(),
            detonations: Vec::new(),
            sounds: Vec::new(),
            tick: SimTick::ZERO,
            blocks: HashMap::new(),
            power: HashMap::new(),
            entities: HashSet::new(),
            rng: scoped_rng(seed, WORLD_RNG_DOMAIN, SimTick::ZERO),
        }
    }

    /// Observer (non-authoritative) mirror driven by `seed`.
    pub fn observer(seed: u64) -> Self {
        Self {
            authoritative: false,
            ..Self::new(seed)
        }
    }

    /// Current tick.
    pub fn tick_count(&self) -> SimTick {
        self.tick
    }

    /// Put a squib block at `pos`.
    pub fn place_squib_block(&mut self, pos: BlockPos) {
        self.blocks.insert(pos, BLOCK_SQUIB);
    }

    /// Put an arbitrary block at `pos`.
    pub fn place_block(&mut self, pos: BlockPos, id: BlockId) {
        self.blocks.insert(pos, id);
    }

    /// Block currently at `pos`, if any.
    pub fn block_at(&self, pos: BlockPos) -> Option<BlockId> {
        self.blocks.get(&pos).copied()
    }

    /// Set the ambient power signal at `pos` (0 clears it).
    pub fn set_power(&mut self, pos: BlockPos, level: u8) {
        if level == 0 {
            self.power.remove(&pos);
        } else {
            self.power.insert(pos, level);
        }
    }

    /// Register an entity under a stable id.
    pub fn spawn_entity(&mut self, id: EntityId) {
        self.entities.insert(id);
    }

    /// Remove an entity from the simulation.
    pub fn despawn_entity(&mut self, id: EntityId) {
        self.entities.remove(&id);
    }

    /// Dispatch a world event against the squib block at `pos`.
    pub fn fire_event(&mut self, pos: BlockPos, event: SquibEvent<'_>) -> SquibResponse {
        let block = self.block;
        block.handle(self, pos, event)
    }

    /// Advance the simulation one step: every live fuse burns one tick,
    /// expired squibs detonate, chain spawns join the live set.
    pub fn step(&mut self) {
        // The detonation service spawns chain squibs back into this world,
        // so the manager is taken out for the duration of the tick.
        let mut squibs = std::mem::take(&mut self.squibs);
        squibs.tick(self);
        let spawned = std::mem::take(&mut self.squibs);
        squibs.absorb(spawned);
        self.squibs = squibs;
        self.tick = self.tick.advance(1);
    }

    /// Step until no squib is live, up to `max_ticks`. Returns the number
    /// of steps taken.
    pub fn run_until_quiet(&mut self, max_ticks: u64) -> u64 {
        let mut steps = 0;
        while !self.squibs.is_empty() && steps < max_ticks {
            self.step();
            steps += 1;
        }
        steps
    }
}

impl EngineWorld for ScriptedWorld {
    fn is_authoritative(&self) -> bool {
        self.authoritative
    }

    fn squib_block_at(&self, pos: BlockPos) -> bool {
        self.blocks.get(&pos) == Some(&BLOCK_SQUIB)
    }

    fn remove_block_at(&mut self, pos: BlockPos) {
        self.blocks.remove(&pos);
    }

    fn place_primed_squib(&mut self, squib: PrimedSquib) {
        self.squibs.place(squib);
    }

    fn ambient_power_at(&self, pos: BlockPos) -> u8 {
        self.power.get(&pos).copied().unwrap_or(0)
    }

    fn entity_exists(&self, id: EntityId) -> bool {
        self.entities.contains(&id)
    }

    fn next_random(&mut self, bound: u32) -> u32 {
        self.rng.gen_range(0..bound)
    }

    fn play_sound(&mut self, cue: SoundCue, x: f64, y: f64, z: f64) {
        self.sounds.push(SoundRecord { cue, x, y, z });
    }
}

impl DetonationService for ScriptedWorld {
    fn detonate(&mut self, x: f64, y: f64, z: f64, attributed: Option<EntityId>) {
        self.detonations.push(DetonationRecord {
            tick: self.tick.0,
            x,
            y,
            z,
            attributed,
        });

        // Destroy every squib block in range; each converts itself back
        // into a freshly primed squib with a shortened fuse.
        let mut hit: Vec<BlockPos> = self
            .blocks
            .iter()
            .filter(|(pos, id)| **id == BLOCK_SQUIB && pos.distance_to(x, y, z) <= self.blast_radius)
            .map(|(pos, _)| *pos)
            .collect();
        hit.sort();

        let block = self.block;
        for pos in hit {
            block.handle(self, pos, SquibEvent::ExternalDestruction { source: attributed });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_and_power_scripting_round_trips() {
        let mut world = ScriptedWorld::new(1);
        let pos = BlockPos::new(0, 64, 0);
        world.place_squib_block(pos);
        assert!(world.squib_block_at(pos));

        world.set_power(pos, 15);
        assert_eq!(world.ambient_power_at(pos), 15);
        world.set_power(pos, 0);
        assert_eq!(world.ambient_power_at(pos), 0);
    }

    #[test]
    fn entity_registry_resolves_by_stable_id() {
        let mut world = ScriptedWorld::new(1);
        let id = EntityId(99);
        assert!(!world.entity_exists(id));
        world.spawn_entity(id);
        assert!(world.entity_exists(id));
        world.despawn_entity(id);
        assert!(!world.entity_exists(id));
    }
}
