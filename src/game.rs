//! Minimal in-memory engine world backing the headless demo.
//!
//! This is the kind of adapter a host engine would provide: a block grid,
//! a power map, an entity registry, and a blast service that destroys
//! squib blocks within a radius. It exists so the demo can run the module
//! end to end without a real engine.

use crate::config::SimConfig;
use rand::{rngs::StdRng, Rng};
use squib_core::{scoped_rng, BlockId, BlockPos, EntityId, SimTick};
use squib_world::{
    DetonationService, EngineWorld, PrimedSquib, RenderLayer, RenderLayerMap, SoundCue,
    SquibBlock, SquibEvent, SquibManager, BLOCK_SQUIB,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// RNG domain for the demo world's draw stream.
const DEMO_RNG_DOMAIN: u64 = 0x5153_4457; // "QSDW"

/// In-memory engine world for the demo scenario.
pub struct GameWorld {
    block: SquibBlock,
    blast_radius: f64,
    blocks: HashMap<BlockPos, BlockId>,
    power: HashMap<BlockPos, u8>,
    entities: HashSet<EntityId>,
    squibs: SquibManager,
    render_layers: RenderLayerMap,
    rng: StdRng,
    tick: SimTick,
    detonations: u64,
}

impl GameWorld {
    /// Fresh world configured by `cfg`.
    pub fn new(cfg: &SimConfig) -> Self {
        let mut render_layers = RenderLayerMap::new();
        // Client setup: the charge is a sub-block shape with cut-out edges.
        render_layers.register(BLOCK_SQUIB, RenderLayer::Cutout);
        debug!(block = BLOCK_SQUIB, "registered squib render layer");

        Self {
            block: SquibBlock::with_base_fuse(cfg.base_fuse),
            blast_radius: cfg.blast_radius,
            blocks: HashMap::new(),
            power: HashMap::new(),
            entities: HashSet::new(),
            squibs: SquibManager::new(),
            render_layers,
            rng: scoped_rng(cfg.world_seed, DEMO_RNG_DOMAIN, SimTick::ZERO),
            tick: SimTick::ZERO,
            detonations: 0,
        }
    }

    /// Place the scenario's row of charges and power the first one.
    ///
    /// Placement notifies the power handler for every charge, the way a
    /// host engine does on block add; only the powered position ignites.
    pub fn stage_chain_scenario(&mut self, cfg: &SimConfig) {
        let origin = BlockPos::new(0, 64, 0);
        let mut placed = Vec::with_capacity(cfg.charge_count as usize);
        for i in 0..cfg.charge_count as i32 {
            let pos = BlockPos::new(origin.x + i * cfg.charge_spacing, origin.y, origin.z);
            self.blocks.insert(pos, BLOCK_SQUIB);
            placed.push(pos);
        }
        self.power.insert(origin, 15);
        info!(charges = placed.len(), "scenario staged");

        let block = self.block;
        for pos in placed {
            block.handle(self, pos, SquibEvent::AmbientPower);
        }
    }

    /// Advance one simulation step.
    pub fn step(&mut self) {
        // Chain spawns land back in the world while the manager ticks.
        let mut squibs = std::mem::take(&mut self.squibs);
        squibs.tick(self);
        let spawned = std::mem::take(&mut self.squibs);
        squibs.absorb(spawned);
        self.squibs = squibs;
        self.tick = self.tick.advance(1);
    }

    /// Step until every fuse has burned out, up to `max_ticks`.
    pub fn run_until_quiet(&mut self, max_ticks: u64) -> u64 {
        let mut steps = 0;
        while !self.squibs.is_empty() && steps < max_ticks {
            self.step();
            steps += 1;
        }
        steps
    }

    /// Number of blasts the detonation service has run.
    pub fn detonation_count(&self) -> u64 {
        self.detonations
    }

    /// Number of live primed squibs.
    pub fn live_squibs(&self) -> usize {
        self.squibs.len()
    }

    /// Number of squib blocks still in the grid.
    pub fn charges_remaining(&self) -> usize {
        self.blocks.values().filter(|id| **id == BLOCK_SQUIB).count()
    }

    /// Render pass registered for `block`.
    pub fn render_layer_for(&self, block: BlockId) -> RenderLayer {
        self.render_layers.layer_for(block)
    }
}

impl EngineWorld for GameWorld {
    fn is_authoritative(&self) -> bool {
        // The demo runs the single authoritative side.
        true
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
        debug!(?cue, x, y, z, "sound cue");
    }
}

impl DetonationService for GameWorld {
    fn detonate(&mut self, x: f64, y: f64, z: f64, attributed: Option<EntityId>) {
        self.detonations += 1;
        info!(tick = self.tick.0, x, y, z, attributed = ?attributed, "detonation");

        let mut hit: Vec<BlockPos> = self
            .blocks
            .iter()
            .filter(|(pos, id)| {
                **id == BLOCK_SQUIB && pos.distance_to(x, y, z) <= self.blast_radius
            })
            .map(|(pos, _)| *pos)
            .collect();
        hit.sort();

        let block = self.block;
        for pos in hit {
            block.handle(self, pos, SquibEvent::ExternalDestruction { source: attributed });
        }
    }
}
