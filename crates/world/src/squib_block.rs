//! The static squib block and its ignition state machine.
//!
//! A placed squib is inert until one of four triggers converts it into a
//! live [`PrimedSquib`]: activation with an igniter tool, ambient power at
//! its position, a burning projectile crossing it, or destruction by an
//! unrelated explosion. Conversion removes the block and spawns the entity
//! in the same operation, so a position is never both at once.

use crate::{EngineWorld, PrimedSquib, SoundCue};
use squib_core::{BlockId, BlockPos, EntityId, ItemStack};

/// Grid id for the squib block. Appended after the host's base block set.
pub const BLOCK_SQUIB: BlockId = 210;

/// Default fuse length in ticks (4 seconds at 20 TPS).
pub const DEFAULT_BASE_FUSE: u32 = 80;

/// Light attenuation of the squib block (it is not a full opaque cube).
pub const SQUIB_LIGHT_OPACITY: u8 = 2;

/// Collision shape, as min/max corners within the unit block footprint.
/// The charge is a half-height box centered on X/Z.
pub const SQUIB_SHAPE_MIN: (f32, f32, f32) = (0.25, 0.0, 0.25);
/// See [`SQUIB_SHAPE_MIN`].
pub const SQUIB_SHAPE_MAX: (f32, f32, f32) = (0.75, 0.5, 0.75);

/// A projectile overlapping the block's space, as reported by the engine's
/// collision pass.
#[derive(Debug, Clone, Copy)]
pub struct ProjectileContact {
    /// Whether the projectile is currently on fire.
    pub burning: bool,
    /// Stable id of whoever shot it, if the engine recorded one.
    pub shooter: Option<EntityId>,
}

/// World events the squib block reacts to, dispatched through a single
/// entry point rather than per-event virtual overrides.
#[derive(Debug)]
pub enum SquibEvent<'a> {
    /// An entity used a held item on the block.
    Activation {
        /// Who activated the block.
        actor: EntityId,
        /// The held item; worn by one unit when it ignites the block.
        tool: &'a mut ItemStack,
    },
    /// Fired on placement and on every neighbor-state change. May fire
    /// redundantly while power is sustained; redundant firings find the
    /// block already converted and fall through.
    AmbientPower,
    /// A projectile entered the block's space.
    EntityCrossing {
        /// The crossing projectile.
        projectile: ProjectileContact,
    },
    /// An explosion destroyed the block. The squib drops no debris;
    /// instead it re-primes with a shortened, randomized fuse.
    ExternalDestruction {
        /// Entity the destroying explosion was attributed to.
        source: Option<EntityId>,
    },
}

/// Outcome of dispatching an event at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquibResponse {
    /// The block converted to a primed squib.
    Ignited,
    /// The event did not apply here; fall through to default handling.
    Pass,
}

/// The squib block type. One value describes every placement; per-position
/// identity lives in the world grid.
#[derive(Debug, Clone, Copy)]
pub struct SquibBlock {
    /// Fuse length, in ticks, for normally ignited squibs.
    pub base_fuse: u32,
}

impl Default for SquibBlock {
    fn default() -> Self {
        Self {
            base_fuse: DEFAULT_BASE_FUSE,
        }
    }
}

impl SquibBlock {
    /// Squib block with a specific base fuse.
    pub fn with_base_fuse(base_fuse: u32) -> Self {
        Self { base_fuse }
    }

    /// Whether this block drops collectible debris when an explosion
    /// destroys it. Squibs never do; they re-prime instead.
    pub fn drops_from_explosion(&self) -> bool {
        false
    }

    /// Dispatch a world event against the squib block at `pos`.
    ///
    /// Stale events (the position no longer holds a squib block) and
    /// events on observer sides return [`SquibResponse::Pass`] without
    /// touching world state.
    pub fn handle<W: EngineWorld>(
        &self,
        world: &mut W,
        pos: BlockPos,
        event: SquibEvent<'_>,
    ) -> SquibResponse {
        if !world.squib_block_at(pos) {
            return SquibResponse::Pass;
        }
        if !world.is_authoritative() {
            return SquibResponse::Pass;
        }

        match event {
            SquibEvent::Activation { actor, tool } => {
                if !tool.kind.ignites_blocks() {
                    return SquibResponse::Pass;
                }
                self.start_fuse(world, pos, Some(actor));
                world.remove_block_at(pos);
                tool.damage(1);
                SquibResponse::Ignited
            }
            SquibEvent::AmbientPower => {
                if world.ambient_power_at(pos) == 0 {
                    return SquibResponse::Pass;
                }
                self.start_fuse(world, pos, None);
                world.remove_block_at(pos);
                SquibResponse::Ignited
            }
            SquibEvent::EntityCrossing { projectile } => {
                if !projectile.burning {
                    return SquibResponse::Pass;
                }
                // The shooter may have left the simulation already.
                let igniter = projectile.shooter.filter(|id| world.entity_exists(*id));
                self.start_fuse(world, pos, igniter);
                world.remove_block_at(pos);
                SquibResponse::Ignited
            }
            SquibEvent::ExternalDestruction { source } => {
                let (x, y, z) = pos.centered();
                let mut squib = PrimedSquib::new(x, y, z, self.base_fuse, source);
                squib.set_fuse(self.chain_fuse(world));
                tracing::debug!(
                    x = pos.x,
                    y = pos.y,
                    z = pos.z,
                    fuse = squib.fuse_ticks(),
                    "squib re-primed by explosion"
                );
                world.remove_block_at(pos);
                world.place_primed_squib(squib);
                SquibResponse::Ignited
            }
        }
    }

    /// Convert the block at `pos` into a live primed squib, attributed to
    /// `igniter` when known.
    fn start_fuse<W: EngineWorld>(&self, world: &mut W, pos: BlockPos, igniter: Option<EntityId>) {
        let (x, y, z) = pos.centered();
        let squib = PrimedSquib::new(x, y, z, self.base_fuse, igniter);
        tracing::debug!(
            x = pos.x,
            y = pos.y,
            z = pos.z,
            fuse = squib.fuse_ticks(),
            igniter = ?igniter,
            "squib fuse lit"
        );
        world.place_primed_squib(squib);
        world.play_sound(SoundCue::SquibPrimed, x, y, z);
    }

    /// Shortened fuse for chain reactions: uniform in
    /// `[base/8, base/8 + base/4)`, always shorter than `base_fuse`.
    pub fn chain_fuse<W: EngineWorld>(&self, world: &mut W) -> u32 {
        let spread = (self.base_fuse / 4).max(1);
        self.base_fuse / 8 + world.next_random(spread)
    }
}
