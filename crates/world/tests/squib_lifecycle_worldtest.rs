//! End-to-end lifecycle tests for the squib ignition/fuse/detonation
//! state machine, driven through the scripted engine harness.

use squib_core::{BlockPos, EntityId, ItemKind, ItemStack};
use squib_testkit::ScriptedWorld;
use squib_world::{ProjectileContact, SquibBlock, SquibEvent, SquibResponse};

const POS: BlockPos = BlockPos { x: 3, y: 64, z: -2 };

fn world_with_squib(base_fuse: u32) -> ScriptedWorld {
    let mut world = ScriptedWorld::new(0xC0FFEE);
    world.block = SquibBlock::with_base_fuse(base_fuse);
    world.place_squib_block(POS);
    world
}

#[test]
fn tool_activation_converts_block_to_exactly_one_primed_squib() {
    let mut world = world_with_squib(80);
    let actor = EntityId(7);
    world.spawn_entity(actor);
    let mut striker = ItemStack::new(ItemKind::FireStriker, 1);

    let response = world.fire_event(POS, SquibEvent::Activation { actor, tool: &mut striker });

    assert_eq!(response, SquibResponse::Ignited);
    assert!(world.block_at(POS).is_none());
    assert_eq!(world.squibs.len(), 1);
    assert_eq!(striker.damage, 1);

    let squib = world.squibs.iter().next().unwrap();
    assert_eq!(squib.igniter, Some(actor));
    assert_eq!((squib.x, squib.y, squib.z), POS.centered());
}

#[test]
fn non_igniter_tool_falls_through_without_mutation() {
    let mut world = world_with_squib(80);
    let mut shovel = ItemStack::new(ItemKind::Misc, 1);

    let response = world.fire_event(
        POS,
        SquibEvent::Activation { actor: EntityId(7), tool: &mut shovel },
    );

    assert_eq!(response, SquibResponse::Pass);
    assert!(world.block_at(POS).is_some());
    assert!(world.squibs.is_empty());
    assert_eq!(shovel.damage, 0);
}

#[test]
fn ambient_power_ignites_and_redundant_firings_are_noops() {
    let mut world = world_with_squib(80);
    world.set_power(POS, 5);

    assert_eq!(world.fire_event(POS, SquibEvent::AmbientPower), SquibResponse::Ignited);
    assert!(world.block_at(POS).is_none());
    assert_eq!(world.squibs.len(), 1);

    // Power is still present and the engine may notify again; the grid no
    // longer holds a squib here, so nothing further happens.
    assert_eq!(world.fire_event(POS, SquibEvent::AmbientPower), SquibResponse::Pass);
    assert_eq!(world.squibs.len(), 1);
}

#[test]
fn unpowered_neighbor_change_leaves_the_block_alone() {
    let mut world = world_with_squib(80);

    assert_eq!(world.fire_event(POS, SquibEvent::AmbientPower), SquibResponse::Pass);
    assert!(world.block_at(POS).is_some());
    assert!(world.squibs.is_empty());
}

#[test]
fn burning_projectile_ignites_and_attributes_its_shooter() {
    let mut world = world_with_squib(80);
    let shooter = EntityId(11);
    world.spawn_entity(shooter);

    let response = world.fire_event(
        POS,
        SquibEvent::EntityCrossing {
            projectile: ProjectileContact { burning: true, shooter: Some(shooter) },
        },
    );

    assert_eq!(response, SquibResponse::Ignited);
    assert_eq!(world.squibs.iter().next().unwrap().igniter, Some(shooter));
}

#[test]
fn cold_projectile_is_ignored() {
    let mut world = world_with_squib(80);

    let response = world.fire_event(
        POS,
        SquibEvent::EntityCrossing {
            projectile: ProjectileContact { burning: false, shooter: Some(EntityId(11)) },
        },
    );

    assert_eq!(response, SquibResponse::Pass);
    assert!(world.block_at(POS).is_some());
}

#[test]
fn departed_shooter_degrades_to_unattributed_ignition() {
    let mut world = world_with_squib(80);

    // Shooter id was recorded on the projectile but the entity is gone.
    let response = world.fire_event(
        POS,
        SquibEvent::EntityCrossing {
            projectile: ProjectileContact { burning: true, shooter: Some(EntityId(404)) },
        },
    );

    assert_eq!(response, SquibResponse::Ignited);
    assert_eq!(world.squibs.iter().next().unwrap().igniter, None);
}

#[test]
fn fuse_is_strictly_decreasing_and_detonates_exactly_once() {
    let mut world = world_with_squib(32);
    world.set_power(POS, 1);
    world.fire_event(POS, SquibEvent::AmbientPower);

    let mut last = world.squibs.iter().next().unwrap().fuse_ticks();
    for _ in 0..31 {
        world.step();
        let now = world.squibs.iter().next().unwrap().fuse_ticks();
        assert!(now < last, "fuse must strictly decrease ({now} !< {last})");
        last = now;
    }
    assert!(world.detonations.is_empty());

    world.step();
    assert_eq!(world.detonations.len(), 1);
    assert!(world.squibs.is_empty());

    // Nothing left to detonate on later steps.
    world.step();
    assert_eq!(world.detonations.len(), 1);
}

#[test]
fn power_ignition_end_to_end_detonates_unattributed_at_the_block_center() {
    let mut world = world_with_squib(32);
    world.set_power(POS, 15);
    world.fire_event(POS, SquibEvent::AmbientPower);

    let steps = world.run_until_quiet(64);

    assert_eq!(steps, 32);
    assert_eq!(world.detonations.len(), 1);
    let det = &world.detonations[0];
    assert_eq!((det.x, det.y, det.z), POS.centered());
    assert_eq!(det.attributed, None);
    assert!(world.squibs.is_empty());
}

#[test]
fn igniter_leaving_mid_fuse_still_detonates_unattributed() {
    let mut world = world_with_squib(32);
    let actor = EntityId(7);
    world.spawn_entity(actor);
    let mut striker = ItemStack::new(ItemKind::FireStriker, 1);
    world.fire_event(POS, SquibEvent::Activation { actor, tool: &mut striker });

    for _ in 0..10 {
        world.step();
    }
    world.despawn_entity(actor);
    world.run_until_quiet(64);

    assert_eq!(world.detonations.len(), 1);
    assert_eq!(world.detonations[0].attributed, None);
}

#[test]
fn external_destruction_reprimes_with_shortened_attributed_fuse() {
    let mut world = world_with_squib(32);
    let source = EntityId(21);
    world.spawn_entity(source);

    // An unrelated blast right next to the block, attributed to `source`.
    let (x, y, z) = BlockPos::new(POS.x + 1, POS.y, POS.z).centered();
    squib_world::DetonationService::detonate(&mut world, x, y, z, Some(source));

    assert!(world.block_at(POS).is_none());
    assert_eq!(world.squibs.len(), 1);
    let squib = world.squibs.iter().next().unwrap();
    assert_eq!(squib.igniter, Some(source));
    // base 32 -> fuse in [4, 12)
    assert!((4..12).contains(&squib.fuse_ticks()), "fuse {} out of range", squib.fuse_ticks());

    world.run_until_quiet(64);
    assert_eq!(world.detonations.len(), 2);
    assert_eq!(world.detonations[1].attributed, Some(source));
}

#[test]
fn chain_reaction_consumes_an_adjacent_squib() {
    let mut world = world_with_squib(32);
    let neighbor = BlockPos::new(POS.x + 1, POS.y, POS.z);
    world.place_squib_block(neighbor);

    world.set_power(POS, 3);
    world.fire_event(POS, SquibEvent::AmbientPower);
    world.run_until_quiet(128);

    assert_eq!(world.detonations.len(), 2);
    assert!(world.block_at(neighbor).is_none());
    assert!(world.squibs.is_empty());

    // The chained blast happens strictly sooner than a fresh base fuse.
    let gap = world.detonations[1].tick - world.detonations[0].tick;
    assert!((4..12).contains(&gap), "chain gap {gap} out of range");
}

#[test]
fn ignition_plays_the_primed_cue_but_chain_repriming_does_not() {
    let mut world = world_with_squib(32);
    let neighbor = BlockPos::new(POS.x + 1, POS.y, POS.z);
    world.place_squib_block(neighbor);

    world.set_power(POS, 3);
    world.fire_event(POS, SquibEvent::AmbientPower);
    assert_eq!(world.sounds.len(), 1);

    world.run_until_quiet(128);
    assert_eq!(world.detonations.len(), 2);
    assert_eq!(world.sounds.len(), 1);
}

#[test]
fn observer_side_never_mutates_world_state() {
    let mut world = ScriptedWorld::observer(0xC0FFEE);
    world.block = SquibBlock::with_base_fuse(32);
    world.place_squib_block(POS);
    world.set_power(POS, 15);
    let mut striker = ItemStack::new(ItemKind::FireStriker, 1);

    assert_eq!(world.fire_event(POS, SquibEvent::AmbientPower), SquibResponse::Pass);
    assert_eq!(
        world.fire_event(POS, SquibEvent::Activation { actor: EntityId(7), tool: &mut striker }),
        SquibResponse::Pass
    );
    assert_eq!(
        world.fire_event(POS, SquibEvent::ExternalDestruction { source: None }),
        SquibResponse::Pass
    );

    assert!(world.block_at(POS).is_some());
    assert!(world.squibs.is_empty());
    assert!(world.sounds.is_empty());
    assert_eq!(striker.damage, 0);
}

#[test]
fn observer_mirrors_count_down_without_dispatching_detonations() {
    let mut world = ScriptedWorld::observer(0xC0FFEE);
    // Mirror of a primed squib replicated from the authoritative side.
    world.squibs.place(squib_world::PrimedSquib::new(0.5, 64.5, 0.5, 5, None));

    world.run_until_quiet(16);

    assert!(world.squibs.is_empty());
    assert!(world.detonations.is_empty());
}
