//! Monster and pickup spawning
//!
//! Both spawners draw positions from the state's seeded RNG, so a run is
//! reproducible from its seed.

use glam::Vec2;
use rand::Rng;

use super::collision::HALF_FRAME;
use super::state::{GameState, Monster, Pickup};
use crate::consts::*;

/// Uniform anchor inside the map
fn random_position(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        rng.random::<f32>() * (MAP_WIDTH - HALF_FRAME.x),
        rng.random::<f32>() * (MAP_HEIGHT - HALF_FRAME.y),
    )
}

/// Add one monster while the population is under the cap
pub(super) fn spawn_monsters(state: &mut GameState) {
    if state.monsters.len() >= state.monster_cap() {
        return;
    }
    let id = state.next_entity_id();
    let pos = random_position(&mut state.rng);
    let monster = Monster::new(
        id,
        pos,
        state.tuning.monster_speed,
        state.player.actor.pos,
        state.clock,
    );
    state.monsters.push(monster);
    state.monsters_spawned += 1;
    log::debug!(
        "Spawned monster {} at ({:.1}, {:.1}), {}/{} alive",
        id,
        pos.x,
        pos.y,
        state.monsters.len(),
        state.monster_cap()
    );
}

/// Every pickup interval, drop a random catalog weapon if there is room
pub(super) fn spawn_pickups(state: &mut GameState) {
    if state.clock - state.last_pickup_roll <= state.tuning.pickup_interval_secs {
        return;
    }
    state.last_pickup_roll = state.clock;

    if state.pickups.len() >= state.tuning.max_pickups || state.tuning.catalog.is_empty() {
        return;
    }
    let choice = state.rng.random_range(0..state.tuning.catalog.len());
    let weapon = state.tuning.catalog[choice].instantiate();
    let pos = random_position(&mut state.rng);
    let id = state.next_entity_id();
    log::debug!("Pickup {} ({}) dropped at ({:.1}, {:.1})", id, weapon.name(), pos.x, pos.y);
    state.pickups.push(Pickup {
        id,
        weapon,
        pos,
        claimed_by: None,
    });
}
