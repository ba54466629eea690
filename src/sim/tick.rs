//! Per-tick update
//!
//! Runs the phase machine (Title -> Playing -> GameOver -> Title) and, while
//! playing, one full simulation step in a fixed order: player input, skill,
//! shooting, projectiles, spawning, pickups, player melee, monsters.

use glam::Vec2;

use super::ai::update_monsters;
use super::collision::is_touch;
use super::geometry::Facing;
use super::projectile::{Heading, update_projectiles};
use super::spawn::{spawn_monsters, spawn_pickups};
use super::state::{GameEvent, GamePhase, GameState, release_claim};
use super::weapon::Weapon;

/// Input commands for a single tick
///
/// Movement flags are "held" states; `fire`, `skill` and `start` are
/// edge-triggered and should be true only on the tick the key went down.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub skill: bool,
    /// Start from the title screen / restart after game over
    pub start: bool,
}

/// Advance the game state by one step of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.clock += f64::from(dt);

    match state.phase {
        GamePhase::Title => {
            if input.start {
                state.phase = GamePhase::Playing;
                state.player.started_at = state.clock;
                state.events.push(GameEvent::RunStarted);
                log::info!("Run started (seed {})", state.seed);
            }
        }
        GamePhase::Playing => play(state, input),
        GamePhase::GameOver => {
            if input.start {
                state.restart();
            }
        }
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

fn play(state: &mut GameState, input: &TickInput) {
    state.player.walk_frame += 1;

    move_player(state, input);
    update_skill(state, input);

    if input.fire {
        fire_player_weapon(state);
    }

    update_projectiles(state);
    spawn_monsters(state);
    spawn_pickups(state);
    resolve_pickups(state);
    swing_player_weapon(state);
    update_monsters(state);
}

/// One step per pressed key; vertical keys win the facing
fn move_player(state: &mut GameState, input: &TickInput) {
    let actor = &mut state.player.actor;
    let step = actor.speed;
    let moves = [
        (input.left, Vec2::new(-step, 0.0), Facing::Left),
        (input.right, Vec2::new(step, 0.0), Facing::Right),
        (input.up, Vec2::new(0.0, -step), Facing::Up),
        (input.down, Vec2::new(0.0, step), Facing::Down),
    ];
    for (pressed, delta, facing) in moves {
        if pressed {
            actor.move_by(delta);
            actor.facing = facing;
        }
    }
}

fn update_skill(state: &mut GameState, input: &TickInput) {
    let now = state.clock;
    let tuning = &state.tuning;
    let player = &mut state.player;

    let cooled_down = player
        .skill_started
        .is_none_or(|started| now - started >= tuning.skill_cooldown_secs);
    if input.skill && cooled_down && player.score >= tuning.skill_cost {
        player.score -= tuning.skill_cost;
        player.skill_active = true;
        player.skill_started = Some(now);
        player.skill_frame = 0;
        state.events.push(GameEvent::SkillActivated);
        log::debug!("Skill activated, score now {}", player.score);
    }

    if player.skill_active {
        let expired = player
            .skill_started
            .is_none_or(|started| now - started > tuning.skill_duration_secs);
        if expired {
            player.skill_active = false;
            log::debug!("Skill expired");
        } else {
            player.skill_frame += 1;
        }
    }
}

fn fire_player_weapon(state: &mut GameState) {
    let GameState {
        player,
        projectiles,
        ids,
        events,
        tuning,
        clock,
        ..
    } = state;
    let actor = &mut player.actor;
    let heading = Heading::Facing(actor.facing);
    let muzzle = actor.pos + actor.mount;
    if let Some(Weapon::Ranged(gun)) = &mut actor.weapon {
        if gun.ready(*clock, tuning.fire_cooldown_secs) {
            projectiles.push(gun.fire(ids.next_id(), actor.id, muzzle, heading, *clock));
            events.push(GameEvent::Shot { owner_id: actor.id });
        }
    }
}

/// Hand each touched pickup to the player, else to the first monster on it
fn resolve_pickups(state: &mut GameState) {
    let GameState {
        pickups,
        player,
        monsters,
        events,
        ..
    } = state;

    let mut remaining = Vec::with_capacity(pickups.len());
    for pickup in std::mem::take(pickups) {
        let taker = if is_touch(player.actor.pos, pickup.pos) {
            Some(&mut player.actor)
        } else {
            monsters
                .iter_mut()
                .map(|m| &mut m.actor)
                .find(|a| is_touch(a.pos, pickup.pos))
        };

        match taker {
            Some(actor) => {
                log::debug!("Actor {} picked up {}", actor.id, pickup.weapon.name());
                events.push(GameEvent::WeaponPickedUp {
                    actor_id: actor.id,
                    kind: pickup.weapon.kind(),
                });
                actor.weapon = Some(pickup.weapon);
            }
            None => remaining.push(pickup),
        }
    }
    *pickups = remaining;
}

/// Spin the player's melee weapon and cut down every monster it touches
fn swing_player_weapon(state: &mut GameState) {
    let GameState {
        player,
        monsters,
        pickups,
        events,
        ..
    } = state;
    let actor = &mut player.actor;
    let Some(Weapon::Melee(blade)) = &mut actor.weapon else {
        return;
    };
    let center = blade.swing(actor.pos, actor.mount);

    let mut slain = Vec::new();
    monsters.retain_mut(|monster| {
        if is_touch(center, monster.actor.center()) {
            release_claim(pickups, monster);
            slain.push(monster.actor.id);
            false
        } else {
            true
        }
    });

    for monster_id in slain {
        player.score += 1;
        events.push(GameEvent::MonsterSlain { monster_id });
        log::debug!("Player cut down monster {}", monster_id);
    }
}
