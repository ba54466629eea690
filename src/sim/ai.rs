//! Monster navigation, flocking and combat
//!
//! Each tick a monster picks one navigation target, in priority order:
//! its claimed pickup, the nearest unclaimed pickup, or the last sampled
//! player position. Unarmed and melee monsters chasing the player form the
//! chasing set, which spreads out sideways instead of queueing on the
//! player's path. Armed monsters hold their ground and fight.

use glam::Vec2;

use super::collision::{clamp_to_map, is_touch};
use super::geometry::{distance, facing_toward, normalize, project_onto_line, unit_normal};
use super::projectile::Heading;
use super::state::{
    Claim, GameEvent, GameState, Monster, Pickup, end_run_if_defeated, release_claim,
};
use super::weapon::Weapon;

/// Where a monster is headed this tick
#[derive(Debug, Clone, Copy, PartialEq)]
enum Navigation {
    Pickup(Vec2),
    Player,
}

/// Keep, drop or acquire a pickup claim and report the navigation target
fn navigate(monster: &mut Monster, pickups: &mut [Pickup]) -> Navigation {
    if let Some(claim) = monster.claim {
        let still_there = pickups.iter().any(|p| p.id == claim.pickup_id);
        if still_there && monster.actor.weapon.is_none() {
            return Navigation::Pickup(claim.pos);
        }
        release_claim(pickups, monster);
    }

    if monster.actor.weapon.is_some() {
        return Navigation::Player;
    }

    let pos = monster.actor.pos;
    let nearest = pickups
        .iter_mut()
        .filter(|p| p.claimed_by.is_none())
        .min_by(|a, b| distance(a.pos, pos).total_cmp(&distance(b.pos, pos)));

    match nearest {
        Some(pickup) => {
            pickup.claimed_by = Some(monster.actor.id);
            monster.claim = Some(Claim {
                pickup_id: pickup.id,
                pos: pickup.pos,
            });
            log::debug!("Monster {} claimed pickup {}", monster.actor.id, pickup.id);
            Navigation::Pickup(pickup.pos)
        }
        None => Navigation::Player,
    }
}

/// Sideways correction for one member of the chasing set
///
/// When the group's centroid projects onto the monster-player line beyond
/// the monster (the monster leads the pack), push it along the line's
/// normal so followers do not stack on the same path.
fn flank_correction(monster: Vec2, player: Vec2, centroid: Vec2, magnitude: f32) -> Vec2 {
    let projection = project_onto_line(monster, player, centroid);
    let to_monster = distance(projection, monster);
    let to_player = distance(projection, player);
    let direct = distance(monster, player);
    if to_player > to_monster && to_player > direct {
        unit_normal(monster - projection) * magnitude
    } else {
        Vec2::ZERO
    }
}

/// Steer, move and fight with every monster
pub(super) fn update_monsters(state: &mut GameState) {
    let GameState {
        monsters,
        pickups,
        projectiles,
        player,
        tuning,
        phase,
        events,
        ids,
        clock,
        ..
    } = state;
    let now = *clock;
    let player_pos = player.actor.pos;

    // Navigation: one heading per monster, plus the chasing set
    let mut headings = Vec::with_capacity(monsters.len());
    let mut chasing = Vec::new();
    for (idx, monster) in monsters.iter_mut().enumerate() {
        monster.retarget_ticks += 1;
        if monster.retarget_ticks >= tuning.retarget_interval_ticks {
            monster.target = player_pos;
            monster.retarget_ticks = 0;
        }

        let heading = match navigate(monster, pickups) {
            Navigation::Pickup(pos) => {
                monster.actor.facing = facing_toward(monster.actor.pos, pos);
                normalize(pos - monster.actor.pos)
            }
            Navigation::Player => {
                monster.actor.facing = facing_toward(monster.actor.pos, player_pos);
                if !matches!(monster.actor.weapon, Some(Weapon::Ranged(_))) {
                    chasing.push(idx);
                }
                normalize(monster.target - monster.actor.pos)
            }
        };
        headings.push(heading);
    }

    // Flocking over the chasing set
    if !chasing.is_empty() {
        let centroid = chasing
            .iter()
            .map(|&i| monsters[i].actor.pos)
            .sum::<Vec2>()
            / chasing.len() as f32;

        for &i in &chasing {
            let pos = monsters[i].actor.pos;
            let correction = flank_correction(pos, player_pos, centroid, tuning.flock_correction);
            headings[i] += correction;

            // Separation is measured only; nothing pushes crowded monsters apart yet
            let crowded = chasing
                .iter()
                .filter(|&&j| j != i)
                .filter(|&&j| distance(pos, monsters[j].actor.pos) <= tuning.flock_min_distance)
                .count();
            log::trace!(
                "Monster {} heading ({:.3}, {:.3}), correction ({:.3}, {:.3}), {} crowding",
                monsters[i].actor.id,
                headings[i].x,
                headings[i].y,
                correction.x,
                correction.y,
                crowded
            );
        }
    }

    // Movement and combat
    for (monster, heading) in monsters.iter_mut().zip(headings) {
        let actor = &mut monster.actor;
        match &mut actor.weapon {
            None => actor.pos = clamp_to_map(actor.pos + heading * actor.speed),
            Some(Weapon::Melee(blade)) => {
                let center = blade.swing(actor.pos, actor.mount);
                let landed = is_touch(center, player.actor.center())
                    && player.contact_hit(now, tuning.contact_damage, tuning.hit_cooldown_secs);
                if landed {
                    log::debug!("Monster {} cut the player with {}", actor.id, blade.name);
                    events.push(GameEvent::Hit);
                }
            }
            Some(Weapon::Ranged(gun)) => {
                let aim = normalize(monster.target - actor.pos);
                // A shot with no direction would hover forever
                if aim != Vec2::ZERO && gun.ready(now, tuning.fire_cooldown_secs) {
                    let muzzle = actor.pos + actor.mount;
                    let shot = gun.fire(ids.next_id(), actor.id, muzzle, Heading::Vector(aim), now);
                    projectiles.push(shot);
                    events.push(GameEvent::Shot { owner_id: actor.id });
                }
            }
        }

        // Bodies hurt whatever the monster holds
        let touched = is_touch(player.actor.pos, actor.pos)
            && player.contact_hit(now, tuning.contact_damage, tuning.hit_cooldown_secs);
        if touched {
            log::debug!("Monster {} touched the player", actor.id);
            events.push(GameEvent::Hit);
        }

        if end_run_if_defeated(phase, player, events, now) {
            log::info!("Player overwhelmed (score {})", player.score);
        }
    }
}
