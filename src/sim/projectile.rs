//! Projectiles in flight
//!
//! A projectile's per-tick step is `direction * speed * age`, so the
//! distance covered grows quadratically with age: shots accelerate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::is_touch;
use super::geometry::Facing;
use super::state::{GameEvent, GameState, end_run_if_defeated, release_claim};
use super::weapon::Ballistics;

/// Travel direction chosen at fire time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Heading {
    /// The shooter's facing (player shots)
    Facing(Facing),
    /// An explicit vector (monster shots, aimed along the chase direction)
    Vector(Vec2),
}

impl Heading {
    pub fn direction(self) -> Vec2 {
        match self {
            Heading::Facing(facing) => facing.unit(),
            Heading::Vector(v) => v,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Actor that fired the shot
    pub owner_id: u32,
    /// Name of the firing weapon (bullet sprite lookup)
    pub weapon: String,
    pub ballistics: Ballistics,
    pub origin: Vec2,
    pub pos: Vec2,
    pub heading: Heading,
    /// Ticks in flight
    pub age: u32,
}

impl Projectile {
    pub fn new(
        id: u32,
        owner_id: u32,
        weapon: &str,
        ballistics: Ballistics,
        origin: Vec2,
        heading: Heading,
    ) -> Self {
        Self {
            id,
            owner_id,
            weapon: weapon.to_string(),
            ballistics,
            origin,
            pos: origin,
            heading,
            age: 0,
        }
    }

    /// Age by one tick and step forward
    pub fn advance(&mut self) {
        self.age += 1;
        self.pos += self.heading.direction() * self.ballistics.speed * self.age as f32;
    }

    /// Past the weapon's range on either axis
    pub fn out_of_range(&self) -> bool {
        let travelled = (self.pos - self.origin).abs();
        travelled.x > self.ballistics.range || travelled.y > self.ballistics.range
    }
}

/// Move every projectile, then expire or resolve its first collision
pub(super) fn update_projectiles(state: &mut GameState) {
    let GameState {
        projectiles,
        monsters,
        pickups,
        player,
        phase,
        events,
        clock,
        ..
    } = state;

    projectiles.retain_mut(|shot| {
        shot.advance();

        if shot.out_of_range() {
            return false;
        }

        if let Some(idx) = monsters
            .iter()
            .position(|m| m.actor.id != shot.owner_id && is_touch(shot.pos, m.actor.center()))
        {
            let mut monster = monsters.remove(idx);
            release_claim(pickups, &mut monster);
            if shot.owner_id == player.actor.id {
                player.score += 1;
            }
            log::debug!("Projectile {} slew monster {}", shot.id, monster.actor.id);
            events.push(GameEvent::MonsterSlain {
                monster_id: monster.actor.id,
            });
            return false;
        }

        if shot.owner_id != player.actor.id
            && !player.invincible()
            && is_touch(shot.pos, player.actor.center())
        {
            player.actor.health -= shot.ballistics.damage;
            events.push(GameEvent::Hit);
            if end_run_if_defeated(phase, player, events, *clock) {
                log::info!("Player shot down (score {})", player.score);
            }
            return false;
        }

        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Monster};

    fn ak() -> Ballistics {
        Ballistics {
            speed: 0.5,
            range: 320.0,
            damage: 25.0,
        }
    }

    #[test]
    fn test_step_grows_with_age() {
        let origin = Vec2::new(0.0, 100.0);
        let mut shot = Projectile::new(1, 1, "ak", ak(), origin, Heading::Vector(Vec2::X));
        let mut last_x = origin.x;
        for t in 1..=10u32 {
            shot.advance();
            assert_eq!(shot.age, t);
            let step = shot.pos.x - last_x;
            assert!((step - 0.5 * t as f32).abs() < 1e-4);
            last_x = shot.pos.x;
        }
        assert_eq!(shot.pos.y, 100.0);
    }

    #[test]
    fn test_expires_first_tick_past_range() {
        // Far corner so nothing on the map is touched
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        let origin = Vec2::new(-500.0, -500.0);
        state.projectiles.push(Projectile::new(
            50,
            state.player.actor.id,
            "ak",
            ak(),
            origin,
            Heading::Vector(Vec2::X),
        ));

        let mut ticks = 0u32;
        while !state.projectiles.is_empty() {
            let before = state.projectiles[0].pos;
            assert!((before.x - origin.x).abs() <= 320.0);
            update_projectiles(&mut state);
            ticks += 1;
        }
        // Covered distance is 0.5 * t(t+1)/2; first exceeds 320 at t = 36
        assert_eq!(ticks, 36);
    }

    #[test]
    fn test_facing_heading() {
        let mut shot = Projectile::new(1, 1, "ak", ak(), Vec2::ZERO, Heading::Facing(Facing::Up));
        shot.advance();
        assert_eq!(shot.pos, Vec2::new(0.0, -0.5));
    }

    #[test]
    fn test_player_shot_kills_monster_and_scores() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        let monster_pos = Vec2::new(200.0, 100.0);
        state
            .monsters
            .push(Monster::new(10, monster_pos, 0.5, Vec2::ZERO, 0.0));
        // Lands on the monster center after one step of 0.5
        let origin = monster_pos + Vec2::new(16.0, 16.0) - Vec2::new(0.5, 0.0);
        state.projectiles.push(Projectile::new(
            11,
            state.player.actor.id,
            "ak",
            ak(),
            origin,
            Heading::Vector(Vec2::X),
        ));

        update_projectiles(&mut state);
        assert!(state.monsters.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player.score, 1);
    }

    #[test]
    fn test_shot_ignores_its_owner() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        let monster_pos = Vec2::new(200.0, 100.0);
        state
            .monsters
            .push(Monster::new(10, monster_pos, 0.5, Vec2::ZERO, 0.0));
        state.projectiles.push(Projectile::new(
            11,
            10,
            "ak",
            ak(),
            monster_pos + Vec2::new(16.0, 16.0),
            Heading::Vector(Vec2::new(0.0, 1.0)),
        ));

        update_projectiles(&mut state);
        assert_eq!(state.monsters.len(), 1);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_monster_shot_hurts_player() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        let target = state.player.actor.center();
        state.projectiles.push(Projectile::new(
            11,
            10,
            "ak",
            ak(),
            target - Vec2::new(0.5, 0.0),
            Heading::Vector(Vec2::X),
        ));

        update_projectiles(&mut state);
        assert_eq!(state.player.actor.health, 75.0);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_monster_shot_blocked_by_invincibility() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        state.player.skill_active = true;
        let target = state.player.actor.center();
        state.projectiles.push(Projectile::new(
            11,
            10,
            "ak",
            ak(),
            target - Vec2::new(0.5, 0.0),
            Heading::Vector(Vec2::X),
        ));

        update_projectiles(&mut state);
        assert_eq!(state.player.actor.health, 100.0);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_lethal_shot_ends_run() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        state.clock = 9.0;
        state.player.actor.health = 25.0;
        let target = state.player.actor.center();
        state.projectiles.push(Projectile::new(
            11,
            10,
            "ak",
            ak(),
            target - Vec2::new(0.5, 0.0),
            Heading::Vector(Vec2::X),
        ));

        update_projectiles(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver));
        assert_eq!(state.player.ended_at, Some(9.0));
    }
}
