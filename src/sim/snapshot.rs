//! Read-only view of a tick's result for rendering or debugging

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Facing;
use super::state::{Actor, GamePhase, GameState};
use super::weapon::{Weapon, WeaponKind};

/// What a renderer needs to draw a held or dropped weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponView {
    pub name: String,
    pub kind: WeaponKind,
    /// Blade rotation (melee only)
    pub angle: Option<f32>,
    /// Blade center this tick (melee only, held weapons only)
    pub center: Option<Vec2>,
    /// Recent blade centers, oldest first
    pub trail: Vec<Vec2>,
}

impl WeaponView {
    fn held(weapon: &Weapon, actor: &Actor) -> Self {
        let mut view = Self::dropped(weapon);
        if let Weapon::Melee(blade) = weapon {
            view.center = Some(blade.center(actor.pos, actor.mount));
        }
        view
    }

    fn dropped(weapon: &Weapon) -> Self {
        let (angle, trail) = match weapon {
            Weapon::Melee(blade) => (Some(blade.angle), blade.trail.iter().copied().collect()),
            Weapon::Ranged(_) => (None, Vec::new()),
        };
        Self {
            name: weapon.name().to_string(),
            kind: weapon.kind(),
            angle,
            center: None,
            trail,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    pub id: u32,
    pub pos: Vec2,
    pub health: f32,
    pub facing: Facing,
    /// Sprite rotation for the facing, in radians
    pub rotation: f32,
    pub weapon: Option<WeaponView>,
}

impl From<&Actor> for ActorView {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id,
            pos: actor.pos,
            health: actor.health,
            facing: actor.facing,
            rotation: actor.facing.rotation(),
            weapon: actor.weapon.as_ref().map(|w| WeaponView::held(w, actor)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub actor: ActorView,
    pub score: u64,
    pub invincible: bool,
    pub skill_frame: u32,
    pub walk_frame: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u32,
    pub owner_id: u32,
    pub weapon: String,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupView {
    pub id: u32,
    pub pos: Vec2,
    pub weapon: WeaponView,
    pub claimed_by: Option<u32>,
}

/// Owned copy of everything visible after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub clock: f64,
    pub survival_secs: f64,
    pub player: PlayerView,
    pub monsters: Vec<ActorView>,
    pub projectiles: Vec<ProjectileView>,
    pub pickups: Vec<PickupView>,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        let player = &self.player;
        Snapshot {
            phase: self.phase,
            clock: self.clock,
            survival_secs: self.survival_secs(),
            player: PlayerView {
                actor: ActorView::from(&player.actor),
                score: player.score,
                invincible: player.invincible(),
                skill_frame: player.skill_frame,
                walk_frame: player.walk_frame,
            },
            monsters: self.monsters.iter().map(|m| ActorView::from(&m.actor)).collect(),
            projectiles: self
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id,
                    owner_id: p.owner_id,
                    weapon: p.weapon.clone(),
                    pos: p.pos,
                })
                .collect(),
            pickups: self
                .pickups
                .iter()
                .map(|p| PickupView {
                    id: p.id,
                    pos: p.pos,
                    weapon: WeaponView::dropped(&p.weapon),
                    claimed_by: p.claimed_by,
                })
                .collect(),
        }
    }
}
