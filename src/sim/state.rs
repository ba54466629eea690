//! Game state and core simulation types
//!
//! All state the presentation layer reads each frame lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{HALF_FRAME, clamp_to_map, sprite_center};
use super::geometry::Facing;
use super::projectile::Projectile;
use super::weapon::{Weapon, WeaponKind};
use crate::consts::*;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start input
    Title,
    /// Active gameplay
    Playing,
    /// Player defeated, waiting for the restart input
    GameOver,
}

/// Things that happened during a tick, for sound and effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    /// The player took damage
    Hit,
    /// A ranged weapon fired
    Shot { owner_id: u32 },
    MonsterSlain { monster_id: u32 },
    WeaponPickedUp { actor_id: u32, kind: WeaponKind },
    SkillActivated,
    GameOver,
}

/// State shared by the player and monsters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: u32,
    /// Top-left anchor of the sprite
    pub pos: Vec2,
    pub speed: f32,
    pub health: f32,
    pub weapon: Option<Weapon>,
    /// Offset from the anchor to the weapon pivot
    pub mount: Vec2,
    pub facing: Facing,
    /// Clock time of the last contact/melee hit taken
    pub last_hit: f64,
}

impl Actor {
    pub fn new(id: u32, pos: Vec2, speed: f32, now: f64) -> Self {
        Self {
            id,
            pos: clamp_to_map(pos),
            speed,
            health: START_HEALTH,
            weapon: None,
            mount: HALF_FRAME,
            facing: Facing::Right,
            last_hit: now,
        }
    }

    /// Move by `delta`, staying inside the map
    pub fn move_by(&mut self, delta: Vec2) {
        self.pos = clamp_to_map(self.pos + delta);
    }

    pub fn center(&self) -> Vec2 {
        sprite_center(self.pos)
    }

    /// Where projectiles leave this actor
    pub fn muzzle(&self) -> Vec2 {
        self.pos + self.mount
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }

    pub fn weapon_kind(&self) -> Option<WeaponKind> {
        self.weapon.as_ref().map(Weapon::kind)
    }
}

/// The human-controlled actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub actor: Actor,
    pub score: u64,
    /// Invincibility skill currently running
    pub skill_active: bool,
    /// Clock time of the last skill activation
    pub skill_started: Option<f64>,
    /// Ticks since the skill was activated (effect animation)
    pub skill_frame: u32,
    /// Ticks spent in play (walk animation)
    pub walk_frame: u32,
    /// Clock time the run started
    pub started_at: f64,
    /// Clock time the player was defeated
    pub ended_at: Option<f64>,
}

impl Player {
    pub fn new(speed: f32, now: f64) -> Self {
        let pos = Vec2::new(MAP_WIDTH / 2.0, MAP_HEIGHT / 2.0) - HALF_FRAME;
        Self {
            actor: Actor::new(PLAYER_ID, pos, speed, now),
            score: 0,
            skill_active: false,
            skill_started: None,
            skill_frame: 0,
            walk_frame: 0,
            started_at: now,
            ended_at: None,
        }
    }

    pub fn invincible(&self) -> bool {
        self.skill_active
    }

    /// Apply a contact/melee hit unless invincible or still in the hit cooldown
    ///
    /// Returns true when damage was dealt.
    pub fn contact_hit(&mut self, now: f64, damage: f32, cooldown: f64) -> bool {
        if self.invincible() || now - self.actor.last_hit < cooldown {
            return false;
        }
        self.actor.health -= damage;
        self.actor.last_hit = now;
        true
    }
}

/// A monster's reservation of a map pickup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub pickup_id: u32,
    pub pos: Vec2,
}

/// An AI-controlled actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub actor: Actor,
    /// Last sampled player position
    pub target: Vec2,
    /// Ticks since the target was sampled
    pub retarget_ticks: u32,
    pub claim: Option<Claim>,
}

impl Monster {
    pub fn new(id: u32, pos: Vec2, speed: f32, target: Vec2, now: f64) -> Self {
        Self {
            actor: Actor::new(id, pos, speed, now),
            target,
            retarget_ticks: 0,
            claim: None,
        }
    }
}

/// A weapon lying on the map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub weapon: Weapon,
    pub pos: Vec2,
    /// Monster currently pursuing this pickup
    pub claimed_by: Option<u32>,
}

/// Drop whatever claim `monster` holds, on both sides
pub fn release_claim(pickups: &mut [Pickup], monster: &mut Monster) {
    if let Some(claim) = monster.claim.take() {
        if let Some(pickup) = pickups.iter_mut().find(|p| p.id == claim.pickup_id) {
            pickup.claimed_by = None;
        }
        log::debug!("Monster {} released pickup {}", monster.actor.id, claim.pickup_id);
    }
}

/// Move to GameOver once the player is defeated
///
/// Returns true on the tick the run ends.
pub(super) fn end_run_if_defeated(
    phase: &mut GamePhase,
    player: &mut Player,
    events: &mut Vec<GameEvent>,
    now: f64,
) -> bool {
    if !player.actor.is_defeated() || *phase == GamePhase::GameOver {
        return false;
    }
    *phase = GamePhase::GameOver;
    player.ended_at = Some(now);
    events.push(GameEvent::GameOver);
    true
}

/// Monotonic entity id source (the player keeps PLAYER_ID)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdGen {
    next: u32,
}

impl Default for IdGen {
    fn default() -> Self {
        Self { next: PLAYER_ID + 1 }
    }
}

impl IdGen {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Not persisted; a deserialized state restarts the stream
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Seconds accumulated from tick steps
    pub clock: f64,
    pub player: Player,
    /// Live monsters (sorted by id)
    pub monsters: Vec<Monster>,
    /// Weapons on the map (sorted by id)
    pub pickups: Vec<Pickup>,
    /// Projectiles in flight (sorted by id)
    pub projectiles: Vec<Projectile>,
    /// Monsters spawned this run; drives the population cap
    pub monsters_spawned: u32,
    /// Clock time of the last pickup spawn attempt
    pub last_pickup_roll: f64,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    pub ids: IdGen,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new game state with custom tuning, rejecting invalid values
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(tuning.player_speed, 0.0);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Title,
            clock: 0.0,
            player,
            monsters: Vec::new(),
            pickups: Vec::new(),
            projectiles: Vec::new(),
            monsters_spawned: 0,
            last_pickup_roll: 0.0,
            events: Vec::new(),
            ids: IdGen::default(),
        }
    }

    /// Back to the title screen with a fresh player and empty map
    ///
    /// The clock, RNG stream and tuning carry over.
    pub fn restart(&mut self) {
        let now = self.clock;
        self.player = Player::new(self.tuning.player_speed, now);
        self.monsters.clear();
        self.pickups.clear();
        self.projectiles.clear();
        self.monsters_spawned = 0;
        self.last_pickup_roll = now;
        self.ids = IdGen::default();
        self.phase = GamePhase::Title;
        log::info!("Run reset, back to title");
    }

    pub fn next_entity_id(&mut self) -> u32 {
        self.ids.next_id()
    }

    /// Current monster population cap
    pub fn monster_cap(&self) -> usize {
        // Deserialized state bypasses validation
        let divisor = self.tuning.monster_cap_divisor.max(1);
        (self.monsters_spawned / divisor + self.tuning.monster_cap_base) as usize
    }

    /// Seconds survived in the current run
    ///
    /// Frozen at the moment of defeat once the run is over.
    pub fn survival_secs(&self) -> f64 {
        let end = match self.phase {
            GamePhase::Title => return 0.0,
            GamePhase::Playing => self.clock,
            GamePhase::GameOver => self.player.ended_at.unwrap_or(self.clock),
        };
        (end - self.player.started_at).max(0.0)
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn monster(&self, id: u32) -> Option<&Monster> {
        self.monsters.iter().find(|m| m.actor.id == id)
    }

    pub fn pickup(&self, id: u32) -> Option<&Pickup> {
        self.pickups.iter().find(|p| p.id == id)
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.monsters.sort_by_key(|m| m.actor.id);
        self.pickups.sort_by_key(|p| p.id);
        self.projectiles.sort_by_key(|p| p.id);
    }
}
