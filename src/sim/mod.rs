//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

mod ai;
pub mod collision;
pub mod geometry;
pub mod projectile;
pub mod snapshot;
mod spawn;
pub mod state;
pub mod tick;
pub mod weapon;

pub use collision::{HALF_FRAME, clamp_to_map, is_touch, sprite_center};
pub use geometry::{Facing, distance, facing_toward, normalize, project_onto_line, unit_normal};
pub use projectile::{Heading, Projectile};
pub use snapshot::Snapshot;
pub use state::{
    Actor, Claim, GameEvent, GamePhase, GameState, Monster, Pickup, Player, release_claim,
};
pub use tick::{TickInput, tick};
pub use weapon::{Ballistics, MeleeWeapon, RangedWeapon, TRAIL_LENGTH, Weapon, WeaponKind};
