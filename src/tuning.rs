//! Data-driven game balance
//!
//! Every gameplay number the simulation uses lives here so a run can be
//! rebalanced from JSON without touching code. Missing fields fall back to
//! the shipped defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::weapon::{MeleeWeapon, RangedWeapon, Weapon};

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("weapon catalog must not be empty")]
    EmptyCatalog,
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("`{field}` must be a finite non-negative number, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("`{field}` must be non-zero")]
    Zero { field: &'static str },
}

/// Gameplay balance knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player movement per tick, per pressed axis
    pub player_speed: f32,
    /// Monster movement per tick along the chase direction
    pub monster_speed: f32,
    /// Damage from a monster's body or melee weapon
    pub contact_damage: f32,
    /// Seconds of damage immunity after a contact/melee hit
    pub hit_cooldown_secs: f64,
    /// Seconds between two shots of one ranged weapon
    pub fire_cooldown_secs: f64,
    /// Score spent to activate the invincibility skill
    pub skill_cost: u64,
    pub skill_duration_secs: f64,
    pub skill_cooldown_secs: f64,
    /// Ticks between two samples of the player position by a chasing monster
    pub retarget_interval_ticks: u32,
    /// Seconds between pickup spawn attempts
    pub pickup_interval_secs: f64,
    pub max_pickups: usize,
    /// Monster cap is `spawned / monster_cap_divisor + monster_cap_base`
    pub monster_cap_base: u32,
    pub monster_cap_divisor: u32,
    /// Length of the lateral correction added to a flanking monster's heading
    pub flock_correction: f32,
    /// Pairwise distance under which chasing monsters count as crowded
    pub flock_min_distance: f32,
    /// Weapon prototypes; pickups are clones of a random entry
    pub catalog: Vec<Weapon>,
}

impl Default for Tuning {
    fn default() -> Self {
        use std::f32::consts::PI;
        Self {
            player_speed: 2.0,
            monster_speed: 0.5,
            contact_damage: 25.0,
            hit_cooldown_secs: 1.0,
            fire_cooldown_secs: 1.0,
            skill_cost: 20,
            skill_duration_secs: 3.0,
            skill_cooldown_secs: 5.0,
            retarget_interval_ticks: 60,
            pickup_interval_secs: 5.0,
            max_pickups: 2,
            monster_cap_base: 3,
            monster_cap_divisor: 10,
            flock_correction: 0.5,
            flock_min_distance: 10.0,
            catalog: vec![
                Weapon::Melee(MeleeWeapon::new("sickle", 1.75 * PI / 60.0)),
                Weapon::Melee(MeleeWeapon::new("sword", 2.0 * PI / 60.0)),
                Weapon::Ranged(RangedWeapon::new("ak", 0.5, crate::consts::MAP_WIDTH, 25.0)),
            ],
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning ({} weapons in catalog)", tuning.catalog.len());
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.catalog.is_empty() {
            return Err(TuningError::EmptyCatalog);
        }
        let positive = [
            ("player_speed", f64::from(self.player_speed)),
            ("monster_speed", f64::from(self.monster_speed)),
            ("contact_damage", f64::from(self.contact_damage)),
            ("pickup_interval_secs", self.pickup_interval_secs),
            ("skill_duration_secs", self.skill_duration_secs),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NonPositive { field, value });
            }
        }
        let non_negative = [
            ("hit_cooldown_secs", self.hit_cooldown_secs),
            ("fire_cooldown_secs", self.fire_cooldown_secs),
            ("skill_cooldown_secs", self.skill_cooldown_secs),
            ("flock_correction", f64::from(self.flock_correction)),
            ("flock_min_distance", f64::from(self.flock_min_distance)),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }
        if self.monster_cap_divisor == 0 {
            return Err(TuningError::Zero { field: "monster_cap_divisor" });
        }
        if self.retarget_interval_ticks == 0 {
            return Err(TuningError::Zero { field: "retarget_interval_ticks" });
        }
        for weapon in &self.catalog {
            match weapon {
                Weapon::Ranged(gun) => {
                    let stats = [
                        ("catalog.speed", gun.speed),
                        ("catalog.range", gun.range),
                        ("catalog.damage", gun.damage),
                    ];
                    for (field, value) in stats {
                        if value.is_nan() || value <= 0.0 {
                            let value = f64::from(value);
                            return Err(TuningError::NonPositive { field, value });
                        }
                    }
                }
                Weapon::Melee(blade) => {
                    if !blade.spin.is_finite() || blade.spin < 0.0 {
                        return Err(TuningError::Negative {
                            field: "catalog.spin",
                            value: f64::from(blade.spin),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.catalog.len(), 3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 3.5, "max_pickups": 4 }"#).unwrap();
        assert_eq!(tuning.player_speed, 3.5);
        assert_eq!(tuning.max_pickups, 4);
        assert_eq!(tuning.skill_cost, 20);
        assert_eq!(tuning.catalog.len(), 3);
    }

    #[test]
    fn test_rejects_empty_catalog() {
        let err = Tuning::from_json(r#"{ "catalog": [] }"#).unwrap_err();
        assert!(matches!(err, TuningError::EmptyCatalog));
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "monster_speed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::NonPositive { field: "monster_speed", .. }));

        let err = Tuning::from_json(r#"{ "monster_cap_divisor": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Zero { .. }));

        let err = Tuning::from_json("not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_negative_timers_and_weapon_stats() {
        let err = Tuning::from_json(r#"{ "fire_cooldown_secs": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Negative { field: "fire_cooldown_secs", .. }));

        let err = Tuning::from_json(r#"{ "skill_cooldown_secs": -0.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Negative { field: "skill_cooldown_secs", .. }));

        let json = r#"{ "catalog": [{ "kind": "ranged", "name": "ak", "speed": 0.5, "range": -3.0, "damage": 25.0 }] }"#;
        let err = Tuning::from_json(json).unwrap_err();
        assert!(matches!(err, TuningError::NonPositive { field: "catalog.range", .. }));

        let json = r#"{ "catalog": [{ "kind": "ranged", "name": "ak", "speed": 0.5, "range": 320.0, "damage": 0.0 }] }"#;
        let err = Tuning::from_json(json).unwrap_err();
        assert!(matches!(err, TuningError::NonPositive { field: "catalog.damage", .. }));

        let json = r#"{ "catalog": [{ "kind": "melee", "name": "sword", "spin": -0.1 }] }"#;
        let err = Tuning::from_json(json).unwrap_err();
        assert!(matches!(err, TuningError::Negative { field: "catalog.spin", .. }));
    }

    #[test]
    fn test_catalog_roundtrips_through_json() {
        let json = serde_json::to_string(&Tuning::default()).unwrap();
        let tuning = Tuning::from_json(&json).unwrap();
        assert_eq!(tuning.catalog[2].name(), "ak");
    }
}
