//! Dodge Arena - a top-down arcade survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, AI, weapons, projectiles, combat)
//! - `input`: Key polling seam that feeds one tick of input
//! - `audio`: Sound effect dispatch for simulation events
//! - `settings`: Presentation preferences
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod input;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Map dimensions
    pub const MAP_WIDTH: f32 = 320.0;
    pub const MAP_HEIGHT: f32 = 240.0;

    /// Sprite frame size; also the touch tolerance (half on each axis)
    pub const FRAME_WIDTH: f32 = 32.0;
    pub const FRAME_HEIGHT: f32 = 32.0;

    /// Reserved id of the human-controlled actor
    pub const PLAYER_ID: u32 = 1;
    /// Health every actor starts with
    pub const START_HEALTH: f32 = 100.0;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_wrap_angle() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!((wrap_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-5);
        assert!(wrap_angle(-1e-9) < TAU);
    }
}
