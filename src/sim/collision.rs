//! Touch tests and map bounds
//!
//! Everything on the map is a sprite-sized box anchored at its top-left
//! corner. Two points "touch" when they are closer than half a sprite on
//! both axes.

use glam::Vec2;

use crate::consts::*;

/// Half a sprite on each axis
pub const HALF_FRAME: Vec2 = Vec2::new(FRAME_WIDTH / 2.0, FRAME_HEIGHT / 2.0);

/// Axis-aligned overlap test with half-sprite tolerance
#[inline]
pub fn is_touch(a: Vec2, b: Vec2) -> bool {
    (a.x - b.x).abs() < HALF_FRAME.x && (a.y - b.y).abs() < HALF_FRAME.y
}

/// Center of a sprite anchored at `pos`
#[inline]
pub fn sprite_center(pos: Vec2) -> Vec2 {
    pos + HALF_FRAME
}

/// Lowest and highest legal anchor for an actor
pub fn map_bounds() -> (Vec2, Vec2) {
    (
        -HALF_FRAME,
        Vec2::new(MAP_WIDTH, MAP_HEIGHT) - HALF_FRAME,
    )
}

/// Clamp an actor anchor into the map rectangle
#[inline]
pub fn clamp_to_map(pos: Vec2) -> Vec2 {
    let (min, max) = map_bounds();
    pos.clamp(min, max)
}
