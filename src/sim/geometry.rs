//! Vector helpers shared by steering, combat and projectiles
//!
//! Every helper here is total: degenerate inputs (zero-length vectors,
//! coincident line endpoints) produce a neutral value instead of NaN/Inf,
//! so nothing non-finite can leak into actor positions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Cardinal facing of an actor, in sprite-sheet order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Right,
    Down,
    Left,
    Up,
}

impl Facing {
    /// Index used by presentation (0=right, 1=down, 2=left, 3=up)
    pub fn index(self) -> usize {
        match self {
            Facing::Right => 0,
            Facing::Down => 1,
            Facing::Left => 2,
            Facing::Up => 3,
        }
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Facing::Right),
            1 => Some(Facing::Down),
            2 => Some(Facing::Left),
            3 => Some(Facing::Up),
            _ => None,
        }
    }

    /// Unit vector in screen space (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Facing::Right => Vec2::X,
            Facing::Down => Vec2::Y,
            Facing::Left => Vec2::NEG_X,
            Facing::Up => Vec2::NEG_Y,
        }
    }

    /// Sprite rotation for held ranged weapons and bullets
    pub fn rotation(self) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self {
            Facing::Right => 0.0,
            Facing::Down => FRAC_PI_2,
            Facing::Left => PI,
            Facing::Up => 3.0 * FRAC_PI_2,
        }
    }
}

/// Unit vector along `v`, or zero for a zero-length input
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Project `point` onto the infinite line through `a` and `b`
///
/// When `a` and `b` coincide the line is undefined and `a` is returned.
pub fn project_onto_line(a: Vec2, b: Vec2, point: Vec2) -> Vec2 {
    let line = b - a;
    let len_sq = line.length_squared();
    if len_sq <= f32::EPSILON {
        return a;
    }
    let t = (point - a).dot(line) / len_sq;
    a + line * t
}

/// Unit normal (perpendicular) of `v`, or zero for a zero-length input
#[inline]
pub fn unit_normal(v: Vec2) -> Vec2 {
    normalize(v).perp()
}

/// Quadrant classification of where `target` lies relative to `current`
///
/// Targets to the left resolve to Left (above) or Down (below); targets to
/// the right resolve to Up (above) or Right (below).
pub fn facing_toward(current: Vec2, target: Vec2) -> Facing {
    if target.x < current.x {
        if target.y < current.y {
            Facing::Left
        } else {
            Facing::Down
        }
    } else if target.y < current.y {
        Facing::Up
    } else {
        Facing::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(normalize(Vec2::ZERO), Vec2::ZERO);
        let n = normalize(Vec2::new(3.0, 4.0));
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_projection_onto_axis() {
        let p = project_onto_line(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(4.0, 7.0));
        assert!((p - Vec2::new(4.0, 0.0)).length() < 1e-5);

        // Vertical line: slope-intercept forms divide by zero here
        let p = project_onto_line(Vec2::new(5.0, 0.0), Vec2::new(5.0, 10.0), Vec2::new(0.0, 3.0));
        assert!((p - Vec2::new(5.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_projection_degenerate_line() {
        let a = Vec2::new(100.0, 100.0);
        let p = project_onto_line(a, a, Vec2::new(0.0, 0.0));
        assert_eq!(p, a);
    }

    #[test]
    fn test_facing_toward_quadrants() {
        let here = Vec2::new(50.0, 50.0);
        assert_eq!(facing_toward(here, Vec2::new(10.0, 10.0)), Facing::Left);
        assert_eq!(facing_toward(here, Vec2::new(10.0, 90.0)), Facing::Down);
        assert_eq!(facing_toward(here, Vec2::new(90.0, 10.0)), Facing::Up);
        assert_eq!(facing_toward(here, Vec2::new(90.0, 90.0)), Facing::Right);
    }

    #[test]
    fn test_facing_index_roundtrip() {
        for idx in 0..4 {
            let facing = Facing::from_index(idx).unwrap();
            assert_eq!(facing.index(), idx);
            assert!((facing.unit().length() - 1.0).abs() < 1e-6);
        }
        assert!(Facing::from_index(4).is_none());
    }

    proptest! {
        #[test]
        fn normalize_never_produces_nan(x in -1e6f32..1e6, y in -1e6f32..1e6) {
            let n = normalize(Vec2::new(x, y));
            prop_assert!(n.is_finite());
            prop_assert!(n.length() <= 1.0 + 1e-4);
        }

        #[test]
        fn projection_is_finite(
            ax in -500f32..500.0, ay in -500f32..500.0,
            bx in -500f32..500.0, by in -500f32..500.0,
            px in -500f32..500.0, py in -500f32..500.0,
        ) {
            let p = project_onto_line(Vec2::new(ax, ay), Vec2::new(bx, by), Vec2::new(px, py));
            prop_assert!(p.is_finite());
        }
    }
}
