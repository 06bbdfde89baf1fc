//! Rig domain: angle helpers, basis vectors and mirror-tag resolution.
//!
//! Joint angles use a "0 = up, positive = toward facing" convention. World-space
//! aim angles use the usual math convention (0 = +x, counter-clockwise). Both are
//! in radians unless a name says otherwise.

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;

pub fn deg_to_rad(deg: f32) -> f32 {
    deg * PI / 180.0
}

pub fn rad_to_deg(rad: f32) -> f32 {
    rad * 180.0 / PI
}

/// Wrap an angle into (-PI, PI].
pub fn normalize_rad(angle: f32) -> f32 {
    if !angle.is_finite() {
        return angle;
    }
    let mut wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped -= TAU;
    }
    wrapped
}

/// Wrap an angle into (-180, 180].
pub fn normalize_deg(angle: f32) -> f32 {
    rad_to_deg(normalize_rad(deg_to_rad(angle)))
}

/// Shortest signed rotation taking `from` onto `to`.
pub fn shortest_delta_rad(from: f32, to: f32) -> f32 {
    normalize_rad(to - from)
}

/// Unit direction of a joint angle for the given facing sign (+1 right, -1 left).
pub fn joint_direction(angle: f32, facing_sign: f32) -> Vec2 {
    let (forward, up) = facing_basis(facing_sign);
    forward * angle.sin() + up * angle.cos()
}

/// Forward/up basis for a facing sign. Forward is mirrored, up never is.
pub fn facing_basis(facing_sign: f32) -> (Vec2, Vec2) {
    (Vec2::new(facing_sign.signum(), 0.0), Vec2::Y)
}

/// Left/right side of a mirrored joint pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Side that actually drives a limb once a mirror override is applied.
    pub fn resolve(self, mirrored: bool) -> Self {
        if mirrored { self.opposite() } else { self }
    }
}

const SIDE_PREFIXES: [(&str, &str); 3] = [("left_", "right_"), ("l_", "r_"), ("left", "right")];

/// Split a joint/collider tag into its side and side-less remainder.
///
/// Accepts `left_elbow`, `l_elbow`, `LeftElbow` and friends; returns `None`
/// for tags with no side (`torso`, `weapon`).
pub fn split_side_tag(tag: &str) -> Option<(Side, String)> {
    let lower = tag.to_ascii_lowercase();
    for (left, right) in SIDE_PREFIXES {
        if let Some(rest) = lower.strip_prefix(left) {
            if !rest.is_empty() {
                return Some((Side::Left, rest.trim_start_matches('_').to_string()));
            }
        }
        if let Some(rest) = lower.strip_prefix(right) {
            if !rest.is_empty() {
                return Some((Side::Right, rest.trim_start_matches('_').to_string()));
            }
        }
    }
    None
}

/// Resolve a tag under a mirror override: `left_hand` <-> `right_hand`.
/// Side-less tags are returned lower-cased and otherwise unchanged.
pub fn resolve_mirror_tag(tag: &str, mirrored: bool) -> String {
    match split_side_tag(tag) {
        Some((side, rest)) => {
            let side = side.resolve(mirrored);
            match side {
                Side::Left => format!("left_{rest}"),
                Side::Right => format!("right_{rest}"),
            }
        }
        None => tag.to_ascii_lowercase(),
    }
}

/// Fraction-of-the-way blend factor for exponential smoothing over `dt` seconds.
pub fn smoothing_factor(rate_per_sec: f32, dt: f32) -> f32 {
    if !rate_per_sec.is_finite() || rate_per_sec <= 0.0 {
        return 1.0;
    }
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    1.0 - (-rate_per_sec * dt).exp()
}

/// Cubic ease used for pose transitions.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
