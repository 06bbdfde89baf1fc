//! Camera domain: smoothed follow point for the renderer.
//!
//! No camera entity lives here; a renderer reads `CameraFocus` and places its
//! own camera there.

#[cfg(test)]
mod tests;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::SimSet;
use crate::movement::FighterMotion;
use crate::rig::math::smoothing_factor;
use crate::roster::{Fighter, FighterRole};

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Horizontal slack before the camera starts following.
    pub dead_zone: f32,
    pub smoothing: f32,
    /// Height above the followed fighter's root.
    pub look_height: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            dead_zone: 80.0,
            smoothing: 6.0,
            look_height: 60.0,
            min_x: -1200.0,
            max_x: 1200.0,
            min_y: 0.0,
            max_y: 600.0,
        }
    }
}

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraFocus {
    pub position: Vec2,
}

impl CameraFocus {
    /// Move toward `target`, ignoring horizontal motion inside the dead zone.
    pub fn follow(&mut self, target: Vec2, tuning: &CameraTuning, dt: f32) {
        if !target.is_finite() {
            return;
        }
        let dx = target.x - self.position.x;
        let desired_x = if dx.abs() > tuning.dead_zone {
            target.x - tuning.dead_zone * dx.signum()
        } else {
            self.position.x
        };
        let desired = Vec2::new(desired_x, target.y);

        let k = smoothing_factor(tuning.smoothing, dt);
        self.position += (desired - self.position) * k;

        let (min_x, max_x) = (tuning.min_x.min(tuning.max_x), tuning.min_x.max(tuning.max_x));
        let (min_y, max_y) = (tuning.min_y.min(tuning.max_y), tuning.min_y.max(tuning.max_y));
        self.position.x = self.position.x.clamp(min_x, max_x);
        self.position.y = self.position.y.clamp(min_y, max_y);
    }
}

fn update_camera_focus(
    time: Res<Time>,
    tuning: Res<CameraTuning>,
    mut focus: ResMut<CameraFocus>,
    query: Query<(&Fighter, &FighterMotion)>,
) {
    let Some((_, motion)) = query.iter().find(|(fighter, _)| fighter.role == FighterRole::Player) else {
        return;
    };
    let target = motion.position + Vec2::Y * tuning.look_height;
    focus.follow(target, &tuning, time.delta_secs());
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraTuning>()
            .init_resource::<CameraFocus>()
            .add_systems(Update, update_camera_focus.in_set(SimSet::Reactions));
    }
}
