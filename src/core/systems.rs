//! Core domain: end-of-frame bookkeeping.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::core::input::FighterInput;
use crate::core::resources::{RunConfig, SimFrame};

pub(crate) fn clear_one_shot_inputs(mut query: Query<&mut FighterInput>) {
    for mut input in &mut query {
        input.clear_one_shots();
    }
}

pub(crate) fn advance_frame_counter(
    config: Res<RunConfig>,
    mut frame: ResMut<SimFrame>,
    mut exit: MessageWriter<AppExit>,
) {
    frame.0 += 1;
    if let Some(limit) = config.max_frames {
        if frame.0 == limit {
            info!("Reached frame limit {}; exiting", limit);
            exit.write(AppExit::Success);
        }
    }
}
