use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use brawl_rig::{BrawlPlugin, RunConfig};

fn main() {
    let config = RunConfig::from_env();

    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / 60.0))),
        )
        .add_plugins(LogPlugin {
            filter: "info,brawl_rig=debug".to_string(),
            ..default()
        })
        .insert_resource(config)
        .add_plugins(BrawlPlugin)
        .run();
}
