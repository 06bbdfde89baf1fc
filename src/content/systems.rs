//! Content domain: startup loading and balance application.

use bevy::prelude::*;

use crate::content::data::BalanceDef;
use crate::content::defaults::builtin_content;
use crate::content::loader::load_all_content;
use crate::content::registry::ContentRegistry;
use crate::content::validation::validate_content;
use crate::core::RunConfig;

/// Load the data directory, falling back to the built-in set when any file
/// fails to load or validate.
pub fn load_or_builtin(config: &RunConfig) -> (ContentRegistry, BalanceDef) {
    let base = &config.data_dir;
    match load_all_content(base) {
        Ok((registry, balance)) => {
            let errors = validate_content(&registry);
            if errors.is_empty() {
                info!("Loaded content from {}", base.display());
                return (registry, balance);
            }
            for error in &errors {
                error!("Content validation: {}", error);
            }
            warn!(
                "{} validation errors in {}; using built-in content",
                errors.len(),
                base.display()
            );
        }
        Err(errors) => {
            for error in &errors {
                warn!("{}", error);
            }
            warn!("Content in {} unavailable; using built-in content", base.display());
        }
    }
    builtin_content()
}

pub(crate) fn load_content(mut commands: Commands, config: Res<RunConfig>) {
    let (registry, balance) = load_or_builtin(&config);
    info!("{}", registry.summary());

    commands.insert_resource(balance.aim);
    commands.insert_resource(balance.colliders);
    commands.insert_resource(balance.hits);
    commands.insert_resource(balance.movement);
    commands.insert_resource(balance.secondary);
    commands.insert_resource(balance.sparring);
    commands.insert_resource(balance.camera);
    commands.insert_resource(registry);
}
