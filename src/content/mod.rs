//! Content domain: data definitions, loading, validation and the registry.

mod data;
mod defaults;
mod loader;
mod registry;
mod systems;
mod validation;


pub use data::{
    AbilityDef, BalanceDef, DataFile, FighterDef, MoveDef, PhaseDef, PoseDef, SequenceStepDef,
    StaminaDef, TriggerKind,
};
pub use defaults::{builtin_content, try_builtin_content};
pub use loader::{ContentFormat, ContentLoadError, load_all_content, parse_str};
pub use registry::ContentRegistry;
pub use systems::load_or_builtin;
pub use validation::{ValidationError, validate_content};

use bevy::prelude::*;

use crate::content::systems::load_content;
use crate::core::StartupSet;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContentRegistry>()
            .add_systems(Startup, load_content.in_set(StartupSet::Content));
    }
}
