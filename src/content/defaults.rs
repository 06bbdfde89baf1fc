//! Built-in content set, used when the data directory is missing or invalid.
//!
//! The shipped assets/data/*.ron files are compiled in, so a broken install
//! still plays the same.

use bevy::prelude::*;

use super::data::*;
use super::loader::{ContentFormat, ContentLoadError, parse_str};
use super::registry::ContentRegistry;

const FIGHTERS: &str = include_str!("../../assets/data/fighters.ron");
const POSES: &str = include_str!("../../assets/data/poses.ron");
const MOVES: &str = include_str!("../../assets/data/moves.ron");
const ABILITIES: &str = include_str!("../../assets/data/abilities.ron");
const BALANCE: &str = include_str!("../../assets/data/balance.ron");

fn embedded_items<T>(contents: &str, file: &str) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let data: DataFile<T> = parse_str(contents, ContentFormat::Ron, file)?;
    Ok(data.items)
}

/// Parse the embedded content, reporting every file that fails.
pub fn try_builtin_content() -> Result<(ContentRegistry, BalanceDef), Vec<ContentLoadError>> {
    let mut registry = ContentRegistry::default();
    let mut errors = Vec::new();

    match embedded_items::<FighterDef>(FIGHTERS, "builtin fighters.ron") {
        Ok(items) => items.into_iter().for_each(|def| registry.insert_fighter(def)),
        Err(e) => errors.push(e),
    }
    match embedded_items::<PoseDef>(POSES, "builtin poses.ron") {
        Ok(items) => items.into_iter().for_each(|def| registry.insert_pose(def)),
        Err(e) => errors.push(e),
    }
    match embedded_items::<MoveDef>(MOVES, "builtin moves.ron") {
        Ok(items) => items.into_iter().for_each(|def| registry.insert_move(def)),
        Err(e) => errors.push(e),
    }
    match embedded_items::<AbilityDef>(ABILITIES, "builtin abilities.ron") {
        Ok(items) => items.into_iter().for_each(|def| registry.insert_ability(def)),
        Err(e) => errors.push(e),
    }
    let balance = match parse_str::<BalanceDef>(BALANCE, ContentFormat::Ron, "builtin balance.ron") {
        Ok(balance) => balance,
        Err(e) => {
            errors.push(e);
            BalanceDef::default()
        }
    };

    if errors.is_empty() {
        Ok((registry, balance))
    } else {
        Err(errors)
    }
}

/// The built-in registry and balance. Parse failures are logged and leave an
/// empty registry with default tuning.
pub fn builtin_content() -> (ContentRegistry, BalanceDef) {
    match try_builtin_content() {
        Ok(content) => content,
        Err(errors) => {
            for error in &errors {
                error!("Built-in content: {}", error);
            }
            (ContentRegistry::default(), BalanceDef::default())
        }
    }
}
