//! Loader for RON (or JSON) content files at startup.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::{Path, PathBuf};

use super::data::*;
use super::registry::ContentRegistry;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Ron,
    Json,
}

impl ContentFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "ron" => Some(ContentFormat::Ron),
            "json" => Some(ContentFormat::Json),
            _ => None,
        }
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a string in the given format.
pub fn parse_str<T>(contents: &str, format: ContentFormat, file: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let parsed = match format {
        ContentFormat::Ron => ron_options().from_str(contents).map_err(|e| e.to_string()),
        ContentFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| ContentLoadError {
        file: file.to_string(),
        message: format!("Parse error: {}", message),
    })
}

/// `<stem>.ron`, else `<stem>.json`, under `base_path`.
fn locate(base_path: &Path, stem: &str) -> Option<PathBuf> {
    ["ron", "json"]
        .into_iter()
        .map(|ext| base_path.join(format!("{stem}.{ext}")))
        .find(|path| path.is_file())
}

fn read_file<T>(base_path: &Path, stem: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let path = locate(base_path, stem).ok_or_else(|| ContentLoadError {
        file: base_path.join(format!("{stem}.ron")).display().to_string(),
        message: "not found (also tried .json)".to_string(),
    })?;
    let file_name = path.display().to_string();
    let format = ContentFormat::from_path(&path).unwrap_or(ContentFormat::Ron);
    let contents = fs::read_to_string(&path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;
    parse_str(&contents, format, &file_name)
}

/// Load a file containing a DataFile<T> wrapper.
fn load_data_file<T>(base_path: &Path, stem: &str) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let data: DataFile<T> = read_file(base_path, stem)?;
    Ok(data.items)
}

/// Load all content from `base_path` into a ContentRegistry.
/// Returns errors for any files that fail to load. A missing balance file is
/// not an error; every tuning value falls back to its default.
pub fn load_all_content(base_path: &Path) -> Result<(ContentRegistry, BalanceDef), Vec<ContentLoadError>> {
    let mut registry = ContentRegistry::default();
    let mut errors = Vec::new();

    // Helper macro to reduce boilerplate
    macro_rules! load_into {
        ($registry_field:expr, $stem:expr, $type:ty, $id_field:ident) => {
            match load_data_file::<$type>(base_path, $stem) {
                Ok(items) => {
                    for item in items {
                        if $registry_field.contains_key(&item.$id_field) {
                            warn!("Duplicate {} id '{}'; last one wins", $stem, item.$id_field);
                        }
                        $registry_field.insert(item.$id_field.clone(), item);
                    }
                }
                Err(e) => errors.push(e),
            }
        };
    }

    load_into!(registry.fighters, "fighters", FighterDef, id);
    load_into!(registry.poses, "poses", PoseDef, id);
    load_into!(registry.moves, "moves", MoveDef, id);
    load_into!(registry.abilities, "abilities", AbilityDef, id);

    let balance = if locate(base_path, "balance").is_some() {
        match read_file::<BalanceDef>(base_path, "balance") {
            Ok(balance) => balance,
            Err(e) => {
                errors.push(e);
                BalanceDef::default()
            }
        }
    } else {
        debug!("No balance file under {}; using defaults", base_path.display());
        BalanceDef::default()
    };

    if errors.is_empty() {
        Ok((registry, balance))
    } else {
        Err(errors)
    }
}
