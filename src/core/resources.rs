//! Core domain: shared resources for run configuration and frame bookkeeping.

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use bevy::prelude::*;
use rand::Rng;

use crate::movement::Facing;
use crate::roster::FighterRole;

pub const SEED_ENV: &str = "BRAWL_SEED";
pub const FRAMES_ENV: &str = "BRAWL_FRAMES";
pub const DATA_ENV: &str = "BRAWL_DATA";

/// Resource tracking if the simulation should be paused.
/// The simulation is paused if any source is active.
#[derive(Resource, Debug, Default)]
pub struct SimPaused {
    pub sources: HashSet<String>,
}

impl SimPaused {
    pub fn is_paused(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn pause(&mut self, source: impl Into<String>) {
        self.sources.insert(source.into());
    }

    pub fn unpause(&mut self, source: impl Into<String>) {
        self.sources.remove(&source.into());
    }
}

/// Run condition: returns true only when the simulation is not paused
pub fn simulation_active(paused: Res<SimPaused>) -> bool {
    !paused.is_paused()
}

/// One fighter placed at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct LineupEntry {
    pub def_id: String,
    pub role: FighterRole,
    pub position: Vec2,
    pub facing: Facing,
}

impl LineupEntry {
    pub fn new(def_id: impl Into<String>, role: FighterRole, position: Vec2, facing: Facing) -> Self {
        Self {
            def_id: def_id.into(),
            role,
            position,
            facing,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct RunConfig {
    pub seed: u64,
    /// Stop the app after this many simulated frames.
    pub max_frames: Option<u64>,
    pub data_dir: PathBuf,
    pub lineup: Vec<LineupEntry>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
            max_frames: None,
            data_dir: PathBuf::from("assets/data"),
            lineup: vec![
                LineupEntry::new("brawler", FighterRole::Player, Vec2::new(-90.0, 0.0), Facing::Right),
                LineupEntry::new("sparring_partner", FighterRole::Npc, Vec2::new(90.0, 0.0), Facing::Left),
            ],
        }
    }
}

impl RunConfig {
    /// Defaults overridden by `BRAWL_SEED`, `BRAWL_FRAMES` and `BRAWL_DATA`.
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(
            env::var(SEED_ENV).ok().as_deref(),
            env::var(FRAMES_ENV).ok().as_deref(),
            env::var(DATA_ENV).ok().as_deref(),
        );
        config
    }

    pub fn apply_overrides(&mut self, seed: Option<&str>, frames: Option<&str>, data: Option<&str>) {
        if let Some(raw) = seed {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.seed = seed,
                Err(e) => warn!("Ignoring {}='{}': {}", SEED_ENV, raw, e),
            }
        }
        if let Some(raw) = frames {
            match raw.trim().parse::<u64>() {
                Ok(0) => self.max_frames = None,
                Ok(frames) => self.max_frames = Some(frames),
                Err(e) => warn!("Ignoring {}='{}': {}", FRAMES_ENV, raw, e),
            }
        }
        if let Some(raw) = data {
            if !raw.trim().is_empty() {
                self.data_dir = PathBuf::from(raw.trim());
            }
        }
    }
}

/// Simulated frames since startup.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimFrame(pub u64);
