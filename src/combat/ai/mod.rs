//! Combat domain: AI system modules for non-player fighters.

pub(crate) mod sparring;

pub use sparring::{SparringBrain, SparringIntent, SparringRng, SparringTuning, think};

pub(crate) use sparring::{drive_sparring_ai, seed_sparring_rng};
