//! Data-driven content definitions and loaders.
//!
//! This crate reads the static game content shipped under `data/`:
//! - Game configuration (TOML)
//! - Item catalog (RON)
//! - Enemy templates (RON)
//! - Dialogue scripts (RON)
//! - Scene layouts (RON)
//!
//! Content is consumed by runtime oracles and scenario construction; it never
//! appears in saved game state.

pub mod loaders;

pub use loaders::{
    ConfigLoader, ContentFactory, DialogueLoader, EnemyLoader, ItemLoader, LoadResult,
    Placement, PlacementKind, Scatter, SceneLayout, SceneLoader,
};
