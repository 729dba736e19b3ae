//! Simulation engine for BREACHER.
//!
//! Owns the fixed-timestep battle loop, the actor roster, and all
//! gameplay systems. [`engine::CombatState`] is the public entry point:
//! it is built from a [`breacher_core::mission::MissionSpec`], advanced
//! with wall-clock time, driven through its order API, and read back
//! through snapshots, drained events, and the final mission output.

pub mod actor;
pub mod engine;
pub mod objectives;
pub mod output;
pub mod resolver;
pub mod roster;
pub mod setup;
pub mod systems;
pub mod time;

pub use breacher_core as core;
pub use engine::{BattleConfig, CombatState};
pub use setup::SetupError;
