//! Core types and definitions for the breacher combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! grid types, enums, constants, stat modifiers, weapon and ability
//! catalogs, damage rules, events, snapshots, and the mission contracts.
//! It has no dependency on the engine or any runtime framework.

pub mod abilities;
pub mod combat;
pub mod constants;
pub mod enums;
pub mod events;
pub mod interact;
pub mod mission;
pub mod modifiers;
pub mod state;
pub mod types;
pub mod weapons;
