//! Gameplay systems, run in a fixed order each tick by the engine.
//!
//! Each system is a free function over the state it needs. The order
//! they run in is part of the rules: perception sees last tick's
//! gunfire, attacks resolve before movement commits, and fog updates
//! from final positions. See [`crate::engine::CombatState`].

pub mod abilities;
pub mod attack;
pub mod damage;
pub mod enemy_ai;
pub mod interaction;
pub mod movement;
pub mod overwatch;
pub mod pacing;
pub mod perception;
pub mod suppression;
pub mod upkeep;
pub mod visibility;
