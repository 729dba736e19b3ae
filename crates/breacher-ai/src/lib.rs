//! Enemy AI for BREACHER.
//!
//! Implements archetype behavior profiles and the per-tick decision
//! function that turns an enemy's view of the fight into an order.

pub mod fsm;
pub mod profiles;

pub use breacher_core as core;

#[cfg(test)]
mod tests;
