//! Ability catalog.
//!
//! Abilities are targeted at a tile, detonate after a delay, and apply
//! area damage and/or a named status effect. Ranges and radii are in
//! tiles, timings in ticks.

use serde::{Deserialize, Serialize};

/// Static parameters of one ability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilitySpec {
    pub id: String,
    pub name: String,
    /// Maximum throw distance in tiles. 0 restricts the ability to the
    /// caster's own tile.
    pub range: f64,
    /// Blast radius in tiles.
    pub radius: f64,
    /// Raw blast damage, before armor. 0 for pure-effect abilities.
    pub damage: i32,
    /// Ticks between use and detonation.
    pub delay_ticks: u32,
    /// Per-caster cooldown after use.
    pub cooldown_ticks: u32,
    /// Status effect applied to survivors in the radius, by name.
    /// Unknown names are ignored.
    pub effect: Option<String>,
    /// Duration of the applied effect (ticks).
    pub effect_duration_ticks: u64,
}

/// All abilities known to the simulation.
pub fn ability_catalog() -> Vec<AbilitySpec> {
    vec![
        AbilitySpec {
            id: "frag_grenade".to_string(),
            name: "Frag Grenade".to_string(),
            range: 8.0,
            radius: 2.0,
            damage: 40,
            delay_ticks: 20,
            cooldown_ticks: 150,
            effect: None,
            effect_duration_ticks: 0,
        },
        AbilitySpec {
            id: "flash_charge".to_string(),
            name: "Flash Charge".to_string(),
            range: 7.0,
            radius: 2.5,
            damage: 0,
            delay_ticks: 10,
            cooldown_ticks: 200,
            effect: Some("stunned".to_string()),
            effect_duration_ticks: 30,
        },
        AbilitySpec {
            id: "combat_stim".to_string(),
            name: "Combat Stim".to_string(),
            range: 0.0,
            radius: 0.5,
            damage: 0,
            delay_ticks: 0,
            cooldown_ticks: 300,
            effect: Some("stimmed".to_string()),
            effect_duration_ticks: 100,
        },
    ]
}

/// Look up an ability by id.
pub fn ability_by_id(id: &str) -> Option<AbilitySpec> {
    ability_catalog().into_iter().find(|a| a.id == id)
}
