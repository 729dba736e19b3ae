//! Weapon catalog.
//!
//! Weapons are plain data resolved by id at mission setup. Ranges are in
//! tiles, timings in ticks.

use serde::{Deserialize, Serialize};

/// Static parameters of one weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub id: String,
    pub name: String,
    /// Effective range in tiles. Shots beyond it are disallowed.
    pub range: f64,
    /// Raw damage per hit, before armor.
    pub damage: i32,
    /// Base hit chance at point blank, before attacker bonuses.
    pub accuracy: f64,
    /// Magazine capacity in rounds.
    pub magazine: u32,
    /// Ticks between shots.
    pub cooldown_ticks: u32,
    /// Ticks a reload keeps the actor busy.
    pub reload_ticks: u32,
}

fn weapon(
    id: &str,
    name: &str,
    range: f64,
    damage: i32,
    accuracy: f64,
    magazine: u32,
    cooldown_ticks: u32,
    reload_ticks: u32,
) -> WeaponSpec {
    WeaponSpec {
        id: id.to_string(),
        name: name.to_string(),
        range,
        damage,
        accuracy,
        magazine,
        cooldown_ticks,
        reload_ticks,
    }
}

/// All weapons known to the simulation.
pub fn weapon_catalog() -> Vec<WeaponSpec> {
    vec![
        weapon("sidearm", "Sidearm", 8.0, 12, 0.70, 12, 6, 15),
        weapon("smg", "Machine Pistol", 9.0, 8, 0.65, 30, 3, 20),
        weapon("rifle", "Boarding Rifle", 14.0, 18, 0.75, 30, 8, 25),
        weapon("scattergun", "Scattergun", 6.0, 30, 0.80, 6, 10, 30),
        weapon("mg", "Support MG", 12.0, 14, 0.60, 60, 5, 40),
    ]
}

/// Look up a weapon by id.
pub fn weapon_by_id(id: &str) -> Option<WeaponSpec> {
    weapon_catalog().into_iter().find(|w| w.id == id)
}
