//! Archetype-specific behavioral profiles.
//!
//! Consolidates per-archetype parameters for enemy spawning and the
//! decision FSM.

use breacher_core::enums::EnemyArchetype;
use breacher_core::types::Rgb;

/// Behavioral profile for an enemy archetype.
pub struct ArchetypeProfile {
    /// Starting and maximum hit points.
    pub max_hp: i32,
    /// Flat damage soaked per hit.
    pub armor: i32,
    /// Weapon catalog id carried on spawn.
    pub weapon: &'static str,
    /// Spare rounds beyond the loaded magazine.
    pub reserve_ammo: u32,
    /// Movement speed (tiles/sec).
    pub move_speed: f64,
    /// Flat accuracy bonus folded into every shot.
    pub accuracy_bonus: f64,
    /// Sight radius (tiles).
    pub vision_radius: f64,
    /// Preferred firing distance; rushers close to this before opening up.
    pub engage_range: f64,
    /// Distance beyond which suppressive fire is preferred, 0 to disable.
    pub suppress_range: f64,
    /// Wander radius around the spawn post, 0 for static positions.
    pub patrol_radius: i32,
    /// Whether this archetype sets overwatch when alerted without a target.
    pub uses_overwatch: bool,
    /// Display tint carried through to snapshots.
    pub tint: Rgb,
}

/// Get the behavioral profile for a given archetype.
pub fn profile(archetype: EnemyArchetype) -> ArchetypeProfile {
    match archetype {
        EnemyArchetype::Raider => ArchetypeProfile {
            max_hp: 35,
            armor: 0,
            weapon: "smg",
            reserve_ammo: 60,
            move_speed: 3.2,
            accuracy_bonus: 0.0,
            vision_radius: 7.0,
            engage_range: 5.0,
            suppress_range: 0.0,
            patrol_radius: 4,
            uses_overwatch: false,
            tint: Rgb::new(205, 70, 55),
        },
        EnemyArchetype::Sentry => ArchetypeProfile {
            max_hp: 40,
            armor: 1,
            weapon: "rifle",
            reserve_ammo: 60,
            move_speed: 2.4,
            accuracy_bonus: 0.05,
            vision_radius: 9.0,
            engage_range: 10.0,
            suppress_range: 0.0,
            patrol_radius: 0,
            uses_overwatch: true,
            tint: Rgb::new(225, 160, 50),
        },
        EnemyArchetype::Heavy => ArchetypeProfile {
            max_hp: 60,
            armor: 3,
            weapon: "mg",
            reserve_ammo: 120,
            move_speed: 2.0,
            accuracy_bonus: 0.0,
            vision_radius: 9.0,
            engage_range: 8.0,
            suppress_range: 6.0,
            patrol_radius: 2,
            uses_overwatch: false,
            tint: Rgb::new(150, 55, 140),
        },
        EnemyArchetype::WarDrone => ArchetypeProfile {
            max_hp: 25,
            armor: 2,
            weapon: "sidearm",
            reserve_ammo: 24,
            move_speed: 4.0,
            accuracy_bonus: 0.05,
            vision_radius: 8.0,
            engage_range: 6.0,
            suppress_range: 0.0,
            patrol_radius: 0,
            uses_overwatch: false,
            tint: Rgb::new(90, 195, 205),
        },
    }
}
