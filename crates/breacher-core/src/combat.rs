//! Combat resolution contracts: damage rules and resolved shot records.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::CoverHeight;

/// Tunable combat resolution rules, threaded into every resolver call.
///
/// Missions and tests construct variants (always-hit drills, immortal
/// training crew) instead of flipping global switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageRules {
    pub hit_chance_min: f64,
    pub hit_chance_max: f64,
    /// Accuracy lost at exactly weapon range.
    pub range_penalty: f64,
    pub cover_reduction_low: f64,
    pub cover_reduction_half: f64,
    pub cover_reduction_high: f64,
    /// Minimum damage dealt by any hit after armor.
    pub damage_floor: i32,
    /// Every shot hits. The hit roll is still drawn so RNG call counts
    /// do not depend on this flag.
    pub always_hit: bool,
    /// Crew HP never drops below 1.
    pub crew_immortal: bool,
}

impl Default for DamageRules {
    fn default() -> Self {
        Self {
            hit_chance_min: HIT_CHANCE_MIN,
            hit_chance_max: HIT_CHANCE_MAX,
            range_penalty: RANGE_PENALTY,
            cover_reduction_low: COVER_REDUCTION_LOW,
            cover_reduction_half: COVER_REDUCTION_HALF,
            cover_reduction_high: COVER_REDUCTION_HIGH,
            damage_floor: DAMAGE_FLOOR,
            always_hit: false,
            crew_immortal: false,
        }
    }
}

impl DamageRules {
    /// Hit chance reduction for a cover height. Full cover returns 1.0;
    /// attacks into it are rejected upstream.
    pub fn cover_reduction(&self, cover: CoverHeight) -> f64 {
        match cover {
            CoverHeight::None => 0.0,
            CoverHeight::Low => self.cover_reduction_low,
            CoverHeight::Half => self.cover_reduction_half,
            CoverHeight::High => self.cover_reduction_high,
            CoverHeight::Full => 1.0,
        }
    }
}

/// Outcome of one resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackResult {
    pub hit: bool,
    /// Weapon damage before armor (0 on a miss).
    pub raw_damage: i32,
    /// Damage actually dealt after armor and floor (0 on a miss).
    pub damage: i32,
    /// Final hit chance the roll was made against.
    pub hit_chance: f64,
    /// Target's cover height at resolution time.
    pub cover: CoverHeight,
}
