//! Source-keyed stat modifiers with optional expiry.
//!
//! Effects, gear, and abilities adjust actor stats by installing modifiers
//! under a source key. Resolution folds additive terms first, then
//! multiplicative ones. Entries live in a `Vec` so iteration order is the
//! insertion order and resolution is reproducible.

use serde::{Deserialize, Serialize};

/// Stat a modifier applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    MoveSpeed,
    Accuracy,
    VisionRadius,
    FireRate,
    OverwatchAccuracy,
}

/// A single stat adjustment from one source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub stat: StatKind,
    /// Added to the base value before multipliers.
    pub add: f64,
    /// Multiplies the result after additive terms.
    pub mul: f64,
    /// Tick after which the modifier no longer applies, if any.
    pub expires_at: Option<u64>,
}

impl Modifier {
    pub fn additive(stat: StatKind, add: f64) -> Self {
        Self {
            stat,
            add,
            mul: 1.0,
            expires_at: None,
        }
    }

    pub fn multiplicative(stat: StatKind, mul: f64) -> Self {
        Self {
            stat,
            add: 0.0,
            mul,
            expires_at: None,
        }
    }

    pub fn until(mut self, tick: u64) -> Self {
        self.expires_at = Some(tick);
        self
    }

    fn active_at(&self, tick: u64) -> bool {
        match self.expires_at {
            Some(expiry) => tick < expiry,
            None => true,
        }
    }
}

/// All modifiers on one actor, keyed by source string (e.g. `"effect:suppressed"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModifierSet {
    entries: Vec<(String, Modifier)>,
}

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a modifier, replacing any existing entry for the same
    /// source and stat.
    pub fn set(&mut self, source: &str, modifier: Modifier) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(s, m)| s == source && m.stat == modifier.stat)
        {
            entry.1 = modifier;
        } else {
            self.entries.push((source.to_string(), modifier));
        }
    }

    /// Remove every modifier installed by a source.
    pub fn remove_source(&mut self, source: &str) {
        self.entries.retain(|(s, _)| s != source);
    }

    /// Drop modifiers whose expiry has passed.
    pub fn expire(&mut self, tick: u64) {
        self.entries.retain(|(_, m)| m.active_at(tick));
    }

    /// Resolve a stat: base, plus all active additive terms, times all
    /// active multipliers. Never returns below zero.
    pub fn resolve(&self, stat: StatKind, base: f64, tick: u64) -> f64 {
        let mut value = base;
        for (_, m) in self.entries.iter().filter(|(_, m)| m.stat == stat) {
            if m.active_at(tick) {
                value += m.add;
            }
        }
        for (_, m) in self.entries.iter().filter(|(_, m)| m.stat == stat) {
            if m.active_at(tick) {
                value *= m.mul;
            }
        }
        value.max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
