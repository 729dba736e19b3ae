//! Ability launches, delayed detonations, and per-caster cooldowns.

use std::collections::HashMap;

use tracing::warn;

use breacher_core::abilities::AbilitySpec;
use breacher_core::combat::DamageRules;
use breacher_core::enums::{Condition, EffectKind};
use breacher_core::events::CombatEvent;
use breacher_core::types::{ActorId, GridPos};
use breacher_map::MapState;

use crate::resolver;
use crate::roster::Roster;
use crate::systems::damage;

/// A launched ability waiting for its fuse.
#[derive(Debug, Clone)]
pub struct PendingBlast {
    pub caster: ActorId,
    pub ability: AbilitySpec,
    pub at: GridPos,
    pub detonate_tick: u64,
}

/// Per-caster ability cooldowns plus the fuse queue.
#[derive(Debug, Clone, Default)]
pub struct AbilityTracker {
    cooldowns: HashMap<(ActorId, String), u32>,
    pending: Vec<PendingBlast>,
}

impl AbilityTracker {
    pub fn ready(&self, caster: ActorId, ability_id: &str) -> bool {
        !self
            .cooldowns
            .contains_key(&(caster, ability_id.to_string()))
    }

    fn begin_cooldown(&mut self, caster: ActorId, ability_id: &str, ticks: u32) {
        if ticks > 0 {
            self.cooldowns.insert((caster, ability_id.to_string()), ticks);
        }
    }
}

/// Launch a validated ability: emit the use, start the cooldown, and
/// either queue the blast or detonate it on the spot when the fuse is
/// zero.
pub fn launch(
    tracker: &mut AbilityTracker,
    roster: &mut Roster,
    map: &mut MapState,
    rules: &DamageRules,
    events: &mut Vec<CombatEvent>,
    caster: ActorId,
    ability: AbilitySpec,
    at: GridPos,
    tick: u64,
) {
    events.push(CombatEvent::AbilityUsed {
        caster,
        ability: ability.id.clone(),
        at,
    });
    tracker.begin_cooldown(caster, &ability.id, ability.cooldown_ticks);
    let blast = PendingBlast {
        caster,
        at,
        detonate_tick: tick + ability.delay_ticks as u64,
        ability,
    };
    if blast.detonate_tick <= tick {
        detonate(blast, roster, map, rules, events, tick);
    } else {
        tracker.pending.push(blast);
    }
}

/// Advance cooldowns and set off every blast whose fuse has run out,
/// in launch order.
pub fn run(
    tracker: &mut AbilityTracker,
    roster: &mut Roster,
    map: &mut MapState,
    rules: &DamageRules,
    events: &mut Vec<CombatEvent>,
    tick: u64,
) {
    tracker.cooldowns.retain(|_, ticks| {
        *ticks = ticks.saturating_sub(1);
        *ticks > 0
    });

    let queued = std::mem::take(&mut tracker.pending);
    for blast in queued {
        if blast.detonate_tick <= tick {
            detonate(blast, roster, map, rules, events, tick);
        } else {
            tracker.pending.push(blast);
        }
    }
}

/// Resolve a blast: armor-reduced damage to every non-dead actor in the
/// radius regardless of side, then the rider effect on the survivors.
/// Kill credit and damage totals go to the caster.
fn detonate(
    blast: PendingBlast,
    roster: &mut Roster,
    map: &mut MapState,
    rules: &DamageRules,
    events: &mut Vec<CombatEvent>,
    tick: u64,
) {
    let spec = &blast.ability;
    let mut affected = 0u32;
    let mut dealt = 0u32;
    let mut kills = 0u32;

    for idx in 0..roster.len() {
        let target = roster.at_mut(idx);
        if target.condition == Condition::Dead || target.pos.distance_to(blast.at) > spec.radius {
            continue;
        }
        affected += 1;
        if spec.damage > 0 {
            let amount = resolver::damage_after_armor(spec.damage, target.armor, rules);
            let killed =
                damage::apply_damage(target, map, amount, Some(blast.caster), rules, events);
            dealt += amount as u32;
            if killed {
                kills += 1;
            }
        }
    }

    if let Some(name) = &spec.effect {
        match EffectKind::from_name(name) {
            Some(kind) => {
                for idx in 0..roster.len() {
                    let target = roster.at_mut(idx);
                    if !target.is_alive() || target.pos.distance_to(blast.at) > spec.radius {
                        continue;
                    }
                    damage::apply_effect(
                        target,
                        map,
                        kind,
                        spec.effect_duration_ticks,
                        tick,
                        events,
                    );
                }
            }
            None => warn!(ability = %spec.id, effect = %name, "unknown effect name, ignored"),
        }
    }

    if let Some(caster) = roster.get_mut(blast.caster) {
        caster.stats.damage_dealt += dealt;
        caster.stats.kills += kills;
    }
    events.push(CombatEvent::AbilityDetonated {
        ability: spec.id.clone(),
        at: blast.at,
        affected,
    });
}
