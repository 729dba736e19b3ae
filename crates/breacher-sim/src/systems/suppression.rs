//! Suppressive fire: targeted bursts and area denial.
//!
//! Suppression trades damage for control. A targeted burst deals half
//! damage on a hit but pins reliably; an area burst deals none and rolls
//! a pin per exposed hostile near the tile.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use breacher_core::combat::DamageRules;
use breacher_core::constants::{
    SUPPRESS_AMMO_COST, SUPPRESS_AREA_AMMO_COST, SUPPRESS_AREA_BASE_CHANCE, SUPPRESS_AREA_RADIUS,
    SUPPRESS_DURATION_TICKS, SUPPRESS_NEAR_MISS_MARGIN, SUPPRESS_PIN_CHANCE_FAR,
    SUPPRESS_PIN_CHANCE_NEAR,
};
use breacher_core::enums::{EffectKind, ShotKind};
use breacher_core::events::CombatEvent;
use breacher_core::types::{ActorId, GridPos};
use breacher_map::{los, MapState};

use crate::actor::CombatOrder;
use crate::resolver;
use crate::roster::Roster;
use crate::systems::damage;

pub fn run(
    roster: &mut Roster,
    map: &mut MapState,
    rules: &DamageRules,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<CombatEvent>,
    noise: &mut Vec<(ActorId, GridPos)>,
    tick: u64,
) {
    for idx in 0..roster.len() {
        let attacker = roster.at(idx);
        let order = match attacker.combat_order {
            Some(CombatOrder::Suppress(target)) => Burst::Target(target),
            Some(CombatOrder::SuppressArea(tile)) => Burst::Area(tile),
            _ => continue,
        };
        if !attacker.ready_to_fire(tick) {
            continue;
        }
        if attacker.magazine == 0 {
            if attacker.reserve_ammo > 0 {
                let attacker = roster.at_mut(idx);
                attacker.start_reload();
                events.push(CombatEvent::ReloadStarted { actor: attacker.id });
            }
            continue;
        }
        match order {
            Burst::Target(target) => {
                targeted_burst(roster, map, rules, rng, events, noise, tick, idx, target)
            }
            Burst::Area(tile) => {
                area_burst(roster, map, rules, rng, events, noise, tick, idx, tile)
            }
        }
    }
}

enum Burst {
    Target(ActorId),
    Area(GridPos),
}

fn targeted_burst(
    roster: &mut Roster,
    map: &mut MapState,
    rules: &DamageRules,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<CombatEvent>,
    noise: &mut Vec<(ActorId, GridPos)>,
    tick: u64,
    idx: usize,
    target_id: ActorId,
) {
    let target_idx = match roster.index_of(target_id) {
        Some(target_idx) if target_idx != idx && roster.at(target_idx).is_alive() => target_idx,
        _ => {
            roster.at_mut(idx).combat_order = None;
            return;
        }
    };
    let aim = roster.at(target_idx).pos;
    if !resolver::can_suppress(roster.at(idx), aim, map) {
        return;
    }

    let (attacker, target) = roster.pair_mut(idx, target_idx);
    let cost = SUPPRESS_AMMO_COST.min(attacker.magazine);
    attacker.magazine -= cost;
    attacker.stats.ammo_used += cost;
    attacker.stats.shots_fired += 1;
    attacker.cooldown_ticks = attacker.scaled_cooldown(tick);
    noise.push((attacker.id, attacker.pos));

    let (result, roll) = resolver::resolve_suppression(rng, attacker, target, map, rules, tick);
    events.push(CombatEvent::ShotResolved {
        attacker: attacker.id,
        target: target.id,
        kind: ShotKind::Suppressive,
        result,
    });

    if result.hit {
        attacker.stats.shots_hit += 1;
        attacker.stats.damage_dealt += result.damage as u32;
        if damage::apply_damage(target, map, result.damage, Some(attacker.id), rules, events) {
            attacker.stats.kills += 1;
        }
        if target.is_alive() {
            damage::apply_effect(
                target,
                map,
                EffectKind::Suppressed,
                SUPPRESS_DURATION_TICKS,
                tick,
                events,
            );
        }
    } else {
        // Near misses crack past the target's ear; wide ones are easier
        // to ignore. Either way the pin roll is drawn.
        let pin_chance = if roll - result.hit_chance < SUPPRESS_NEAR_MISS_MARGIN {
            SUPPRESS_PIN_CHANCE_NEAR
        } else {
            SUPPRESS_PIN_CHANCE_FAR
        };
        let pinned: f64 = rng.gen();
        if pinned < pin_chance && target.is_alive() {
            damage::apply_effect(
                target,
                map,
                EffectKind::Suppressed,
                SUPPRESS_DURATION_TICKS,
                tick,
                events,
            );
        }
    }
    if target.is_alive() {
        target.auto_defend = Some(attacker.id);
    }
}

fn area_burst(
    roster: &mut Roster,
    map: &mut MapState,
    rules: &DamageRules,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<CombatEvent>,
    noise: &mut Vec<(ActorId, GridPos)>,
    tick: u64,
    idx: usize,
    tile: GridPos,
) {
    if !resolver::can_suppress(roster.at(idx), tile, map) {
        return;
    }
    let (attacker_id, attacker_side) = {
        let attacker = roster.at_mut(idx);
        let cost = SUPPRESS_AREA_AMMO_COST.min(attacker.magazine);
        attacker.magazine -= cost;
        attacker.stats.ammo_used += cost;
        attacker.stats.shots_fired += 1;
        attacker.cooldown_ticks = attacker.scaled_cooldown(tick);
        noise.push((attacker.id, attacker.pos));
        (attacker.id, attacker.side)
    };

    let mut pinned = 0u32;
    for target_idx in 0..roster.len() {
        if target_idx == idx {
            continue;
        }
        let target = roster.at(target_idx);
        if !target.is_alive() || !attacker_side.hostile_to(target.side) {
            continue;
        }
        let dist = target.pos.distance_to(tile);
        if dist > SUPPRESS_AREA_RADIUS || !los::has_line_of_sight(map, tile, target.pos) {
            continue;
        }
        let chance = SUPPRESS_AREA_BASE_CHANCE * (1.0 - dist / SUPPRESS_AREA_RADIUS);
        let roll: f64 = rng.gen();
        if roll < chance {
            damage::apply_effect(
                roster.at_mut(target_idx),
                map,
                EffectKind::Suppressed,
                SUPPRESS_DURATION_TICKS,
                tick,
                events,
            );
            pinned += 1;
        }
    }
    events.push(CombatEvent::SuppressiveFire {
        attacker: attacker_id,
        tile,
        pinned,
    });
}
