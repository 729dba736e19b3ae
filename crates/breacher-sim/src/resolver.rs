//! Attack resolution math.
//!
//! Every direct-fire path (aimed, defensive, reaction, suppressive)
//! funnels through the same roll so the chance model stays in one
//! place. Exactly one RNG draw happens per shot; the training override
//! in [`DamageRules`] forces the outcome but still consumes the draw,
//! keeping replays aligned across rule variants.

use rand::Rng;

use breacher_core::combat::{AttackResult, DamageRules};
use breacher_core::constants::{OVERWATCH_ACCURACY_FACTOR, SUPPRESS_ACCURACY_FACTOR};
use breacher_core::enums::CoverHeight;
use breacher_core::modifiers::StatKind;
use breacher_core::types::GridPos;
use breacher_map::{los, MapState};

use crate::actor::Actor;

/// Geometry gate shared by the aimed-fire paths: in range, line of
/// sight, and the aim cell not behind full cover.
pub fn clear_shot(attacker: &Actor, aim: GridPos, map: &MapState) -> bool {
    attacker.pos.distance_to(aim) <= attacker.weapon.range
        && los::has_line_of_sight(map, attacker.pos, aim)
        && map.cover_toward(aim, attacker.pos) != CoverHeight::Full
}

/// Whether a deliberate attack may resolve right now.
pub fn can_attack(attacker: &Actor, target: &Actor, map: &MapState) -> bool {
    attacker.is_alive() && target.is_alive() && clear_shot(attacker, target.pos, map)
}

/// Suppression only needs range and sight to the aim point; full cover
/// degrades the roll instead of forbidding the burst.
pub fn can_suppress(attacker: &Actor, aim: GridPos, map: &MapState) -> bool {
    attacker.pos.distance_to(aim) <= attacker.weapon.range
        && los::has_line_of_sight(map, attacker.pos, aim)
}

/// Hit chance of a standard attack against a target in place.
pub fn hit_chance(
    attacker: &Actor,
    target: &Actor,
    map: &MapState,
    rules: &DamageRules,
    tick: u64,
) -> f64 {
    let cover = map.cover_toward(target.pos, attacker.pos);
    hit_chance_toward(attacker, target.pos, cover, rules, tick, 1.0)
}

/// Chance model: accuracy minus a linear range penalty, scaled down by
/// the target's cover and the shot-kind factor, clamped to the rule
/// band so no shot is ever certain either way.
fn hit_chance_toward(
    attacker: &Actor,
    aim: GridPos,
    cover: CoverHeight,
    rules: &DamageRules,
    tick: u64,
    factor: f64,
) -> f64 {
    let dist = attacker.pos.distance_to(aim);
    let range_penalty = rules.range_penalty * (dist / attacker.weapon.range);
    let base = attacker.resolved_accuracy(tick) - range_penalty;
    let chance = base * (1.0 - rules.cover_reduction(cover)) * factor;
    chance.clamp(rules.hit_chance_min, rules.hit_chance_max)
}

/// Damage through armor: positive raw damage always leaves at least the
/// floor; zero or negative raw damage stays zero.
pub fn damage_after_armor(raw: i32, armor: i32, rules: &DamageRules) -> i32 {
    if raw <= 0 {
        return 0;
    }
    (raw - armor).max(rules.damage_floor)
}

fn roll(
    rng: &mut impl Rng,
    attacker: &Actor,
    target_armor: i32,
    aim: GridPos,
    cover: CoverHeight,
    rules: &DamageRules,
    tick: u64,
    factor: f64,
    raw: i32,
) -> (AttackResult, f64) {
    let chance = hit_chance_toward(attacker, aim, cover, rules, tick, factor);
    let sample: f64 = rng.gen();
    let hit = rules.always_hit || sample < chance;
    let (raw_damage, damage) = if hit {
        (raw, damage_after_armor(raw, target_armor, rules))
    } else {
        (0, 0)
    };
    (
        AttackResult {
            hit,
            raw_damage,
            damage,
            hit_chance: chance,
            cover,
        },
        sample,
    )
}

/// Resolve a deliberate or defensive shot at a stationary target.
pub fn resolve_attack(
    rng: &mut impl Rng,
    attacker: &Actor,
    target: &Actor,
    map: &MapState,
    rules: &DamageRules,
    tick: u64,
) -> AttackResult {
    let cover = map.cover_toward(target.pos, attacker.pos);
    roll(
        rng,
        attacker,
        target.armor,
        target.pos,
        cover,
        rules,
        tick,
        1.0,
        attacker.weapon.damage,
    )
    .0
}

/// Resolve overwatch reaction fire against a mover entering `entered`.
/// The mover's committed position is still the previous cell, so cover
/// and range are taken against the cell being entered.
pub fn resolve_reaction(
    rng: &mut impl Rng,
    attacker: &Actor,
    target: &Actor,
    entered: GridPos,
    map: &MapState,
    rules: &DamageRules,
    tick: u64,
) -> AttackResult {
    let cover = map.cover_toward(entered, attacker.pos);
    let factor = OVERWATCH_ACCURACY_FACTOR
        * attacker
            .modifiers
            .resolve(StatKind::OverwatchAccuracy, 1.0, tick);
    roll(
        rng,
        attacker,
        target.armor,
        entered,
        cover,
        rules,
        tick,
        factor,
        attacker.weapon.damage,
    )
    .0
}

/// Resolve a suppressive burst against a target. Returns the result and
/// the raw roll so the caller can grade near misses for the pin check.
pub fn resolve_suppression(
    rng: &mut impl Rng,
    attacker: &Actor,
    target: &Actor,
    map: &MapState,
    rules: &DamageRules,
    tick: u64,
) -> (AttackResult, f64) {
    let cover = map.cover_toward(target.pos, attacker.pos);
    roll(
        rng,
        attacker,
        target.armor,
        target.pos,
        cover,
        rules,
        tick,
        SUPPRESS_ACCURACY_FACTOR,
        attacker.weapon.damage / 2,
    )
}
