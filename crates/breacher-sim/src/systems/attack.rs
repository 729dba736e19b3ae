//! Direct-fire resolution: standing attack orders, then automatic
//! return fire for actors left without one.

use rand_chacha::ChaCha8Rng;

use breacher_core::combat::DamageRules;
use breacher_core::enums::ShotKind;
use breacher_core::events::CombatEvent;
use breacher_core::types::{ActorId, GridPos};
use breacher_map::MapState;

use crate::actor::{Actor, CombatOrder};
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
    // Deliberate orders resolve before anyone returns fire.
    for idx in 0..roster.len() {
        let attacker = roster.at(idx);
        let target_id = match attacker.combat_order {
            Some(CombatOrder::Attack(target)) => target,
            _ => continue,
        };
        try_shot(
            roster,
            map,
            rules,
            rng,
            events,
            noise,
            tick,
            idx,
            target_id,
            ShotKind::Aimed,
        );
    }

    for idx in 0..roster.len() {
        let attacker = roster.at(idx);
        if attacker.combat_order.is_some() {
            continue;
        }
        let target_id = match attacker.auto_defend {
            Some(target) => target,
            None => continue,
        };
        try_shot(
            roster,
            map,
            rules,
            rng,
            events,
            noise,
            tick,
            idx,
            target_id,
            ShotKind::Defensive,
        );
    }
}

/// One firing attempt for one attacker. Dead or missing targets clear
/// the directive; a blocked shot (range, sight, full cover) keeps it
/// standing for a later tick.
fn try_shot(
    roster: &mut Roster,
    map: &mut MapState,
    rules: &DamageRules,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<CombatEvent>,
    noise: &mut Vec<(ActorId, GridPos)>,
    tick: u64,
    idx: usize,
    target_id: ActorId,
    kind: ShotKind,
) {
    let attacker = roster.at(idx);
    if !attacker.ready_to_fire(tick) {
        return;
    }
    if attacker.magazine == 0 {
        if attacker.reserve_ammo > 0 {
            let attacker = roster.at_mut(idx);
            attacker.start_reload();
            events.push(CombatEvent::ReloadStarted { actor: attacker.id });
        }
        return;
    }

    let target_idx = match roster.index_of(target_id) {
        Some(target_idx) if target_idx != idx => target_idx,
        _ => {
            clear_directive(roster.at_mut(idx), kind);
            return;
        }
    };
    if !roster.at(target_idx).is_alive() {
        clear_directive(roster.at_mut(idx), kind);
        return;
    }

    let (attacker, target) = roster.pair_mut(idx, target_idx);
    if !resolver::can_attack(attacker, target, map) {
        return;
    }
    fire(attacker, target, map, rules, rng, events, noise, tick, kind);
}

fn clear_directive(attacker: &mut Actor, kind: ShotKind) {
    match kind {
        ShotKind::Defensive => attacker.auto_defend = None,
        _ => attacker.combat_order = None,
    }
}

/// Resolve one shot: spend the round, start the cooldown, announce the
/// muzzle flash, then apply the outcome. The target remembers the
/// shooter whether or not the round connected.
fn fire(
    attacker: &mut Actor,
    target: &mut Actor,
    map: &mut MapState,
    rules: &DamageRules,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<CombatEvent>,
    noise: &mut Vec<(ActorId, GridPos)>,
    tick: u64,
    kind: ShotKind,
) {
    let result = resolver::resolve_attack(rng, attacker, target, map, rules, tick);
    attacker.magazine -= 1;
    attacker.stats.ammo_used += 1;
    attacker.stats.shots_fired += 1;
    attacker.cooldown_ticks = attacker.scaled_cooldown(tick);
    noise.push((attacker.id, attacker.pos));
    events.push(CombatEvent::ShotResolved {
        attacker: attacker.id,
        target: target.id,
        kind,
        result,
    });

    if result.hit {
        attacker.stats.shots_hit += 1;
        attacker.stats.damage_dealt += result.damage as u32;
        if damage::apply_damage(target, map, result.damage, Some(attacker.id), rules, events) {
            attacker.stats.kills += 1;
        }
    }
    if target.is_alive() {
        target.auto_defend = Some(attacker.id);
    }
}
