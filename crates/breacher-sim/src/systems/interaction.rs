//! Channel progress and interactable completion.
//!
//! Instant verbs (open/close) resolve at order time; everything that
//! reaches this system is a timed channel. A completed channel advances
//! the interactable's state machine, and a deliberate hazard trigger
//! detonates it on the spot.

use breacher_core::combat::DamageRules;
use breacher_core::constants::{HAZARD_DAMAGE, HAZARD_RADIUS};
use breacher_core::enums::Condition;
use breacher_core::events::CombatEvent;
use breacher_core::interact::{
    DoorState, HazardState, InteractVerb, InteractableKind, TerminalState,
};
use breacher_core::types::{ActorId, GridPos, InteractableId};
use breacher_map::MapState;

use crate::actor::Activity;
use crate::resolver;
use crate::roster::Roster;
use crate::systems::damage;

pub fn run(
    roster: &mut Roster,
    map: &mut MapState,
    rules: &DamageRules,
    events: &mut Vec<CombatEvent>,
    tick: u64,
) {
    for idx in 0..roster.len() {
        let actor = roster.at_mut(idx);
        if !actor.is_alive() || actor.is_stunned(tick) {
            continue;
        }
        let channel = match &mut actor.activity {
            Activity::Channeling(channel) => channel,
            _ => continue,
        };
        channel.elapsed_ticks += 1;
        if channel.elapsed_ticks < channel.total_ticks {
            continue;
        }
        let (actor_id, verb, target) = (actor.id, channel.verb, channel.target);
        actor.activity = Activity::Idle;
        complete(roster, map, rules, events, actor_id, target, verb);
    }
}

/// Apply a finished channel to its interactable.
fn complete(
    roster: &mut Roster,
    map: &mut MapState,
    rules: &DamageRules,
    events: &mut Vec<CombatEvent>,
    actor: ActorId,
    target: InteractableId,
    verb: InteractVerb,
) {
    let interactable = match map.interactable_mut(target) {
        Some(interactable) => interactable,
        None => return,
    };
    interactable.channeler = None;

    let mut hazard_at: Option<GridPos> = None;
    match (interactable.kind, verb) {
        (InteractableKind::Door(_), InteractVerb::Hack) => {
            interactable.kind = InteractableKind::Door(DoorState::Open);
            events.push(CombatEvent::DoorChanged {
                id: target,
                state: DoorState::Open,
            });
        }
        (InteractableKind::Terminal(_), InteractVerb::Hack) => {
            interactable.kind = InteractableKind::Terminal(TerminalState::Hacked);
        }
        (InteractableKind::Hazard(HazardState::Armed), InteractVerb::Disable) => {
            interactable.kind = InteractableKind::Hazard(HazardState::Disabled);
        }
        (InteractableKind::Hazard(HazardState::Armed), InteractVerb::Trigger) => {
            interactable.kind = InteractableKind::Hazard(HazardState::Triggered);
            hazard_at = Some(interactable.pos);
        }
        _ => return,
    }
    events.push(CombatEvent::ChannelCompleted {
        actor,
        target,
        verb,
    });

    if let Some(at) = hazard_at {
        detonate_hazard(roster, map, rules, events, target, at, Some(actor));
    }
}

/// A hazard blast: fixed damage through armor to everything in the
/// radius, all factions alike. Credit goes to whoever set it off.
pub fn detonate_hazard(
    roster: &mut Roster,
    map: &mut MapState,
    rules: &DamageRules,
    events: &mut Vec<CombatEvent>,
    id: InteractableId,
    at: GridPos,
    triggered_by: Option<ActorId>,
) {
    events.push(CombatEvent::HazardDetonated { id, at });
    let mut dealt = 0u32;
    let mut kills = 0u32;
    for idx in 0..roster.len() {
        let target = roster.at_mut(idx);
        if target.condition == Condition::Dead || target.pos.distance_to(at) > HAZARD_RADIUS {
            continue;
        }
        let amount = resolver::damage_after_armor(HAZARD_DAMAGE, target.armor, rules);
        let killed = damage::apply_damage(target, map, amount, triggered_by, rules, events);
        dealt += amount as u32;
        if killed {
            kills += 1;
        }
    }
    if let Some(actor) = triggered_by {
        if let Some(actor) = roster.get_mut(actor) {
            actor.stats.damage_dealt += dealt;
            actor.stats.kills += kills;
        }
    }
}
