//! Damage and status-effect application, shared by every system that
//! hurts or debuffs an actor.

use breacher_core::combat::DamageRules;
use breacher_core::constants::{
    STIM_ACCURACY_BONUS, STIM_FIRE_RATE_FACTOR, STIM_MOVE_FACTOR, SUPPRESSED_ACCURACY_PENALTY,
    SUPPRESSED_MOVE_FACTOR,
};
use breacher_core::enums::{Condition, EffectKind, Side};
use breacher_core::events::CombatEvent;
use breacher_core::modifiers::{Modifier, StatKind};
use breacher_core::types::ActorId;
use breacher_map::MapState;

use crate::actor::{ActiveEffect, Activity, Actor};

/// Apply damage to one actor and walk the condition ladder.
///
/// Crew drop to `Down` at zero HP and die only from further damage;
/// everyone else dies outright. Any damage breaks an in-progress
/// channel. Returns true when this damage killed the target, so the
/// caller can assign kill credit.
pub fn apply_damage(
    target: &mut Actor,
    map: &mut MapState,
    amount: i32,
    attacker: Option<ActorId>,
    rules: &DamageRules,
    events: &mut Vec<CombatEvent>,
) -> bool {
    if amount <= 0 || target.condition == Condition::Dead {
        return false;
    }

    interrupt_channel(target, map, events);

    target.hp -= amount;
    target.stats.damage_taken += amount as u32;
    if rules.crew_immortal && target.side == Side::Crew {
        target.hp = target.hp.max(1);
    }
    if target.hp > 0 {
        return false;
    }
    target.hp = 0;

    if target.side == Side::Crew && target.condition == Condition::Alive {
        target.condition = Condition::Down;
        target.halt();
        events.push(CombatEvent::ActorDowned { actor: target.id });
        return false;
    }

    target.condition = Condition::Dead;
    target.halt();
    events.push(CombatEvent::ActorKilled {
        actor: target.id,
        by: attacker,
    });
    true
}

/// Break the actor's channel, if any, releasing the interactable.
pub fn interrupt_channel(actor: &mut Actor, map: &mut MapState, events: &mut Vec<CombatEvent>) {
    let target = match &actor.activity {
        Activity::Channeling(channel) => channel.target,
        _ => return,
    };
    if let Some(interactable) = map.interactable_mut(target) {
        interactable.channeler = None;
    }
    actor.activity = Activity::Idle;
    events.push(CombatEvent::ChannelInterrupted {
        actor: actor.id,
        target,
    });
}

/// Land a timed effect on an actor: record the instance, install its
/// stat modifiers under an `"effect:*"` source, and apply the immediate
/// consequences (a stun breaks channels and overwatch on the spot).
///
/// Reapplying an active effect extends it to the later expiry.
pub fn apply_effect(
    actor: &mut Actor,
    map: &mut MapState,
    kind: EffectKind,
    duration_ticks: u64,
    tick: u64,
    events: &mut Vec<CombatEvent>,
) {
    let until_tick = tick + duration_ticks;
    match actor.effects.iter_mut().find(|e| e.kind == kind) {
        Some(existing) => existing.until_tick = existing.until_tick.max(until_tick),
        None => actor.effects.push(ActiveEffect { kind, until_tick }),
    }

    match kind {
        EffectKind::Suppressed => {
            actor.modifiers.set(
                "effect:suppressed",
                Modifier::multiplicative(StatKind::MoveSpeed, SUPPRESSED_MOVE_FACTOR)
                    .until(until_tick),
            );
            actor.modifiers.set(
                "effect:suppressed",
                Modifier::additive(StatKind::Accuracy, -SUPPRESSED_ACCURACY_PENALTY)
                    .until(until_tick),
            );
        }
        EffectKind::Stunned => {
            interrupt_channel(actor, map, events);
            actor.overwatch = None;
        }
        EffectKind::Stimmed => {
            actor.modifiers.set(
                "effect:stimmed",
                Modifier::multiplicative(StatKind::MoveSpeed, STIM_MOVE_FACTOR).until(until_tick),
            );
            actor.modifiers.set(
                "effect:stimmed",
                Modifier::multiplicative(StatKind::FireRate, STIM_FIRE_RATE_FACTOR)
                    .until(until_tick),
            );
            actor.modifiers.set(
                "effect:stimmed",
                Modifier::additive(StatKind::Accuracy, STIM_ACCURACY_BONUS).until(until_tick),
            );
        }
    }

    events.push(CombatEvent::EffectApplied {
        actor: actor.id,
        effect: kind,
    });
}
