//! Overwatch reaction fire.
//!
//! Not a pipeline stage: the movement system calls in here for every
//! committed step, before the mover's new cell becomes authoritative.
//! Each watching hostile whose cone covers the entered cell gets one
//! reaction shot, in roster order, until the mover drops or every
//! watcher has spoken.

use std::f64::consts::{PI, TAU};

use rand_chacha::ChaCha8Rng;

use breacher_core::combat::DamageRules;
use breacher_core::enums::{CoverHeight, ShotKind};
use breacher_core::events::CombatEvent;
use breacher_core::types::{ActorId, Dir8, GridPos};
use breacher_map::{los, MapState};

use crate::resolver;
use crate::roster::Roster;
use crate::systems::damage;

/// Returns whether the mover is still able to finish the step.
pub fn on_movement_commit(
    roster: &mut Roster,
    map: &mut MapState,
    rules: &DamageRules,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<CombatEvent>,
    noise: &mut Vec<(ActorId, GridPos)>,
    tick: u64,
    mover_idx: usize,
    entered: GridPos,
) -> bool {
    let mover_side = roster.at(mover_idx).side;

    for watcher_idx in 0..roster.len() {
        if watcher_idx == mover_idx {
            continue;
        }
        let watcher = roster.at(watcher_idx);
        let stance = match watcher.overwatch {
            Some(stance) => stance,
            None => continue,
        };
        if !watcher.is_alive()
            || !watcher.side.hostile_to(mover_side)
            || stance.shots_left == 0
            || watcher.magazine == 0
        {
            continue;
        }
        if watcher.pos.distance_to(entered) > stance.range
            || !los::has_line_of_sight(map, watcher.pos, entered)
            || map.cover_toward(entered, watcher.pos) == CoverHeight::Full
            || !within_cone(watcher.pos, stance.facing, entered, stance.cone_half_deg)
        {
            continue;
        }

        let (watcher, mover) = roster.pair_mut(watcher_idx, mover_idx);
        let result = resolver::resolve_reaction(rng, watcher, mover, entered, map, rules, tick);
        watcher.magazine -= 1;
        watcher.stats.ammo_used += 1;
        watcher.stats.shots_fired += 1;
        watcher.cooldown_ticks = watcher.scaled_cooldown(tick);
        if let Some(stance) = watcher.overwatch.as_mut() {
            stance.shots_left -= 1;
            if stance.shots_left == 0 {
                watcher.overwatch = None;
            }
        }
        noise.push((watcher.id, watcher.pos));
        events.push(CombatEvent::ShotResolved {
            attacker: watcher.id,
            target: mover.id,
            kind: ShotKind::Reaction,
            result,
        });

        if result.hit {
            watcher.stats.shots_hit += 1;
            watcher.stats.damage_dealt += result.damage as u32;
            if damage::apply_damage(mover, map, result.damage, Some(watcher.id), rules, events) {
                watcher.stats.kills += 1;
            }
        }
        if mover.is_alive() {
            mover.auto_defend = Some(watcher.id);
        } else {
            return false;
        }
    }
    true
}

/// Whether the entered cell falls inside the watched cone.
fn within_cone(watcher: GridPos, facing: Dir8, entered: GridPos, half_deg: f64) -> bool {
    let mut diff = (watcher.bearing_to(entered) - facing.heading()).rem_euclid(TAU);
    if diff > PI {
        diff = TAU - diff;
    }
    diff <= half_deg.to_radians()
}
