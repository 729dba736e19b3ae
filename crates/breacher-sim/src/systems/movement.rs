//! Movement claims and per-actor advance.
//!
//! Movement is two-phase. First every mover that would finish a step
//! this tick claims its next cell; claims resolve in roster order and a
//! lost claim means waiting in place with the move intact. Then each
//! actor advances: reload and cooldown countdowns, step progress, the
//! overwatch hook on each committed step, and the interpolated display
//! position.

use std::collections::{HashMap, HashSet};

use rand_chacha::ChaCha8Rng;

use breacher_core::combat::DamageRules;
use breacher_core::constants::DT;
use breacher_core::events::CombatEvent;
use breacher_core::types::{ActorId, GridPos, Vec2};
use breacher_map::MapState;

use crate::actor::Activity;
use crate::roster::Roster;
use crate::systems::overwatch;

/// Decide which movers may enter their next cell this tick.
///
/// A cell goes to the first claimant in roster order. Cells holding a
/// living actor are not claimable even if that actor is about to leave;
/// the follower waits a tick. A destination the map no longer allows
/// (a door fell shut) cancels the move outright.
pub fn resolve_claims(roster: &mut Roster, map: &MapState, tick: u64) -> HashMap<usize, GridPos> {
    let occupied: HashSet<GridPos> = roster
        .iter()
        .filter(|a| a.is_alive())
        .map(|a| a.pos)
        .collect();
    let mut claimed: HashSet<GridPos> = HashSet::new();
    let mut winners = HashMap::new();

    for idx in 0..roster.len() {
        let actor = roster.at(idx);
        if !actor.is_alive() || actor.is_stunned(tick) {
            continue;
        }
        let (dest, progress) = match &actor.activity {
            Activity::Moving {
                path,
                next,
                progress,
            } => (path[*next], *progress),
            _ => continue,
        };
        if progress + actor.resolved_move_speed(tick) * DT < 1.0 {
            continue;
        }
        if !map.is_walkable(dest) {
            roster.at_mut(idx).activity = Activity::Idle;
            continue;
        }
        if claimed.contains(&dest) || occupied.contains(&dest) {
            continue;
        }
        claimed.insert(dest);
        winners.insert(idx, dest);
    }
    winners
}

pub fn run(
    roster: &mut Roster,
    map: &mut MapState,
    commits: &HashMap<usize, GridPos>,
    rules: &DamageRules,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<CombatEvent>,
    noise: &mut Vec<(ActorId, GridPos)>,
    tick: u64,
) {
    for idx in 0..roster.len() {
        let commit = {
            let actor = roster.at_mut(idx);
            if !actor.is_alive() {
                continue;
            }
            actor.cooldown_ticks = actor.cooldown_ticks.saturating_sub(1);
            let stunned = actor.is_stunned(tick);

            let mut reload_done = false;
            if let Activity::Reloading { ticks_left } = &mut actor.activity {
                if !stunned {
                    *ticks_left = ticks_left.saturating_sub(1);
                    reload_done = *ticks_left == 0;
                }
            }
            if reload_done {
                let transfer = (actor.weapon.magazine - actor.magazine).min(actor.reserve_ammo);
                actor.magazine += transfer;
                actor.reserve_ammo -= transfer;
                actor.activity = Activity::Idle;
                events.push(CombatEvent::ReloadCompleted { actor: actor.id });
            }

            let mut commit = None;
            if !stunned {
                let step = actor.resolved_move_speed(tick) * DT;
                if let Activity::Moving { progress, .. } = &mut actor.activity {
                    *progress += step;
                    if *progress >= 1.0 {
                        match commits.get(&idx) {
                            Some(&dest) => commit = Some(dest),
                            // Lost the claim; stay ready at the cell edge.
                            None => *progress = 1.0,
                        }
                    }
                }
            }
            commit
        };

        if let Some(dest) = commit {
            let survived = overwatch::on_movement_commit(
                roster, map, rules, rng, events, noise, tick, idx, dest,
            );
            if survived {
                let actor = roster.at_mut(idx);
                actor.pos = dest;
                let mut arrived = false;
                if let Activity::Moving {
                    path,
                    next,
                    progress,
                } = &mut actor.activity
                {
                    *progress -= 1.0;
                    *next += 1;
                    arrived = *next >= path.len();
                }
                if arrived {
                    actor.activity = Activity::Idle;
                }
            }
        }

        let actor = roster.at_mut(idx);
        actor.visual = match &actor.activity {
            Activity::Moving {
                path,
                next,
                progress,
            } => Vec2::from_grid(actor.pos).lerp(Vec2::from_grid(path[*next]), *progress),
            _ => Vec2::from_grid(actor.pos),
        };
    }
}
