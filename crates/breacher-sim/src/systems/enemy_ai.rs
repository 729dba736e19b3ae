//! Enemy decision collection.
//!
//! Builds a decision context per living enemy in roster order and runs
//! the pure archetype FSM over it. The engine applies the collected
//! decisions through its own order API afterward, so enemies obey
//! exactly the same rules as externally ordered crew.

use breacher_ai::fsm::{self, Decision, EnemyContext, VisibleTarget};
use breacher_core::enums::{AlarmState, Side};
use breacher_core::types::ActorId;
use breacher_map::{los, MapState};

use crate::roster::Roster;
use crate::systems::perception::PerceptionBoard;

pub fn collect(
    roster: &Roster,
    map: &MapState,
    board: &PerceptionBoard,
    alarm: AlarmState,
    tick: u64,
) -> Vec<(ActorId, Decision)> {
    let mut decisions = Vec::new();
    for actor in roster.iter() {
        if actor.side == Side::Crew || !actor.is_alive() || actor.is_stunned(tick) {
            continue;
        }
        let archetype = match actor.archetype {
            Some(archetype) => archetype,
            None => continue,
        };

        let vision = actor.resolved_vision(tick);
        let mut targets = Vec::new();
        for other in roster.iter() {
            if !other.is_alive() || !actor.side.hostile_to(other.side) {
                continue;
            }
            let distance = actor.pos.distance_to(other.pos);
            if distance > vision || !los::has_line_of_sight(map, actor.pos, other.pos) {
                continue;
            }
            targets.push(VisibleTarget {
                id: other.id,
                pos: other.pos,
                distance,
                cover: map.cover_toward(other.pos, actor.pos),
            });
        }

        let memory = board.get(actor.id);
        let ctx = EnemyContext {
            archetype,
            position: actor.pos,
            hp_frac: actor.hp_frac(),
            magazine: actor.magazine,
            reserve: actor.reserve_ammo,
            suppressed: actor.is_suppressed(tick),
            detection: memory.detection,
            last_known: memory.last_known,
            alarm,
            targets,
        };
        decisions.push((actor.id, fsm::decide(&ctx)));
    }
    decisions
}
