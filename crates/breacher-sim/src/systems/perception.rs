//! Enemy detection: sight, gunfire noise, and the mission alarm.
//!
//! Runs early in the tick over last tick's final positions and last
//! tick's shots, so detection is always one tick behind the action it
//! reacts to.

use std::collections::HashMap;

use tracing::info;

use breacher_core::constants::HEARING_RADIUS;
use breacher_core::enums::{AlarmState, DetectionState, Side};
use breacher_core::events::CombatEvent;
use breacher_core::types::{ActorId, GridPos};
use breacher_map::{los, MapState};

use crate::roster::Roster;

/// What one enemy or drone currently knows about the crew.
#[derive(Debug, Clone, Copy, Default)]
pub struct Perception {
    pub detection: DetectionState,
    pub last_known: Option<GridPos>,
}

/// Detection memory for every non-crew actor. Stored beside the roster
/// so dead actors' entries simply go stale.
#[derive(Debug, Clone, Default)]
pub struct PerceptionBoard {
    entries: HashMap<ActorId, Perception>,
}

impl PerceptionBoard {
    pub fn get(&self, id: ActorId) -> Perception {
        self.entries.get(&id).copied().unwrap_or_default()
    }

    fn alert(&mut self, id: ActorId, at: GridPos) {
        let entry = self.entries.entry(id).or_default();
        entry.detection = DetectionState::Alerted;
        entry.last_known = Some(at);
    }
}

/// Update detection for every living enemy and drone, then latch the
/// mission alarm if anyone is alerted. Sight beats sound: a visible
/// crew actor sets last-known even when shots were also heard.
pub fn run(
    roster: &Roster,
    map: &MapState,
    board: &mut PerceptionBoard,
    alarm: &mut AlarmState,
    heard_shots: &[(ActorId, GridPos)],
    events: &mut Vec<CombatEvent>,
    tick: u64,
) {
    for perceiver in roster.iter() {
        if perceiver.side == Side::Crew || !perceiver.is_alive() {
            continue;
        }
        let vision = perceiver.resolved_vision(tick);

        let mut seen: Option<(f64, GridPos)> = None;
        for crew in roster.living_on(Side::Crew) {
            let dist = perceiver.pos.distance_to(crew.pos);
            if dist > vision || !los::has_line_of_sight(map, perceiver.pos, crew.pos) {
                continue;
            }
            if seen.map_or(true, |(best, _)| dist < best) {
                seen = Some((dist, crew.pos));
            }
        }
        if let Some((_, at)) = seen {
            board.alert(perceiver.id, at);
            continue;
        }

        for (shooter, at) in heard_shots {
            if *shooter == perceiver.id {
                continue;
            }
            if perceiver.pos.distance_to(*at) <= HEARING_RADIUS {
                board.alert(perceiver.id, *at);
                break;
            }
        }
    }

    if *alarm == AlarmState::Quiet {
        let any_alerted = roster.iter().any(|a| {
            a.side != Side::Crew
                && a.is_alive()
                && board.get(a.id).detection == DetectionState::Alerted
        });
        if any_alerted {
            *alarm = AlarmState::Alerted;
            events.push(CombatEvent::AlarmRaised { tick });
            info!(tick, "station alarm raised");
        }
    }
}
