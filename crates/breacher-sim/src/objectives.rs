//! Objective tracking and end-of-mission evaluation.
//!
//! Runs last in the tick. Completion latches: an objective that has
//! been met stays met even if the world state behind it changes again.

use breacher_core::constants::TICK_RATE;
use breacher_core::enums::{MissionOutcome, ObjectiveStatus, Side};
use breacher_core::events::CombatEvent;
use breacher_core::mission::{ObjectiveKind, ObjectiveSpec};
use breacher_map::MapState;

use crate::roster::Roster;
use crate::systems::pacing::WaveSchedule;

#[derive(Debug, Clone)]
pub struct ObjectiveState {
    pub spec: ObjectiveSpec,
    pub status: ObjectiveStatus,
}

impl ObjectiveState {
    pub fn new(spec: ObjectiveSpec) -> Self {
        Self {
            spec,
            status: ObjectiveStatus::Pending,
        }
    }
}

/// Display label for an objective.
pub fn label(kind: &ObjectiveKind) -> String {
    match kind {
        ObjectiveKind::EliminateAll => "Eliminate all hostiles".to_string(),
        ObjectiveKind::EliminateTarget { tag } => format!("Eliminate target '{tag}'"),
        ObjectiveKind::ReachZone { .. } => "Reach the marked zone".to_string(),
        ObjectiveKind::SurviveTicks { ticks } => {
            format!("Survive {} seconds", ticks / TICK_RATE as u64)
        }
        ObjectiveKind::HackTerminals { count } => {
            format!("Hack {} terminal{}", count, if *count == 1 { "" } else { "s" })
        }
    }
}

/// One evaluation pass: retreat, then defeat, then objective statuses,
/// then victory. Returns the outcome that ends the mission, if any.
pub fn evaluate(
    objectives: &mut [ObjectiveState],
    roster: &Roster,
    map: &MapState,
    schedule: &WaveSchedule,
    retreat_initiated: bool,
    events: &mut Vec<CombatEvent>,
    tick: u64,
) -> Option<MissionOutcome> {
    let living_crew = roster.living_count(Side::Crew);
    if retreat_initiated
        && living_crew > 0
        && roster.living_on(Side::Crew).all(|a| map.is_entry_zone(a.pos))
    {
        return Some(MissionOutcome::Retreat);
    }
    if living_crew == 0 {
        return Some(MissionOutcome::Defeat);
    }

    for (index, objective) in objectives.iter_mut().enumerate() {
        if objective.status == ObjectiveStatus::Complete {
            continue;
        }
        let status = progress(&objective.spec.kind, roster, map, schedule, tick);
        if status != objective.status {
            objective.status = status;
            events.push(CombatEvent::ObjectiveChanged { index, status });
        }
    }

    let primaries_done = objectives
        .iter()
        .filter(|o| o.spec.primary)
        .all(|o| o.status == ObjectiveStatus::Complete);
    if primaries_done {
        return Some(MissionOutcome::Victory);
    }
    None
}

/// Current status of one objective kind against the live world.
fn progress(
    kind: &ObjectiveKind,
    roster: &Roster,
    map: &MapState,
    schedule: &WaveSchedule,
    tick: u64,
) -> ObjectiveStatus {
    match kind {
        ObjectiveKind::EliminateAll => {
            let living = roster.living_count(Side::Enemy);
            if living == 0 && schedule.all_spawned() {
                ObjectiveStatus::Complete
            } else if roster
                .iter()
                .any(|a| a.side == Side::Enemy && !a.is_alive())
            {
                ObjectiveStatus::InProgress
            } else {
                ObjectiveStatus::Pending
            }
        }
        ObjectiveKind::EliminateTarget { tag } => {
            let unspawned_tagged = schedule
                .unspawned()
                .any(|s| s.tag.as_deref() == Some(tag.as_str()));
            let tagged: Vec<_> = roster
                .iter()
                .filter(|a| a.tag.as_deref() == Some(tag.as_str()))
                .collect();
            if !unspawned_tagged && tagged.iter().all(|a| !a.is_alive()) {
                ObjectiveStatus::Complete
            } else if tagged.iter().any(|a| !a.is_alive()) {
                ObjectiveStatus::InProgress
            } else {
                ObjectiveStatus::Pending
            }
        }
        ObjectiveKind::ReachZone { tiles } => {
            let reached = roster
                .living_on(Side::Crew)
                .any(|a| tiles.contains(&a.pos));
            if reached {
                ObjectiveStatus::Complete
            } else {
                ObjectiveStatus::Pending
            }
        }
        ObjectiveKind::SurviveTicks { ticks } => {
            if tick >= *ticks {
                ObjectiveStatus::Complete
            } else {
                ObjectiveStatus::InProgress
            }
        }
        ObjectiveKind::HackTerminals { count } => {
            let hacked = map.hacked_terminal_count();
            if hacked >= *count {
                ObjectiveStatus::Complete
            } else if hacked > 0 {
                ObjectiveStatus::InProgress
            } else {
                ObjectiveStatus::Pending
            }
        }
    }
}

/// Settle objective statuses for the final report. A mission that ends
/// in defeat or an abort fails every unresolved primary; secondaries
/// keep whatever progress they had.
pub fn finalize(
    objectives: &mut [ObjectiveState],
    outcome: MissionOutcome,
    events: &mut Vec<CombatEvent>,
) {
    if !matches!(outcome, MissionOutcome::Defeat | MissionOutcome::Abort) {
        return;
    }
    for (index, objective) in objectives.iter_mut().enumerate() {
        if objective.spec.primary && objective.status != ObjectiveStatus::Complete {
            objective.status = ObjectiveStatus::Failed;
            events.push(CombatEvent::ObjectiveChanged {
                index,
                status: ObjectiveStatus::Failed,
            });
        }
    }
}
