//! Final mission report assembly.

use breacher_core::constants::{
    FLESH_WOUND_HP_FRACTION, WOUNDED_HP_FRACTION, XP_BASE, XP_PER_HIT, XP_PER_KILL,
    XP_VICTORY_BONUS,
};
use breacher_core::enums::{
    Condition, CrewStatus, EnemyArchetype, Injury, MissionOutcome, Side,
};
use breacher_core::mission::{CrewReport, MissionOutput, MissionStats, ObjectiveReport};
use breacher_core::types::SimTime;
use breacher_map::MapState;

use crate::actor::Actor;
use crate::objectives::ObjectiveState;
use crate::roster::Roster;
use crate::systems::pacing::WaveSchedule;

pub fn build(
    mission: &str,
    outcome: MissionOutcome,
    roster: &Roster,
    objectives: &[ObjectiveState],
    map: &MapState,
    schedule: &WaveSchedule,
    alarm_triggered: bool,
    time: SimTime,
) -> MissionOutput {
    let crew = roster
        .iter()
        .filter(|a| a.side == Side::Crew)
        .map(|a| crew_report(a, outcome, map))
        .collect();

    let objectives = objectives
        .iter()
        .map(|o| ObjectiveReport {
            kind: o.spec.kind.clone(),
            primary: o.spec.primary,
            status: o.status,
        })
        .collect();

    let enemies_killed = roster
        .iter()
        .filter(|a| a.side == Side::Enemy && a.condition == Condition::Dead)
        .count() as u32;
    let enemies_remaining = roster.living_count(Side::Enemy) as u32
        + schedule
            .unspawned()
            .filter(|s| s.archetype != EnemyArchetype::WarDrone)
            .count() as u32;

    MissionOutput {
        mission: mission.to_string(),
        outcome,
        crew,
        objectives,
        stats: MissionStats {
            enemies_killed,
            enemies_remaining,
            alarm_triggered,
            ticks: time.tick,
            duration_secs: time.elapsed_secs,
        },
        loot: Vec::new(),
        world_deltas: Vec::new(),
    }
}

/// One crew member's line in the report. Status precedence runs from
/// worst to best; a crew member left off an entry zone during a
/// withdrawal is missing in action even if unhurt.
fn crew_report(actor: &Actor, outcome: MissionOutcome, map: &MapState) -> CrewReport {
    let withdrew = matches!(outcome, MissionOutcome::Retreat | MissionOutcome::Abort);
    let status = if actor.condition == Condition::Dead {
        CrewStatus::Dead
    } else if actor.condition == Condition::Down {
        CrewStatus::Critical
    } else if withdrew && !map.is_entry_zone(actor.pos) {
        CrewStatus::Mia
    } else if actor.hp_frac() < WOUNDED_HP_FRACTION {
        CrewStatus::Wounded
    } else {
        CrewStatus::Alive
    };

    let mut xp = XP_BASE + XP_PER_KILL * actor.stats.kills + XP_PER_HIT * actor.stats.shots_hit;
    if outcome == MissionOutcome::Victory {
        xp += XP_VICTORY_BONUS;
    }

    let injuries = if actor.condition == Condition::Down {
        vec![Injury::DeepWound]
    } else if actor.is_alive() && actor.hp_frac() < FLESH_WOUND_HP_FRACTION {
        vec![Injury::FleshWound]
    } else {
        Vec::new()
    };

    CrewReport {
        callsign: actor.callsign.clone(),
        status,
        hp: actor.hp,
        max_hp: actor.max_hp,
        kills: actor.stats.kills,
        shots_fired: actor.stats.shots_fired,
        shots_hit: actor.stats.shots_hit,
        damage_dealt: actor.stats.damage_dealt,
        damage_taken: actor.stats.damage_taken,
        ammo_used: actor.stats.ammo_used,
        ammo_remaining: actor.magazine + actor.reserve_ammo,
        xp,
        injuries,
    }
}
