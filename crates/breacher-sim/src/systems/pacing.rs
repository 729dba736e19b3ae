//! Battle phase progression and reinforcement wave release.
//!
//! Runs first in the tick so the rest of the pipeline sees this tick's
//! phase and any newly arrived enemies.

use tracing::info;

use breacher_core::constants::{PRESSURE_DELAY_TICKS, RESOLUTION_ENEMY_THRESHOLD};
use breacher_core::enums::{AlarmState, BattlePhase, Side, Visibility};
use breacher_core::events::CombatEvent;
use breacher_core::mission::EnemySpawn;
use breacher_map::MapState;

use crate::roster::Roster;
use crate::systems::visibility::FogGrid;

/// One scheduled reinforcement wave.
#[derive(Debug, Clone)]
pub struct WaveEntry {
    pub wave: u32,
    /// Phase the wave waits for.
    pub phase: BattlePhase,
    /// Ticks to hold after the phase is first reached.
    pub delay_ticks: u64,
    pub spawns: Vec<EnemySpawn>,
    /// Tick the phase gate opened, once it has.
    pub due_from: Option<u64>,
    pub spawned: bool,
}

/// All scheduled waves, in wave-number order. Wave zero spawns during
/// setup and never appears here.
#[derive(Debug, Clone, Default)]
pub struct WaveSchedule {
    pub waves: Vec<WaveEntry>,
}

impl WaveSchedule {
    pub fn all_spawned(&self) -> bool {
        self.waves.iter().all(|w| w.spawned)
    }

    /// Enemies scheduled but not yet on the map.
    pub fn unspawned(&self) -> impl Iterator<Item = &EnemySpawn> {
        self.waves
            .iter()
            .filter(|w| !w.spawned)
            .flat_map(|w| w.spawns.iter())
    }
}

pub fn run(
    phase: &mut BattlePhase,
    phase_entered: &mut u64,
    schedule: &mut WaveSchedule,
    roster: &mut Roster,
    map: &MapState,
    fog: &FogGrid,
    alarm: AlarmState,
    shot_fired: bool,
    events: &mut Vec<CombatEvent>,
    tick: u64,
) {
    advance_phase(phase, phase_entered, schedule, roster, alarm, shot_fired, events, tick);
    release_waves(phase, schedule, roster, map, fog, events, tick);
}

/// At most one phase step per tick, and never backward.
fn advance_phase(
    phase: &mut BattlePhase,
    phase_entered: &mut u64,
    schedule: &WaveSchedule,
    roster: &Roster,
    alarm: AlarmState,
    shot_fired: bool,
    events: &mut Vec<CombatEvent>,
    tick: u64,
) {
    let next = match *phase {
        BattlePhase::Setup => Some(BattlePhase::Negotiation),
        BattlePhase::Negotiation if alarm == AlarmState::Alerted || shot_fired => {
            Some(BattlePhase::Contact)
        }
        BattlePhase::Contact
            if tick.saturating_sub(*phase_entered) >= PRESSURE_DELAY_TICKS
                || schedule.all_spawned() =>
        {
            Some(BattlePhase::Pressure)
        }
        BattlePhase::Pressure
            if schedule.all_spawned()
                && roster.living_count(Side::Enemy) <= RESOLUTION_ENEMY_THRESHOLD =>
        {
            Some(BattlePhase::Resolution)
        }
        _ => None,
    };
    let next = match next {
        Some(next) => next,
        None => return,
    };
    *phase = next;
    *phase_entered = tick;
    events.push(CombatEvent::PhaseChanged { phase: next });
    info!(?next, tick, "battle phase advanced");
}

/// Spawn every wave whose gate has been open long enough. A wave whose
/// spawn tiles are blocked, occupied, or in crew view holds as a unit
/// and retries next tick.
fn release_waves(
    phase: &BattlePhase,
    schedule: &mut WaveSchedule,
    roster: &mut Roster,
    map: &MapState,
    fog: &FogGrid,
    events: &mut Vec<CombatEvent>,
    tick: u64,
) {
    for entry in schedule.waves.iter_mut() {
        if entry.spawned {
            continue;
        }
        if entry.due_from.is_none() && *phase >= entry.phase {
            entry.due_from = Some(tick);
        }
        let due = match entry.due_from {
            Some(opened) => tick >= opened + entry.delay_ticks,
            None => false,
        };
        if !due {
            continue;
        }
        let placeable = entry.spawns.iter().all(|s| {
            map.is_walkable(s.spawn)
                && !roster.cell_occupied(s.spawn)
                && fog.get(s.spawn) != Visibility::Visible
        });
        if !placeable {
            continue;
        }
        for spawn in &entry.spawns {
            crate::setup::spawn_enemy(roster, spawn);
        }
        entry.spawned = true;
        events.push(CombatEvent::WaveSpawned {
            wave: entry.wave,
            count: entry.spawns.len() as u32,
        });
        info!(wave = entry.wave, count = entry.spawns.len(), tick, "reinforcement wave arrived");
    }
}
