//! Battle construction from a mission spec.
//!
//! Validates the mission against the parsed map, places the crew and
//! wave-zero enemies, and builds the reinforcement schedule. Everything
//! that can be wrong with mission data surfaces here as a
//! [`SetupError`]; past this point the engine only deals in legal state.

use thiserror::Error;

use breacher_ai::profiles;
use breacher_core::enums::{Condition, EnemyArchetype, Side};
use breacher_core::mission::{CrewDeployment, EnemySpawn, MissionSpec, ObjectiveKind, ObjectiveSpec};
use breacher_core::modifiers::ModifierSet;
use breacher_core::types::{ActorId, GridPos, Vec2};
use breacher_core::weapons::{weapon_by_id, WeaponSpec};
use breacher_map::{template, MapState, TemplateError};

use crate::actor::{Activity, Actor, ActorStats};
use crate::objectives::ObjectiveState;
use crate::roster::Roster;
use crate::systems::pacing::{WaveEntry, WaveSchedule};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("map template: {0}")]
    Template(#[from] TemplateError),
    #[error("mission deploys no crew")]
    NoCrew,
    #[error("unknown weapon id '{0}'")]
    UnknownWeapon(String),
    #[error("spawn tile ({x}, {y}) is blocked, occupied, or out of bounds")]
    BadSpawn { x: i32, y: i32 },
    #[error("no free entry zone tile for '{0}'")]
    NoEntrySpace(String),
}

/// Everything the engine owns at tick zero.
pub struct BattleSetup {
    pub map: MapState,
    pub roster: Roster,
    pub schedule: WaveSchedule,
    pub objectives: Vec<ObjectiveState>,
}

pub fn build(mission: &MissionSpec) -> Result<BattleSetup, SetupError> {
    if mission.crew.is_empty() {
        return Err(SetupError::NoCrew);
    }
    let map = MapState::from_template(template::parse(&mission.map)?);
    let mut roster = Roster::new();

    for deployment in &mission.crew {
        let spawn = crew_spawn(&map, &roster, deployment)?;
        let weapon = weapon_by_id(&deployment.weapon)
            .ok_or_else(|| SetupError::UnknownWeapon(deployment.weapon.clone()))?;
        let id = roster.reserve_id();
        roster.add(crew_actor(id, deployment, weapon, spawn));
    }

    for spawn in &mission.enemies {
        if !map.is_walkable(spawn.spawn) {
            return Err(SetupError::BadSpawn {
                x: spawn.spawn.x,
                y: spawn.spawn.y,
            });
        }
    }
    for spawn in mission.enemies.iter().filter(|s| s.wave == 0) {
        if roster.cell_occupied(spawn.spawn) {
            return Err(SetupError::BadSpawn {
                x: spawn.spawn.x,
                y: spawn.spawn.y,
            });
        }
        spawn_enemy(&mut roster, spawn);
    }

    let schedule = build_schedule(mission);

    let mut objectives: Vec<ObjectiveState> = mission
        .objectives
        .iter()
        .cloned()
        .map(ObjectiveState::new)
        .collect();
    if !objectives.iter().any(|o| o.spec.primary) {
        objectives.push(ObjectiveState::new(ObjectiveSpec {
            kind: ObjectiveKind::EliminateAll,
            primary: true,
        }));
    }

    Ok(BattleSetup {
        map,
        roster,
        schedule,
        objectives,
    })
}

/// Explicit spawn tiles are validated; implicit deployments take entry
/// zone tiles in row-major order, skipping occupied ones.
fn crew_spawn(
    map: &MapState,
    roster: &Roster,
    deployment: &CrewDeployment,
) -> Result<GridPos, SetupError> {
    match deployment.spawn {
        Some(pos) => {
            if !map.is_walkable(pos) || roster.cell_occupied(pos) {
                return Err(SetupError::BadSpawn { x: pos.x, y: pos.y });
            }
            Ok(pos)
        }
        None => map
            .entry_zones()
            .into_iter()
            .find(|&pos| !roster.cell_occupied(pos))
            .ok_or_else(|| SetupError::NoEntrySpace(deployment.callsign.clone())),
    }
}

fn crew_actor(id: ActorId, deployment: &CrewDeployment, weapon: WeaponSpec, spawn: GridPos) -> Actor {
    Actor {
        id,
        callsign: deployment.callsign.clone(),
        side: Side::Crew,
        archetype: None,
        tag: None,
        tint: deployment.tint,
        pos: spawn,
        visual: Vec2::from_grid(spawn),
        spawn,
        hp: deployment.hp,
        max_hp: deployment.hp,
        armor: deployment.armor,
        condition: Condition::Alive,
        magazine: weapon.magazine,
        weapon,
        reserve_ammo: deployment.reserve_ammo,
        cooldown_ticks: 0,
        move_speed: deployment.move_speed,
        accuracy_bonus: deployment.accuracy_bonus,
        vision_radius: deployment.vision_radius,
        modifiers: ModifierSet::new(),
        effects: Vec::new(),
        overwatch: None,
        activity: Activity::Idle,
        combat_order: None,
        auto_defend: None,
        stats: ActorStats::default(),
    }
}

/// Place one enemy from its archetype profile. Used at setup for wave
/// zero and by the pacing system for later waves.
pub fn spawn_enemy(roster: &mut Roster, spawn: &EnemySpawn) {
    let profile = profiles::profile(spawn.archetype);
    let weapon =
        weapon_by_id(profile.weapon).expect("archetype weapon registered in the catalog");
    let side = match spawn.archetype {
        EnemyArchetype::WarDrone => Side::Drone,
        _ => Side::Enemy,
    };
    let id = roster.reserve_id();
    let callsign = format!("{:?}-{}", spawn.archetype, id.0).to_lowercase();
    roster.add(Actor {
        id,
        callsign,
        side,
        archetype: Some(spawn.archetype),
        tag: spawn.tag.clone(),
        tint: profile.tint,
        pos: spawn.spawn,
        visual: Vec2::from_grid(spawn.spawn),
        spawn: spawn.spawn,
        hp: profile.max_hp,
        max_hp: profile.max_hp,
        armor: profile.armor,
        condition: Condition::Alive,
        magazine: weapon.magazine,
        weapon,
        reserve_ammo: profile.reserve_ammo,
        cooldown_ticks: 0,
        move_speed: profile.move_speed,
        accuracy_bonus: profile.accuracy_bonus,
        vision_radius: profile.vision_radius,
        modifiers: ModifierSet::new(),
        effects: Vec::new(),
        overwatch: None,
        activity: Activity::Idle,
        combat_order: None,
        auto_defend: None,
        stats: ActorStats::default(),
    });
}

/// Group scheduled enemies by wave number. Waves without an explicit
/// rule default to the contact phase with an escalating delay.
fn build_schedule(mission: &MissionSpec) -> WaveSchedule {
    use breacher_core::constants::WAVE_INTERVAL_TICKS;
    use breacher_core::enums::BattlePhase;

    let mut waves: Vec<u32> = mission
        .enemies
        .iter()
        .map(|s| s.wave)
        .filter(|&w| w > 0)
        .collect();
    waves.sort_unstable();
    waves.dedup();

    let entries = waves
        .into_iter()
        .map(|wave| {
            let rule = mission.waves.iter().find(|r| r.wave == wave);
            let (phase, delay_ticks) = match rule {
                Some(rule) => (rule.phase, rule.delay_ticks),
                None => (BattlePhase::Contact, WAVE_INTERVAL_TICKS * wave as u64),
            };
            WaveEntry {
                wave,
                phase,
                delay_ticks,
                spawns: mission
                    .enemies
                    .iter()
                    .filter(|s| s.wave == wave)
                    .cloned()
                    .collect(),
                due_from: None,
                spawned: false,
            }
        })
        .collect();
    WaveSchedule { waves: entries }
}
