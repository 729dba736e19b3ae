//! Battle snapshot — the serializable view of one tick, for presentation
//! layers and determinism tests.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::CombatEvent;
use crate::types::{ActorId, GridPos, Rgb, SimTime, Vec2};

/// Complete observable battle state at one instant.
///
/// Crew actors always appear; other actors appear only while their tile
/// is visible to the crew.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub time: SimTime,
    pub phase: BattlePhase,
    pub mission_phase: MissionPhase,
    pub alarm: AlarmState,
    pub actors: Vec<ActorView>,
    pub objectives: Vec<ObjectiveView>,
    pub fog: FogSummary,
    /// Events since the last drain.
    pub events: Vec<CombatEvent>,
}

/// What one actor is doing, stripped of internal bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityView {
    #[default]
    Idle,
    Moving,
    Reloading,
    Channeling,
}

/// One visible actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorView {
    pub id: ActorId,
    pub callsign: String,
    pub side: Side,
    pub condition: Condition,
    /// Committed grid cell.
    pub pos: GridPos,
    /// Interpolated position for smooth display.
    pub visual: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub magazine: u32,
    pub reserve_ammo: u32,
    pub activity: ActivityView,
    pub overwatching: bool,
    pub suppressed: bool,
    pub stunned: bool,
    pub tint: Rgb,
}

/// One objective's progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveView {
    pub index: usize,
    pub primary: bool,
    pub status: ObjectiveStatus,
    pub label: String,
}

/// Fog of war tile counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FogSummary {
    pub visible: u32,
    pub revealed: u32,
    pub unknown: u32,
}
