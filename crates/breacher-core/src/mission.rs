//! Mission contracts: the input that describes a battle and the output
//! report handed back when it ends.
//!
//! Both sides of the contract are plain serde data so a campaign layer
//! (or a test) can round-trip them through JSON.

use serde::{Deserialize, Serialize};

use crate::enums::{BattlePhase, CrewStatus, EnemyArchetype, Injury, MissionOutcome, ObjectiveStatus};
use crate::types::{GridPos, Rgb};

/// Character-grid map description.
///
/// One string per row; every row is padded to the widest row (or the
/// explicit width) with void. Legend:
///
/// ```text
/// .  floor          #  wall          (space) void
/// E  entry zone     D  door (closed) L  door (locked)
/// T  terminal       X  hazard (armed)
/// -  low cover      =  half cover    +  high cover
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapTemplate {
    pub rows: Vec<String>,
    /// Explicit width; rows longer than it are an error.
    #[serde(default)]
    pub width: Option<u32>,
    /// Explicit height; more rows than it is an error.
    #[serde(default)]
    pub height: Option<u32>,
}

/// One crew member sent into the mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewDeployment {
    pub callsign: String,
    pub hp: i32,
    pub armor: i32,
    /// Movement speed in tiles per second.
    pub move_speed: f64,
    /// Flat accuracy bonus added to the weapon's base.
    pub accuracy_bonus: f64,
    /// Sight radius in tiles.
    pub vision_radius: f64,
    /// Weapon id from the catalog.
    pub weapon: String,
    /// Spare rounds beyond the loaded magazine.
    pub reserve_ammo: u32,
    /// Explicit spawn tile; defaults to the next free entry zone tile.
    #[serde(default)]
    pub spawn: Option<GridPos>,
    #[serde(default)]
    pub tint: Rgb,
}

/// One enemy placed by the mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub archetype: EnemyArchetype,
    pub spawn: GridPos,
    /// Marks this enemy for EliminateTarget objectives.
    #[serde(default)]
    pub tag: Option<String>,
    /// Wave this enemy arrives with. Wave 0 spawns at setup.
    #[serde(default)]
    pub wave: u32,
}

/// Timing rule for one reinforcement wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveRule {
    pub wave: u32,
    /// Earliest battle phase the wave may arrive in.
    pub phase: BattlePhase,
    /// Ticks after entering that phase before the wave is due.
    pub delay_ticks: u64,
}

/// What the crew must accomplish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ObjectiveKind {
    /// Kill every enemy, including unspawned waves.
    EliminateAll,
    /// Kill every enemy carrying a tag.
    EliminateTarget { tag: String },
    /// Put a living crew member on one of these tiles.
    ReachZone { tiles: Vec<GridPos> },
    /// Keep at least one crew member alive this long.
    SurviveTicks { ticks: u64 },
    /// Hack this many terminals.
    HackTerminals { count: u32 },
}

/// One mission objective. Victory requires every primary complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveSpec {
    #[serde(flatten)]
    pub kind: ObjectiveKind,
    pub primary: bool,
}

/// Complete description of one battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionSpec {
    pub name: String,
    pub map: MapTemplate,
    pub crew: Vec<CrewDeployment>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub waves: Vec<WaveRule>,
    #[serde(default)]
    pub objectives: Vec<ObjectiveSpec>,
    /// Seed for the battle's RNG stream.
    pub seed: u64,
    /// Free-form labels passed through to the output.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Post-mission report for one crew member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewReport {
    pub callsign: String,
    pub status: CrewStatus,
    pub hp: i32,
    pub max_hp: i32,
    pub kills: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    pub ammo_used: u32,
    pub ammo_remaining: u32,
    pub xp: u32,
    pub injuries: Vec<Injury>,
}

/// Final state of one objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveReport {
    #[serde(flatten)]
    pub kind: ObjectiveKind,
    pub primary: bool,
    pub status: ObjectiveStatus,
}

/// Aggregate battle statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionStats {
    pub enemies_killed: u32,
    pub enemies_remaining: u32,
    pub alarm_triggered: bool,
    pub ticks: u64,
    pub duration_secs: f64,
}

/// Everything handed back to the campaign layer when a mission ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionOutput {
    pub mission: String,
    pub outcome: MissionOutcome,
    pub crew: Vec<CrewReport>,
    pub objectives: Vec<ObjectiveReport>,
    pub stats: MissionStats,
    /// Recovered salvage; filled in by the campaign layer.
    pub loot: Vec<String>,
    /// Persistent world changes; filled in by the campaign layer.
    pub world_deltas: Vec<String>,
}
