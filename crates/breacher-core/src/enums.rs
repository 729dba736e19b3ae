//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Faction an actor fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Player-controlled boarding crew.
    Crew,
    /// Defending enemy personnel.
    Enemy,
    /// Autonomous station machines, hostile to everyone else.
    Drone,
}

/// Actor life state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[default]
    Alive,
    /// Incapacitated at 0 HP (crew only). Further damage kills.
    Down,
    Dead,
}

/// Height of a cover element, ordered from none to impassable sight block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CoverHeight {
    #[default]
    None,
    Low,
    Half,
    High,
    /// Blocks the shot entirely; attacks through it are disallowed.
    Full,
}

/// Static terrain classification of a tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Floor,
    Wall,
    /// Hull breach / open space. Not walkable, does not block sight.
    Void,
    /// Walkable-adjacent cover element of the given height. Not walkable itself.
    Cover(CoverHeight),
    /// Doorway cell; passability follows the door interactable on it.
    Door,
}

/// Battle pacing phase, strictly monotonic over a mission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BattlePhase {
    /// Deployment and initial spawn, before the first tick resolves.
    #[default]
    Setup,
    /// Quiet approach; nobody has fired and no alarm is up.
    Negotiation,
    /// First contact made; reinforcement waves begin arriving.
    Contact,
    /// Sustained assault phase.
    Pressure,
    /// Waves exhausted and resistance thinning.
    Resolution,
    /// Mission finished; the tick pipeline no longer runs.
    Complete,
}

/// Coarse mission lifecycle derived from [`BattlePhase`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionPhase {
    #[default]
    Setup,
    Active,
    Complete,
}

/// Per-tile fog of war state, from the crew's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    /// Never seen.
    #[default]
    Unknown,
    /// Seen earlier this mission, not currently in view.
    Revealed,
    /// In view of at least one living crew actor right now.
    Visible,
}

/// Individual enemy awareness of the crew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionState {
    #[default]
    Idle,
    /// Has seen or heard the crew; holds a last-known position.
    Alerted,
}

/// Mission-wide enemy awareness. Latches on and never resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmState {
    #[default]
    Quiet,
    Alerted,
}

/// Enemy archetype category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Close-range rusher, charges the nearest crew member.
    Raider,
    /// Static defender, accurate at range, uses overwatch.
    Sentry,
    /// Slow weapon platform, suppresses from long range.
    Heavy,
    /// Station defense machine, hostile to crew and enemy alike.
    WarDrone,
}

/// How a resolved shot was initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotKind {
    /// Deliberate fire from an attack order.
    Aimed,
    /// Automatic return fire at a remembered attacker.
    Defensive,
    /// Overwatch reaction fire at a mover.
    Reaction,
    /// Suppressive burst aimed at a target.
    Suppressive,
}

/// Timed status effect identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Pinned by incoming fire: halved movement, heavy accuracy penalty.
    Suppressed,
    /// Cannot act at all until the effect expires.
    Stunned,
    /// Combat stimulant: faster movement and fire, sharper aim.
    Stimmed,
}

/// Mission objective progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveStatus {
    #[default]
    Pending,
    InProgress,
    Complete,
    Failed,
}

/// Terminal result of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionOutcome {
    /// All primary objectives complete.
    Victory,
    /// Entire crew dead or down.
    Defeat,
    /// Crew withdrew through an entry zone.
    Retreat,
    /// Mission ended externally before resolution.
    Abort,
}

/// Post-mission crew member status for the campaign layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrewStatus {
    Alive,
    /// Survived below half health.
    Wounded,
    /// Went down during the mission; stabilized on extraction.
    Critical,
    Dead,
    /// Alive but left behind when the crew withdrew.
    Mia,
}

/// Lasting injury carried out of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Injury {
    /// Finished the mission below quarter health.
    FleshWound,
    /// Was downed during the mission.
    DeepWound,
}

impl Side {
    /// Every pairing of distinct sides is hostile; drones attack
    /// boarders and defenders alike.
    pub fn hostile_to(&self, other: Side) -> bool {
        *self != other
    }
}

impl BattlePhase {
    /// Coarse lifecycle bucket for external consumers.
    pub fn mission_phase(&self) -> MissionPhase {
        match self {
            BattlePhase::Setup => MissionPhase::Setup,
            BattlePhase::Complete => MissionPhase::Complete,
            _ => MissionPhase::Active,
        }
    }
}

impl EffectKind {
    /// Parse an effect name from ability data. Unknown names yield `None`
    /// and are ignored by the caster.
    pub fn from_name(name: &str) -> Option<EffectKind> {
        match name {
            "suppressed" => Some(EffectKind::Suppressed),
            "stunned" => Some(EffectKind::Stunned),
            "stimmed" => Some(EffectKind::Stimmed),
            _ => None,
        }
    }
}
