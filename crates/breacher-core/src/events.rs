//! Events emitted by the simulation for presentation and logging.
//!
//! The engine appends events to an internal buffer; consumers drain the
//! buffer between ticks. Running headless with nobody draining is fine.

use serde::{Deserialize, Serialize};

use crate::combat::AttackResult;
use crate::enums::*;
use crate::interact::{DoorState, InteractVerb};
use crate::types::{ActorId, GridPos, InteractableId};

/// Everything notable that happens during combat resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A shot was resolved, hit or miss.
    ShotResolved {
        attacker: ActorId,
        target: ActorId,
        kind: ShotKind,
        result: AttackResult,
    },
    /// An area suppression burst was laid on a tile.
    SuppressiveFire {
        attacker: ActorId,
        tile: GridPos,
        pinned: u32,
    },
    /// A crew actor dropped to 0 HP and is incapacitated.
    ActorDowned { actor: ActorId },
    /// An actor died. `by` carries kill credit when known.
    ActorKilled { actor: ActorId, by: Option<ActorId> },
    /// A status effect landed on an actor.
    EffectApplied { actor: ActorId, effect: EffectKind },
    ReloadStarted { actor: ActorId },
    ReloadCompleted { actor: ActorId },
    /// An ability left the caster's hand toward a tile.
    AbilityUsed {
        caster: ActorId,
        ability: String,
        at: GridPos,
    },
    /// A delayed ability went off.
    AbilityDetonated {
        ability: String,
        at: GridPos,
        affected: u32,
    },
    ChannelStarted {
        actor: ActorId,
        target: InteractableId,
        verb: InteractVerb,
    },
    ChannelCompleted {
        actor: ActorId,
        target: InteractableId,
        verb: InteractVerb,
    },
    /// A channel was broken by damage, a stun, or a new order.
    ChannelInterrupted {
        actor: ActorId,
        target: InteractableId,
    },
    DoorChanged {
        id: InteractableId,
        state: DoorState,
    },
    /// An armed hazard went off.
    HazardDetonated { id: InteractableId, at: GridPos },
    /// The mission-wide alarm latched on.
    AlarmRaised { tick: u64 },
    /// The battle advanced to a new pacing phase.
    PhaseChanged { phase: BattlePhase },
    /// A reinforcement wave arrived.
    WaveSpawned { wave: u32, count: u32 },
    /// An objective moved to a new status.
    ObjectiveChanged {
        index: usize,
        status: ObjectiveStatus,
    },
    /// The crew was ordered to withdraw.
    RetreatInitiated,
    /// The mission finished.
    MissionEnded { outcome: MissionOutcome },
}
