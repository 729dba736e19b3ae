//! Map interactables: doors, terminals, and hazards.
//!
//! Each interactable is a small state machine advanced only by completed
//! interactions (or a blast, for hazards). The verbs an actor may use are
//! a function of the current state.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::{GridPos, InteractableId};

/// Door lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorState {
    Open,
    #[default]
    Closed,
    /// Requires a hack channel to open; cannot be closed again.
    Locked,
}

/// Terminal lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalState {
    #[default]
    Idle,
    Hacked,
}

/// Hazard lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardState {
    #[default]
    Armed,
    /// Detonated; inert from here on.
    Triggered,
    /// Defused; inert from here on.
    Disabled,
}

/// Interactable kind with its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractableKind {
    Door(DoorState),
    Terminal(TerminalState),
    Hazard(HazardState),
}

/// Action an actor can take on an interactable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractVerb {
    /// Instant: open a closed door.
    Open,
    /// Instant: close an open door.
    Close,
    /// Channel: unlock a locked door or take over a terminal.
    Hack,
    /// Channel: defuse an armed hazard.
    Disable,
    /// Channel: set off an armed hazard deliberately.
    Trigger,
}

/// One interactable placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interactable {
    pub id: InteractableId,
    pub pos: GridPos,
    pub kind: InteractableKind,
    /// Actor currently channeling on this interactable, if any.
    /// Only one channel may run at a time.
    pub channeler: Option<crate::types::ActorId>,
}

impl Interactable {
    pub fn new(id: InteractableId, pos: GridPos, kind: InteractableKind) -> Self {
        Self {
            id,
            pos,
            kind,
            channeler: None,
        }
    }

    /// Whether actors can walk through this interactable's tile.
    pub fn blocks_movement(&self) -> bool {
        match self.kind {
            InteractableKind::Door(DoorState::Open) => false,
            InteractableKind::Door(_) => true,
            InteractableKind::Terminal(_) => true,
            InteractableKind::Hazard(_) => false,
        }
    }

    /// Whether this interactable blocks line of sight across its tile.
    /// Terminals are waist-high consoles; hazards sit on the deck.
    pub fn blocks_sight(&self) -> bool {
        matches!(
            self.kind,
            InteractableKind::Door(DoorState::Closed) | InteractableKind::Door(DoorState::Locked)
        )
    }

    /// Verbs legal in the current state.
    pub fn available_verbs(&self) -> Vec<InteractVerb> {
        match self.kind {
            InteractableKind::Door(DoorState::Open) => vec![InteractVerb::Close],
            InteractableKind::Door(DoorState::Closed) => vec![InteractVerb::Open],
            InteractableKind::Door(DoorState::Locked) => vec![InteractVerb::Hack],
            InteractableKind::Terminal(TerminalState::Idle) => vec![InteractVerb::Hack],
            InteractableKind::Terminal(TerminalState::Hacked) => vec![],
            InteractableKind::Hazard(HazardState::Armed) => {
                vec![InteractVerb::Disable, InteractVerb::Trigger]
            }
            InteractableKind::Hazard(_) => vec![],
        }
    }

    /// Channel duration for a verb on this interactable. `None` means the
    /// verb resolves instantly.
    pub fn channel_ticks(&self, verb: InteractVerb) -> Option<u32> {
        match (self.kind, verb) {
            (InteractableKind::Door(_), InteractVerb::Hack) => Some(CHANNEL_DOOR_HACK_TICKS),
            (InteractableKind::Terminal(_), InteractVerb::Hack) => {
                Some(CHANNEL_TERMINAL_HACK_TICKS)
            }
            (InteractableKind::Hazard(_), InteractVerb::Disable) => {
                Some(CHANNEL_HAZARD_DISABLE_TICKS)
            }
            (InteractableKind::Hazard(_), InteractVerb::Trigger) => {
                Some(CHANNEL_HAZARD_TRIGGER_TICKS)
            }
            _ => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.channeler.is_some()
    }
}
