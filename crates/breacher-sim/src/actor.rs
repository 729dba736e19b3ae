//! Per-actor simulation state.
//!
//! Everything the pipeline needs to resolve one combatant lives here:
//! identity, position, health, the weapon copy, timed effects, and the
//! activity state machine. Systems mutate actors through the roster;
//! nothing in this module touches the map or other actors.

use breacher_core::enums::{Condition, EffectKind, EnemyArchetype, Side};
use breacher_core::modifiers::{ModifierSet, StatKind};
use breacher_core::types::{ActorId, Dir8, GridPos, InteractableId, Rgb, Vec2};
use breacher_core::weapons::WeaponSpec;

use breacher_core::interact::InteractVerb;

/// A timed status effect instance. The matching stat modifiers are
/// installed under `"effect:<name>"` sources and expire on their own;
/// this entry exists so systems can ask "is this actor suppressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    /// First tick on which the effect no longer applies.
    pub until_tick: u64,
}

/// An in-progress interactable channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChanneledAction {
    pub verb: InteractVerb,
    pub target: InteractableId,
    pub total_ticks: u32,
    pub elapsed_ticks: u32,
}

/// Exclusive activity state. An actor is always in exactly one.
#[derive(Debug, Clone, PartialEq)]
pub enum Activity {
    Idle,
    Moving {
        /// Remaining cells, start excluded, destination last.
        path: Vec<GridPos>,
        /// Index into `path` of the cell currently being entered.
        next: usize,
        /// Fraction of the current step completed, in tiles.
        progress: f64,
    },
    Reloading {
        ticks_left: u32,
    },
    Channeling(ChanneledAction),
}

impl Default for Activity {
    fn default() -> Self {
        Activity::Idle
    }
}

/// A standing fire directive, resolved once per weapon cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOrder {
    Attack(ActorId),
    Suppress(ActorId),
    SuppressArea(GridPos),
}

/// Overwatch stance: a watched cone and a shot budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverwatchState {
    pub facing: Dir8,
    pub cone_half_deg: f64,
    pub range: f64,
    pub shots_left: u32,
}

/// Running per-mission tallies, reported in the mission output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActorStats {
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub kills: u32,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    pub ammo_used: u32,
}

#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ActorId,
    pub callsign: String,
    pub side: Side,
    /// Set for enemy-side and drone actors, `None` for crew.
    pub archetype: Option<EnemyArchetype>,
    /// Mission tag for objective matching (e.g. an elimination target).
    pub tag: Option<String>,
    pub tint: Rgb,

    /// Committed grid cell. Authoritative for all rules checks.
    pub pos: GridPos,
    /// Interpolated display position between committed cells.
    pub visual: Vec2,
    /// Cell the actor entered the mission on; patrols anchor here.
    pub spawn: GridPos,

    pub hp: i32,
    pub max_hp: i32,
    pub armor: i32,
    pub condition: Condition,

    pub weapon: WeaponSpec,
    pub magazine: u32,
    pub reserve_ammo: u32,
    /// Ticks until the weapon may fire again.
    pub cooldown_ticks: u32,

    pub move_speed: f64,
    pub accuracy_bonus: f64,
    pub vision_radius: f64,

    pub modifiers: ModifierSet,
    pub effects: Vec<ActiveEffect>,

    pub overwatch: Option<OverwatchState>,
    pub activity: Activity,
    pub combat_order: Option<CombatOrder>,
    /// Most recent attacker, remembered for automatic return fire.
    pub auto_defend: Option<ActorId>,

    pub stats: ActorStats,
}

impl Actor {
    pub fn is_alive(&self) -> bool {
        self.condition == Condition::Alive
    }

    pub fn hp_frac(&self) -> f64 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        self.hp as f64 / self.max_hp as f64
    }

    pub fn has_effect(&self, kind: EffectKind, tick: u64) -> bool {
        self.effects
            .iter()
            .any(|e| e.kind == kind && e.until_tick > tick)
    }

    pub fn is_suppressed(&self, tick: u64) -> bool {
        self.has_effect(EffectKind::Suppressed, tick)
    }

    pub fn is_stunned(&self, tick: u64) -> bool {
        self.has_effect(EffectKind::Stunned, tick)
    }

    pub fn resolved_move_speed(&self, tick: u64) -> f64 {
        self.modifiers.resolve(StatKind::MoveSpeed, self.move_speed, tick)
    }

    /// Full accuracy stat: weapon accuracy plus the actor's bonus, with
    /// modifiers applied over the sum so penalties bite even when the
    /// bonus is zero.
    pub fn resolved_accuracy(&self, tick: u64) -> f64 {
        self.modifiers.resolve(
            StatKind::Accuracy,
            self.weapon.accuracy + self.accuracy_bonus,
            tick,
        )
    }

    pub fn resolved_vision(&self, tick: u64) -> f64 {
        self.modifiers
            .resolve(StatKind::VisionRadius, self.vision_radius, tick)
    }

    fn resolved_fire_rate(&self, tick: u64) -> f64 {
        self.modifiers
            .resolve(StatKind::FireRate, 1.0, tick)
            .max(0.01)
    }

    /// Weapon cooldown in ticks after firing, shortened by fire-rate
    /// modifiers. Never below one tick.
    pub fn scaled_cooldown(&self, tick: u64) -> u32 {
        let ticks = self.weapon.cooldown_ticks as f64 / self.resolved_fire_rate(tick);
        (ticks.round() as u32).max(1)
    }

    /// True when the actor could begin firing this tick: off cooldown,
    /// conscious, and not mid-reload or mid-channel.
    pub fn ready_to_fire(&self, tick: u64) -> bool {
        self.is_alive()
            && self.cooldown_ticks == 0
            && !self.is_stunned(tick)
            && !matches!(
                self.activity,
                Activity::Reloading { .. } | Activity::Channeling(_)
            )
    }

    /// Begin a reload. Callers are responsible for order cancellation;
    /// this only flips the activity.
    pub fn start_reload(&mut self) {
        self.activity = Activity::Reloading {
            ticks_left: self.weapon.reload_ticks,
        };
    }

    /// Drop every order and activity. Used when an actor goes down or
    /// receives a full stand-down.
    pub fn halt(&mut self) {
        self.activity = Activity::Idle;
        self.combat_order = None;
        self.auto_defend = None;
        self.overwatch = None;
    }
}
