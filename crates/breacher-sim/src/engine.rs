//! The combat engine: owns all battle state, runs the tick pipeline,
//! and exposes the order API.
//!
//! Systems run in a fixed order every tick:
//!
//!  0. pacing          — phase transitions, reinforcement waves
//!  1. upkeep          — effect and modifier expiry
//!  2. perception      — enemy detection, heard gunfire, the alarm
//!  3. enemy AI        — decisions, applied through the order API
//!  4. abilities       — cooldowns and delayed detonations
//!  5. interaction     — channel progress and completions
//!  6. attacks         — aimed fire, return fire, suppression
//!  7. movement claims — who may enter which cell
//!  8. advance         — countdowns, steps, overwatch reactions
//!  9. fog             — crew visibility recompute
//! 10. objectives      — win/loss evaluation
//!
//! Orders arrive between ticks. Illegal orders are logged and dropped;
//! once the mission is complete every order is ignored outright.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use breacher_ai::fsm::Decision;
use breacher_ai::profiles;
use breacher_core::abilities::ability_by_id;
use breacher_core::combat::DamageRules;
use breacher_core::constants::{OVERWATCH_CHARGES, OVERWATCH_CONE_HALF_DEG};
use breacher_core::enums::{
    AlarmState, BattlePhase, MissionOutcome, Side, Visibility,
};
use breacher_core::events::CombatEvent;
use breacher_core::interact::{DoorState, InteractVerb, InteractableKind};
use breacher_core::mission::{MissionOutput, MissionSpec};
use breacher_core::state::{ActivityView, ActorView, BattleSnapshot, ObjectiveView};
use breacher_core::types::{ActorId, Dir8, GridPos, InteractableId, SimTime};
use breacher_map::{path, MapState};

use crate::actor::{Activity, ChanneledAction, CombatOrder, OverwatchState};
use crate::objectives::{self, ObjectiveState};
use crate::output;
use crate::roster::Roster;
use crate::setup::{self, SetupError};
use crate::systems;
use crate::systems::abilities::AbilityTracker;
use crate::systems::damage;
use crate::systems::pacing::WaveSchedule;
use crate::systems::perception::PerceptionBoard;
use crate::systems::visibility::FogGrid;
use crate::time::TimeSystem;

/// Rule and clock knobs for one battle.
#[derive(Debug, Clone)]
pub struct BattleConfig {
    pub rules: DamageRules,
    pub time_scale: f64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            rules: DamageRules::default(),
            time_scale: 1.0,
        }
    }
}

pub struct CombatState {
    mission_name: String,
    rules: DamageRules,
    time: TimeSystem,
    phase: BattlePhase,
    phase_entered_tick: u64,
    alarm: AlarmState,
    map: MapState,
    roster: Roster,
    rng: ChaCha8Rng,
    fog: FogGrid,
    perception: PerceptionBoard,
    abilities: AbilityTracker,
    schedule: WaveSchedule,
    objectives: Vec<ObjectiveState>,
    events: Vec<CombatEvent>,
    /// Shots fired this tick; perception hears them next tick.
    noise: Vec<(ActorId, GridPos)>,
    last_noise: Vec<(ActorId, GridPos)>,
    /// Latched once any shot has been fired.
    shot_fired: bool,
    retreat_initiated: bool,
    output: Option<MissionOutput>,
}

impl CombatState {
    pub fn new(mission: &MissionSpec, config: BattleConfig) -> Result<Self, SetupError> {
        let built = setup::build(mission)?;
        let mut fog = FogGrid::new(built.map.width(), built.map.height());
        systems::visibility::run(&mut fog, &built.roster, &built.map, 0);
        info!(
            mission = %mission.name,
            crew = mission.crew.len(),
            enemies = mission.enemies.len(),
            seed = mission.seed,
            "mission start"
        );
        Ok(Self {
            mission_name: mission.name.clone(),
            rules: config.rules,
            time: TimeSystem::new(config.time_scale),
            phase: BattlePhase::Setup,
            phase_entered_tick: 0,
            alarm: AlarmState::Quiet,
            map: built.map,
            roster: built.roster,
            rng: ChaCha8Rng::seed_from_u64(mission.seed),
            fog,
            perception: PerceptionBoard::default(),
            abilities: AbilityTracker::default(),
            schedule: built.schedule,
            objectives: built.objectives,
            events: Vec::new(),
            noise: Vec::new(),
            last_noise: Vec::new(),
            shot_fired: false,
            retreat_initiated: false,
            output: None,
        })
    }

    /// Feed wall-clock time; resolves however many whole ticks it buys.
    /// Returns the number of ticks resolved.
    pub fn advance(&mut self, dt: f64) -> u32 {
        let ticks = self.time.update(dt);
        for _ in 0..ticks {
            self.tick();
        }
        ticks
    }

    /// Resolve exactly one tick, ignoring the wall clock.
    pub fn step(&mut self) {
        self.tick();
    }

    fn tick(&mut self) {
        if self.phase == BattlePhase::Complete {
            return;
        }
        let tick = self.time.tick();

        systems::pacing::run(
            &mut self.phase,
            &mut self.phase_entered_tick,
            &mut self.schedule,
            &mut self.roster,
            &self.map,
            &self.fog,
            self.alarm,
            self.shot_fired,
            &mut self.events,
            tick,
        );
        systems::upkeep::run(&mut self.roster, tick);

        let heard = std::mem::take(&mut self.last_noise);
        systems::perception::run(
            &self.roster,
            &self.map,
            &mut self.perception,
            &mut self.alarm,
            &heard,
            &mut self.events,
            tick,
        );

        let decisions =
            systems::enemy_ai::collect(&self.roster, &self.map, &self.perception, self.alarm, tick);
        self.apply_decisions(decisions);

        systems::abilities::run(
            &mut self.abilities,
            &mut self.roster,
            &mut self.map,
            &self.rules,
            &mut self.events,
            tick,
        );
        systems::interaction::run(
            &mut self.roster,
            &mut self.map,
            &self.rules,
            &mut self.events,
            tick,
        );
        systems::attack::run(
            &mut self.roster,
            &mut self.map,
            &self.rules,
            &mut self.rng,
            &mut self.events,
            &mut self.noise,
            tick,
        );
        systems::suppression::run(
            &mut self.roster,
            &mut self.map,
            &self.rules,
            &mut self.rng,
            &mut self.events,
            &mut self.noise,
            tick,
        );

        let commits = systems::movement::resolve_claims(&mut self.roster, &self.map, tick);
        systems::movement::run(
            &mut self.roster,
            &mut self.map,
            &commits,
            &self.rules,
            &mut self.rng,
            &mut self.events,
            &mut self.noise,
            tick,
        );

        systems::visibility::run(&mut self.fog, &self.roster, &self.map, tick);

        if let Some(outcome) = objectives::evaluate(
            &mut self.objectives,
            &self.roster,
            &self.map,
            &self.schedule,
            self.retreat_initiated,
            &mut self.events,
            tick,
        ) {
            self.finalize(outcome);
        }

        self.last_noise = std::mem::take(&mut self.noise);
        if !self.last_noise.is_empty() {
            self.shot_fired = true;
        }
        self.time.advance_tick();
    }

    /// Route enemy decisions through the order API. Standing state is
    /// left alone when the decision would merely re-issue it, so a
    /// repeated intent never resets progress.
    fn apply_decisions(&mut self, decisions: Vec<(ActorId, Decision)>) {
        for (id, decision) in decisions {
            match decision {
                Decision::Hold => {}
                Decision::Patrol => self.apply_patrol(id),
                Decision::MoveTo(dest) => {
                    let already = self.roster.get(id).is_some_and(|a| match &a.activity {
                        Activity::Moving { path, .. } => path.last() == Some(&dest),
                        _ => false,
                    });
                    if !already {
                        self.order_move(id, dest);
                    }
                }
                Decision::Attack(target) => {
                    let already = self
                        .roster
                        .get(id)
                        .is_some_and(|a| a.combat_order == Some(CombatOrder::Attack(target)));
                    if !already {
                        self.order_attack(id, target);
                    }
                }
                Decision::Suppress(target) => {
                    let already = self
                        .roster
                        .get(id)
                        .is_some_and(|a| a.combat_order == Some(CombatOrder::Suppress(target)));
                    if !already {
                        self.order_suppress(id, target);
                    }
                }
                Decision::Overwatch(point) => {
                    let standing = self.roster.get(id).is_some_and(|a| a.overwatch.is_some());
                    if !standing {
                        self.order_overwatch(id, point);
                    }
                }
                Decision::Reload => {
                    let reloading = self
                        .roster
                        .get(id)
                        .is_some_and(|a| matches!(a.activity, Activity::Reloading { .. }));
                    if !reloading {
                        self.order_reload(id);
                    }
                }
            }
        }
    }

    /// Draw a patrol waypoint from the battle RNG and walk there. An
    /// unusable draw is simply skipped; the enemy tries again next tick.
    fn apply_patrol(&mut self, id: ActorId) {
        let (pos, spawn, archetype, moving) = match self.roster.get(id) {
            Some(a) => (
                a.pos,
                a.spawn,
                a.archetype,
                matches!(a.activity, Activity::Moving { .. }),
            ),
            None => return,
        };
        if moving {
            return;
        }
        let archetype = match archetype {
            Some(archetype) => archetype,
            None => return,
        };
        let radius = profiles::profile(archetype).patrol_radius;
        if radius <= 0 {
            return;
        }
        let waypoint = breacher_ai::fsm::patrol_waypoint(&mut self.rng, spawn, radius);
        if waypoint == pos || !self.map.is_walkable(waypoint) {
            return;
        }
        self.order_move(id, waypoint);
    }

    // --- Order API ---

    pub fn order_move(&mut self, actor: ActorId, dest: GridPos) {
        if self.phase == BattlePhase::Complete {
            return;
        }
        let start = match self.roster.get(actor) {
            Some(a) if a.is_alive() => a.pos,
            _ => {
                debug!(actor = actor.0, "move order for missing or dead actor");
                return;
            }
        };
        if start == dest {
            debug!(actor = actor.0, "move order to current cell ignored");
            return;
        }
        let route = match path::find_path(&self.map, start, dest) {
            Some(route) if !route.is_empty() => route,
            _ => {
                debug!(actor = actor.0, x = dest.x, y = dest.y, "no path to destination");
                return;
            }
        };
        let (roster, map, events) = (&mut self.roster, &mut self.map, &mut self.events);
        if let Some(a) = roster.get_mut(actor) {
            damage::interrupt_channel(a, map, events);
            a.overwatch = None;
            a.activity = Activity::Moving {
                path: route,
                next: 0,
                progress: 0.0,
            };
        }
    }

    pub fn order_attack(&mut self, actor: ActorId, target: ActorId) {
        self.issue_combat_order(actor, target, CombatOrder::Attack(target));
    }

    pub fn order_suppress(&mut self, actor: ActorId, target: ActorId) {
        self.issue_combat_order(actor, target, CombatOrder::Suppress(target));
    }

    fn issue_combat_order(&mut self, actor: ActorId, target: ActorId, order: CombatOrder) {
        if self.phase == BattlePhase::Complete {
            return;
        }
        if actor == target || self.roster.get(target).map_or(true, |t| !t.is_alive()) {
            debug!(
                actor = actor.0,
                target = target.0,
                "fire order against missing, dead, or own id dropped"
            );
            return;
        }
        let (roster, map, events) = (&mut self.roster, &mut self.map, &mut self.events);
        match roster.get_mut(actor) {
            Some(a) if a.is_alive() => {
                damage::interrupt_channel(a, map, events);
                if matches!(a.activity, Activity::Reloading { .. }) {
                    a.activity = Activity::Idle;
                }
                a.overwatch = None;
                a.combat_order = Some(order);
            }
            _ => debug!(actor = actor.0, "fire order for missing or dead actor"),
        }
    }

    pub fn order_suppress_area(&mut self, actor: ActorId, tile: GridPos) {
        if self.phase == BattlePhase::Complete {
            return;
        }
        if !self.map.in_bounds(tile) {
            debug!(actor = actor.0, x = tile.x, y = tile.y, "suppression tile out of bounds");
            return;
        }
        let (roster, map, events) = (&mut self.roster, &mut self.map, &mut self.events);
        match roster.get_mut(actor) {
            Some(a) if a.is_alive() => {
                damage::interrupt_channel(a, map, events);
                if matches!(a.activity, Activity::Reloading { .. }) {
                    a.activity = Activity::Idle;
                }
                a.overwatch = None;
                a.combat_order = Some(CombatOrder::SuppressArea(tile));
            }
            _ => debug!(actor = actor.0, "fire order for missing or dead actor"),
        }
    }

    pub fn order_reload(&mut self, actor: ActorId) {
        if self.phase == BattlePhase::Complete {
            return;
        }
        let (roster, map, events) = (&mut self.roster, &mut self.map, &mut self.events);
        let a = match roster.get_mut(actor) {
            Some(a) if a.is_alive() => a,
            _ => {
                debug!(actor = actor.0, "reload order for missing or dead actor");
                return;
            }
        };
        if matches!(a.activity, Activity::Reloading { .. }) {
            debug!(actor = actor.0, "already reloading");
            return;
        }
        if a.magazine >= a.weapon.magazine {
            debug!(actor = actor.0, "magazine already full");
            return;
        }
        if a.reserve_ammo == 0 {
            debug!(actor = actor.0, "no reserve ammo");
            return;
        }
        damage::interrupt_channel(a, map, events);
        a.overwatch = None;
        a.start_reload();
        events.push(CombatEvent::ReloadStarted { actor: a.id });
    }

    pub fn order_overwatch(&mut self, actor: ActorId, watch_point: GridPos) {
        if self.phase == BattlePhase::Complete {
            return;
        }
        let tick = self.time.tick();
        let (roster, map, events) = (&mut self.roster, &mut self.map, &mut self.events);
        let a = match roster.get_mut(actor) {
            Some(a) if a.is_alive() => a,
            _ => {
                debug!(actor = actor.0, "overwatch order for missing or dead actor");
                return;
            }
        };
        if a.is_stunned(tick) || a.is_suppressed(tick) {
            debug!(actor = actor.0, "cannot set overwatch while stunned or suppressed");
            return;
        }
        if a.magazine == 0 {
            debug!(actor = actor.0, "cannot set overwatch with an empty magazine");
            return;
        }
        damage::interrupt_channel(a, map, events);
        a.activity = Activity::Idle;
        a.overwatch = Some(OverwatchState {
            facing: Dir8::toward(a.pos, watch_point),
            cone_half_deg: OVERWATCH_CONE_HALF_DEG,
            range: a.weapon.range,
            shots_left: OVERWATCH_CHARGES,
        });
    }

    pub fn order_ability(&mut self, actor: ActorId, ability: &str, at: GridPos) {
        if self.phase == BattlePhase::Complete {
            return;
        }
        let spec = match ability_by_id(ability) {
            Some(spec) => spec,
            None => {
                warn!(ability, "unknown ability id");
                return;
            }
        };
        let tick = self.time.tick();
        let caster_pos = match self.roster.get(actor) {
            Some(a) if a.is_alive() && !a.is_stunned(tick) => a.pos,
            _ => {
                debug!(actor = actor.0, "ability order for unavailable actor");
                return;
            }
        };
        if !self.abilities.ready(actor, &spec.id) {
            debug!(actor = actor.0, ability = %spec.id, "ability on cooldown");
            return;
        }
        if caster_pos.distance_to(at) > spec.range {
            debug!(actor = actor.0, ability = %spec.id, "ability target out of range");
            return;
        }
        {
            let (roster, map, events) = (&mut self.roster, &mut self.map, &mut self.events);
            if let Some(a) = roster.get_mut(actor) {
                damage::interrupt_channel(a, map, events);
                a.activity = Activity::Idle;
                a.combat_order = None;
                a.overwatch = None;
            }
        }
        systems::abilities::launch(
            &mut self.abilities,
            &mut self.roster,
            &mut self.map,
            &self.rules,
            &mut self.events,
            actor,
            spec,
            at,
            tick,
        );
    }

    pub fn order_interact(&mut self, actor: ActorId, target: InteractableId, verb: InteractVerb) {
        if self.phase == BattlePhase::Complete {
            return;
        }
        let tick = self.time.tick();
        let (target_pos, busy, allowed, channel_ticks) = match self.map.interactable(target) {
            Some(it) => (
                it.pos,
                it.is_busy(),
                it.available_verbs().contains(&verb),
                it.channel_ticks(verb),
            ),
            None => {
                debug!(actor = actor.0, "interact order for missing interactable");
                return;
            }
        };
        let actor_pos = match self.roster.get(actor) {
            Some(a) if a.is_alive() && !a.is_stunned(tick) => a.pos,
            _ => {
                debug!(actor = actor.0, "interact order for unavailable actor");
                return;
            }
        };
        if actor_pos.chebyshev_to(target_pos) > 1 {
            debug!(actor = actor.0, "interactable out of reach");
            return;
        }
        if busy {
            debug!(actor = actor.0, "interactable already being worked");
            return;
        }
        if !allowed {
            debug!(actor = actor.0, ?verb, "verb not available in current state");
            return;
        }

        {
            let (roster, map, events) = (&mut self.roster, &mut self.map, &mut self.events);
            if let Some(a) = roster.get_mut(actor) {
                damage::interrupt_channel(a, map, events);
                a.activity = Activity::Idle;
                a.overwatch = None;
            }
        }

        match channel_ticks {
            None => self.instant_interact(target, verb),
            Some(total_ticks) => {
                if let Some(a) = self.roster.get_mut(actor) {
                    a.activity = Activity::Channeling(ChanneledAction {
                        verb,
                        target,
                        total_ticks,
                        elapsed_ticks: 0,
                    });
                }
                if let Some(it) = self.map.interactable_mut(target) {
                    it.channeler = Some(actor);
                }
                self.events.push(CombatEvent::ChannelStarted {
                    actor,
                    target,
                    verb,
                });
            }
        }
    }

    /// Doors open and close without a channel.
    fn instant_interact(&mut self, target: InteractableId, verb: InteractVerb) {
        let it = match self.map.interactable_mut(target) {
            Some(it) => it,
            None => return,
        };
        let state = match (it.kind, verb) {
            (InteractableKind::Door(DoorState::Closed), InteractVerb::Open) => DoorState::Open,
            (InteractableKind::Door(DoorState::Open), InteractVerb::Close) => DoorState::Closed,
            _ => return,
        };
        it.kind = InteractableKind::Door(state);
        self.events.push(CombatEvent::DoorChanged { id: target, state });
    }

    /// Full stand-down: drop every order, stance, and activity.
    pub fn cancel_orders(&mut self, actor: ActorId) {
        if self.phase == BattlePhase::Complete {
            return;
        }
        let (roster, map, events) = (&mut self.roster, &mut self.map, &mut self.events);
        match roster.get_mut(actor) {
            Some(a) if a.is_alive() => {
                damage::interrupt_channel(a, map, events);
                a.halt();
            }
            _ => debug!(actor = actor.0, "cancel for missing or dead actor"),
        }
    }

    /// Flag the withdrawal. The mission ends in retreat once every
    /// living crew member stands on an entry zone tile.
    pub fn initiate_retreat(&mut self) {
        if self.phase == BattlePhase::Complete || self.retreat_initiated {
            return;
        }
        self.retreat_initiated = true;
        self.events.push(CombatEvent::RetreatInitiated);
        info!("crew withdrawal initiated");
    }

    /// End the mission right now, from outside.
    pub fn abort_mission(&mut self) {
        if self.phase == BattlePhase::Complete {
            return;
        }
        self.finalize(MissionOutcome::Abort);
    }

    fn finalize(&mut self, outcome: MissionOutcome) {
        objectives::finalize(&mut self.objectives, outcome, &mut self.events);
        self.phase = BattlePhase::Complete;
        self.time.pause();
        self.events.push(CombatEvent::MissionEnded { outcome });
        info!(?outcome, ticks = self.time.tick(), "mission ended");
        self.output = Some(output::build(
            &self.mission_name,
            outcome,
            &self.roster,
            &self.objectives,
            &self.map,
            &self.schedule,
            self.alarm == AlarmState::Alerted,
            self.time.time(),
        ));
    }

    // --- Views and controls ---

    /// Serializable view of the battle. Non-crew actors appear only on
    /// tiles the crew can currently see. Drains the event buffer.
    pub fn snapshot(&mut self) -> BattleSnapshot {
        let tick = self.time.tick();
        let mut actors = Vec::new();
        for actor in self.roster.iter() {
            if actor.side != Side::Crew && self.fog.get(actor.pos) != Visibility::Visible {
                continue;
            }
            actors.push(ActorView {
                id: actor.id,
                callsign: actor.callsign.clone(),
                side: actor.side,
                condition: actor.condition,
                pos: actor.pos,
                visual: actor.visual,
                hp: actor.hp,
                max_hp: actor.max_hp,
                magazine: actor.magazine,
                reserve_ammo: actor.reserve_ammo,
                activity: match &actor.activity {
                    Activity::Idle => ActivityView::Idle,
                    Activity::Moving { .. } => ActivityView::Moving,
                    Activity::Reloading { .. } => ActivityView::Reloading,
                    Activity::Channeling(_) => ActivityView::Channeling,
                },
                overwatching: actor.overwatch.is_some(),
                suppressed: actor.is_suppressed(tick),
                stunned: actor.is_stunned(tick),
                tint: actor.tint,
            });
        }
        let objectives = self
            .objectives
            .iter()
            .enumerate()
            .map(|(index, o)| ObjectiveView {
                index,
                primary: o.spec.primary,
                status: o.status,
                label: objectives::label(&o.spec.kind),
            })
            .collect();
        BattleSnapshot {
            time: self.time.time(),
            phase: self.phase,
            mission_phase: self.phase.mission_phase(),
            alarm: self.alarm,
            actors,
            objectives,
            fog: self.fog.summary(),
            events: std::mem::take(&mut self.events),
        }
    }

    /// Drain buffered events without building a snapshot.
    pub fn take_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Order-insensitive digest of the committed battle state, for
    /// determinism checks across runs.
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.time.tick().hash(&mut hasher);
        (self.phase as u8).hash(&mut hasher);
        (self.alarm as u8).hash(&mut hasher);
        self.retreat_initiated.hash(&mut hasher);
        for actor in self.roster.iter() {
            actor.id.0.hash(&mut hasher);
            actor.pos.x.hash(&mut hasher);
            actor.pos.y.hash(&mut hasher);
            actor.hp.hash(&mut hasher);
            (actor.condition as u8).hash(&mut hasher);
            actor.magazine.hash(&mut hasher);
            actor.reserve_ammo.hash(&mut hasher);
            actor.cooldown_ticks.hash(&mut hasher);
        }
        for objective in &self.objectives {
            (objective.status as u8).hash(&mut hasher);
        }
        hasher.finish()
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn alarm(&self) -> AlarmState {
        self.alarm
    }

    pub fn time(&self) -> SimTime {
        self.time.time()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == BattlePhase::Complete
    }

    /// Final report; present once the mission has ended.
    pub fn mission_output(&self) -> Option<&MissionOutput> {
        self.output.as_ref()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn map(&self) -> &MapState {
        &self.map
    }

    pub fn pause(&mut self) {
        self.time.pause();
    }

    pub fn resume(&mut self) {
        if self.phase != BattlePhase::Complete {
            self.time.resume();
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.phase != BattlePhase::Complete {
            self.time.toggle_pause();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.time.is_paused()
    }

    pub fn set_time_scale(&mut self, scale: f64) {
        self.time.set_time_scale(scale);
    }
}
