//! Enemy decision state machine.
//!
//! Pure functions that turn one enemy's view of the fight into a single
//! decision for the tick. No engine dependency — operates on plain data;
//! the sim applies decisions through the same order calls a player uses.

use breacher_core::constants::*;
use breacher_core::enums::{AlarmState, CoverHeight, DetectionState, EnemyArchetype};
use breacher_core::types::{ActorId, GridPos};
use rand::Rng;

use crate::profiles::profile;

/// One hostile the enemy can currently see.
pub struct VisibleTarget {
    pub id: ActorId,
    pub pos: GridPos,
    pub distance: f64,
    /// Cover the target enjoys against this perceiver.
    pub cover: CoverHeight,
}

/// Input to the decision function for a single enemy.
pub struct EnemyContext {
    pub archetype: EnemyArchetype,
    pub position: GridPos,
    pub hp_frac: f64,
    pub magazine: u32,
    pub reserve: u32,
    pub suppressed: bool,
    pub detection: DetectionState,
    pub last_known: Option<GridPos>,
    pub alarm: AlarmState,
    pub targets: Vec<VisibleTarget>,
}

/// What the enemy wants to do this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    Hold,
    /// Wander near the spawn post; the sim draws the waypoint.
    Patrol,
    MoveTo(GridPos),
    Attack(ActorId),
    Suppress(ActorId),
    Overwatch(GridPos),
    Reload,
}

/// Evaluate one enemy. Returns the decision for this tick.
pub fn decide(ctx: &EnemyContext) -> Decision {
    let profile = profile(ctx.archetype);

    // Dry magazine trumps everything else.
    if ctx.magazine == 0 {
        if ctx.reserve > 0 {
            return Decision::Reload;
        }
        return Decision::Hold;
    }

    if let Some(target) = nearest_target(ctx) {
        return engage(ctx, &profile, target);
    }

    if ctx.detection == DetectionState::Alerted {
        return hunt(ctx, &profile);
    }

    // Nothing seen or heard. Wander only while the station is quiet;
    // a raised alarm keeps everyone at their post.
    if ctx.alarm == AlarmState::Quiet && profile.patrol_radius > 0 {
        return Decision::Patrol;
    }
    Decision::Hold
}

fn engage(
    ctx: &EnemyContext,
    profile: &crate::profiles::ArchetypeProfile,
    target: &VisibleTarget,
) -> Decision {
    match ctx.archetype {
        EnemyArchetype::Raider => {
            // Close the gap before opening up. Suppressed or badly hurt
            // raiders fire from where they stand instead.
            if target.distance > profile.engage_range
                && !ctx.suppressed
                && ctx.hp_frac >= RAIDER_CHARGE_HP_FRAC
            {
                return Decision::MoveTo(target.pos);
            }
            Decision::Attack(target.id)
        }
        EnemyArchetype::Heavy => {
            if target.distance > profile.suppress_range && ctx.magazine >= SUPPRESS_AMMO_COST {
                return Decision::Suppress(target.id);
            }
            Decision::Attack(target.id)
        }
        EnemyArchetype::Sentry | EnemyArchetype::WarDrone => Decision::Attack(target.id),
    }
}

fn hunt(ctx: &EnemyContext, profile: &crate::profiles::ArchetypeProfile) -> Decision {
    let last_known = match ctx.last_known {
        Some(pos) => pos,
        None => return Decision::Hold,
    };

    // Sentries post up and watch the sighting instead of chasing it.
    if profile.uses_overwatch {
        return Decision::Overwatch(last_known);
    }
    if ctx.suppressed || last_known == ctx.position {
        return Decision::Hold;
    }
    Decision::MoveTo(last_known)
}

/// Nearest visible hostile. Ties go to the more exposed target, then the
/// lower actor id, so equal distances resolve the same way every run.
fn nearest_target(ctx: &EnemyContext) -> Option<&VisibleTarget> {
    ctx.targets.iter().min_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cover.cmp(&b.cover))
            .then(a.id.0.cmp(&b.id.0))
    })
}

/// Pick a wander waypoint near the spawn post. Always draws exactly two
/// offsets from the caller's stream; the sim validates walkability and
/// falls back to holding if the tile is bad.
pub fn patrol_waypoint<R: Rng>(rng: &mut R, spawn: GridPos, radius: i32) -> GridPos {
    let dx = rng.gen_range(-radius..=radius);
    let dy = rng.gen_range(-radius..=radius);
    spawn.offset(dx, dy)
}
