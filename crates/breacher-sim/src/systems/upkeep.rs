//! Start-of-tick expiry of timed effects and stat modifiers.

use crate::roster::Roster;

/// Drop effect instances and modifiers whose time has passed. Runs
/// before anything consults them, so an effect lasting until tick N
/// stops influencing the world exactly on tick N.
pub fn run(roster: &mut Roster, tick: u64) {
    for actor in roster.iter_mut() {
        actor.effects.retain(|e| e.until_tick > tick);
        actor.modifiers.expire(tick);
    }
}
