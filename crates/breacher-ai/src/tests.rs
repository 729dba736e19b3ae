#[cfg(test)]
mod tests {
    use breacher_core::enums::{AlarmState, CoverHeight, DetectionState, EnemyArchetype};
    use breacher_core::types::{ActorId, GridPos};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::fsm::{decide, patrol_waypoint, Decision, EnemyContext, VisibleTarget};
    use crate::profiles::profile;

    fn make_context(archetype: EnemyArchetype) -> EnemyContext {
        EnemyContext {
            archetype,
            position: GridPos::new(5, 5),
            hp_frac: 1.0,
            magazine: 20,
            reserve: 40,
            suppressed: false,
            detection: DetectionState::Idle,
            last_known: None,
            alarm: AlarmState::Quiet,
            targets: Vec::new(),
        }
    }

    fn target(id: u32, pos: GridPos, distance: f64) -> VisibleTarget {
        VisibleTarget {
            id: ActorId(id),
            pos,
            distance,
            cover: CoverHeight::None,
        }
    }

    fn sighted(mut ctx: EnemyContext, t: VisibleTarget) -> EnemyContext {
        ctx.detection = DetectionState::Alerted;
        ctx.alarm = AlarmState::Alerted;
        ctx.last_known = Some(t.pos);
        ctx.targets.push(t);
        ctx
    }

    #[test]
    fn test_raider_closes_before_attacking() {
        // Beyond engage range, a healthy raider charges the target tile
        let pos = GridPos::new(11, 5);
        let ctx = sighted(make_context(EnemyArchetype::Raider), target(9, pos, 6.0));
        assert_eq!(decide(&ctx), Decision::MoveTo(pos));
    }

    #[test]
    fn test_raider_attacks_in_close() {
        let ctx = sighted(
            make_context(EnemyArchetype::Raider),
            target(9, GridPos::new(8, 5), 3.0),
        );
        assert_eq!(decide(&ctx), Decision::Attack(ActorId(9)));
    }

    #[test]
    fn test_raider_suppressed_does_not_charge() {
        // Pinned raiders fire from where they stand
        let mut ctx = sighted(
            make_context(EnemyArchetype::Raider),
            target(9, GridPos::new(11, 5), 6.0),
        );
        ctx.suppressed = true;
        assert_eq!(decide(&ctx), Decision::Attack(ActorId(9)));
    }

    #[test]
    fn test_raider_wounded_does_not_charge() {
        let mut ctx = sighted(
            make_context(EnemyArchetype::Raider),
            target(9, GridPos::new(11, 5), 6.0),
        );
        ctx.hp_frac = 0.2;
        assert_eq!(decide(&ctx), Decision::Attack(ActorId(9)));
    }

    #[test]
    fn test_heavy_suppresses_at_range() {
        // Beyond suppress range with rounds to spare, the heavy pins instead
        let ctx = sighted(
            make_context(EnemyArchetype::Heavy),
            target(3, GridPos::new(13, 5), 8.0),
        );
        assert_eq!(decide(&ctx), Decision::Suppress(ActorId(3)));
    }

    #[test]
    fn test_heavy_attacks_in_close() {
        let ctx = sighted(
            make_context(EnemyArchetype::Heavy),
            target(3, GridPos::new(9, 5), 4.0),
        );
        assert_eq!(decide(&ctx), Decision::Attack(ActorId(3)));
    }

    #[test]
    fn test_heavy_low_magazine_attacks() {
        // Not enough rounds left for a burst — aimed fire instead
        let mut ctx = sighted(
            make_context(EnemyArchetype::Heavy),
            target(3, GridPos::new(13, 5), 8.0),
        );
        ctx.magazine = 2;
        assert_eq!(decide(&ctx), Decision::Attack(ActorId(3)));
    }

    #[test]
    fn test_sentry_attacks_visible() {
        let ctx = sighted(
            make_context(EnemyArchetype::Sentry),
            target(7, GridPos::new(13, 5), 8.0),
        );
        assert_eq!(decide(&ctx), Decision::Attack(ActorId(7)));
    }

    #[test]
    fn test_sentry_overwatch_on_lost_contact() {
        // Alerted without a visible target, a sentry watches the sighting
        let mut ctx = make_context(EnemyArchetype::Sentry);
        ctx.detection = DetectionState::Alerted;
        ctx.alarm = AlarmState::Alerted;
        ctx.last_known = Some(GridPos::new(2, 9));
        assert_eq!(decide(&ctx), Decision::Overwatch(GridPos::new(2, 9)));
    }

    #[test]
    fn test_raider_hunts_last_known() {
        let mut ctx = make_context(EnemyArchetype::Raider);
        ctx.detection = DetectionState::Alerted;
        ctx.alarm = AlarmState::Alerted;
        ctx.last_known = Some(GridPos::new(2, 9));
        assert_eq!(decide(&ctx), Decision::MoveTo(GridPos::new(2, 9)));
    }

    #[test]
    fn test_suppressed_hunter_holds() {
        let mut ctx = make_context(EnemyArchetype::Raider);
        ctx.detection = DetectionState::Alerted;
        ctx.alarm = AlarmState::Alerted;
        ctx.last_known = Some(GridPos::new(2, 9));
        ctx.suppressed = true;
        assert_eq!(decide(&ctx), Decision::Hold);
    }

    #[test]
    fn test_reached_sighting_holds() {
        // Standing on the last-known tile with nothing in sight
        let mut ctx = make_context(EnemyArchetype::Raider);
        ctx.detection = DetectionState::Alerted;
        ctx.alarm = AlarmState::Alerted;
        ctx.last_known = Some(ctx.position);
        assert_eq!(decide(&ctx), Decision::Hold);
    }

    #[test]
    fn test_reload_when_dry() {
        // An empty magazine beats even a visible target
        let mut ctx = sighted(
            make_context(EnemyArchetype::Raider),
            target(9, GridPos::new(8, 5), 3.0),
        );
        ctx.magazine = 0;
        assert_eq!(decide(&ctx), Decision::Reload);
    }

    #[test]
    fn test_dry_with_no_reserve_holds() {
        let mut ctx = make_context(EnemyArchetype::Raider);
        ctx.magazine = 0;
        ctx.reserve = 0;
        assert_eq!(decide(&ctx), Decision::Hold);
    }

    #[test]
    fn test_idle_patrol_while_quiet() {
        let ctx = make_context(EnemyArchetype::Raider);
        assert_eq!(decide(&ctx), Decision::Patrol);
    }

    #[test]
    fn test_alarm_stops_patrol() {
        // Alarm raised elsewhere: still Idle itself, but stays at its post
        let mut ctx = make_context(EnemyArchetype::Raider);
        ctx.alarm = AlarmState::Alerted;
        assert_eq!(decide(&ctx), Decision::Hold);
    }

    #[test]
    fn test_static_archetypes_never_patrol() {
        assert_eq!(decide(&make_context(EnemyArchetype::Sentry)), Decision::Hold);
        assert_eq!(
            decide(&make_context(EnemyArchetype::WarDrone)),
            Decision::Hold
        );
    }

    #[test]
    fn test_nearest_target_wins() {
        let mut ctx = sighted(
            make_context(EnemyArchetype::WarDrone),
            target(4, GridPos::new(10, 5), 5.0),
        );
        ctx.targets.push(target(2, GridPos::new(8, 5), 3.0));
        assert_eq!(decide(&ctx), Decision::Attack(ActorId(2)));
    }

    #[test]
    fn test_equal_distance_prefers_exposed() {
        let mut ctx = sighted(
            make_context(EnemyArchetype::WarDrone),
            target(4, GridPos::new(10, 5), 4.0),
        );
        let mut covered = target(2, GridPos::new(5, 9), 4.0);
        covered.cover = CoverHeight::Half;
        ctx.targets.push(covered);
        assert_eq!(decide(&ctx), Decision::Attack(ActorId(4)));
    }

    #[test]
    fn test_full_tie_prefers_lower_id() {
        let mut ctx = sighted(
            make_context(EnemyArchetype::WarDrone),
            target(4, GridPos::new(10, 5), 4.0),
        );
        ctx.targets.push(target(2, GridPos::new(5, 9), 4.0));
        assert_eq!(decide(&ctx), Decision::Attack(ActorId(2)));
    }

    #[test]
    fn test_patrol_waypoint_stays_near_post() {
        let mut rng = StdRng::seed_from_u64(7);
        let spawn = GridPos::new(12, 12);
        for _ in 0..50 {
            let wp = patrol_waypoint(&mut rng, spawn, 4);
            assert!(
                wp.chebyshev_to(spawn) <= 4,
                "waypoint {:?} strayed past the patrol radius",
                wp
            );
        }
    }

    #[test]
    fn test_profiles_are_coherent() {
        // Every archetype must see at least as far as it wants to shoot from,
        // and suppression users must see past their suppress range
        let archetypes = [
            EnemyArchetype::Raider,
            EnemyArchetype::Sentry,
            EnemyArchetype::Heavy,
            EnemyArchetype::WarDrone,
        ];
        for archetype in archetypes {
            let p = profile(archetype);
            assert!(p.max_hp > 0, "{:?} should have positive hp", archetype);
            assert!(p.move_speed > 0.0, "{:?} should be able to move", archetype);
            assert!(
                p.vision_radius > p.suppress_range,
                "{:?} must see past its suppress range",
                archetype
            );
        }
    }
}
