#[cfg(test)]
mod tests {
    use glam::DVec2;

    use crate::commands::{HelmInput, PlayerCommand};
    use crate::components::PilotState;
    use crate::enums::*;
    use crate::phase::{transition, PhaseEvent};
    use crate::ruleset::Ruleset;
    use crate::types::{forward, lateral, point_segment_distance_sq, RoundClock};
    use crate::upgrades::{self, UpgradeKind, MAX_TIER};

    fn test_pilot() -> PilotState {
        PilotState {
            hp: 100.0,
            max_hp: 100.0,
            shield_hp: 0.0,
            shield_regen_delay: 0.0,
            fuel: 340.0,
            max_fuel: 340.0,
            fuel_rate: 1.0,
            speed_value: 37.125,
            base_speed: 37.125,
            throttle_level: 0.0,
            boost_charge: 1.0,
            boost_timer: 0.0,
            hurdle_cooldown: 0.0,
            boost_unlocked: true,
            hurdle_unlocked: true,
            tap_clock: 0.0,
            last_left_tap: -10.0,
            last_right_tap: -10.0,
            level: 1,
            xp: 0.0,
            minigun_tier: 0,
            rockets_tier: None,
            laser_tier: None,
            emp_tier: None,
            mines_tier: None,
            shield_tier: None,
            health_tier: 0,
            tractor_tier: 0,
            thruster_tier: 0,
            upgrades_taken: 0,
            stats: Default::default(),
        }
    }

    // ---- Serde round trips ----

    #[test]
    fn test_phase_serde() {
        let variants = vec![
            GamePhase::Menu,
            GamePhase::Options,
            GamePhase::FittingBay,
            GamePhase::Cutscene,
            GamePhase::Play,
            GamePhase::LevelUp,
            GamePhase::Pause,
            GamePhase::Win,
            GamePhase::Extracted,
            GamePhase::Lose,
            GamePhase::Debrief,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: GamePhase = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_command_serde() {
        let cmd = PlayerCommand::SetHelm {
            helm: HelmInput {
                rotate: -1,
                throttle_up: true,
                aim_point: Some(DVec2::new(10.0, -4.0)),
                ..Default::default()
            },
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: PlayerCommand = serde_json::from_str(&json).unwrap();
        match back {
            PlayerCommand::SetHelm { helm } => {
                assert_eq!(helm.rotate, -1);
                assert!(helm.throttle_up);
            }
            other => panic!("unexpected command after round trip: {other:?}"),
        }
    }

    // ---- Geometry ----

    #[test]
    fn test_forward_frame() {
        // Angle zero faces "up" (0, -1); lateral-right is (1, 0).
        let f = forward(0.0);
        assert!((f.x - 0.0).abs() < 1e-12 && (f.y - -1.0).abs() < 1e-12);
        let l = lateral(0.0);
        assert!((l.x - 1.0).abs() < 1e-12 && (l.y - 0.0).abs() < 1e-12);
        // Forward stays perpendicular to lateral at any angle.
        let a = 1.234;
        assert!(forward(a).dot(lateral(a)).abs() < 1e-12);
    }

    #[test]
    fn test_point_segment_distance() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(10.0, 0.0);
        // Perpendicular drop inside the segment.
        assert!((point_segment_distance_sq(DVec2::new(5.0, 3.0), a, b) - 9.0).abs() < 1e-9);
        // Beyond the end cap the distance is to the endpoint.
        assert!((point_segment_distance_sq(DVec2::new(13.0, 4.0), a, b) - 25.0).abs() < 1e-9);
        // Degenerate zero-length segment.
        assert!((point_segment_distance_sq(DVec2::new(3.0, 4.0), a, a) - 25.0).abs() < 1e-9);
    }

    // ---- Round clock ----

    #[test]
    fn test_clock_invariant_and_completion() {
        let mut clock = RoundClock::new(900.0);
        let dt = 1.0 / 60.0;
        let mut completed = 0;
        while clock.elapsed < 1000.0 {
            if clock.advance(dt) {
                completed += 1;
            }
            if clock.remaining > 0.0 {
                assert!(
                    (clock.elapsed + clock.remaining - 900.0).abs() < 1e-6,
                    "elapsed + remaining must equal the round length"
                );
            }
        }
        assert!(completed >= 1, "clock must report completion");
        assert_eq!(clock.remaining, 0.0, "remaining never goes negative");
    }

    // ---- Phase machine ----

    #[test]
    fn test_phase_happy_path() {
        let mut p = GamePhase::Menu;
        for (event, expected) in [
            (PhaseEvent::StartRound, GamePhase::Cutscene),
            (PhaseEvent::IntroDone, GamePhase::Play),
            (PhaseEvent::LevelThreshold, GamePhase::LevelUp),
            (PhaseEvent::UpgradeChosen, GamePhase::Play),
            (PhaseEvent::Pause, GamePhase::Pause),
            (PhaseEvent::Resume, GamePhase::Play),
            (PhaseEvent::TimerExpired, GamePhase::Win),
            (PhaseEvent::ContinueToDebrief, GamePhase::Debrief),
            (PhaseEvent::ReturnToMenu, GamePhase::Menu),
        ] {
            p = transition(p, event);
            assert_eq!(p, expected, "after {event:?}");
        }
    }

    #[test]
    fn test_phase_invalid_events_are_inert() {
        assert_eq!(transition(GamePhase::Menu, PhaseEvent::Pause), GamePhase::Menu);
        assert_eq!(
            transition(GamePhase::Win, PhaseEvent::TimerExpired),
            GamePhase::Win
        );
        assert_eq!(
            transition(GamePhase::Cutscene, PhaseEvent::PlayerDied),
            GamePhase::Cutscene
        );
    }

    #[test]
    fn test_phase_terminal_outcomes() {
        assert_eq!(
            transition(GamePhase::Play, PhaseEvent::PlayerDied),
            GamePhase::Lose
        );
        assert_eq!(
            transition(GamePhase::Play, PhaseEvent::ExtractionComplete),
            GamePhase::Extracted
        );
        assert!(GamePhase::Extracted.is_terminal());
        assert!(!GamePhase::Pause.is_terminal());
    }

    // ---- XP curve ----

    #[test]
    fn test_xp_curve_monotonic() {
        let rules = Ruleset::default();
        assert!((rules.xp_to_next(1) - 90.0).abs() < 1e-9);
        let mut prev = 0.0;
        for level in 1..30 {
            let need = rules.xp_to_next(level);
            assert!(need > prev, "xp requirement must grow with level");
            prev = need;
        }
    }

    // ---- Upgrade catalog ----

    #[test]
    fn test_locked_weapons_gate_on_level() {
        let mut pilot = test_pilot();
        pilot.level = 1;
        let offered = upgrades::candidates(&pilot);
        assert!(!offered.contains(&UpgradeKind::Rockets));
        assert!(!offered.contains(&UpgradeKind::Laser));
        assert!(offered.contains(&UpgradeKind::Minigun));
        assert!(offered.contains(&UpgradeKind::Shield));

        pilot.level = 5;
        let offered = upgrades::candidates(&pilot);
        assert!(offered.contains(&UpgradeKind::Rockets));
        assert!(offered.contains(&UpgradeKind::Laser));
        assert!(!offered.contains(&UpgradeKind::Emp), "EMP gates at level 7");
    }

    #[test]
    fn test_maxed_upgrades_drop_out_of_offers() {
        let mut pilot = test_pilot();
        pilot.minigun_tier = MAX_TIER;
        assert!(!upgrades::candidates(&pilot).contains(&UpgradeKind::Minigun));
    }

    #[test]
    fn test_unlock_lands_on_tier_zero() {
        let mut pilot = test_pilot();
        pilot.level = 3;
        upgrades::apply(&mut pilot, UpgradeKind::Rockets);
        assert_eq!(pilot.rockets_tier, Some(0));
        upgrades::apply(&mut pilot, UpgradeKind::Rockets);
        assert_eq!(pilot.rockets_tier, Some(1));
    }

    #[test]
    fn test_shield_unlock_charges_then_upgrades_preserve_charge() {
        let mut pilot = test_pilot();
        upgrades::apply(&mut pilot, UpgradeKind::Shield);
        assert_eq!(pilot.shield_tier, Some(0));
        assert!((pilot.shield_hp - 50.0).abs() < 1e-9);

        pilot.shield_hp = 20.0;
        upgrades::apply(&mut pilot, UpgradeKind::Shield);
        assert_eq!(pilot.shield_tier, Some(1));
        assert!(
            (pilot.shield_hp - 20.0).abs() < 1e-9,
            "tier-up must not refill the shield"
        );
    }

    #[test]
    fn test_health_upgrade_raises_cap_and_heals() {
        let mut pilot = test_pilot();
        pilot.hp = 40.0;
        upgrades::apply(&mut pilot, UpgradeKind::Health);
        assert!((pilot.max_hp - 125.0).abs() < 1e-9);
        assert!((pilot.hp - 65.0).abs() < 1e-9);
    }

    #[test]
    fn test_thrusters_scale_from_base_speed() {
        let mut pilot = test_pilot();
        pilot.base_speed = 30.0;
        pilot.speed_value = 30.0;
        upgrades::apply(&mut pilot, UpgradeKind::Thrusters);
        assert!((pilot.speed_value - 32.25).abs() < 1e-9);
    }

    #[test]
    fn test_apply_at_max_tier_is_a_no_op() {
        let mut pilot = test_pilot();
        pilot.minigun_tier = MAX_TIER;
        let before = pilot.upgrades_taken;
        upgrades::apply(&mut pilot, UpgradeKind::Minigun);
        assert_eq!(pilot.minigun_tier, MAX_TIER);
        assert_eq!(pilot.upgrades_taken, before);
    }

    #[test]
    fn test_describe_covers_every_kind() {
        for kind in UpgradeKind::ALL {
            assert!(!kind.describe(Some(0)).is_empty());
            assert!(!kind.describe(None).is_empty());
        }
    }
}
