#[cfg(test)]
mod tests {
    use glam::DVec2;

    use outrider_core::enums::{Behavior, EnemyArchetype};

    use crate::profiles::{boss_profile, get_profile};
    use crate::steer::{steer, SteerContext};

    fn ctx(behavior: Behavior) -> SteerContext {
        SteerContext {
            behavior,
            speed: 20.0,
            sides: 4,
            preferred_range: 240.0,
            phase_clock: 0.0,
            position: DVec2::new(100.0, 0.0),
            player: DVec2::ZERO,
        }
    }

    #[test]
    fn test_rush_heads_straight_at_player() {
        let v = steer(&ctx(Behavior::Rush)).unwrap();
        assert!((v.x - -20.0).abs() < 1e-9);
        assert!(v.y.abs() < 1e-9);
    }

    #[test]
    fn test_steer_skips_on_top_of_player() {
        let mut c = ctx(Behavior::Rush);
        c.position = DVec2::new(0.05, 0.0);
        assert!(steer(&c).is_none(), "inside the epsilon radius, no update");
    }

    #[test]
    fn test_speed_clamp_on_all_behaviors() {
        for behavior in [
            Behavior::Rush,
            Behavior::Skirmish,
            Behavior::Flank,
            Behavior::Siege,
        ] {
            let mut c = ctx(behavior);
            c.phase_clock = 3.7;
            let v = steer(&c).unwrap();
            assert!(
                v.length() <= c.speed + 1e-9,
                "{behavior:?} exceeded its speed: {}",
                v.length()
            );
        }
    }

    #[test]
    fn test_skirmish_radial_correction_is_clamped() {
        // Far outside the preferred range: the inward pull saturates at
        // 0.55 of speed.
        let mut c = ctx(Behavior::Skirmish);
        c.position = DVec2::new(5000.0, 0.0);
        let v = steer(&c).unwrap();
        let inward = v.dot(DVec2::new(-1.0, 0.0));
        // Clamped vector magnitude caps at speed, so check the pre-clamp
        // ratio through the component mix: radial never dominates fully.
        assert!(inward > 0.0, "must still close distance");
        assert!(v.length() <= c.speed + 1e-9);
    }

    #[test]
    fn test_skirmish_orbit_sign_flips_with_parity() {
        let mut even = ctx(Behavior::Skirmish);
        even.sides = 4;
        even.position = DVec2::new(240.0, 0.0); // exactly at range, pure orbit
        let v_even = steer(&even).unwrap();

        let mut odd = ctx(Behavior::Skirmish);
        odd.sides = 5;
        odd.position = DVec2::new(240.0, 0.0);
        let v_odd = steer(&odd).unwrap();

        // At the preferred range the radial term vanishes; the tangential
        // components must oppose each other.
        assert!((v_even + v_odd).length() < 1e-9);
    }

    #[test]
    fn test_flank_pulls_harder_when_far() {
        let inward_at = |dist: f64| {
            let mut c = ctx(Behavior::Flank);
            c.position = DVec2::new(dist, 0.0);
            // Pick a phase where the tangential wave is zero so the
            // inward component is isolated: phase*1.4 + sides*0.3 = pi.
            c.phase_clock = (std::f64::consts::PI - c.sides as f64 * 0.3) / 1.4;
            let v = steer(&c).unwrap();
            v.dot(DVec2::new(-1.0, 0.0))
        };
        let far = inward_at(500.0);
        let near = inward_at(100.0);
        assert!(far > near, "inward pull weakens inside preferred range");
        assert!((far - 20.0 * 0.65).abs() < 1e-6);
        assert!((near - 20.0 * 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_siege_is_mostly_direct() {
        let mut c = ctx(Behavior::Siege);
        // Zero the weave: phase*0.8 + sides*0.2 = pi.
        c.phase_clock = (std::f64::consts::PI - c.sides as f64 * 0.2) / 0.8;
        let v = steer(&c).unwrap();
        assert!((v.x - -20.0 * 0.92).abs() < 1e-6);
        assert!(v.y.abs() < 1e-6);
    }

    #[test]
    fn test_profiles_cover_all_archetypes() {
        let all = [
            EnemyArchetype::Dart,
            EnemyArchetype::Tracer,
            EnemyArchetype::Shredder,
            EnemyArchetype::Weaver,
            EnemyArchetype::Bulwark,
            EnemyArchetype::Ravager,
            EnemyArchetype::Dreadnought,
        ];
        let mut last_hp = 0.0;
        for archetype in all {
            let p = get_profile(archetype);
            assert!(p.sides >= 1);
            assert!(p.speed_mult > 0.0 && p.hp_mult > 0.0);
            assert!(p.hp_mult >= last_hp, "hp scales up the roster");
            last_hp = p.hp_mult;
        }
        let boss = boss_profile();
        assert!(boss.hp_mult > get_profile(EnemyArchetype::Dreadnought).hp_mult);
    }
}
