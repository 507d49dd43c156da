#[cfg(test)]
mod tests {
    use crate::battle::events::MoveSignal;
    use crate::battle::rng::TurnRng;
    use crate::battle::tests::common::{combatant, move_signals, TestPokemonBuilder, CLEAN_HIT};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{Move, PokemonType, Typing};

    fn script(rolls: &[&[u8]]) -> TurnRng {
        TurnRng::new_for_test(rolls.concat())
    }

    #[test]
    fn test_tackle_with_stab() {
        let (mut user, bus) = combatant("Ash", TestPokemonBuilder::new("Rattata").build());
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());
        let mut rng = script(&[&CLEAN_HIT]);

        user.resolve_turn(0, &mut opponent, &mut rng).unwrap();

        // 22 * 80 * 35 / 60 / 50 + 2 = 22, x1.5 for STAB
        assert_eq!(opponent.hp(), 67);
        assert_eq!(move_signals(&bus), vec![MoveSignal::Used]);
        assert_eq!(user.last_move_used(), Some(Move::Tackle));
        assert_eq!(opponent.mirror_move(), Some(Move::Tackle));
    }

    #[test]
    fn test_critical_hit_doubles_level_and_is_reported() {
        let (mut user, bus) = combatant("Ash", TestPokemonBuilder::new("Rattata").build());
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());
        // Base speed 90 gives a 17% critical chance.
        let mut rng = script(&[&[1, 17, 255]]);

        user.resolve_turn(0, &mut opponent, &mut rng).unwrap();

        // 42 * 80 * 35 / 60 / 50 + 2 = 41, x1.5 for STAB
        assert_eq!(opponent.hp(), 39);
        assert_eq!(
            move_signals(&bus),
            vec![MoveSignal::Used, MoveSignal::CriticalHit]
        );
    }

    #[test]
    fn test_critical_hit_ignores_reflect_and_stages() {
        let (mut user, _) = combatant("Ash", TestPokemonBuilder::new("Rattata").build());
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());
        assert!(opponent.activate_reflect());
        let _ = opponent.modify_stat_stage_as_primary(schema::StatType::Defense, 6);

        user.resolve_turn(0, &mut opponent, &mut script(&[&[1, 1, 255]]))
            .unwrap();

        assert_eq!(opponent.hp(), 39);
    }

    #[test]
    fn test_reflect_halves_physical_damage() {
        let (mut user, _) = combatant("Ash", TestPokemonBuilder::new("Rattata").build());
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());
        assert!(opponent.activate_reflect());

        user.resolve_turn(0, &mut opponent, &mut script(&[&CLEAN_HIT]))
            .unwrap();

        // Defense doubled to 120: 22 * 80 * 35 / 120 / 50 + 2 = 12, x1.5 for STAB
        assert_eq!(opponent.hp(), 82);
    }

    #[test]
    fn test_miss_and_immunity() {
        let (mut user, bus) = combatant("Ash", TestPokemonBuilder::new("Rattata").build());
        let (mut ghost, _) = combatant(
            "Gary",
            TestPokemonBuilder::new("Gastly")
                .with_type(Typing::single(PokemonType::Ghost))
                .build(),
        );
        let (mut normal, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());
        let mut rng = script(&[&[96]]);

        user.resolve_turn(0, &mut ghost, &mut rng).unwrap();
        user.resolve_turn(0, &mut normal, &mut rng).unwrap();

        assert_eq!(ghost.hp(), 100);
        assert_eq!(normal.hp(), 100);
        assert_eq!(
            move_signals(&bus),
            vec![
                MoveSignal::Used,
                MoveSignal::NoEffect,
                MoveSignal::Used,
                MoveSignal::Missed
            ]
        );
    }

    #[test]
    fn test_multi_hit_repeats_the_same_damage() {
        let (mut user, bus) = combatant(
            "Ash",
            TestPokemonBuilder::new("Clefairy")
                .with_moves(vec![Move::DoubleSlap])
                .build(),
        );
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());
        opponent.activate_bide();

        user.resolve_turn(0, &mut opponent, &mut script(&[&CLEAN_HIT, &[3]]))
            .unwrap();

        assert_eq!(opponent.hp(), 55);
        assert_eq!(opponent.bide().accumulated_damage(), 15);
        assert_eq!(
            move_signals(&bus),
            vec![MoveSignal::Used, MoveSignal::HitMultipleTimes(3)]
        );
    }

    #[rstest]
    #[case(0, 2)]
    #[case(2, 2)]
    #[case(3, 3)]
    #[case(5, 3)]
    #[case(6, 4)]
    #[case(7, 5)]
    fn test_multi_hit_count_favours_two_and_three(#[case] roll: u8, #[case] hits: u8) {
        let (mut user, bus) = combatant(
            "Ash",
            TestPokemonBuilder::new("Clefairy")
                .with_moves(vec![Move::DoubleSlap])
                .build(),
        );
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());

        user.resolve_turn(0, &mut opponent, &mut script(&[&CLEAN_HIT, &[roll]]))
            .unwrap();

        assert_eq!(opponent.hp(), 100 - 15 * u16::from(hits));
        assert_eq!(move_signals(&bus).last(), Some(&MoveSignal::HitMultipleTimes(hits)));
    }

    #[test]
    fn test_multi_hit_stops_when_the_substitute_breaks() {
        let (mut user, bus) = combatant(
            "Ash",
            TestPokemonBuilder::new("Clefairy")
                .with_moves(vec![Move::DoubleSlap])
                .build(),
        );
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());
        assert!(opponent.activate_substitute());

        user.resolve_turn(0, &mut opponent, &mut script(&[&CLEAN_HIT, &[5]]))
            .unwrap();

        assert!(!opponent.substitute().is_active());
        assert_eq!(opponent.hp(), 75);
        assert_eq!(
            move_signals(&bus),
            vec![MoveSignal::Used, MoveSignal::HitMultipleTimes(2)]
        );
    }

    #[test]
    fn test_recoil_is_a_quarter_of_damage_dealt() {
        let (mut user, _) = combatant(
            "Ash",
            TestPokemonBuilder::new("Tauros")
                .with_moves(vec![Move::DoubleEdge])
                .build(),
        );
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());

        user.resolve_turn(0, &mut opponent, &mut script(&[&CLEAN_HIT]))
            .unwrap();

        // 22 * 80 * 100 / 60 / 50 + 2 = 60, x1.5 for STAB
        assert_eq!(opponent.hp(), 10);
        assert_eq!(user.hp(), 78);
        assert_eq!(user.damage_for_counter(), 22);
    }

    #[test]
    fn test_drain_heals_half_the_damage() {
        let (mut user, bus) = combatant(
            "Ash",
            TestPokemonBuilder::new("Oddish")
                .with_hp(50)
                .with_moves(vec![Move::MegaDrain])
                .build(),
        );
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());

        user.resolve_turn(0, &mut opponent, &mut script(&[&CLEAN_HIT]))
            .unwrap();

        // Special move: 22 * 70 * 40 / 70 / 50 + 2 = 19
        assert_eq!(opponent.hp(), 81);
        assert_eq!(user.hp(), 59);
        assert_eq!(
            move_signals(&bus),
            vec![MoveSignal::Used, MoveSignal::SuckedHealth]
        );
    }

    #[test]
    fn test_crash_costs_one_hp_on_a_miss() {
        let (mut user, bus) = combatant(
            "Ash",
            TestPokemonBuilder::new("Hitmonlee")
                .with_moves(vec![Move::JumpKick])
                .build(),
        );
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());

        user.resolve_turn(0, &mut opponent, &mut script(&[&[100]]))
            .unwrap();

        assert_eq!(user.hp(), 99);
        assert_eq!(
            move_signals(&bus),
            vec![
                MoveSignal::Used,
                MoveSignal::Missed,
                MoveSignal::CrashDamage
            ]
        );
    }

    #[rstest]
    #[case::faster_user(90, 60, true)]
    #[case::equal_speed(90, 90, true)]
    #[case::slower_user(60, 90, false)]
    fn test_one_hit_ko_needs_speed(
        #[case] user_speed: u16,
        #[case] target_speed: u16,
        #[case] knocks_out: bool,
    ) {
        let (mut user, bus) = combatant(
            "Ash",
            TestPokemonBuilder::new("Kingler")
                .with_speed(user_speed)
                .with_moves(vec![Move::Guillotine])
                .build(),
        );
        let (mut opponent, _) = combatant(
            "Gary",
            TestPokemonBuilder::new("Eevee").with_speed(target_speed).build(),
        );

        user.resolve_turn(0, &mut opponent, &mut script(&[&[30]]))
            .unwrap();

        assert_eq!(opponent.is_fainted(), knocks_out);
        let expected = if knocks_out {
            MoveSignal::OneHitKo
        } else {
            MoveSignal::Failed
        };
        assert_eq!(move_signals(&bus).last(), Some(&expected));
    }

    #[rstest]
    #[case::sonic_boom(Move::SonicBoom, PokemonType::Ghost, 80)]
    #[case::seismic_toss_is_level(Move::SeismicToss, PokemonType::Normal, 50)]
    #[case::super_fang_halves(Move::SuperFang, PokemonType::Normal, 50)]
    fn test_fixed_damage_ignores_stats_and_types(
        #[case] move_: Move,
        #[case] target_type: PokemonType,
        #[case] remaining_hp: u16,
    ) {
        let (mut user, _) = combatant(
            "Ash",
            TestPokemonBuilder::new("Magnemite")
                .with_moves(vec![move_])
                .build(),
        );
        let (mut opponent, _) = combatant(
            "Gary",
            TestPokemonBuilder::new("Target")
                .with_type(Typing::single(target_type))
                .build(),
        );

        user.resolve_turn(0, &mut opponent, &mut script(&[&[1]]))
            .unwrap();

        assert_eq!(opponent.hp(), remaining_hp);
    }

    #[test]
    fn test_counter_returns_double_normal_damage() {
        let (mut user, _) = combatant(
            "Ash",
            TestPokemonBuilder::new("Hitmonchan")
                .with_moves(vec![Move::Counter])
                .build(),
        );
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());
        user.damage(20, PokemonType::Normal);

        user.resolve_turn(0, &mut opponent, &mut script(&[&[1]]))
            .unwrap();

        assert_eq!(opponent.hp(), 60);
        assert_eq!(
            user.damage_for_counter(),
            20,
            "Counter leaves the user's own record alone"
        );
    }

    #[test]
    fn test_counter_fails_without_recorded_damage() {
        let (mut user, bus) = combatant(
            "Ash",
            TestPokemonBuilder::new("Hitmonchan")
                .with_moves(vec![Move::Counter])
                .build(),
        );
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());
        user.damage(20, PokemonType::Water);

        user.resolve_turn(0, &mut opponent, &mut script(&[])).unwrap();

        assert_eq!(opponent.hp(), 100);
        assert_eq!(move_signals(&bus), vec![MoveSignal::Used, MoveSignal::Failed]);
    }
}
