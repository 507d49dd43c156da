#[cfg(test)]
mod tests {
    use crate::battle::events::MoveSignal;
    use crate::battle::rng::TurnRng;
    use crate::battle::tests::common::{combatant, move_signals, TestPokemonBuilder, CLEAN_HIT};
    use crate::pokemon::StatusCondition;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{Move, PokemonType, StatType, Typing};

    #[rstest]
    #[case::ground_is_immune(PokemonType::Ground, None, MoveSignal::NoEffect)]
    #[case::normal_is_paralyzed(PokemonType::Normal, Some(StatusCondition::Paralysis), MoveSignal::Used)]
    fn test_thunder_wave_follows_the_type_chart(
        #[case] defender_type: PokemonType,
        #[case] expected_status: Option<StatusCondition>,
        #[case] last_signal: MoveSignal,
    ) {
        let (mut user, bus) = combatant(
            "Ash",
            TestPokemonBuilder::new("Pikachu")
                .with_moves(vec![Move::ThunderWave])
                .build(),
        );
        let (mut opponent, _) = combatant(
            "Gary",
            TestPokemonBuilder::new("Target")
                .with_type(Typing::single(defender_type))
                .build(),
        );
        let mut rng = TurnRng::new_for_test(vec![1]);

        user.resolve_turn(0, &mut opponent, &mut rng).unwrap();

        assert_eq!(opponent.status(), expected_status);
        assert_eq!(move_signals(&bus).last(), Some(&last_signal));
    }

    #[test]
    fn test_poison_types_cannot_be_badly_poisoned() {
        let (mut user, bus) = combatant(
            "Ash",
            TestPokemonBuilder::new("Grimer")
                .with_moves(vec![Move::Toxic])
                .build(),
        );
        let (mut opponent, _) = combatant(
            "Gary",
            TestPokemonBuilder::new("Ekans")
                .with_type(Typing::single(PokemonType::Poison))
                .build(),
        );
        let mut rng = TurnRng::new_for_test(vec![]);

        user.resolve_turn(0, &mut opponent, &mut rng).unwrap();

        assert_eq!(opponent.status(), None);
        assert_eq!(move_signals(&bus), vec![MoveSignal::Used, MoveSignal::NoEffect]);
    }

    #[test]
    fn test_status_move_fails_against_existing_status() {
        let (mut user, bus) = combatant(
            "Ash",
            TestPokemonBuilder::new("Oddish")
                .with_moves(vec![Move::SleepPowder])
                .build(),
        );
        let burned = TestPokemonBuilder::new("Eevee")
            .with_status(StatusCondition::Burn)
            .build();
        let (mut opponent, _) = combatant("Gary", burned);
        let mut rng = TurnRng::new_for_test(vec![]);

        user.resolve_turn(0, &mut opponent, &mut rng).unwrap();

        assert_eq!(opponent.status(), Some(StatusCondition::Burn));
        assert_eq!(move_signals(&bus), vec![MoveSignal::Used, MoveSignal::Failed]);
    }

    #[test]
    fn test_sleep_powder_rolls_a_duration() {
        let (mut user, _) = combatant(
            "Ash",
            TestPokemonBuilder::new("Oddish")
                .with_moves(vec![Move::SleepPowder])
                .build(),
        );
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());
        let mut rng = TurnRng::new_for_test(vec![75, 3]);

        user.resolve_turn(0, &mut opponent, &mut rng).unwrap();

        assert_eq!(opponent.status(), Some(StatusCondition::Sleep));
        assert_eq!(opponent.sleep_turns(), 3);
    }

    #[test]
    fn test_sleep_duration_is_not_rolled_when_sleep_cannot_apply() {
        let poisoned = TestPokemonBuilder::new("Eevee")
            .with_status(StatusCondition::Poison)
            .build();
        let (mut target, _) = combatant("Gary", poisoned);
        let mut rng = TurnRng::new_for_test(vec![]);

        assert!(!target.sleep_as_primary_effect(&mut rng));
        assert_eq!(target.sleep_turns(), 0);
    }

    #[test]
    fn test_secondary_burn_lands_after_damage() {
        let (mut user, _) = combatant(
            "Ash",
            TestPokemonBuilder::new("Charmander")
                .with_moves(vec![Move::Ember])
                .build(),
        );
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());
        let mut script = CLEAN_HIT.to_vec();
        script.push(10); // Secondary Status Check
        let mut rng = TurnRng::new_for_test(script);

        user.resolve_turn(0, &mut opponent, &mut rng).unwrap();

        assert!(opponent.hp() < 100);
        assert_eq!(opponent.status(), Some(StatusCondition::Burn));
        assert!(opponent.has_burn_attack_drop());
    }

    #[test]
    fn test_no_secondary_roll_against_a_creature_of_the_moves_type() {
        let (mut user, _) = combatant(
            "Ash",
            TestPokemonBuilder::new("Charmander")
                .with_moves(vec![Move::Ember])
                .build(),
        );
        let (mut opponent, _) = combatant(
            "Gary",
            TestPokemonBuilder::new("Vulpix")
                .with_type(Typing::single(PokemonType::Fire))
                .build(),
        );
        let mut rng = TurnRng::new_for_test(CLEAN_HIT.to_vec());

        user.resolve_turn(0, &mut opponent, &mut rng).unwrap();

        assert_eq!(opponent.status(), None);
        assert_eq!(rng.remaining_scripted(), 0);
    }

    #[test]
    fn test_substitute_blocks_secondary_effects_only() {
        let (mut target, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());
        let mut rng = TurnRng::new_for_test(vec![2]);
        assert!(target.activate_substitute());

        assert!(!target.burn_as_secondary_effect());
        assert!(!target.flinch());
        assert!(!target.confuse_as_secondary_effect(&mut rng));
        assert_eq!(target.modify_stat_stage_as_secondary(StatType::Attack, -1), None);
        assert!(target.paralyze_as_primary_effect());
        assert_eq!(target.status(), Some(StatusCondition::Paralysis));
    }

    #[test]
    fn test_supersonic_fails_behind_a_substitute() {
        let (mut user, bus) = combatant(
            "Ash",
            TestPokemonBuilder::new("Zubat")
                .with_moves(vec![Move::Supersonic])
                .build(),
        );
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());
        assert!(opponent.activate_substitute());
        let mut rng = TurnRng::new_for_test(vec![]);

        user.resolve_turn(0, &mut opponent, &mut rng).unwrap();

        assert!(!opponent.is_confused());
        assert_eq!(move_signals(&bus), vec![MoveSignal::Used, MoveSignal::Failed]);
    }

    #[test]
    fn test_mist_blocks_stat_drops_from_the_opponent() {
        let (mut user, bus) = combatant(
            "Ash",
            TestPokemonBuilder::new("Eevee")
                .with_moves(vec![Move::Growl])
                .build(),
        );
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Seel").build());
        assert!(opponent.activate_mist());
        let mut rng = TurnRng::new_for_test(vec![1]);

        user.resolve_turn(0, &mut opponent, &mut rng).unwrap();

        assert_eq!(opponent.stat_stage(StatType::Attack), 0);
        assert_eq!(move_signals(&bus), vec![MoveSignal::Used, MoveSignal::Failed]);

        // Mist does not stop the creature's own stat changes.
        let _ = opponent.modify_stat_stage_as_primary(StatType::Attack, -1);
        assert_eq!(opponent.stat_stage(StatType::Attack), -1);
    }

    #[test]
    fn test_clearing_status_resets_the_ramp() {
        let (mut target, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());
        let (mut opponent, _) = combatant("Ash", TestPokemonBuilder::new("Ekans").build());
        assert!(target.badly_poison_as_primary_effect());
        target.end_of_turn_effects(&mut opponent);
        assert_eq!(target.status_damage_multiplier(), 2);

        target.clear_status();

        assert_eq!(target.status(), None);
        assert_eq!(target.status_damage_multiplier(), 1);
    }
}
