#[cfg(test)]
mod tests {
    use crate::battle::events::BattleEventKind;
    use crate::battle::tests::common::{combatant, significant_kinds, TestPokemonBuilder};
    use crate::pokemon::{PokemonEvent, StatusCondition};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_burn_deals_a_sixteenth_of_current_hp() {
        let burned = TestPokemonBuilder::new("Charmander")
            .with_status(StatusCondition::Burn)
            .build();
        let (mut user, bus) = combatant("Ash", burned);
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());

        user.end_of_turn_effects(&mut opponent);

        assert_eq!(user.hp(), 94);
        assert_eq!(
            significant_kinds(&bus),
            vec![BattleEventKind::StatusDamage {
                status: StatusCondition::Burn,
                damage: 6
            }]
        );
    }

    #[test]
    fn test_badly_poisoned_damage_ramps_up() {
        let (mut user, _) = combatant("Ash", TestPokemonBuilder::new("Bulbasaur").build());
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());
        assert!(user.badly_poison_as_primary_effect());

        let mut hp_after_each_turn = Vec::new();
        for _ in 0..3 {
            user.end_of_turn_effects(&mut opponent);
            hp_after_each_turn.push(user.hp());
        }

        // 100/16*1 = 6, 94/16*2 = 10, 84/16*3 = 15
        assert_eq!(hp_after_each_turn, vec![94, 84, 69]);
        assert_eq!(user.status_damage_multiplier(), 4);
    }

    #[test]
    fn test_regular_poison_does_not_ramp() {
        let poisoned = TestPokemonBuilder::new("Bulbasaur")
            .with_status(StatusCondition::Poison)
            .build();
        let (mut user, _) = combatant("Ash", poisoned);
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());

        user.end_of_turn_effects(&mut opponent);
        user.end_of_turn_effects(&mut opponent);

        // 100/16 = 6, then 94/16 = 5
        assert_eq!(user.hp(), 89);
        assert_eq!(user.status_damage_multiplier(), 1);
    }

    #[rstest]
    #[case::sixteenth(100, 50, 6, 6)]
    #[case::minimum_sap(10, 50, 1, 1)]
    #[case::restore_capped_by_missing_hp(100, 98, 6, 2)]
    #[case::opponent_at_full_hp(100, 100, 6, 0)]
    fn test_leech_seed_saps_the_seeded_side(
        #[case] seeded_hp: u16,
        #[case] opponent_hp: u16,
        #[case] damage: u16,
        #[case] restored: u16,
    ) {
        let (mut seeded, bus) = combatant(
            "Ash",
            TestPokemonBuilder::new("Squirtle").with_hp(seeded_hp).build(),
        );
        let (mut opponent, _) = combatant(
            "Gary",
            TestPokemonBuilder::new("Oddish").with_hp(opponent_hp).build(),
        );
        assert!(seeded.activate_leech_seed());
        bus.clear();

        seeded.end_of_turn_effects(&mut opponent);

        assert_eq!(seeded.hp(), seeded_hp - damage);
        assert_eq!(opponent.hp(), opponent_hp + restored);
        assert_eq!(
            significant_kinds(&bus),
            vec![BattleEventKind::LeechSeedSaps { damage, restored }]
        );
    }

    #[test]
    fn test_leech_seed_and_toxic_share_the_ramp() {
        let (mut user, _) = combatant("Ash", TestPokemonBuilder::new("Squirtle").build());
        let (mut opponent, _) = combatant(
            "Gary",
            TestPokemonBuilder::new("Oddish").with_hp(10).build(),
        );
        assert!(user.activate_leech_seed());
        assert!(user.badly_poison_as_primary_effect());

        user.end_of_turn_effects(&mut opponent);
        // Seed 100/16*1 = 6, then poison 94/16*1 = 5
        assert_eq!(user.hp(), 89);

        user.end_of_turn_effects(&mut opponent);
        // Seed 89/16*2 = 10, then poison 79/16*2 = 8
        assert_eq!(user.hp(), 71);
        assert_eq!(opponent.hp(), 26);
    }

    #[test]
    fn test_no_residual_damage_below_sixteen_hp() {
        let burned = TestPokemonBuilder::new("Charmander")
            .with_hp(15)
            .with_status(StatusCondition::Burn)
            .build();
        let (mut user, bus) = combatant("Ash", burned);
        let (mut opponent, _) = combatant("Gary", TestPokemonBuilder::new("Eevee").build());

        user.end_of_turn_effects(&mut opponent);

        assert_eq!(user.hp(), 15);
        assert!(significant_kinds(&bus).is_empty());
    }

    #[test]
    fn test_fainting_to_leech_seed_skips_status_damage() {
        let burned = TestPokemonBuilder::new("Charmander")
            .with_hp(1)
            .with_status(StatusCondition::Burn)
            .build();
        let (mut user, bus) = combatant("Ash", burned);
        let (mut opponent, _) = combatant(
            "Gary",
            TestPokemonBuilder::new("Oddish").with_hp(50).build(),
        );
        assert!(user.activate_leech_seed());
        bus.clear();

        user.end_of_turn_effects(&mut opponent);

        assert!(user.is_fainted());
        assert_eq!(opponent.hp(), 51);
        assert_eq!(
            significant_kinds(&bus),
            vec![
                BattleEventKind::LeechSeedSaps {
                    damage: 1,
                    restored: 1
                },
                BattleEventKind::Creature(PokemonEvent::Fainted),
            ]
        );
    }

    #[test]
    fn test_leech_seed_needs_a_living_opponent() {
        let (mut user, _) = combatant("Ash", TestPokemonBuilder::new("Squirtle").build());
        let (mut opponent, _) = combatant(
            "Gary",
            TestPokemonBuilder::new("Oddish").with_hp(0).build(),
        );
        assert!(user.activate_leech_seed());

        user.end_of_turn_effects(&mut opponent);

        assert_eq!(user.hp(), 100);
    }
}
