use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
enum RngSource {
    Scripted { outcomes: Vec<u8>, index: usize },
    Seeded(StdRng),
}

/// The random source threaded through turn resolution.
///
/// Every roll names its reason so a scripted test that runs out of outcomes says which
/// roll it was missing.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    /// Replays `outcomes` in order. Panics once they are used up.
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_random() -> Self {
        Self::from_seed(rand::rng().random::<u64>())
    }

    /// A percentile roll in 1..=100.
    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        if let RngSource::Seeded(rng) = &mut self.source {
            let outcome: u8 = rng.random_range(1..=100);
            tracing::trace!(outcome, reason, "rng roll");
            return outcome;
        }
        self.next_scripted(reason)
    }

    /// True when a percentile roll lands at or below `percent`.
    pub fn chance(&mut self, reason: &str, percent: u8) -> bool {
        self.next_outcome(reason) <= percent
    }

    /// A value in `min..=max`. Scripted outcomes are clamped into the range so tests can
    /// state the duration they want directly.
    pub fn next_in_range(&mut self, reason: &str, min: u8, max: u8) -> u8 {
        assert!(min <= max, "invalid range {}..={} for {}", min, max, reason);
        if let RngSource::Seeded(rng) = &mut self.source {
            let outcome: u8 = rng.random_range(min..=max);
            tracing::trace!(outcome, reason, "rng range roll");
            return outcome;
        }
        self.next_scripted(reason).clamp(min, max)
    }

    fn next_scripted(&mut self, reason: &str) -> u8 {
        let RngSource::Scripted { outcomes, index } = &mut self.source else {
            unreachable!("next_scripted called on a seeded source");
        };
        if *index >= outcomes.len() {
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = outcomes[*index];

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        *index += 1;
        outcome
    }

    /// Scripted outcomes not yet consumed. Always zero for seeded sources.
    pub fn remaining_scripted(&self) -> usize {
        match &self.source {
            RngSource::Scripted { outcomes, index } => outcomes.len() - index,
            RngSource::Seeded(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_outcomes_replay_in_order() {
        let mut rng = TurnRng::new_for_test(vec![10, 90, 3]);
        assert!(rng.chance("first", 25));
        assert!(!rng.chance("second", 25));
        assert_eq!(rng.next_in_range("third", 1, 7), 3);
        assert_eq!(rng.remaining_scripted(), 0);
    }

    #[test]
    fn test_scripted_range_is_clamped() {
        let mut rng = TurnRng::new_for_test(vec![100, 0]);
        assert_eq!(rng.next_in_range("high", 217, 255), 217);
        assert_eq!(rng.next_in_range("low", 1, 4), 1);
    }

    #[test]
    #[should_panic(expected = "Paralysis Check")]
    fn test_exhausted_script_names_the_roll() {
        let mut rng = TurnRng::new_for_test(vec![]);
        rng.next_outcome("Paralysis Check");
    }

    #[test]
    fn test_seeded_sources_are_deterministic() {
        let mut a = TurnRng::from_seed(42);
        let mut b = TurnRng::from_seed(42);
        for _ in 0..50 {
            let roll = a.next_outcome("roll");
            assert_eq!(roll, b.next_outcome("roll"));
            assert!((1..=100).contains(&roll));
            let ranged = a.next_in_range("range", 1, 7);
            assert_eq!(ranged, b.next_in_range("range", 1, 7));
            assert!((1..=7).contains(&ranged));
        }
    }
}
