use schema::StatType;
use serde::{Deserialize, Serialize};

pub const MIN_STAGE: i8 = -6;
pub const MAX_STAGE: i8 = 6;

/// Attack/Defense/Special/Speed multipliers, indexed by stage + 6.
/// First-generation table values, stored as fractions so results floor exactly.
const STAT_STAGE_MULTIPLIERS: [StageMultiplier; 13] = [
    StageMultiplier::new(25, 100),  // -6
    StageMultiplier::new(28, 100),  // -5
    StageMultiplier::new(33, 100),  // -4
    StageMultiplier::new(40, 100),  // -3
    StageMultiplier::new(50, 100),  // -2
    StageMultiplier::new(66, 100),  // -1
    StageMultiplier::new(100, 100), //  0
    StageMultiplier::new(150, 100), // +1
    StageMultiplier::new(200, 100), // +2
    StageMultiplier::new(250, 100), // +3
    StageMultiplier::new(300, 100), // +4
    StageMultiplier::new(350, 100), // +5
    StageMultiplier::new(400, 100), // +6
];

/// Accuracy/evasion multipliers, indexed by stage + 6.
const ACCURACY_STAGE_MULTIPLIERS: [StageMultiplier; 13] = [
    StageMultiplier::new(3, 9), // -6
    StageMultiplier::new(3, 8), // -5
    StageMultiplier::new(3, 7), // -4
    StageMultiplier::new(3, 6), // -3
    StageMultiplier::new(3, 5), // -2
    StageMultiplier::new(3, 4), // -1
    StageMultiplier::new(3, 3), //  0
    StageMultiplier::new(4, 3), // +1
    StageMultiplier::new(5, 3), // +2
    StageMultiplier::new(6, 3), // +3
    StageMultiplier::new(7, 3), // +4
    StageMultiplier::new(8, 3), // +5
    StageMultiplier::new(9, 3), // +6
];

/// An exact rational multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageMultiplier {
    pub numerator: u32,
    pub denominator: u32,
}

impl StageMultiplier {
    pub const IDENTITY: StageMultiplier = StageMultiplier::new(1, 1);

    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Combine two multipliers without rounding in between.
    pub const fn then(self, other: StageMultiplier) -> Self {
        Self::new(
            self.numerator * other.numerator,
            self.denominator * other.denominator,
        )
    }

    /// `floor(value * multiplier)`
    pub fn apply(self, value: u32) -> u32 {
        value * self.numerator / self.denominator
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

fn table_index(stage: i8) -> usize {
    assert!(
        (MIN_STAGE..=MAX_STAGE).contains(&stage),
        "stat stage {} outside {}..={}",
        stage,
        MIN_STAGE,
        MAX_STAGE
    );
    (stage - MIN_STAGE) as usize
}

pub fn stat_stage_multiplier(stage: i8) -> StageMultiplier {
    STAT_STAGE_MULTIPLIERS[table_index(stage)]
}

pub fn accuracy_stage_multiplier(stage: i8) -> StageMultiplier {
    ACCURACY_STAGE_MULTIPLIERS[table_index(stage)]
}

/// Result of a stage modification.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageChange {
    Changed { from: i8, to: i8 },
    /// Already at the bound in the requested direction.
    Unchanged,
}

impl StageChange {
    pub fn changed(&self) -> bool {
        matches!(self, StageChange::Changed { .. })
    }
}

/// Per-stat stage offsets, each kept within -6..=6.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatStages {
    attack: i8,
    defense: i8,
    special: i8,
    speed: i8,
    accuracy: i8,
    evasion: i8,
}

impl StatStages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: StatType) -> i8 {
        match stat {
            StatType::Attack => self.attack,
            StatType::Defense => self.defense,
            StatType::Special => self.special,
            StatType::Speed => self.speed,
            StatType::Accuracy => self.accuracy,
            StatType::Evasion => self.evasion,
        }
    }

    fn slot_mut(&mut self, stat: StatType) -> &mut i8 {
        match stat {
            StatType::Attack => &mut self.attack,
            StatType::Defense => &mut self.defense,
            StatType::Special => &mut self.special,
            StatType::Speed => &mut self.speed,
            StatType::Accuracy => &mut self.accuracy,
            StatType::Evasion => &mut self.evasion,
        }
    }

    /// Add `delta` to a stage, clamped to the legal range.
    pub fn modify(&mut self, stat: StatType, delta: i8) -> StageChange {
        let slot = self.slot_mut(stat);
        let from = *slot;
        let to = from.saturating_add(delta).clamp(MIN_STAGE, MAX_STAGE);
        if to == from {
            return StageChange::Unchanged;
        }
        *slot = to;
        StageChange::Changed { from, to }
    }

    pub fn can_go_higher(&self, stat: StatType) -> bool {
        self.get(stat) < MAX_STAGE
    }

    pub fn can_go_lower(&self, stat: StatType) -> bool {
        self.get(stat) > MIN_STAGE
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Multiplier for Attack/Defense/Special/Speed at the current stage.
    pub fn stat_multiplier(&self, stat: StatType) -> StageMultiplier {
        debug_assert!(
            !matches!(stat, StatType::Accuracy | StatType::Evasion),
            "accuracy and evasion use their own multipliers"
        );
        stat_stage_multiplier(self.get(stat))
    }

    /// The attacker-side accuracy multiplier.
    pub fn accuracy_multiplier(&self) -> StageMultiplier {
        accuracy_stage_multiplier(self.accuracy)
    }

    /// The defender-side evasion multiplier. Raising evasion lowers the attacker's odds,
    /// so the stage is negated before the table lookup.
    pub fn evasion_multiplier(&self) -> StageMultiplier {
        accuracy_stage_multiplier(-self.evasion)
    }
}
