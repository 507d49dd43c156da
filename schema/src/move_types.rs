use crate::{Move, PokemonType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The stats a stat stage can modify. Gen 1 has a single Special stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatType {
    Attack,
    Defense,
    Special,
    Speed,
    Accuracy,
    Evasion,
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatType::Attack => "Attack",
            StatType::Defense => "Defense",
            StatType::Special => "Special",
            StatType::Speed => "Speed",
            StatType::Accuracy => "accuracy",
            StatType::Evasion => "evasiveness",
        };
        write!(f, "{}", name)
    }
}

/// Persistent statuses a move can inflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusType {
    Burn,
    Freeze,
    Paralysis,
    Poison,
    BadlyPoison,
    Sleep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    User,
    Target,
}

/// Side effect rolled after a damaging hit lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecondaryEffect {
    Status { status: StatusType, chance: u8 },
    Flinch { chance: u8 },
    Confuse { chance: u8 },
    StatDrop { stat: StatType, stages: i8, chance: u8 },
}

/// How a move behaves when executed. Each family only carries the data it needs;
/// per-battle progress (charge turns, thrash counters) lives on the combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveFamily {
    Attack { secondary: Option<SecondaryEffect> },
    HighCritical,
    MultiHit { min_hits: u8, max_hits: u8 },
    Recoil { divisor: u8 },
    Drain,
    Crash,
    PayDay,
    OneHitKo,
    FixedDamage(u16),
    LevelDamage,
    SuperFang,
    Charge,
    SemiInvulnerable,
    Thrash,
    Rage,
    Trap,
    HyperBeam,
    Counter,
    Bide,
    InflictStatus(StatusType),
    Confuse,
    StatChange { target: Target, stat: StatType, stages: i8 },
    Substitute,
    Transform,
    Disable,
    Conversion,
    Mimic,
    LeechSeed,
    Mist,
    Reflect,
    LightScreen,
    FocusEnergy,
    Haze,
    Recover,
    Rest,
    MirrorMove,
}

impl MoveFamily {
    /// Families whose execution leaves state that forces later turns.
    pub fn spans_multiple_turns(&self) -> bool {
        matches!(
            self,
            MoveFamily::Charge
                | MoveFamily::SemiInvulnerable
                | MoveFamily::Thrash
                | MoveFamily::Rage
                | MoveFamily::Trap
                | MoveFamily::HyperBeam
                | MoveFamily::Bide
                | MoveFamily::MirrorMove
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub move_type: PokemonType,
    pub power: Option<u8>,
    /// `None` never misses.
    pub accuracy: Option<u8>,
    pub max_pp: u8,
    #[serde(default)]
    pub priority: i8,
    pub family: MoveFamily,
}

impl MoveData {
    pub fn is_damaging(&self) -> bool {
        self.power.is_some()
    }
}

/// Entry shape of `data/moves.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveTableEntry {
    pub id: Move,
    pub data: MoveData,
}
