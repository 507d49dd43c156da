use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Move {
    // Normal
    Pound,
    DoubleSlap,
    PayDay,
    Scratch,
    Guillotine,
    RazorWind,
    SwordsDance,
    Bind,
    Wrap,
    Stomp,
    Headbutt,
    Tackle,
    BodySlam,
    TakeDown,
    Thrash,
    DoubleEdge,
    TailWhip,
    Growl,
    Bite,
    Sing,
    Supersonic,
    SonicBoom,
    Disable,
    HyperBeam,
    QuickAttack,
    Rage,
    Mimic,
    DoubleTeam,
    Recover,
    Harden,
    FocusEnergy,
    Bide,
    SkullBash,
    SoftBoiled,
    Slash,
    Substitute,
    Transform,
    Conversion,
    SuperFang,
    FuryAttack,
    HornDrill,
    // Fighting
    KarateChop,
    DoubleKick,
    JumpKick,
    Counter,
    SeismicToss,
    // Flying
    Fly,
    MirrorMove,
    SkyAttack,
    // Fire
    Ember,
    Flamethrower,
    FireSpin,
    // Water
    WaterGun,
    Withdraw,
    Crabhammer,
    // Grass
    Absorb,
    MegaDrain,
    LeechSeed,
    SolarBeam,
    StunSpore,
    SleepPowder,
    PetalDance,
    // Poison
    PoisonPowder,
    Toxic,
    // Electric
    ThunderShock,
    Thunderbolt,
    ThunderWave,
    // Ground
    Dig,
    // Psychic
    Confusion,
    Psychic,
    Hypnosis,
    Agility,
    Reflect,
    LightScreen,
    Rest,
    // Ice
    IceBeam,
    Blizzard,
    Mist,
    Haze,
    // Ghost
    ConfuseRay,
    NightShade,
    // Dragon
    DragonRage,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::DoubleEdge => write!(f, "Double-Edge"),
            Move::SoftBoiled => write!(f, "Soft-Boiled"),
            _ => {
                // Split CamelCase identifiers into words: ThunderWave -> Thunder Wave
                let raw = format!("{:?}", self);
                let mut name = String::with_capacity(raw.len() + 4);
                for (i, ch) in raw.chars().enumerate() {
                    if i > 0 && ch.is_uppercase() {
                        name.push(' ');
                    }
                    name.push(ch);
                }
                write!(f, "{}", name)
            }
        }
    }
}
