// In: src/main.rs

//! Demo battle between two fixed teams. Each side cycles through its usable moves.
//!
//! Usage: `pokemon-battle-state [SEED] [--json]`. Set `RUST_LOG=debug` to see the engine's
//! own logging.

use pokemon_battle_state::{
    Battle, BattleConfig, BattleEvent, BattleResult, BattleSide, GameState, Move, PlayerAction,
    PokemonInst, PokemonType, StatBlock, TurnRng, Typing,
};
use std::env;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "data/battle_config.ron";
const MAX_TURNS: u32 = 200;

struct Options {
    seed: u64,
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run(parse_args()) {
        eprintln!("Battle aborted: {}", e);
        std::process::exit(1);
    }
}

fn parse_args() -> Options {
    let mut options = Options {
        seed: 1,
        json: false,
    };
    for arg in env::args().skip(1) {
        if arg == "--json" {
            options.json = true;
        } else if let Ok(seed) = arg.parse() {
            options.seed = seed;
        } else {
            warn!(%arg, "ignoring unknown argument");
        }
    }
    options
}

fn load_config() -> BattleConfig {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        return BattleConfig::default();
    }
    match BattleConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "using default battle config");
            BattleConfig::default()
        }
    }
}

fn red_team() -> BattleResult<Vec<PokemonInst>> {
    Ok(vec![
        PokemonInst::new(
            "Pikachu",
            25,
            Typing::single(PokemonType::Electric),
            StatBlock {
                hp: 57,
                attack: 37,
                defense: 27,
                special: 34,
                speed: 57,
            },
            90,
            &[
                Move::ThunderShock,
                Move::QuickAttack,
                Move::ThunderWave,
                Move::DoubleTeam,
            ],
        )?,
        PokemonInst::new(
            "Ivysaur",
            25,
            Typing::dual(PokemonType::Grass, PokemonType::Poison),
            StatBlock {
                hp: 68,
                attack: 41,
                defense: 42,
                special: 52,
                speed: 39,
            },
            60,
            &[
                Move::LeechSeed,
                Move::MegaDrain,
                Move::PoisonPowder,
                Move::SleepPowder,
            ],
        )?,
    ])
}

fn blue_team() -> BattleResult<Vec<PokemonInst>> {
    Ok(vec![
        PokemonInst::new(
            "Wartortle",
            25,
            Typing::single(PokemonType::Water),
            StatBlock {
                hp: 66,
                attack: 41,
                defense: 50,
                special: 43,
                speed: 39,
            },
            58,
            &[Move::WaterGun, Move::Bite, Move::Withdraw, Move::TailWhip],
        )?,
        PokemonInst::new(
            "Pidgeotto",
            25,
            Typing::dual(PokemonType::Normal, PokemonType::Flying),
            StatBlock {
                hp: 63,
                attack: 40,
                defense: 38,
                special: 35,
                speed: 48,
            },
            71,
            &[Move::Fly, Move::QuickAttack, Move::MirrorMove, Move::Growl],
        )?,
    ])
}

/// Next usable move after the one picked last time.
fn choose_move(battle: &Battle, side: usize, cursor: &mut usize) -> Option<PlayerAction> {
    let start = *cursor;
    (0..4).map(|offset| (start + offset) % 4).find_map(|slot| {
        let action = PlayerAction::UseMove { move_index: slot };
        battle.validate_action(side, &action).ok()?;
        *cursor = slot + 1;
        Some(action)
    })
}

fn send_in_replacement(battle: &mut Battle, side_index: usize) -> BattleResult<()> {
    let side = battle.side(side_index)?;
    let replacement = (0..side.team_size()).find(|index| {
        *index != side.active_index()
            && side
                .team_member(*index)
                .is_some_and(|pokemon| !pokemon.is_fainted())
    });
    if let Some(index) = replacement {
        battle.replace_fainted(side_index, index)?;
    }
    Ok(())
}

fn print_events(events: &[BattleEvent], json: bool) {
    for event in events {
        if json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!(error = %e, "could not serialize event"),
            }
        } else if let Some(text) = event.format() {
            println!("  {}", text);
        }
    }
}

fn run(options: Options) -> BattleResult<()> {
    let config = load_config();
    let mut rng = TurnRng::from_seed(options.seed);
    let mut battle = Battle::new(
        BattleSide::new("Red", red_team()?, config)?,
        BattleSide::new("Blue", blue_team()?, config)?,
    );
    info!(seed = options.seed, "starting demo battle");

    let mut cursors = [0usize; 2];
    while !battle.is_over() && battle.turn_number() < MAX_TURNS {
        match battle.state() {
            GameState::WaitingForActions => {
                let red = choose_move(&battle, 0, &mut cursors[0]);
                let blue = choose_move(&battle, 1, &mut cursors[1]);
                let (Some(red), Some(blue)) = (red, blue) else {
                    println!("A side has run out of moves.");
                    break;
                };
                let summary = battle.resolve_turn([red, blue], &mut rng)?;
                if !options.json {
                    println!("Turn {}", summary.turn_number);
                }
                print_events(&summary.events, options.json);
            }
            GameState::WaitingForPlayer1Replacement => send_in_replacement(&mut battle, 0)?,
            GameState::WaitingForPlayer2Replacement => send_in_replacement(&mut battle, 1)?,
            GameState::WaitingForBothReplacements => {
                send_in_replacement(&mut battle, 0)?;
                send_in_replacement(&mut battle, 1)?;
            }
            GameState::Player1Win | GameState::Player2Win | GameState::Draw => break,
        }
    }

    if !options.json {
        match battle.winner() {
            Some(index) => println!("{} wins!", battle.side(index)?.player_name),
            None if battle.state() == GameState::Draw => println!("The battle is a draw."),
            None => println!("No winner after {} turns.", battle.turn_number()),
        }
    }
    Ok(())
}
