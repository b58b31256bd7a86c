use std::sync::Arc;

use anyhow::Result;
use log::info;

use rusted_punch::engine::input::{Action, Command};
use rusted_punch::engine::physics::Stage;
use rusted_punch::game::characters::Facing;
use rusted_punch::game::roster;
use rusted_punch::game::{Level, MatchEvent};

/// Ticks simulated by the sandbox round (ten seconds at 60 Hz)
const ROUND_TICKS: u64 = 600;

/// Scripted input for the sandbox: a fixed loop of approaches and attacks
fn scripted_command(frame: u64, toward: Action) -> Command {
    match frame % 90 {
        0..=19 => Command::new().with(toward),
        20 => Command::new().with(Action::Attack),
        35 => Command::new().with(Action::Jump),
        45 => Command::new().with(toward).with(Action::Attack),
        60 => Command::new().with(Action::Special),
        _ => Command::new(),
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Punch sandbox...");

    let mut level = Level::new(Stage::battlefield());
    let monkey_king = Arc::new(roster::by_name("monkey_king")?);
    let hawko = Arc::new(roster::by_name("hawko")?);
    let monkey = level.spawn_character(monkey_king, 600.0, 500.0, Facing::Right);
    let bird = level.spawn_character(hawko, 1000.0, 500.0, Facing::Left);

    level.start_round();
    for frame in 0..ROUND_TICKS {
        for (id, toward) in [(monkey, Action::Right), (bird, Action::Left)] {
            if level.character(id).is_some() {
                level.feed(id, scripted_command(frame, toward))?;
            }
        }
        level.tick();

        for event in level.drain_events() {
            match event {
                MatchEvent::HitLanded {
                    attacker,
                    victim,
                    damage,
                    knockback,
                    ..
                } => info!(
                    "frame {}: {attacker} hits {victim} for {damage}% (launch {:.1})",
                    level.frame(),
                    knockback.length()
                ),
                MatchEvent::KnockedOut { entity } => {
                    info!("frame {}: {entity} is knocked out", level.frame())
                }
                _ => {}
            }
        }
    }
    level.end_round();

    for character in level.characters() {
        info!("{} ({}) ends at {}%", character.name(), character.id(), character.damage());
    }

    Ok(())
}
