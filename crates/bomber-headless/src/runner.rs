use std::time::Duration;

use tracing::{debug, info};

use bomber_core::game_trait::{GameEvent, LocalGame};
use bomber_core::player::PlayerSlot;
use bomber_jumper::BomberMatch;

use crate::options::RunOptions;
use crate::script::ScriptedInput;

/// Outcome of a headless run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    /// Winner of each completed round, in order.
    pub winners: Vec<PlayerSlot>,
    pub rounds_won: [u32; 2],
    pub interrupted: bool,
}

/// Drive `game` with scripted inputs until `opts.rounds` rounds have been
/// won, `opts.max_ticks` ticks have run, or (in realtime mode) Ctrl-C.
/// Every round result is acknowledged so play continues into the next round.
pub async fn run_match(
    game: &mut BomberMatch,
    script: &mut ScriptedInput,
    opts: &RunOptions,
) -> RunSummary {
    let mut interval = opts.realtime.then(|| {
        let mut interval =
            tokio::time::interval(Duration::from_secs_f32(1.0 / game.tick_rate()));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        interval
    });

    let mut ticks = 0;
    let mut winners = Vec::new();
    let mut interrupted = false;

    while ticks < opts.max_ticks {
        if let Some(interval) = interval.as_mut() {
            tokio::select! {
                _ = interval.tick() => {},
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted");
                    interrupted = true;
                    break;
                }
            }
        }

        let inputs = script.next_inputs();
        let events = game.tick(&inputs, 1.0);
        ticks += 1;
        for event in &events {
            log_event(event);
        }

        if let Some(winner) = game.acknowledge_round_over() {
            winners.push(winner);
            if winners.len() >= opts.rounds as usize {
                break;
            }
        }
    }

    let summary = RunSummary {
        ticks,
        winners,
        rounds_won: game.state().rounds_won,
        interrupted,
    };
    info!(
        ticks = summary.ticks,
        rounds = summary.winners.len(),
        player_one_rounds = summary.rounds_won[0],
        player_two_rounds = summary.rounds_won[1],
        "Run finished"
    );
    summary
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::ScoreUpdate { player, score } => info!(%player, score, "Score"),
        GameEvent::KnockedOut { player, cause } => info!(%player, ?cause, "Knocked out"),
        GameEvent::BombDropped { owner, x, y } => debug!(%owner, x, y, "Bomb dropped"),
        GameEvent::BombExploded {
            x,
            y,
            platforms_destroyed,
        } => debug!(x, y, platforms_destroyed, "Bomb exploded"),
        GameEvent::RoundOver { winner } => info!(%winner, "Round over"),
    }
}
