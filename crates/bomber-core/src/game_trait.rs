use serde::{Deserialize, Serialize};

use crate::input::InputSnapshot;
use crate::player::PlayerSlot;

/// Core trait for a fixed-tick local game.
///
/// The presentation shell owns the window, the clock and the keyboard; it
/// calls `update` once per frame with an input snapshot and then reads state
/// back for drawing. The game owns every piece of simulation state and is
/// only ever mutated from inside these calls.
pub trait LocalGame {
    /// Name and description for the title screen.
    fn metadata(&self) -> GameMetadata;

    /// Advance the simulation by one tick. Returns the events raised during it.
    fn update(&mut self, dt: f32, inputs: &InputSnapshot) -> Vec<GameEvent>;

    /// Serialize the full simulation state (MessagePack).
    fn serialize_state(&self) -> Vec<u8>;

    /// Replace the simulation state with a previously serialized one.
    /// Undecodable input is ignored.
    fn apply_state(&mut self, state: &[u8]);

    /// Simulation tick rate in Hz.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    fn pause(&mut self);

    fn resume(&mut self);

    /// Whether a round has ended and is waiting for `acknowledge_round`.
    fn is_round_complete(&self) -> bool;

    /// Accept the pending round result and reset for the next round.
    fn acknowledge_round(&mut self);

    /// Current per-player scores.
    fn round_results(&self) -> Vec<PlayerScore>;
}

/// Game metadata for the title screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
    pub player_count: u8,
}

/// Why a player was sent back to their spawn point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnockoutCause {
    /// Touched the hazard ground strip.
    Hazard,
    /// Dropped below the bottom of the field.
    FellOut,
    /// Caught inside a bomb explosion.
    Explosion,
}

/// Events emitted by a game during update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreUpdate {
        player: PlayerSlot,
        score: u32,
    },
    KnockedOut {
        player: PlayerSlot,
        cause: KnockoutCause,
    },
    BombDropped {
        owner: PlayerSlot,
        x: f32,
        y: f32,
    },
    BombExploded {
        x: f32,
        y: f32,
        platforms_destroyed: usize,
    },
    RoundOver {
        winner: PlayerSlot,
    },
}

/// Score entry for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player: PlayerSlot,
    pub score: u32,
}

/// Generates the `LocalGame` methods that only shuffle state around:
/// `serialize_state`, `apply_state`, `pause`, `resume`, `is_round_complete`.
///
/// Requires the implementing struct to have `state: $StateType` and `paused: bool`
/// fields, and `$StateType` to have a `round_over: Option<_>` field.
#[macro_export]
macro_rules! local_game_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            $crate::__private::rmp_serde::to_vec(&self.state)
                .expect("game state serialization must succeed")
        }

        fn apply_state(&mut self, state: &[u8]) {
            match $crate::__private::rmp_serde::from_slice::<$StateType>(state) {
                Ok(s) => self.state = s,
                Err(e) => {
                    $crate::__private::tracing::warn!("Ignoring undecodable game state: {e}")
                },
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn is_round_complete(&self) -> bool {
            self.state.round_over.is_some()
        }
    };
}
