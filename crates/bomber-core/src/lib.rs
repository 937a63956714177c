pub mod game_trait;
pub mod geometry;
pub mod input;
pub mod player;

// Used by `local_game_boilerplate!` so game crates need not depend on these.
#[doc(hidden)]
pub mod __private {
    pub use rmp_serde;
    pub use tracing;
}

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::game_trait::{GameEvent, LocalGame};
    use crate::input::{InputSnapshot, PlayerInput};

    pub fn held_left() -> PlayerInput {
        PlayerInput {
            left: true,
            ..Default::default()
        }
    }

    pub fn held_right() -> PlayerInput {
        PlayerInput {
            right: true,
            ..Default::default()
        }
    }

    pub fn held_jump() -> PlayerInput {
        PlayerInput {
            up: true,
            ..Default::default()
        }
    }

    pub fn held_drop() -> PlayerInput {
        PlayerInput {
            drop: true,
            ..Default::default()
        }
    }

    /// Run N game ticks with the same inputs, returning all accumulated events.
    pub fn run_game_ticks(
        game: &mut dyn LocalGame,
        n: usize,
        dt: f32,
        inputs: &InputSnapshot,
    ) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(dt, inputs));
        }
        all_events
    }

    /// Run idle ticks until the round completes or `max_ticks` elapse.
    /// Returns the number of ticks run.
    pub fn run_until_round_complete(
        game: &mut dyn LocalGame,
        max_ticks: usize,
        inputs: &InputSnapshot,
    ) -> usize {
        for tick in 0..max_ticks {
            if game.is_round_complete() {
                return tick;
            }
            game.update(1.0, inputs);
        }
        max_ticks
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // Generic checks every LocalGame implementation must pass. Game crates
    // call them from their own #[cfg(test)] modules.

    /// update() with dt>0 must advance the state (at minimum the tick counter).
    pub fn contract_update_advances_time(game: &mut dyn LocalGame) {
        let before = game.serialize_state();
        game.update(1.0, &InputSnapshot::default());
        let after = game.serialize_state();
        assert_ne!(before, after, "update(dt>0) must advance game state");
    }

    /// pause() must freeze the state, resume() must unfreeze it.
    pub fn contract_pause_stops_updates(game: &mut dyn LocalGame) {
        game.pause();
        let before = game.serialize_state();
        game.update(1.0, &InputSnapshot::default());
        let during_pause = game.serialize_state();
        assert_eq!(before, during_pause, "State must not change while paused");

        game.resume();
        game.update(1.0, &InputSnapshot::default());
        let after_resume = game.serialize_state();
        assert_ne!(during_pause, after_resume, "State must change after resume");
    }

    /// serialize_state → apply_state must be stable after one roundtrip.
    pub fn contract_state_roundtrip_preserves(game: &mut dyn LocalGame) {
        let state_a = game.serialize_state();
        game.apply_state(&state_a);
        let state_b = game.serialize_state();
        assert_eq!(
            state_a, state_b,
            "State must be unchanged by serialize→apply→serialize"
        );
    }

    /// apply_state() with garbage must leave the state untouched.
    pub fn contract_garbage_state_ignored(game: &mut dyn LocalGame) {
        let before = game.serialize_state();
        game.apply_state(&[0xc1, 0xff, 0x00]);
        assert_eq!(before, game.serialize_state());
    }

    /// round_results() must return one entry per seat.
    pub fn contract_round_results_complete(game: &dyn LocalGame) {
        let results = game.round_results();
        assert_eq!(results.len(), 2, "round_results must cover both seats");
    }
}
