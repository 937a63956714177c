use bomber_core::game_trait::{GameEvent, KnockoutCause};
use bomber_core::player::PlayerSlot;

use crate::player::PlayerState;

/// Knock `victim` out: credit their opponent with exactly one point and put
/// the victim back on their spawn point.
pub fn score_knockout(
    victim: &mut PlayerState,
    opponent: &mut PlayerState,
    cause: KnockoutCause,
    events: &mut Vec<GameEvent>,
) {
    debug_assert_eq!(victim.opponent, opponent.slot);
    opponent.score += 1;
    victim.respawn();
    tracing::debug!(
        victim = %victim.slot,
        ?cause,
        opponent_score = opponent.score,
        "Player knocked out"
    );
    events.push(GameEvent::KnockedOut {
        player: victim.slot,
        cause,
    });
    events.push(GameEvent::ScoreUpdate {
        player: opponent.slot,
        score: opponent.score,
    });
}

/// The seat that has reached `target`, if any. Player one is checked first,
/// so it takes the round when both reach the target on the same tick.
pub fn round_winner(scores: [u32; 2], target: u32) -> Option<PlayerSlot> {
    PlayerSlot::ALL
        .into_iter()
        .find(|slot| scores[slot.index()] >= target)
}
