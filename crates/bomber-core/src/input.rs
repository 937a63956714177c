use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::player::PlayerSlot;

/// Level-state controls for one player during one tick.
///
/// These are held states, not key-down edges: a button held for ten ticks
/// reads `true` ten times. Any rate limiting (jump only when grounded, bomb
/// cooldown) is enforced by the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub drop: bool,
}

impl PlayerInput {
    /// Horizontal intent as -1, 0 or +1. When both directions are held the
    /// right button wins.
    pub fn horizontal(&self) -> i8 {
        if self.right {
            1
        } else if self.left {
            -1
        } else {
            0
        }
    }
}

/// Inputs for both seats, captured once per tick by the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub players: [PlayerInput; 2],
}

impl InputSnapshot {
    pub fn new(one: PlayerInput, two: PlayerInput) -> Self {
        Self { players: [one, two] }
    }

    /// Snapshot where only `slot` is pressing anything.
    pub fn only(slot: PlayerSlot, input: PlayerInput) -> Self {
        let mut snapshot = Self::default();
        snapshot.players[slot.index()] = input;
        snapshot
    }
}

impl Index<PlayerSlot> for InputSnapshot {
    type Output = PlayerInput;

    fn index(&self, slot: PlayerSlot) -> &PlayerInput {
        &self.players[slot.index()]
    }
}
