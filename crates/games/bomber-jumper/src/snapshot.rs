use serde::{Deserialize, Serialize};

use bomber_core::geometry::Rect;
use bomber_core::player::PlayerSlot;

use crate::bomb::{Bomb, BombPhase};
use crate::config::BombConfig;
use crate::player::{Facing, PlayerState};

/// Everything a renderer needs to draw one frame. Built fresh after each
/// tick; holding one never borrows the match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub tick: u64,
    pub platforms: Vec<Rect>,
    pub ground: Rect,
    pub players: Vec<PlayerView>,
    pub bombs: Vec<BombView>,
    pub round_over: Option<PlayerSlot>,
    pub rounds_won: [u32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub slot: PlayerSlot,
    /// Top-left corner.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
    pub score: u32,
    pub grounded: bool,
    pub drop_cooldown: u32,
}

impl From<&PlayerState> for PlayerView {
    fn from(p: &PlayerState) -> Self {
        Self {
            slot: p.slot,
            x: p.rect.x,
            y: p.rect.y,
            width: p.rect.width,
            height: p.rect.height,
            facing: p.facing,
            score: p.score,
            grounded: p.on_ground,
            drop_cooldown: p.drop_cooldown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BombViewPhase {
    Falling,
    Exploded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BombView {
    pub owner: PlayerSlot,
    /// Center.
    pub x: f32,
    pub y: f32,
    pub phase: BombViewPhase,
    pub visual_radius: f32,
}

impl BombView {
    pub fn new(bomb: &Bomb, config: &BombConfig) -> Self {
        let (x, y) = bomb.center();
        let (phase, visual_radius) = match bomb.phase {
            BombPhase::Falling => (BombViewPhase::Falling, config.size / 2.0),
            BombPhase::Exploded { .. } => (BombViewPhase::Exploded, config.explosion_radius),
        };
        Self {
            owner: bomb.owner,
            x,
            y,
            phase,
            visual_radius,
        }
    }
}
