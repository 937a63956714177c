use serde::{Deserialize, Serialize};

use bomber_core::game_trait::{GameEvent, KnockoutCause};
use bomber_core::geometry::Rect;
use bomber_core::input::PlayerInput;
use bomber_core::player::PlayerSlot;

use crate::bomb::Bomb;
use crate::config::{BomberConfig, GroundMode, SpawnPoint};
use crate::physics::{apply_gravity, clamp_to_field, resolve_horizontal, resolve_vertical};
use crate::scoring::score_knockout;
use crate::tile_map::TileMap;

/// Which way the sprite faces. Purely visual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Per-tick values shared by every entity update.
pub struct TickEnv<'a> {
    pub config: &'a BomberConfig,
    /// Index of the tick being simulated.
    pub now: u64,
    /// Kinematic step, 1.0 = one nominal frame.
    pub dt: f32,
}

/// State of a single player.
///
/// Grounded/airborne is tracked by `on_ground`: a jump or a tick without a
/// downward collision makes the player airborne, landing on a top edge makes
/// them grounded again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub slot: PlayerSlot,
    /// Seat credited when this player is knocked out. Fixed at match setup.
    pub opponent: PlayerSlot,
    pub rect: Rect,
    pub velocity_y: f32,
    pub speed: f32,
    pub jump_strength: f32,
    pub facing: Facing,
    pub on_ground: bool,
    pub score: u32,
    /// Ticks until the next bomb may be dropped.
    pub drop_cooldown: u32,
    pub spawn: SpawnPoint,
}

impl PlayerState {
    pub fn new(slot: PlayerSlot, spawn: SpawnPoint, config: &BomberConfig) -> Self {
        let size = config.physics.player_size;
        Self {
            slot,
            opponent: slot.opponent(),
            rect: Rect::from_center(spawn.x, spawn.y, size, size),
            velocity_y: 0.0,
            speed: config.physics.player_speed,
            jump_strength: config.physics.jump_strength,
            facing: Facing::Right,
            on_ground: false,
            score: 0,
            drop_cooldown: 0,
            spawn,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.rect.center_x(), self.rect.center_y())
    }

    /// Put the player back on their spawn point with no vertical velocity.
    /// Score and cooldown are untouched.
    pub fn respawn(&mut self) {
        let (w, h) = (self.rect.width, self.rect.height);
        self.rect = Rect::from_center(self.spawn.x, self.spawn.y, w, h);
        self.velocity_y = 0.0;
        tracing::debug!(player = %self.slot, x = self.spawn.x, y = self.spawn.y, "Respawned");
    }

    /// Advance this player by one tick.
    ///
    /// Steps run in a fixed order: walk and resolve walls, jump, fall and
    /// resolve floors/ceilings, knockout check, bomb drop, cooldown, then
    /// clamp to the field edges.
    pub fn update(
        &mut self,
        input: &PlayerInput,
        map: &TileMap,
        opponent: &mut PlayerState,
        bombs: &mut Vec<Bomb>,
        env: &TickEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) {
        let config = env.config;
        let solid_ground = config.rules.ground_mode == GroundMode::Solid;

        // Horizontal movement
        let dir = input.horizontal();
        match dir {
            1 => self.facing = Facing::Right,
            -1 => self.facing = Facing::Left,
            _ => {},
        }
        let dx = f32::from(dir) * self.speed * env.dt;
        self.rect = resolve_horizontal(self.rect, dx, map.colliders(solid_ground));

        // Jump
        if input.up && self.on_ground {
            self.velocity_y = self.jump_strength;
            self.on_ground = false;
        }

        // Gravity and floors
        self.velocity_y = apply_gravity(self.velocity_y, config.physics.gravity, env.dt);
        let res = resolve_vertical(self.rect, self.velocity_y, env.dt, map.colliders(solid_ground));
        self.rect = res.rect;
        self.velocity_y = res.velocity_y;
        self.on_ground = res.grounded;

        // Knockout
        let knockout = match config.rules.ground_mode {
            GroundMode::Hazard => self
                .rect
                .intersects(&map.ground())
                .then_some(KnockoutCause::Hazard),
            GroundMode::Solid => {
                (self.rect.bottom() > map.field_height()).then_some(KnockoutCause::FellOut)
            },
        };
        if let Some(cause) = knockout {
            score_knockout(self, opponent, cause, events);
        }

        // Bomb drop
        if config.rules.bombs_enabled && input.drop && self.drop_cooldown == 0 {
            let x = self.rect.center_x();
            let y = self.rect.bottom();
            bombs.push(Bomb::new(self.slot, x, y, env.now, &config.bomb));
            self.drop_cooldown = config.bomb.drop_cooldown_ticks;
            tracing::debug!(player = %self.slot, x, y, tick = env.now, "Bomb dropped");
            events.push(GameEvent::BombDropped {
                owner: self.slot,
                x,
                y,
            });
        }

        if self.drop_cooldown > 0 {
            self.drop_cooldown -= 1;
        }

        self.rect = clamp_to_field(self.rect, map.field_width());
    }
}

/// Borrow `slot` mutably together with its opponent.
pub fn pair_mut(
    players: &mut [PlayerState; 2],
    slot: PlayerSlot,
) -> (&mut PlayerState, &mut PlayerState) {
    let [one, two] = players;
    match slot {
        PlayerSlot::One => (one, two),
        PlayerSlot::Two => (two, one),
    }
}
