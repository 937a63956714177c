pub mod bomb;
pub mod config;
pub mod physics;
pub mod player;
pub mod scoring;
pub mod snapshot;
pub mod tile_map;

use serde::{Deserialize, Serialize};
use tracing::info;

use bomber_core::game_trait::{GameEvent, GameMetadata, LocalGame, PlayerScore};
use bomber_core::input::InputSnapshot;
use bomber_core::local_game_boilerplate;
use bomber_core::player::PlayerSlot;

use bomb::{Bomb, BombStatus};
use config::{BomberConfig, ConfigError};
use player::{PlayerState, TickEnv, pair_mut};
use scoring::round_winner;
use snapshot::{BombView, MatchSnapshot, PlayerView};
use tile_map::{TileGrid, TileMap};

/// Serializable simulation state. Everything that changes tick to tick
/// lives here; tuning lives in [`BomberConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub map: TileMap,
    /// Indexed by [`PlayerSlot::index`].
    pub players: [PlayerState; 2],
    pub bombs: Vec<Bomb>,
    /// Number of ticks simulated so far. Never reset.
    pub tick: u64,
    /// Set when a player reaches the target score; cleared on acknowledgement.
    pub round_over: Option<PlayerSlot>,
    /// Rounds won per seat over the life of the match.
    pub rounds_won: [u32; 2],
}

/// A two-player bomb match.
pub struct BomberMatch {
    config: BomberConfig,
    /// Source grid, kept to rebuild the map on round reset.
    grid: TileGrid,
    state: MatchState,
    paused: bool,
}

fn spawn_players(config: &BomberConfig) -> [PlayerState; 2] {
    [
        PlayerState::new(PlayerSlot::One, config.spawns.player_one, config),
        PlayerState::new(PlayerSlot::Two, config.spawns.player_two, config),
    ]
}

impl BomberMatch {
    /// Validate `config`, load its level and place both players on their
    /// spawn points.
    pub fn new(config: BomberConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.level.grid()?;
        let map = TileMap::load(&grid, config.field.width, config.field.height);
        info!(
            columns = grid.width(),
            rows = grid.height(),
            platforms = map.platforms().len(),
            ground_mode = ?config.rules.ground_mode,
            "Match created"
        );
        let state = MatchState {
            map,
            players: spawn_players(&config),
            bombs: Vec::new(),
            tick: 0,
            round_over: None,
            rounds_won: [0; 2],
        };
        Ok(Self {
            config,
            grid,
            state,
            paused: false,
        })
    }

    pub fn config(&self) -> &BomberConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn player(&self, slot: PlayerSlot) -> &PlayerState {
        &self.state.players[slot.index()]
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance the match by one tick: both players, then every bomb, then
    /// the win check. Does nothing while paused or while a round result is
    /// waiting to be acknowledged.
    pub fn tick(&mut self, inputs: &InputSnapshot, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.paused || self.state.round_over.is_some() {
            return events;
        }

        let MatchState {
            map,
            players,
            bombs,
            tick,
            round_over,
            ..
        } = &mut self.state;
        let now = *tick;

        let env = TickEnv {
            config: &self.config,
            now,
            dt,
        };
        for slot in PlayerSlot::ALL {
            let (me, opponent) = pair_mut(players, slot);
            me.update(&inputs[slot], map, opponent, bombs, &env, &mut events);
        }

        let bomb_config = &self.config.bomb;
        bombs.retain_mut(|bomb| {
            bomb.update(now, dt, bomb_config, map, players, &mut events) == BombStatus::Live
        });

        *tick += 1;

        let scores = [players[0].score, players[1].score];
        if let Some(winner) = round_winner(scores, self.config.rules.target_score) {
            *round_over = Some(winner);
            info!(
                %winner,
                player_one = scores[0],
                player_two = scores[1],
                tick = now,
                "Round over"
            );
            events.push(GameEvent::RoundOver { winner });
        }

        events
    }

    /// Accept a pending round result: credit the winner's round tally, then
    /// reset scores, respawn both players, restore every platform and clear
    /// the bombs. Returns the winner, or `None` if no round was pending.
    pub fn acknowledge_round_over(&mut self) -> Option<PlayerSlot> {
        let winner = self.state.round_over.take()?;
        self.state.rounds_won[winner.index()] += 1;
        self.reset_round();
        info!(
            %winner,
            rounds_won = ?self.state.rounds_won,
            "Round acknowledged, arena reset"
        );
        Some(winner)
    }

    fn reset_round(&mut self) {
        let field = &self.config.field;
        self.state.map = TileMap::load(&self.grid, field.width, field.height);
        self.state.players = spawn_players(&self.config);
        self.state.bombs.clear();
    }

    /// Read-only view of the current frame for a renderer.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            tick: self.state.tick,
            platforms: self.state.map.platforms().to_vec(),
            ground: self.state.map.ground(),
            players: self.state.players.iter().map(PlayerView::from).collect(),
            bombs: self
                .state
                .bombs
                .iter()
                .map(|b| BombView::new(b, &self.config.bomb))
                .collect(),
            round_over: self.state.round_over,
            rounds_won: self.state.rounds_won,
        }
    }
}

impl LocalGame for BomberMatch {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Bomber Jumper".to_string(),
            description: "Knock your rival into the hazard or blow them up with timed bombs"
                .to_string(),
            player_count: 2,
        }
    }

    fn update(&mut self, dt: f32, inputs: &InputSnapshot) -> Vec<GameEvent> {
        self.tick(inputs, dt)
    }

    fn tick_rate(&self) -> f32 {
        self.config.rules.tick_rate_hz
    }

    local_game_boilerplate!(state_type: MatchState);

    fn acknowledge_round(&mut self) {
        self.acknowledge_round_over();
    }

    fn round_results(&self) -> Vec<PlayerScore> {
        self.state
            .players
            .iter()
            .map(|p| PlayerScore {
                player: p.slot,
                score: p.score,
            })
            .collect()
    }
}
