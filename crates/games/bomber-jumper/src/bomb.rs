use serde::{Deserialize, Serialize};

use bomber_core::game_trait::{GameEvent, KnockoutCause};
use bomber_core::geometry::Rect;
use bomber_core::player::PlayerSlot;

use crate::config::BombConfig;
use crate::physics::{apply_gravity, resolve_vertical};
use crate::player::{PlayerState, pair_mut};
use crate::scoring::score_knockout;
use crate::tile_map::TileMap;

/// Where a bomb is in its lifecycle. A bomb never goes back to `Falling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombPhase {
    Falling,
    Exploded { at: u64 },
}

/// What the owning collection should do with a bomb after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BombStatus {
    Live,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bomb {
    pub owner: PlayerSlot,
    /// Falling footprint, replaced by the blast area on explosion.
    pub rect: Rect,
    pub velocity_y: f32,
    pub spawn_tick: u64,
    pub phase: BombPhase,
}

impl Bomb {
    /// A bomb centered on `(x, y)`, dropped on tick `now`.
    pub fn new(owner: PlayerSlot, x: f32, y: f32, now: u64, config: &BombConfig) -> Self {
        Self {
            owner,
            rect: Rect::from_center(x, y, config.size, config.size),
            velocity_y: 0.0,
            spawn_tick: now,
            phase: BombPhase::Falling,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.rect.center_x(), self.rect.center_y())
    }

    pub fn is_exploded(&self) -> bool {
        matches!(self.phase, BombPhase::Exploded { .. })
    }

    /// Advance the bomb to tick `now`.
    ///
    /// Damage and terrain destruction happen only on the tick the fuse runs
    /// out, so a player standing in a lingering explosion is hit once.
    pub fn update(
        &mut self,
        now: u64,
        dt: f32,
        config: &BombConfig,
        map: &mut TileMap,
        players: &mut [PlayerState; 2],
        events: &mut Vec<GameEvent>,
    ) -> BombStatus {
        match self.phase {
            BombPhase::Falling => {
                self.velocity_y = apply_gravity(self.velocity_y, config.gravity, dt);
                let res = resolve_vertical(self.rect, self.velocity_y, dt, map.colliders(true));
                self.rect = res.rect;
                self.velocity_y = res.velocity_y;

                if now.saturating_sub(self.spawn_tick) >= config.fuse_ticks {
                    self.explode(now, config, map, players, events);
                }
                BombStatus::Live
            },
            BombPhase::Exploded { at } => {
                if now.saturating_sub(at) >= config.display_ticks {
                    BombStatus::Expired
                } else {
                    BombStatus::Live
                }
            },
        }
    }

    fn explode(
        &mut self,
        now: u64,
        config: &BombConfig,
        map: &mut TileMap,
        players: &mut [PlayerState; 2],
        events: &mut Vec<GameEvent>,
    ) {
        let (cx, cy) = self.center();
        let r = config.explosion_radius;
        let area = Rect::from_center(cx, cy, 2.0 * r, 2.0 * r);
        self.rect = area;
        self.velocity_y = 0.0;
        self.phase = BombPhase::Exploded { at: now };

        let platforms_destroyed = map.remove_in_area(&area);
        tracing::debug!(
            owner = %self.owner,
            x = cx,
            y = cy,
            platforms_destroyed,
            tick = now,
            "Bomb exploded"
        );
        events.push(GameEvent::BombExploded {
            x: cx,
            y: cy,
            platforms_destroyed,
        });

        for slot in PlayerSlot::ALL {
            let (victim, opponent) = pair_mut(players, slot);
            if victim.rect.intersects(&area) {
                score_knockout(victim, opponent, KnockoutCause::Explosion, events);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BomberConfig, SpawnPoint};
    use crate::tile_map::TileGrid;

    /// 10x10 grid on a 200x200 field: 20px tiles, floor at row 5 (y = 100).
    fn floor_map() -> TileMap {
        let mut rows = vec![".........."; 10];
        rows[5] = "XXXXXXXXXX";
        TileMap::load(&TileGrid::parse_rows(&rows).unwrap(), 200.0, 200.0)
    }

    fn open_map() -> TileMap {
        TileMap::load(&TileGrid::parse_rows(&[".........."; 10]).unwrap(), 200.0, 200.0)
    }

    fn far_players(cfg: &BomberConfig) -> [PlayerState; 2] {
        [
            PlayerState::new(PlayerSlot::One, SpawnPoint { x: 1000.0, y: 0.0 }, cfg),
            PlayerState::new(PlayerSlot::Two, SpawnPoint { x: 2000.0, y: 0.0 }, cfg),
        ]
    }

    fn run(
        bomb: &mut Bomb,
        ticks: impl IntoIterator<Item = u64>,
        cfg: &BombConfig,
        map: &mut TileMap,
        players: &mut [PlayerState; 2],
    ) -> (Vec<GameEvent>, Option<u64>) {
        let mut events = Vec::new();
        for now in ticks {
            if bomb.update(now, 1.0, cfg, map, players, &mut events) == BombStatus::Expired {
                return (events, Some(now));
            }
        }
        (events, None)
    }

    #[test]
    fn falls_with_gravity() {
        let cfg = BomberConfig::default();
        let mut map = floor_map();
        let mut players = far_players(&cfg);
        let mut bomb = Bomb::new(PlayerSlot::One, 50.0, 10.0, 0, &cfg.bomb);
        run(&mut bomb, 0..2, &cfg.bomb, &mut map, &mut players);
        // 0.9 then 1.8
        assert!((bomb.center().1 - 12.7).abs() < 1e-4);
        assert!(!bomb.is_exploded());
    }

    #[test]
    fn lands_on_platform() {
        let cfg = BomberConfig::default();
        let mut map = floor_map();
        let mut players = far_players(&cfg);
        let mut bomb = Bomb::new(PlayerSlot::One, 50.0, 10.0, 0, &cfg.bomb);
        run(&mut bomb, 0..60, &cfg.bomb, &mut map, &mut players);
        assert_eq!(bomb.rect.bottom(), 100.0);
        assert_eq!(bomb.velocity_y, 0.0);
    }

    #[test]
    fn lands_on_ground_when_no_platforms() {
        let cfg = BomberConfig::default();
        let mut map = open_map();
        let mut players = far_players(&cfg);
        let mut bomb = Bomb::new(PlayerSlot::One, 50.0, 10.0, 0, &cfg.bomb);
        run(&mut bomb, 0..100, &cfg.bomb, &mut map, &mut players);
        assert_eq!(bomb.rect.bottom(), map.ground().top());
    }

    #[test]
    fn explodes_exactly_at_fuse() {
        let cfg = BomberConfig::default();
        let mut map = floor_map();
        let mut players = far_players(&cfg);
        let mut bomb = Bomb::new(PlayerSlot::One, 50.0, 90.0, 5, &cfg.bomb);
        let fuse_at = 5 + cfg.bomb.fuse_ticks;

        run(&mut bomb, 5..fuse_at, &cfg.bomb, &mut map, &mut players);
        assert!(!bomb.is_exploded());

        let (events, _) = run(&mut bomb, fuse_at..fuse_at + 1, &cfg.bomb, &mut map, &mut players);
        assert_eq!(bomb.phase, BombPhase::Exploded { at: fuse_at });
        assert!(matches!(events[..], [GameEvent::BombExploded { .. }]));
    }

    #[test]
    fn explosion_replaces_footprint_with_blast_area() {
        let cfg = BomberConfig::default();
        let mut map = floor_map();
        let mut players = far_players(&cfg);
        let mut bomb = Bomb::new(PlayerSlot::One, 50.0, 90.0, 0, &cfg.bomb);
        run(&mut bomb, 0..=cfg.bomb.fuse_ticks, &cfg.bomb, &mut map, &mut players);
        let r = cfg.bomb.explosion_radius;
        assert_eq!(bomb.rect.width, 2.0 * r);
        assert_eq!(bomb.rect.height, 2.0 * r);
        assert_eq!(bomb.center(), (50.0, 90.0));
    }

    #[test]
    fn explosion_destroys_overlapping_platforms() {
        let cfg = BomberConfig::default();
        let mut map = floor_map();
        let mut players = far_players(&cfg);
        // Resting on the floor, centered at (50, 90): blast is 20..80 x 60..120.
        let mut bomb = Bomb::new(PlayerSlot::One, 50.0, 90.0, 0, &cfg.bomb);
        let fuse = cfg.bomb.fuse_ticks;
        let (events, _) = run(&mut bomb, 0..=fuse, &cfg.bomb, &mut map, &mut players);

        // Floor tiles at x 20..40, 40..60, 60..80 overlap; 0..20 and 80..100 only touch.
        assert_eq!(map.platforms().len(), 7);
        let area = bomb.rect;
        assert!(map.platforms().iter().all(|p| !p.intersects(&area)));
        assert!(events.contains(&GameEvent::BombExploded {
            x: 50.0,
            y: 90.0,
            platforms_destroyed: 3,
        }));
    }

    #[test]
    fn explosion_never_removes_ground() {
        let cfg = BomberConfig::default();
        let mut map = open_map();
        let ground = map.ground();
        let mut players = far_players(&cfg);
        let mut bomb = Bomb::new(PlayerSlot::One, 50.0, 170.0, 0, &cfg.bomb);
        run(&mut bomb, 0..=cfg.bomb.fuse_ticks, &cfg.bomb, &mut map, &mut players);
        assert!(bomb.is_exploded());
        assert_eq!(map.ground(), ground);
    }

    #[test]
    fn explosion_hits_each_overlapping_player_once() {
        let cfg = BomberConfig::default();
        let mut map = floor_map();
        let mut players = [
            PlayerState::new(PlayerSlot::One, SpawnPoint { x: 500.0, y: 500.0 }, &cfg),
            PlayerState::new(PlayerSlot::Two, SpawnPoint { x: 600.0, y: 500.0 }, &cfg),
        ];
        // Park player two inside the future blast.
        players[1].rect = Rect::from_center(60.0, 75.0, 50.0, 50.0);
        let mut bomb = Bomb::new(PlayerSlot::One, 50.0, 90.0, 0, &cfg.bomb);

        let (events, expired) = run(&mut bomb, 0..1000, &cfg.bomb, &mut map, &mut players);
        assert!(expired.is_some());
        assert_eq!(players[0].score, 1);
        assert_eq!(players[1].score, 0);
        assert_eq!(players[1].center(), (600.0, 500.0));
        let knockouts = events
            .iter()
            .filter(|e| matches!(e, GameEvent::KnockedOut { .. }))
            .count();
        assert_eq!(knockouts, 1);
    }

    #[test]
    fn lingering_explosion_does_not_rehit() {
        let cfg = BomberConfig::default();
        let mut map = floor_map();
        let mut players = far_players(&cfg);
        let mut bomb = Bomb::new(PlayerSlot::Two, 50.0, 90.0, 0, &cfg.bomb);
        let fuse = cfg.bomb.fuse_ticks;
        run(&mut bomb, 0..=fuse, &cfg.bomb, &mut map, &mut players);

        // Walk into the blast while it is still on screen.
        players[0].rect = Rect::from_center(50.0, 90.0, 50.0, 50.0);
        let (events, _) = run(&mut bomb, fuse + 1..fuse + 10, &cfg.bomb, &mut map, &mut players);
        assert!(events.is_empty());
        assert_eq!(players[1].score, 0);
    }

    #[test]
    fn expires_after_display_duration() {
        let cfg = BomberConfig::default();
        let mut map = floor_map();
        let mut players = far_players(&cfg);
        let mut bomb = Bomb::new(PlayerSlot::One, 50.0, 90.0, 0, &cfg.bomb);
        let fuse = cfg.bomb.fuse_ticks;
        let (_, expired) = run(&mut bomb, 0..1000, &cfg.bomb, &mut map, &mut players);
        assert_eq!(expired, Some(fuse + cfg.bomb.display_ticks));
    }

    #[test]
    fn both_players_hit_credits_both() {
        let cfg = BomberConfig::default();
        let mut map = floor_map();
        let mut players = far_players(&cfg);
        players[0].rect = Rect::from_center(40.0, 75.0, 50.0, 50.0);
        players[1].rect = Rect::from_center(60.0, 75.0, 50.0, 50.0);
        let mut bomb = Bomb::new(PlayerSlot::One, 50.0, 90.0, 0, &cfg.bomb);
        run(&mut bomb, 0..=cfg.bomb.fuse_ticks, &cfg.bomb, &mut map, &mut players);
        assert_eq!(players[0].score, 1);
        assert_eq!(players[1].score, 1);
    }
}
