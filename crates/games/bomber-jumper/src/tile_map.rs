use std::path::Path;

use serde::{Deserialize, Serialize};

use bomber_core::geometry::Rect;

/// Grid marker for a solid (destructible) tile.
pub const SOLID_MARKER: char = 'X';
/// Grid marker for an empty tile.
pub const EMPTY_MARKER: char = '.';

/// Built-in 80x20 arena: staggered ledges over two full-width floors.
pub const DEFAULT_LEVEL: &[&str] = &[
    "................................................................................",
    "................XXXX........................................XXXX................",
    "..........................XXXXXXXX............XXXXXXXX..........................",
    ".........XXXX......................................................XXXX.........",
    "XXX..........................................................................XXX",
    ".................XXXXXXXX..............................XXXXXXXX.................",
    "................................................................................",
    "...XXXXXX.........................XXXXXXXXXXXX.........................XXXXXX...",
    "................................................................................",
    ".............XXXXXXXX......................................XXXXXXXX.............",
    "..........XXXX................XXXX............XXXX................XXXX..........",
    "................................XXXX........XXXX................................",
    ".....................XXXXXXXX......................XXXXXXXX.....................",
    "XXXXXXXX................................................................XXXXXXXX",
    "....................................XXXXXXX.....................................",
    "................................................................................",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "................................................................................",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "................................................................................",
];

/// Tile types for the level grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Empty,
    Solid,
}

impl Tile {
    fn from_marker(symbol: char) -> Option<Tile> {
        match symbol {
            SOLID_MARKER => Some(Tile::Solid),
            EMPTY_MARKER => Some(Tile::Empty),
            _ => None,
        }
    }
}

/// Reasons a level grid is rejected at load time.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("level has no rows")]
    Empty,
    #[error("level row {row} is empty")]
    EmptyRow { row: usize },
    #[error("level row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown level symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A validated rectangular level grid.
///
/// Only used at load time; the live game works on the rectangles derived
/// from it by [`TileMap::load`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    /// Width in tiles.
    width: usize,
    /// Height in tiles.
    height: usize,
    /// Tile data stored row-major (row * width + col).
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Parse a grid from one string per row.
    pub fn parse_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, LevelError> {
        let first = rows.first().ok_or(LevelError::Empty)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(LevelError::EmptyRow { row: 0 });
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found == 0 {
                return Err(LevelError::EmptyRow { row });
            }
            if found != width {
                return Err(LevelError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let tile = Tile::from_marker(symbol)
                    .ok_or(LevelError::UnknownSymbol { row, col, symbol })?;
                tiles.push(tile);
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            tiles,
        })
    }

    /// Parse a grid from text with one row per line. Trailing whitespace and
    /// trailing blank lines are ignored.
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut rows: Vec<&str> = text.lines().map(str::trim_end).collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        Self::parse_rows(&rows)
    }

    pub fn builtin() -> Self {
        // DEFAULT_LEVEL is covered by `builtin_level_is_valid`.
        Self::parse_rows(DEFAULT_LEVEL).expect("built-in level must parse")
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, col: usize, row: usize) -> Tile {
        if col >= self.width || row >= self.height {
            return Tile::Empty;
        }
        self.tiles[row * self.width + col]
    }

    pub fn solid_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t == Tile::Solid).count()
    }
}

/// Load a level grid from a text file.
pub fn load_level_from_file(path: impl AsRef<Path>) -> Result<TileGrid, LevelError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    TileGrid::parse(&text)
}

/// The live platform set plus the indestructible ground strip.
///
/// Platforms only ever disappear (via [`TileMap::remove_in_area`]); the
/// only way to get them back is to build a fresh map from the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    platforms: Vec<Rect>,
    ground: Rect,
    tile_width: f32,
    tile_height: f32,
    field_width: f32,
    field_height: f32,
}

impl TileMap {
    /// Derive platform rectangles from `grid`, scaling tiles so the grid
    /// exactly covers a `field_width` x `field_height` play field.
    pub fn load(grid: &TileGrid, field_width: f32, field_height: f32) -> Self {
        let tile_width = field_width / grid.width() as f32;
        let tile_height = field_height / grid.height() as f32;

        let mut platforms = Vec::with_capacity(grid.solid_count());
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                if grid.get(col, row) == Tile::Solid {
                    platforms.push(Rect::new(
                        col as f32 * tile_width,
                        row as f32 * tile_height,
                        tile_width,
                        tile_height,
                    ));
                }
            }
        }

        Self {
            platforms,
            ground: Rect::new(0.0, field_height - tile_height, field_width, tile_height),
            tile_width,
            tile_height,
            field_width,
            field_height,
        }
    }

    pub fn platforms(&self) -> &[Rect] {
        &self.platforms
    }

    pub fn ground(&self) -> Rect {
        self.ground
    }

    /// Everything a body can collide with, platforms first. The ground is
    /// appended last when `include_ground` is set.
    pub fn colliders(&self, include_ground: bool) -> impl Iterator<Item = &Rect> + '_ {
        self.platforms
            .iter()
            .chain(include_ground.then_some(&self.ground))
    }

    pub fn tile_width(&self) -> f32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> f32 {
        self.tile_height
    }

    pub fn field_width(&self) -> f32 {
        self.field_width
    }

    pub fn field_height(&self) -> f32 {
        self.field_height
    }

    /// Remove every platform strictly overlapping `area`. The ground is never
    /// touched. Returns how many platforms were removed.
    pub fn remove_in_area(&mut self, area: &Rect) -> usize {
        let before = self.platforms.len();
        self.platforms.retain(|p| !p.intersects(area));
        debug_assert!(self.platforms.iter().all(|p| !p.intersects(area)));
        before - self.platforms.len()
    }
}
