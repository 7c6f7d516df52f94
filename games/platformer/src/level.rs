//! Level documents and built-in levels.
//!
//! A level document is JSON:
//!
//! ```json
//! {
//!   "width": 4, "height": 2, "tile_size": 8,
//!   "tiles": [[0, 0, 0, 0], [1, 1, 1, 1]],
//!   "objects": [
//!     { "type": "player-start", "x": 8, "y": 0 },
//!     { "type": "patrol-enemy", "x": 16, "y": 0 },
//!     { "type": "goal", "x": 24 }
//!   ],
//!   "time_limit": 120
//! }
//! ```
//!
//! Anything that goes wrong while reading one is a [`LevelError`]; the
//! `*_or_default` constructors log it and fall back to [`Level::flat_default`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glam::Vec2;
use plat_engine::{palette, Rng, TileId, TileMap};
use serde::Deserialize;

use crate::player::PLAYER_SIZE;

/// Limits on level documents so a bad file can't allocate without bound.
pub mod limits {
    /// Maximum width or height in tiles.
    pub const MAX_DIMENSION: u32 = 4096;
    /// Maximum number of placed objects.
    pub const MAX_OBJECTS: usize = 4096;
    /// Largest accepted time limit in seconds; keeps the clear bonus in range.
    pub const MAX_TIME_LIMIT: u32 = 9999;
}

/// Floating platform tile.
pub const BRICK: TileId = TileId(2);
/// Pillar / obstacle tile.
pub const BLOCK: TileId = TileId(3);

const DEFAULT_TILE_SIZE: f32 = 8.0;
const RUNNER_HEIGHT: u32 = 16;
const RUNNER_MIN_COLUMNS: u32 = 48;
const RUNNER_SAFE_START: u32 = 12;
const RUNNER_SAFE_END: u32 = 10;

/// Error type for level loading
#[derive(Debug)]
pub enum LevelError {
    NotFound(PathBuf),
    Io(io::Error),
    Malformed(serde_json::Error),
    Invalid(String),
}

impl From<io::Error> for LevelError {
    fn from(e: io::Error) -> Self {
        LevelError::Io(e)
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        LevelError::Malformed(e)
    }
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::NotFound(path) => write!(f, "level file not found: {}", path.display()),
            LevelError::Io(e) => write!(f, "IO error: {}", e),
            LevelError::Malformed(e) => write!(f, "malformed level document: {}", e),
            LevelError::Invalid(e) => write!(f, "invalid level: {}", e),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io(e) => Some(e),
            LevelError::Malformed(e) => Some(e),
            LevelError::NotFound(_) | LevelError::Invalid(_) => None,
        }
    }
}

/// Something placed in a level. Coordinates are the top-left corner in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Spawn {
    PatrolEnemy { x: f32, y: f32 },
    Coin { x: f32, y: f32 },
    PowerUp { x: f32, y: f32 },
    Goal { x: f32 },
    PlayerStart { x: f32, y: f32 },
}

#[derive(Debug, Deserialize)]
struct LevelDocument {
    width: u32,
    height: u32,
    #[serde(default = "default_tile_size")]
    tile_size: f32,
    tiles: Vec<Vec<u16>>,
    #[serde(default)]
    objects: Vec<Spawn>,
    #[serde(default)]
    time_limit: Option<u32>,
    #[serde(default)]
    background: Option<u8>,
}

fn default_tile_size() -> f32 {
    DEFAULT_TILE_SIZE
}

/// Immutable description of one level.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub map: TileMap,
    pub player_start: Vec2,
    /// X of the goal marker; `None` means the level cannot be cleared.
    pub goal_x: Option<f32>,
    /// Enemies and pickups, in document order. Never contains
    /// `PlayerStart` or `Goal`; those are folded into the fields above.
    pub spawns: Vec<Spawn>,
    /// Overrides the tuning's time limit when set.
    pub time_limit: Option<u32>,
    pub background: u8,
}

impl Level {
    /// Parse and validate a level document.
    pub fn from_json(json: &str) -> Result<Level, LevelError> {
        let doc: LevelDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Read a level document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Level, LevelError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LevelError::NotFound(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_json(&text)
    }

    pub fn from_json_or_default(json: &str) -> Level {
        Self::from_json(json).unwrap_or_else(|e| {
            log::warn!("{}; using the built-in level", e);
            Self::flat_default()
        })
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Level {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("{}; using the built-in level", e);
            Self::flat_default()
        })
    }

    fn from_document(doc: LevelDocument) -> Result<Level, LevelError> {
        if doc.width > limits::MAX_DIMENSION || doc.height > limits::MAX_DIMENSION {
            return Err(LevelError::Invalid(format!(
                "map too large ({}x{} > {})",
                doc.width,
                doc.height,
                limits::MAX_DIMENSION
            )));
        }
        if doc.objects.len() > limits::MAX_OBJECTS {
            return Err(LevelError::Invalid(format!(
                "too many objects ({} > {})",
                doc.objects.len(),
                limits::MAX_OBJECTS
            )));
        }
        match doc.time_limit {
            Some(0) => return Err(LevelError::Invalid("time_limit must be positive".into())),
            Some(t) if t > limits::MAX_TIME_LIMIT => {
                return Err(LevelError::Invalid(format!(
                    "time_limit too large ({} > {})",
                    t,
                    limits::MAX_TIME_LIMIT
                )))
            }
            _ => {}
        }

        let map = TileMap::from_rows(doc.width, doc.height, doc.tile_size, &doc.tiles)
            .map_err(LevelError::Invalid)?;

        let mut player_start = None;
        let mut goal_x = None;
        let mut spawns = Vec::new();
        for object in doc.objects {
            match object {
                // First marker wins.
                Spawn::PlayerStart { x, y } => {
                    player_start.get_or_insert(Vec2::new(x, y));
                }
                Spawn::Goal { x } => {
                    goal_x.get_or_insert(x);
                }
                Spawn::PatrolEnemy { .. } | Spawn::Coin { .. } | Spawn::PowerUp { .. } => {
                    spawns.push(clamp_spawn(object, &map));
                }
            }
        }

        let player_start = player_start.unwrap_or_else(|| default_start(&map));
        let player_start = Vec2::new(clamp_x(player_start.x, &map), player_start.y);

        Ok(Level {
            goal_x: Some(goal_x.unwrap_or_else(|| default_goal(&map))),
            player_start,
            spawns,
            time_limit: doc.time_limit,
            background: doc.background.map(|c| palette::wrap(c as u16)).unwrap_or(palette::SKY),
            map,
        })
    }

    /// 64x16 tiles of 8px: one ground row, a single patrol enemy and a goal
    /// three tiles from the right edge.
    pub fn flat_default() -> Level {
        let map = TileMap::flat(64, 16, DEFAULT_TILE_SIZE);
        Level {
            player_start: default_start(&map),
            goal_x: Some(default_goal(&map)),
            spawns: vec![Spawn::PatrolEnemy { x: 160.0, y: 112.0 }],
            time_limit: None,
            background: palette::SKY,
            map,
        }
    }

    /// 160x120 single screen with the ground surface at y=100 and nothing else.
    pub fn hop() -> Level {
        let map = TileMap::flat(8, 6, 20.0);
        Level {
            player_start: Vec2::new(72.0, 100.0 - PLAYER_SIZE.y),
            goal_x: None,
            spawns: Vec::new(),
            time_limit: None,
            background: palette::BLACK,
            map,
        }
    }

    /// Seeded course: ground with gaps, pillars, floating platforms, coins and
    /// enemies. The first and last few columns are always plain ground.
    pub fn generate_runner(seed: u64, columns: u32) -> Level {
        let columns = columns.max(RUNNER_MIN_COLUMNS);
        let ts = DEFAULT_TILE_SIZE;
        let ground = (RUNNER_HEIGHT - 1) as usize;
        let safe_end = columns - RUNNER_SAFE_END;
        let mut rng = Rng::new(seed);
        let mut grid = vec![vec![TileId::EMPTY; columns as usize]; RUNNER_HEIGHT as usize];
        let mut spawns = Vec::new();

        let mut col = 0u32;
        while col < columns {
            let c = col as usize;
            let open = col >= RUNNER_SAFE_START && col < safe_end;

            if open && rng.chance(10) {
                // Gap followed by a landing strip.
                col += rng.range(2, 3).min(safe_end - col);
                let strip_end = (col + 4).min(columns);
                for strip in col..strip_end {
                    grid[ground][strip as usize] = TileId::GROUND;
                }
                col = strip_end;
                continue;
            }

            grid[ground][c] = TileId::GROUND;
            if open {
                if rng.chance(8) {
                    for r in 0..rng.range(1, 2) as usize {
                        grid[ground - 1 - r][c] = BLOCK;
                    }
                } else if rng.chance(6) {
                    spawns.push(Spawn::PatrolEnemy {
                        x: col as f32 * ts,
                        y: (ground - 1) as f32 * ts,
                    });
                } else if col + 5 < safe_end && rng.chance(10) {
                    let len = rng.range(3, 5);
                    let row = rng.range(10, 11) as usize;
                    for p in col..col + len {
                        grid[row][p as usize] = BRICK;
                        if rng.chance(50) {
                            spawns.push(Spawn::Coin {
                                x: p as f32 * ts,
                                y: (row - 1) as f32 * ts,
                            });
                        }
                    }
                    if rng.chance(15) {
                        spawns.push(Spawn::PowerUp {
                            x: (col + len / 2) as f32 * ts,
                            y: (row - 1) as f32 * ts,
                        });
                    }
                } else if rng.chance(5) {
                    spawns.push(Spawn::Coin {
                        x: col as f32 * ts,
                        y: (ground - 2) as f32 * ts,
                    });
                }
            }
            col += 1;
        }

        let map = TileMap::from_fn(columns, RUNNER_HEIGHT, ts, |c, r| grid[r as usize][c as usize]);
        Level {
            player_start: default_start(&map),
            goal_x: Some(default_goal(&map)),
            spawns,
            time_limit: None,
            background: palette::SKY,
            map,
        }
    }
}

/// Two tiles in from the left, standing on the bottom row.
fn default_start(map: &TileMap) -> Vec2 {
    let ts = map.tile_size();
    Vec2::new(2.0 * ts, (map.height() as f32 - 1.0) * ts - PLAYER_SIZE.y)
}

fn default_goal(map: &TileMap) -> f32 {
    (map.width() as f32 - 3.0).max(0.0) * map.tile_size()
}

fn clamp_x(x: f32, map: &TileMap) -> f32 {
    x.clamp(0.0, (map.pixel_width() - PLAYER_SIZE.x).max(0.0))
}

fn clamp_spawn(spawn: Spawn, map: &TileMap) -> Spawn {
    match spawn {
        Spawn::PatrolEnemy { x, y } => Spawn::PatrolEnemy { x: clamp_x(x, map), y },
        Spawn::Coin { x, y } => Spawn::Coin { x: clamp_x(x, map), y },
        Spawn::PowerUp { x, y } => Spawn::PowerUp { x: clamp_x(x, map), y },
        Spawn::Goal { x } => Spawn::Goal { x: clamp_x(x, map) },
        Spawn::PlayerStart { x, y } => Spawn::PlayerStart { x: clamp_x(x, map), y },
    }
}
