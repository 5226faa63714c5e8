//! Tuning constants and the level catalog.
//!
//! The catalog is a JSON document bundled into the binary. Each level is a
//! 10x9 character grid; see [`crate::model::grid::Tile::from_char`] for the
//! character map.

use serde::Deserialize;
use thiserror::Error;

use crate::model::grid::{GridPosition, GRID_HEIGHT, GRID_WIDTH, Level, Tile};

const BUNDLED_CATALOG: &str = include_str!("../assets/levels.json");

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Slicer speed in tiles per second.
    pub slicer_speed: f64,
    /// Skeletor speed in tiles per second.
    pub skeletor_speed: f64,
    pub max_health: u32,
    /// Damage at level 0; grows by one every second level.
    pub base_damage: u32,
    pub invulnerability_ms: f64,
    /// Quiet period required since the last hit and since the last regen tick.
    pub regen_delay_ms: f64,
    pub attack_effect_ms: f64,
    /// Frames longer than this are dropped instead of simulated.
    pub max_frame_delta_secs: f64,
    /// Skeletor turn timers are drawn from `[0, turn_timer_max_secs)`.
    pub turn_timer_max_secs: f64,
    pub locked_notice_ms: f64,
    pub locked_flash_ms: f64,
    pub game_over_notice_ms: f64,
    pub min_enemy_speed: f64,
    pub max_enemy_speed: f64,
    /// Player cell used when a level does not name its own start.
    pub initial_position: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            slicer_speed: 2.0,
            skeletor_speed: 1.5,
            max_health: 3,
            base_damage: 1,
            invulnerability_ms: 1000.0,
            regen_delay_ms: 5000.0,
            attack_effect_ms: 1000.0,
            max_frame_delta_secs: 0.1,
            turn_timer_max_secs: 5.0,
            locked_notice_ms: 2000.0,
            locked_flash_ms: 300.0,
            game_over_notice_ms: 3000.0,
            min_enemy_speed: 0.25,
            max_enemy_speed: 3.0,
            initial_position: 40,
        }
    }
}

/// Upper bound on hearts so the HUD stays readable.
pub const MAX_HEALTH_CAP: u32 = 20;

impl GameConfig {
    /// Rejects tunings the session cannot run with.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |field, reason| Err(CatalogError::InvalidConfig { field, reason });
        if self.max_health == 0 {
            return invalid("max_health", "must be at least 1");
        }
        if self.max_health > MAX_HEALTH_CAP {
            return invalid("max_health", "must not exceed 20");
        }
        for (field, value) in [
            ("slicer_speed", self.slicer_speed),
            ("skeletor_speed", self.skeletor_speed),
            ("invulnerability_ms", self.invulnerability_ms),
            ("regen_delay_ms", self.regen_delay_ms),
            ("attack_effect_ms", self.attack_effect_ms),
            ("turn_timer_max_secs", self.turn_timer_max_secs),
            ("locked_notice_ms", self.locked_notice_ms),
            ("locked_flash_ms", self.locked_flash_ms),
            ("game_over_notice_ms", self.game_over_notice_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(field, "must be finite and non-negative");
            }
        }
        for (field, value) in [
            ("max_frame_delta_secs", self.max_frame_delta_secs),
            ("min_enemy_speed", self.min_enemy_speed),
            ("max_enemy_speed", self.max_enemy_speed),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return invalid(field, "must be finite and positive");
            }
        }
        if self.min_enemy_speed > self.max_enemy_speed {
            return invalid("min_enemy_speed", "must not exceed max_enemy_speed");
        }
        Ok(())
    }
}

/// Errors raised while loading the level catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog contains no levels")]
    Empty,

    #[error("level '{level}' has {actual} rows, expected {expected}")]
    RowCount {
        level: String,
        expected: usize,
        actual: usize,
    },

    #[error("level '{level}' row {row} is {actual} tiles wide, expected {expected}")]
    RowWidth {
        level: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("level '{level}' has unknown tile '{character}' at ({x}, {y})")]
    UnknownTile {
        level: String,
        character: char,
        x: usize,
        y: usize,
    },

    #[error("level '{level}' starts at cell {index}, outside the grid")]
    StartOutOfBounds { level: String, index: usize },

    #[error("level '{level}' starts the player on a blocking tile at cell {index}")]
    BlockedStart { level: String, index: usize },

    #[error("config field `{field}` {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    config: GameConfig,
    levels: Vec<LevelFile>,
}

#[derive(Debug, Deserialize)]
struct LevelFile {
    name: String,
    #[serde(default)]
    start: Option<usize>,
    rows: Vec<String>,
}

/// Validated levels plus the tuning they were shipped with.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelCatalog {
    pub config: GameConfig,
    pub levels: Vec<Level>,
}

impl LevelCatalog {
    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        if file.levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        let config = file.config;
        config.validate()?;
        let levels = file
            .levels
            .into_iter()
            .map(|lf| parse_level(lf, config.initial_position))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { config, levels })
    }

    /// Builds a catalog from in-memory rows, mostly for tests and tools.
    pub fn from_rows(config: GameConfig, levels: &[(&str, &[&str])]) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        config.validate()?;
        let levels = levels
            .iter()
            .map(|(name, rows)| {
                parse_level(
                    LevelFile {
                        name: (*name).to_string(),
                        start: None,
                        rows: rows.iter().map(|r| (*r).to_string()).collect(),
                    },
                    config.initial_position,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { config, levels })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }
}

fn parse_level(file: LevelFile, default_start: usize) -> Result<Level, CatalogError> {
    let LevelFile { name, start, rows } = file;
    if rows.len() != GRID_HEIGHT {
        return Err(CatalogError::RowCount {
            level: name,
            expected: GRID_HEIGHT,
            actual: rows.len(),
        });
    }
    let mut chars = Vec::with_capacity(GRID_WIDTH * GRID_HEIGHT);
    for (y, row) in rows.iter().enumerate() {
        let width = row.chars().count();
        if width != GRID_WIDTH {
            return Err(CatalogError::RowWidth {
                level: name,
                row: y,
                expected: GRID_WIDTH,
                actual: width,
            });
        }
        for (x, ch) in row.chars().enumerate() {
            if Tile::from_char(ch).is_none() {
                return Err(CatalogError::UnknownTile {
                    level: name,
                    character: ch,
                    x,
                    y,
                });
            }
            chars.push(ch);
        }
    }
    let index = start.unwrap_or(default_start);
    let Some(start) = GridPosition::new(index) else {
        return Err(CatalogError::StartOutOfBounds { level: name, index });
    };
    let level = Level::from_chars(name, &chars, start);
    if level.tile_at(start).is_blocking() {
        return Err(CatalogError::BlockedStart {
            level: level.name,
            index,
        });
    }
    Ok(level)
}
