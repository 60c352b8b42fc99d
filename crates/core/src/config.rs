//! Engine configuration
//!
//! One immutable value handed to [`crate::GameState::with_config`]: board geometry,
//! spawn anchor, RNG seed, gravity period and palette. Built from defaults,
//! environment variables or JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pieces::color_of;
use crate::types::{
    Coord, Rgb, Shape, BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_GRAVITY_MS, EMPTY_COLOR, MARGIN_COLOR,
    MARGIN_ROWS, SPAWN_ANCHOR,
};

/// Largest width or height; leaves i8 headroom for piece offsets and kicks.
pub const MAX_DIMENSION: u8 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board must be at least 4 columns wide, got {0}")]
    TooNarrow(u8),
    #[error("board of height {height} leaves no playable rows below {margin_rows} margin rows")]
    NoPlayableRows { height: u8, margin_rows: u8 },
    #[error("board dimensions {height}x{width} exceed 100 per side")]
    TooLarge { height: u8, width: u8 },
    #[error("spawn anchor ({row}, {col}) is outside the grid")]
    SpawnOutside { row: i8, col: i8 },
    #[error("gravity period must be positive")]
    ZeroGravity,
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Cell colors used by the engine and the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub empty: Rgb,
    pub margin: Rgb,
    /// Indexed by [`Shape::index`]
    pub shapes: [Rgb; 7],
}

impl Palette {
    pub fn color_of(&self, shape: Shape) -> Rgb {
        self.shapes[shape.index()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            empty: EMPTY_COLOR,
            margin: MARGIN_COLOR,
            shapes: Shape::ALL.map(color_of),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: u8,
    pub height: u8,
    pub margin_rows: u8,
    /// `(row, col)` of a freshly spawned piece's anchor
    pub spawn_anchor: Coord,
    pub seed: u32,
    /// Period the external timer should use between `tick` calls
    pub gravity_ms: u32,
    pub palette: Palette,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            margin_rows: MARGIN_ROWS,
            spawn_anchor: SPAWN_ANCHOR,
            seed: 1,
            gravity_ms: DEFAULT_GRAVITY_MS,
            palette: Palette::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Defaults overridden by `BLOCKFALL_*` environment variables
    ///
    /// Unparsable values fall back to the default.
    pub fn from_env() -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();
        Self {
            seed: parsed("BLOCKFALL_SEED").unwrap_or(defaults.seed),
            gravity_ms: parsed("BLOCKFALL_GRAVITY_MS").unwrap_or(defaults.gravity_ms),
            spawn_anchor: (
                parsed("BLOCKFALL_SPAWN_ROW").unwrap_or(defaults.spawn_anchor.0),
                parsed("BLOCKFALL_SPAWN_COL").unwrap_or(defaults.spawn_anchor.1),
            ),
            ..defaults
        }
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 4 {
            return Err(ConfigError::TooNarrow(self.width));
        }
        if self.margin_rows >= self.height {
            return Err(ConfigError::NoPlayableRows {
                height: self.height,
                margin_rows: self.margin_rows,
            });
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ConfigError::TooLarge {
                height: self.height,
                width: self.width,
            });
        }
        let (row, col) = self.spawn_anchor;
        if row < 0 || col < 0 || row as u8 >= self.height || col as u8 >= self.width {
            return Err(ConfigError::SpawnOutside { row, col });
        }
        if self.gravity_ms == 0 {
            return Err(ConfigError::ZeroGravity);
        }
        Ok(())
    }
}
