//! Simulation settings and variant presets
//!
//! One immutable value handed to the simulation at construction. Can be
//! loaded from a JSON file; missing fields fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::ObstacleKind;

/// Game variants shipped with the bundled art set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Plain pipes only, softer jump
    Classic,
    /// Mixed scenery obstacles, some without a top segment
    #[default]
    Scenery,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Scenery => "Scenery",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Variant::Classic),
            "scenery" => Some(Variant::Scenery),
            _ => None,
        }
    }

    /// Jump impulse for this variant
    pub fn jump_strength(&self) -> f32 {
        match self {
            Variant::Classic => JUMP_STRENGTH_CLASSIC,
            Variant::Scenery => JUMP_STRENGTH_SCENERY,
        }
    }

    /// Obstacle kinds this variant spawns
    pub fn obstacle_kinds(&self) -> Vec<ObstacleKind> {
        match self {
            Variant::Classic => vec![ObstacleKind::Pipe],
            Variant::Scenery => ObstacleKind::ALL.to_vec(),
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play area ===
    pub play_width: i32,
    pub play_height: i32,

    // === Bird ===
    /// Horizontal centre of the bird
    pub bird_x: i32,
    /// Bird size used when the shape provider has no art of its own
    pub bird_width: i32,
    pub bird_height: i32,
    /// Downward acceleration (pixels/tick²)
    pub gravity: f32,
    /// Velocity set by a jump (negative = up)
    pub jump_strength: f32,

    // === Obstacles ===
    pub obstacle_width: i32,
    pub gap_size: i32,
    /// Closest the gap may come to either edge
    pub min_gap_margin: i32,
    /// Horizontal scroll (pixels/tick)
    pub scroll_speed: f32,
    pub spawn_interval_ms: u32,
    /// Kinds to draw from on each spawn (uniformly)
    pub obstacle_kinds: Vec<ObstacleKind>,

    // === Clock / score ===
    pub tick_rate: u32,
    /// Raw ticks per displayed score point
    pub score_divisor: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_variant(Variant::default())
    }
}

impl Settings {
    /// Reference settings for a variant
    pub fn from_variant(variant: Variant) -> Self {
        Self {
            play_width: PLAY_WIDTH,
            play_height: PLAY_HEIGHT,

            bird_x: BIRD_X,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            gravity: GRAVITY,
            jump_strength: variant.jump_strength(),

            obstacle_width: OBSTACLE_WIDTH,
            gap_size: GAP_SIZE,
            min_gap_margin: MIN_GAP_MARGIN,
            scroll_speed: SCROLL_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            obstacle_kinds: variant.obstacle_kinds(),

            tick_rate: TICK_RATE,
            score_divisor: SCORE_DIVISOR,
        }
    }

    /// Apply a variant (updates variant-dependent settings only)
    pub fn apply_variant(&mut self, variant: Variant) {
        self.jump_strength = variant.jump_strength();
        self.obstacle_kinds = variant.obstacle_kinds();
    }

    /// Spawn interval converted to whole ticks (at least one)
    pub fn spawn_interval_ticks(&self) -> u64 {
        let ticks = (self.spawn_interval_ms as f64 * self.tick_rate as f64 / 1000.0).round();
        (ticks as u64).max(1)
    }

    /// Check every value the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("play_width", self.play_width),
            ("play_height", self.play_height),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("obstacle_width", self.obstacle_width),
            ("gap_size", self.gap_size),
        ];
        for (field, value) in positive {
            if value <= 0 {
                return Err(SettingsError::NonPositive { field });
            }
        }
        if self.tick_rate == 0 {
            return Err(SettingsError::NonPositive { field: "tick_rate" });
        }
        if self.spawn_interval_ms == 0 {
            return Err(SettingsError::NonPositive {
                field: "spawn_interval_ms",
            });
        }
        if self.score_divisor == 0 {
            return Err(SettingsError::NonPositive {
                field: "score_divisor",
            });
        }
        if self.min_gap_margin < 0 {
            return Err(SettingsError::Negative {
                field: "min_gap_margin",
            });
        }

        for (field, value) in [
            ("gravity", self.gravity),
            ("jump_strength", self.jump_strength),
            ("scroll_speed", self.scroll_speed),
        ] {
            if !value.is_finite() {
                return Err(SettingsError::NonFinite { field });
            }
        }

        // Obstacles only retire by scrolling off the left edge
        if self.scroll_speed <= 0.0 {
            return Err(SettingsError::NonPositive {
                field: "scroll_speed",
            });
        }

        if self.obstacle_kinds.is_empty() {
            return Err(SettingsError::EmptyKindPool);
        }
        Ok(())
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings)
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&contents)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
