//! Read-only view of a tick for the render layer
//!
//! A snapshot is an owned copy, so it can be handed to another thread while
//! the simulation keeps mutating its own state.

use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::state::{GamePhase, ObstacleKind};

/// One obstacle as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    /// `None` when the obstacle has no top segment
    pub top: Option<Rect>,
    pub bottom: Rect,
}

/// Everything needed to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub bird: Rect,
    /// Back to front in spawn order
    pub obstacles: Vec<ObstacleView>,
    /// Raw ticks survived
    pub score: u64,
    /// Score in display units
    pub display_score: u64,
    pub time_ticks: u64,
    pub phase: GamePhase,
}

impl RenderSnapshot {
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
