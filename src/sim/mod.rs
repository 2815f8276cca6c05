//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod geom;
pub mod mask;
pub mod shape;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Contact, collides, first_contact};
pub use geom::Rect;
pub use mask::Mask;
pub use shape::{BoxShapes, MaskTemplates, SegmentSide, ShapeProvider, Silhouette, SolidShapes};
pub use snapshot::{ObstacleView, RenderSnapshot};
pub use spawner::{GapRange, Spawner};
pub use state::{Bird, CrashCause, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Segment};
pub use tick::{TickInput, TickResult, tick};
