//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`. A restart throws the whole
//! value away and builds a fresh one.

use std::sync::Arc;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::mask::Mask;
use super::shape::{SegmentSide, ShapeProvider, checked_mask};
use super::snapshot::{ObstacleView, RenderSnapshot};
use super::spawner::{GapRange, Spawner};
use crate::error::SettingsError;
use crate::settings::Settings;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Bird is flying, world is scrolling
    Running,
    /// Run ended; waiting for restart
    GameOver,
}

/// Obstacle art variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Pipe,
    GreenPipe,
    RedPipe,
    WhitePipe,
    LampPost,
    BanyanTree,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 6] = [
        ObstacleKind::Pipe,
        ObstacleKind::GreenPipe,
        ObstacleKind::RedPipe,
        ObstacleKind::WhitePipe,
        ObstacleKind::LampPost,
        ObstacleKind::BanyanTree,
    ];

    /// Whether this kind hangs a segment from the ceiling
    pub fn has_top(&self) -> bool {
        !matches!(self, ObstacleKind::LampPost | ObstacleKind::BanyanTree)
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Hit an obstacle segment at `point` (play-area pixels)
    Obstacle {
        id: u32,
        side: SegmentSide,
        point: IVec2,
    },
    /// Bird top reached the ceiling
    Ceiling,
    /// Bird bottom reached the floor
    Floor,
}

/// Things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Flapped,
    ObstacleSpawned { id: u32, kind: ObstacleKind, gap_top: i32 },
    ObstacleRetired { id: u32 },
    Crashed { cause: CrashCause },
    Restarted { run: u32, seed: u64 },
}

/// The player-controlled bird
#[derive(Debug, Clone)]
pub struct Bird {
    /// Vertical position (pixels, y down)
    pub y: f32,
    /// Vertical velocity (pixels/tick)
    pub vel: f32,
    /// Collision rect; top is always `y` truncated
    pub rect: Rect,
    /// Occupancy mask, same size as `rect`
    pub mask: Option<Mask>,
}

impl Bird {
    /// Place a bird at `bird_x` (horizontal centre), half way down the play area
    pub fn new(settings: &Settings, shapes: &dyn ShapeProvider) -> Self {
        let silhouette = shapes.bird(IVec2::new(settings.bird_width, settings.bird_height));
        let mask = checked_mask(silhouette.mask, silhouette.size, "bird");
        let y = (settings.play_height / 2) as f32;
        let rect = Rect {
            origin: IVec2::new(settings.bird_x - silhouette.size.x / 2, y as i32),
            size: silhouette.size,
        };
        Self {
            y,
            vel: 0.0,
            rect,
            mask,
        }
    }

    /// Integrate one tick of gravity
    pub fn update(&mut self, gravity: f32) {
        self.vel += gravity;
        self.y += self.vel;
        self.rect.origin.y = self.y as i32;
    }

    /// Replace the current velocity with the jump impulse
    pub fn jump(&mut self, impulse: f32) {
        self.vel = impulse;
    }
}

/// One half of an obstacle
#[derive(Debug, Clone)]
pub struct Segment {
    pub side: SegmentSide,
    pub rect: Rect,
    pub mask: Option<Mask>,
}

/// A pair of segments with a gap between them
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Left edge (pixels, decreases as the world scrolls)
    pub x: f32,
    /// First pixel row of the gap (equals the top segment's height)
    pub gap_top: i32,
    /// Absent for kinds without a ceiling segment
    pub top: Option<Segment>,
    pub bottom: Segment,
}

impl Obstacle {
    /// Build an obstacle at the right edge with the gap starting at `gap_top`
    pub fn new(
        id: u32,
        kind: ObstacleKind,
        gap_top: i32,
        settings: &Settings,
        shapes: &dyn ShapeProvider,
    ) -> Self {
        let x = settings.play_width as f32;
        let width = settings.obstacle_width;
        let bottom_height = settings.play_height - gap_top - settings.gap_size;

        let top = kind.has_top().then(|| {
            let size = IVec2::new(width, gap_top);
            let mask = shapes.segment(kind, SegmentSide::Top, size);
            Segment {
                side: SegmentSide::Top,
                rect: Rect {
                    origin: IVec2::new(x as i32, 0),
                    size,
                },
                mask: checked_mask(mask, size, "top segment"),
            }
        });

        let size = IVec2::new(width, bottom_height);
        let mask = shapes.segment(kind, SegmentSide::Bottom, size);
        let bottom = Segment {
            side: SegmentSide::Bottom,
            rect: Rect {
                origin: IVec2::new(x as i32, settings.play_height - bottom_height),
                size,
            },
            mask: checked_mask(mask, size, "bottom segment"),
        };

        Self {
            id,
            kind,
            x,
            gap_top,
            top,
            bottom,
        }
    }

    /// Scroll left by `speed` pixels
    pub fn update(&mut self, speed: f32) {
        self.x -= speed;
        let x = self.x as i32;
        if let Some(top) = &mut self.top {
            top.rect.origin.x = x;
        }
        self.bottom.rect.origin.x = x;
    }

    /// Right edge has passed the left edge of the play area
    pub fn is_off_screen(&self) -> bool {
        self.x + (self.width() as f32) < 0.0
    }

    pub fn width(&self) -> i32 {
        self.bottom.rect.width()
    }

    pub fn top_height(&self) -> i32 {
        self.gap_top
    }

    /// First pixel row below the gap
    pub fn gap_bottom(&self) -> i32 {
        self.bottom.rect.top()
    }

    pub fn bottom_height(&self) -> i32 {
        self.bottom.rect.height()
    }

    /// Present segments, top first
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.top.iter().chain(std::iter::once(&self.bottom))
    }
}

/// Derive the seed for a given run from the base seed
pub fn run_seed(base: u64, run: u32) -> u64 {
    base ^ (run as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Base seed; run `n` uses `run_seed(seed, n)`
    pub seed: u64,
    /// Restart counter (0 for the first run)
    pub run: u32,
    /// Simulation ticks elapsed this run
    pub time_ticks: u64,
    /// Ticks survived (authoritative score)
    pub score: u64,
    pub phase: GamePhase,
    pub bird: Bird,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub(crate) spawner: Spawner,
    pub(crate) settings: Arc<Settings>,
    pub(crate) shapes: Arc<dyn ShapeProvider>,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Validate settings and start the first run
    pub fn new(
        settings: Settings,
        shapes: Arc<dyn ShapeProvider>,
        seed: u64,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        let gap_range = GapRange::from_settings(&settings)?;
        log::info!(
            "New game: seed={} gap offsets {}..={} every {} ticks",
            seed,
            gap_range.min,
            gap_range.max,
            settings.spawn_interval_ticks()
        );
        Ok(Self::fresh(Arc::new(settings), shapes, gap_range, seed, 0))
    }

    fn fresh(
        settings: Arc<Settings>,
        shapes: Arc<dyn ShapeProvider>,
        gap_range: GapRange,
        seed: u64,
        run: u32,
    ) -> Self {
        let spawner = Spawner::new(gap_range, settings.spawn_interval_ticks(), run_seed(seed, run));
        let bird = Bird::new(&settings, shapes.as_ref());
        Self {
            seed,
            run,
            time_ticks: 0,
            score: 0,
            phase: GamePhase::Running,
            bird,
            obstacles: Vec::new(),
            spawner,
            settings,
            shapes,
            events: Vec::new(),
        }
    }

    /// Discard this run and start the next one from tick 0
    ///
    /// Only a finished run can be restarted; returns `false` and leaves the
    /// state untouched while the game is still running.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        let run = self.run + 1;
        let fresh = Self::fresh(
            Arc::clone(&self.settings),
            Arc::clone(&self.shapes),
            self.spawner.gap_range(),
            self.seed,
            run,
        );
        *self = fresh;
        let seed = run_seed(self.seed, run);
        log::info!("Restarted: run={} seed={}", run, seed);
        self.push_event(GameEvent::Restarted { run, seed });
        true
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Score in display units
    pub fn display_score(&self) -> u64 {
        self.score / self.settings.score_divisor
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain events accumulated since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Owned copy of everything a renderer needs
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            bird: self.bird.rect,
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    kind: o.kind,
                    top: o.top.as_ref().map(|s| s.rect),
                    bottom: o.bottom.rect,
                })
                .collect(),
            score: self.score,
            display_score: self.display_score(),
            time_ticks: self.time_ticks,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::shape::{BoxShapes, SolidShapes};

    #[test]
    fn test_bird_starts_centered() {
        let settings = Settings::default();
        let bird = Bird::new(&settings, &SolidShapes);
        assert_eq!(bird.y, 256.0);
        assert_eq!(bird.vel, 0.0);
        assert_eq!(bird.rect, Rect::new(33, 256, 34, 24));
        assert!(bird.mask.is_some());
    }

    #[test]
    fn test_bird_jump_overrides_velocity() {
        let settings = Settings::default();
        let mut bird = Bird::new(&settings, &BoxShapes);
        for _ in 0..20 {
            bird.update(settings.gravity);
        }
        assert!(bird.vel > 4.0);
        bird.jump(-4.8);
        assert_eq!(bird.vel, -4.8);
        bird.jump(-4.8);
        assert_eq!(bird.vel, -4.8);
    }

    #[test]
    fn test_bird_rect_truncates_position() {
        let settings = Settings::default();
        let mut bird = Bird::new(&settings, &BoxShapes);
        bird.update(0.75);
        assert_eq!(bird.y, 256.75);
        assert_eq!(bird.rect.top(), 256);
    }

    #[test]
    fn test_obstacle_geometry() {
        let settings = Settings::default();
        let o = Obstacle::new(1, ObstacleKind::Pipe, 150, &settings, &SolidShapes);
        let top = o.top.as_ref().unwrap();
        assert_eq!(top.rect, Rect::new(288, 0, 52, 150));
        assert_eq!(o.bottom.rect, Rect::new(288, 250, 52, 262));
        assert_eq!(o.top_height() + settings.gap_size + o.bottom_height(), 512);
        assert_eq!(o.gap_top, 150);
        assert_eq!(o.gap_bottom(), 250);
        assert_eq!(o.segments().count(), 2);
    }

    #[test]
    fn test_topless_kinds() {
        let settings = Settings::default();
        for kind in [ObstacleKind::LampPost, ObstacleKind::BanyanTree] {
            let o = Obstacle::new(1, kind, 120, &settings, &SolidShapes);
            assert!(o.top.is_none());
            assert_eq!(o.gap_top, 120);
            assert_eq!(o.segments().count(), 1);
        }
    }

    #[test]
    fn test_obstacle_scroll_and_retire() {
        let settings = Settings::default();
        let mut o = Obstacle::new(1, ObstacleKind::Pipe, 100, &settings, &BoxShapes);
        o.update(2.0);
        assert_eq!(o.x, 286.0);
        assert_eq!(o.bottom.rect.left(), 286);
        assert_eq!(o.top.as_ref().unwrap().rect.left(), 286);

        o.x = -52.0;
        assert!(!o.is_off_screen());
        o.update(0.5);
        assert!(o.is_off_screen());
    }

    #[test]
    fn test_restart_requires_game_over() {
        let mut state = GameState::new(Settings::default(), Arc::new(BoxShapes), 3).unwrap();
        state.time_ticks = 40;
        state.score = 40;
        assert!(!state.restart());
        assert_eq!((state.run, state.time_ticks, state.score), (0, 40, 40));
        assert!(state.take_events().is_empty());

        state.phase = GamePhase::GameOver;
        assert!(state.restart());
        assert_eq!((state.run, state.time_ticks, state.score), (1, 0, 0));
        assert_eq!(state.phase, GamePhase::Running);
        assert!(matches!(
            state.take_events().as_slice(),
            [GameEvent::Restarted { run: 1, .. }]
        ));
    }

    #[test]
    fn test_run_seed_varies_by_run() {
        assert_eq!(run_seed(42, 0), 42);
        assert_ne!(run_seed(42, 1), run_seed(42, 2));
    }

    #[test]
    fn test_invalid_settings_fail_fast() {
        let mut settings = Settings::default();
        settings.gap_size = 600;
        let result = GameState::new(settings, Arc::new(SolidShapes), 1);
        assert!(matches!(result, Err(SettingsError::GapTooLarge { .. })));
    }
}
