//! Timed obstacle spawning
//!
//! Obstacles appear at a fixed tick interval with a uniformly random gap
//! offset and kind. The RNG is seeded so a run can be replayed exactly.

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::shape::ShapeProvider;
use super::state::{Obstacle, ObstacleKind};
use crate::error::SettingsError;
use crate::settings::Settings;

/// Inclusive range of valid gap offsets (top segment heights)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapRange {
    pub min: i32,
    pub max: i32,
}

impl GapRange {
    /// Range that keeps the gap at least `min_gap_margin` from both edges
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        let height = settings.play_height;
        let gap = settings.gap_size;
        let margin = settings.min_gap_margin;

        if gap >= height {
            return Err(SettingsError::GapTooLarge { gap, height });
        }
        let min = margin;
        let max = height - gap - margin;
        if max < min {
            return Err(SettingsError::EmptyGapRange {
                height,
                gap,
                margin,
            });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, offset: i32) -> bool {
        offset >= self.min && offset <= self.max
    }
}

/// Tick-driven obstacle factory
#[derive(Debug, Clone)]
pub struct Spawner {
    range: GapRange,
    interval_ticks: u64,
    last_spawn_tick: u64,
    next_id: u32,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(range: GapRange, interval_ticks: u64, seed: u64) -> Self {
        Self {
            range,
            interval_ticks: interval_ticks.max(1),
            last_spawn_tick: 0,
            next_id: 1,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Build a spawner straight from settings (validates the gap range)
    pub fn from_settings(settings: &Settings, seed: u64) -> Result<Self, SettingsError> {
        let range = GapRange::from_settings(settings)?;
        Ok(Self::new(range, settings.spawn_interval_ticks(), seed))
    }

    pub fn gap_range(&self) -> GapRange {
        self.range
    }

    pub fn interval_ticks(&self) -> u64 {
        self.interval_ticks
    }

    /// Ticks until the next spawn, measured from `now_tick`
    pub fn ticks_until_spawn(&self, now_tick: u64) -> u64 {
        (self.last_spawn_tick + self.interval_ticks).saturating_sub(now_tick)
    }

    /// Spawn an obstacle if a full interval has elapsed since the last one
    pub fn try_spawn(
        &mut self,
        now_tick: u64,
        settings: &Settings,
        shapes: &dyn ShapeProvider,
    ) -> Option<Obstacle> {
        if now_tick.saturating_sub(self.last_spawn_tick) < self.interval_ticks {
            return None;
        }
        self.last_spawn_tick = now_tick;

        let gap_top = self.rng.random_range(self.range.min..=self.range.max);
        let kind = settings
            .obstacle_kinds
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(ObstacleKind::Pipe);

        let id = self.next_id;
        self.next_id += 1;

        log::debug!(
            "Spawned obstacle {} ({:?}) at tick {}: gap {}..{}",
            id,
            kind,
            now_tick,
            gap_top,
            gap_top + settings.gap_size
        );
        Some(Obstacle::new(id, kind, gap_top, settings, shapes))
    }
}
