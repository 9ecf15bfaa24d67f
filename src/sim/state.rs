//! Minigame state and core simulation types
//!
//! One `GameState` is one run. All randomness flows through the seeded RNG
//! held here, so a run is fully reproducible from its seed and inputs.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use super::spawn::Spawner;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a minigame instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Constructed, waiting for `start()`
    Idle,
    /// Active gameplay
    Running,
    /// Run ended; terminal for this instance
    GameOver,
}

/// The two lanes of the road
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Left,
    Right,
}

impl Lane {
    /// Horizontal center of this lane for a field of the given width
    pub fn center_x(&self, field_w: f32) -> f32 {
        match self {
            Lane::Left => field_w * LANE_CENTER_FRACS[0],
            Lane::Right => field_w * LANE_CENTER_FRACS[1],
        }
    }

    /// Left edge of this lane (lanes split the field in half)
    pub fn origin_x(&self, field_w: f32) -> f32 {
        match self {
            Lane::Left => 0.0,
            Lane::Right => field_w * 0.5,
        }
    }
}

/// A falling obstacle. Size and in-lane offset are drawn at spawn time and
/// stay fixed for the obstacle's lifetime; only `y` advances.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
}

/// The player's car: fixed `y`, `x` snapped to a lane center
#[derive(Debug, Clone)]
pub struct Player {
    pub lane: Lane,
    pub rect: Rect,
}

impl Player {
    fn new(tuning: &Tuning, field_w: f32, field_h: f32) -> Self {
        let size = Vec2::new(tuning.car_w, tuning.car_h);
        let lane = Lane::Left;
        let pos = Vec2::new(
            lane.center_x(field_w) - size.x / 2.0,
            field_h - size.y - CAR_BOTTOM_MARGIN,
        );
        Self {
            lane,
            rect: Rect { pos, size },
        }
    }

    /// Snap immediately to the given lane. No velocity, no easing.
    pub fn snap_to(&mut self, lane: Lane, field_w: f32) {
        self.lane = lane;
        self.rect.pos.x = lane.center_x(field_w) - self.rect.size.x / 2.0;
    }
}

/// Complete state for one minigame run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub field_w: f32,
    pub field_h: f32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    /// Per-frame fall distance applied on the next frame; starts at the
    /// tuned base and grows by a fixed increment every running frame
    /// (continuous acceleration, separate from the spawn-rate ramp)
    pub speed: f32,
    /// One point per rendered frame while running
    pub score: u64,
    /// Running frames completed so far
    pub frames: u64,
    pub spawner: Spawner,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new run in `Idle` over a field of the given size.
    ///
    /// Field dimensions and the tuned obstacle size ranges are
    /// initialization preconditions, checked here rather than discovered
    /// mid-loop. `Tuning::from_json` sanitizes page input before it gets
    /// here; these asserts guard direct construction.
    pub fn new(seed: u64, tuning: Tuning, field_w: f32, field_h: f32) -> Self {
        assert!(
            field_w > 0.0 && field_h > 0.0,
            "minigame field must have positive dimensions"
        );
        assert!(
            tuning.obstacle_w_min <= tuning.obstacle_w_max
                && tuning.obstacle_h_min <= tuning.obstacle_h_max,
            "obstacle size ranges must be ordered"
        );
        let player = Player::new(&tuning, field_w, field_h);
        let spawner = Spawner::new(
            tuning.spawn_initial_ms,
            tuning.spawn_decay,
            tuning.spawn_floor_ms,
        );
        Self {
            seed,
            phase: GamePhase::Idle,
            field_w,
            field_h,
            player,
            obstacles: Vec::new(),
            speed: tuning.base_speed,
            score: 0,
            frames: 0,
            spawner,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Begin the run. Only an `Idle` instance can start; `GameOver` is
    /// terminal and a fresh run takes a fresh `GameState`.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Idle {
            self.phase = GamePhase::Running;
        }
    }

    /// End the run from outside the simulation (page teardown, re-launch).
    /// Equivalent to a collision minus the crash: terminal, render state
    /// cleared, score preserved.
    pub fn cancel(&mut self) {
        self.end();
    }

    /// Transition to `GameOver` and clear all render state. The final score
    /// stays readable on the state.
    pub(crate) fn end(&mut self) {
        self.phase = GamePhase::GameOver;
        self.obstacles.clear();
    }

    /// Allocate a new entity ID
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Draw a fresh obstacle at the top of the field: uniform random lane,
    /// size within the tuned ranges, and in-lane offset. Draw order is fixed
    /// for determinism.
    pub(crate) fn make_obstacle(&mut self) -> Obstacle {
        let lane = if self.rng.random_bool(0.5) {
            Lane::Left
        } else {
            Lane::Right
        };
        let w = self
            .rng
            .random_range(self.tuning.obstacle_w_min..=self.tuning.obstacle_w_max);
        let h = self
            .rng
            .random_range(self.tuning.obstacle_h_min..=self.tuning.obstacle_h_max);

        let lane_w = self.field_w * 0.5;
        let max_offset = (lane_w - w).max(0.0);
        let offset = if max_offset > 0.0 {
            self.rng.random_range(0.0..max_offset)
        } else {
            0.0
        };

        Obstacle {
            id: self.next_entity_id(),
            rect: Rect::new(lane.origin_x(self.field_w) + offset, -h, w, h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(7, Tuning::default(), 800.0, 600.0)
    }

    #[test]
    fn test_new_state_is_idle() {
        let s = state();
        assert_eq!(s.phase, GamePhase::Idle);
        assert_eq!(s.score, 0);
        assert!(s.obstacles.is_empty());
        assert_eq!(s.speed, s.tuning.base_speed);
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut s = state();
        s.start();
        assert_eq!(s.phase, GamePhase::Running);
        s.cancel();
        assert_eq!(s.phase, GamePhase::GameOver);
        // GameOver is terminal for this instance
        s.start();
        assert_eq!(s.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_snap_is_immediate() {
        let mut s = state();
        let left_x = s.player.rect.pos.x;
        s.player.snap_to(Lane::Right, s.field_w);
        assert_eq!(s.player.lane, Lane::Right);
        assert_eq!(s.player.rect.center().x, Lane::Right.center_x(s.field_w));
        s.player.snap_to(Lane::Left, s.field_w);
        assert_eq!(s.player.rect.pos.x, left_x);
    }

    #[test]
    fn test_obstacle_spawns_above_field_inside_lane() {
        let mut s = state();
        for _ in 0..64 {
            let o = s.make_obstacle();
            // Fully above the visible field
            assert!(o.rect.bottom() <= 0.0);
            // Inside one lane's horizontal span
            let lane_w = s.field_w * 0.5;
            let left = o.rect.left();
            assert!(left >= 0.0 && o.rect.right() <= s.field_w);
            let in_left = o.rect.right() <= lane_w;
            let in_right = left >= lane_w;
            assert!(in_left || in_right, "obstacle straddles the divider");
            // Size within the tuned range
            assert!(o.rect.size.x >= s.tuning.obstacle_w_min);
            assert!(o.rect.size.x <= s.tuning.obstacle_w_max);
        }
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = state();
        let mut b = state();
        for _ in 0..16 {
            let oa = a.make_obstacle();
            let ob = b.make_obstacle();
            assert_eq!(oa.rect, ob.rect);
        }
    }
}
