//! Fitness accumulation, novelty tracking and stuck detection.
//!
//! Before a vehicle has completed a lap its fitness rewards exploration:
//! distinct coarse grid cells visited, accumulated rotation and raw distance.
//! Once a lap exists the regime switches to lap count (quadratic), efficiency
//! and a smaller novelty term, so a lapping vehicle always outranks a
//! wanderer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Per-vehicle fitness accumulators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessState {
    /// Ticks this vehicle has been updated.
    pub time_spent: u32,
    /// Total Euclidean distance accumulated, monotonic.
    pub distance_traveled: f32,
    /// High-water mark of `distance_traveled`.
    pub max_distance_reached: f32,
    /// Coarse grid cells visited at least once (novelty).
    pub visited_cells: HashSet<(i32, i32)>,
    /// Cell occupied on the previous tick.
    pub last_cell: Option<(i32, i32)>,
    /// Ticks spent consecutively in the current cell.
    pub consecutive_same_cell: u32,
    /// Unsigned heading change accumulated, in degrees.
    pub total_rotation: f32,
    prev_x: f32,
    prev_y: f32,
}

impl FitnessState {
    fn new(start_x: f32, start_y: f32) -> Self {
        Self {
            time_spent: 0,
            distance_traveled: 0.0,
            max_distance_reached: 0.0,
            visited_cells: HashSet::new(),
            last_cell: None,
            consecutive_same_cell: 0,
            total_rotation: 0.0,
            prev_x: start_x,
            prev_y: start_y,
        }
    }
}

/// Accumulates fitness inputs and scores a vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessCalculator {
    /// Accumulated tracking state.
    pub state: FitnessState,
    cell_size: f32,
}

impl FitnessCalculator {
    /// Creates a calculator anchored at the spawn position.
    pub fn new(start_x: f32, start_y: f32, cell_size: f32) -> Self {
        Self {
            state: FitnessState::new(start_x, start_y),
            cell_size,
        }
    }

    /// Feeds one tick of the final position and heading delta.
    pub fn update(&mut self, x: f32, y: f32, heading_delta: f32) {
        let state = &mut self.state;
        state.time_spent += 1;

        let (dx, dy) = (x - state.prev_x, y - state.prev_y);
        state.distance_traveled += (dx * dx + dy * dy).sqrt();
        state.max_distance_reached = state.max_distance_reached.max(state.distance_traveled);

        let cell = (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        );
        if Some(cell) == state.last_cell {
            state.consecutive_same_cell += 1;
        } else {
            state.visited_cells.insert(cell);
            state.consecutive_same_cell = 0;
        }
        state.last_cell = Some(cell);

        state.total_rotation += heading_delta.to_degrees().abs();

        state.prev_x = x;
        state.prev_y = y;
    }

    /// Scalar fitness for the current accumulators and lap count.
    pub fn calculate(&self, lap_count: u32) -> f32 {
        let state = &self.state;

        if lap_count == 0 {
            // No lap yet: reward exploration, punish camping.
            let novelty = state.visited_cells.len() as f32;
            if novelty < 5.0 {
                return -100.0;
            }

            let base_reward = novelty * 10.0;
            let rotation_reward = (state.total_rotation / 2.0).min(200.0);
            let distance_reward = state.distance_traveled / 50.0;
            let repetition_penalty = state.consecutive_same_cell as f32 * -20.0;

            base_reward + rotation_reward + distance_reward + repetition_penalty
        } else {
            // Lapping regime: lap count dominates quadratically.
            let lap_bonus = (lap_count * lap_count) as f32 * 1000.0;
            let efficiency = state.distance_traveled / state.time_spent.max(1) as f32;
            let efficiency_bonus = efficiency * 50.0;
            let novelty_bonus = state.visited_cells.len() as f32 * 3.0;

            lap_bonus + efficiency_bonus + novelty_bonus
        }
    }

    /// `true` once the vehicle has sat in one grid cell longer than `threshold`
    /// ticks.
    pub fn is_stuck(&self, threshold: u32) -> bool {
        self.state.consecutive_same_cell > threshold
    }

    /// Clears all accumulators and re-anchors at a spawn position.
    pub fn reset(&mut self, start_x: f32, start_y: f32) {
        self.state = FitnessState::new(start_x, start_y);
    }
}
