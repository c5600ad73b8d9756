//! Sequential checkpoint tracking and lap counting.
//!
//! The tracker is a small state machine over `(expected_checkpoint,
//! checkpoint_count)`. Checkpoints must be touched in cyclic order; the lap
//! closes on the wraparound contact with checkpoint 1 after all checkpoints of
//! the lap have been passed. The machine never terminates - callers watch
//! `lap_count` for race-win conditions.

use serde::{Deserialize, Serialize};

/// Result of offering one checkpoint contact to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Out-of-order contact or debounced repeat; no state change.
    Rejected,
    /// Valid in-order contact within the current lap.
    Advanced,
    /// The lap-closing contact with checkpoint 1.
    LapCompleted {
        /// Duration of the completed lap in ticks.
        lap_time: u32,
    },
}

/// Checkpoint and lap progress for one vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointState {
    /// Completed laps.
    pub lap_count: u32,
    /// Valid checkpoints passed in the current lap (the lap-closing contact
    /// counts as 1 toward the next lap, so this resets to 1, not 0).
    pub checkpoint_count: u32,
    /// Next checkpoint that will be accepted, always in `1..=total`.
    pub expected_checkpoint: u8,
    /// Checkpoints per lap.
    pub total_checkpoints: u8,
    /// Debounce flag: `true` while the vehicle still touches the checkpoint
    /// color it last scored on.
    pub on_checkpoint: bool,
    /// Tick the current lap started at.
    pub lap_start_time: u32,
    /// Duration of the most recently completed lap, in ticks.
    pub last_lap_time: u32,
    /// Best lap duration so far, in ticks.
    pub best_lap_time: Option<u32>,
    /// Tick of the last valid checkpoint contact (stall detection input).
    pub last_checkpoint_time: u32,
}

impl CheckpointState {
    fn new(total_checkpoints: u8) -> Self {
        Self {
            lap_count: 0,
            checkpoint_count: 0,
            expected_checkpoint: 1,
            total_checkpoints,
            on_checkpoint: false,
            lap_start_time: 0,
            last_lap_time: 0,
            best_lap_time: None,
            last_checkpoint_time: 0,
        }
    }
}

/// Turns ordered checkpoint contacts into lap completions and timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointTracker {
    /// Current progress state.
    pub state: CheckpointState,
}

impl CheckpointTracker {
    /// Creates a tracker expecting checkpoint 1 first.
    pub fn new(total_checkpoints: u8) -> Self {
        Self {
            state: CheckpointState::new(total_checkpoints),
        }
    }

    /// Processes a contact with checkpoint `n` at tick `now`.
    ///
    /// Rejects the contact when it is out of order or when the vehicle has not
    /// left the previous checkpoint color yet (debounce). A valid contact
    /// advances `expected_checkpoint` by exactly one position modulo
    /// `total_checkpoints`; the wraparound contact with checkpoint 1 after a
    /// full set closes the lap, updates lap timing and restarts progress at 1.
    pub fn process_contact(&mut self, n: u8, now: u32) -> ContactOutcome {
        let state = &mut self.state;

        if state.on_checkpoint || n != state.expected_checkpoint {
            return ContactOutcome::Rejected;
        }

        state.on_checkpoint = true;
        state.last_checkpoint_time = now;

        if n == 1 && state.checkpoint_count >= u32::from(state.total_checkpoints) {
            let lap_time = now - state.lap_start_time;
            state.last_lap_time = lap_time;
            state.best_lap_time = Some(match state.best_lap_time {
                Some(best) => best.min(lap_time),
                None => lap_time,
            });
            state.lap_count += 1;
            // This contact already counts toward the next lap.
            state.checkpoint_count = 1;
            state.expected_checkpoint = 2;
            state.lap_start_time = now;
            ContactOutcome::LapCompleted { lap_time }
        } else {
            state.checkpoint_count += 1;
            state.expected_checkpoint =
                (state.expected_checkpoint % state.total_checkpoints) + 1;
            ContactOutcome::Advanced
        }
    }

    /// Clears the debounce flag once the vehicle has left the checkpoint color.
    pub fn clear_contact_flag(&mut self) {
        self.state.on_checkpoint = false;
    }

    /// `true` when more than `timeout_ticks` have passed since the last valid
    /// checkpoint contact.
    pub fn checkpoint_timeout(&self, now: u32, timeout_ticks: u32) -> bool {
        now.saturating_sub(self.state.last_checkpoint_time) > timeout_ticks
    }

    /// Resets all progress, keeping the checkpoint count per lap.
    pub fn reset(&mut self) {
        self.state = CheckpointState::new(self.state.total_checkpoints);
    }
}
