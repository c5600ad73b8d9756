//! Controller interface consumed each tick.
//!
//! The simulation does not care who is driving: a keyboard mapping, a trained
//! neural network in the training loop or a scripted baseline all produce the
//! same [`Controls`] value from the radar reading.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One tick of control input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    /// Throttle in `[-1, 1]` (negative brakes/reverses).
    pub throttle: f32,
    /// Steering in `[-1, 1]` (negative = left).
    pub steering: f32,
    /// Whether the drift modifier is held.
    pub drift: bool,
}

impl Controls {
    /// No input at all (coasting).
    pub fn idle() -> Self {
        Self {
            throttle: 0.0,
            steering: 0.0,
            drift: false,
        }
    }

    /// Clamps throttle and steering into their valid ranges.
    pub fn clamped(self) -> Self {
        Self {
            throttle: self.throttle.clamp(-1.0, 1.0),
            steering: self.steering.clamp(-1.0, 1.0),
            drift: self.drift,
        }
    }
}

/// A policy that turns radar readings into control input.
///
/// The external neural evaluator implements this on the training side; the
/// simulation only consumes the decisions.
pub trait Driver {
    /// Decides the controls for one tick from the quantized radar bands.
    fn drive(&mut self, sensors: &[i32]) -> Controls;
}

/// Smoothed random-walk baseline policy.
///
/// Useful as a population filler in the viewer and as a stand-in before any
/// trained controller exists. Holds full throttle and wanders its steering.
#[derive(Debug, Clone)]
pub struct RandomDriver {
    steering: f32,
}

impl RandomDriver {
    /// Creates a driver steering straight ahead.
    pub fn new() -> Self {
        Self { steering: 0.0 }
    }
}

impl Default for RandomDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for RandomDriver {
    fn drive(&mut self, sensors: &[i32]) -> Controls {
        let mut rng = rand::rng();
        self.steering = (self.steering + rng.random_range(-0.2..0.2)).clamp(-1.0, 1.0);

        // Shy away from whichever side reads closest.
        if let (Some(&first), Some(&last)) = (sensors.first(), sensors.last()) {
            if first < last {
                self.steering += 0.05;
            } else if last < first {
                self.steering -= 0.05;
            }
        }

        Controls {
            throttle: 1.0,
            steering: self.steering,
            drift: false,
        }
        .clamped()
    }
}
