//! Per-tick vehicle physics.
//!
//! Integrates throttle and steering input into scalar velocity, heading change
//! and lateral drift. The engine owns no position: it hands the vehicle a
//! candidate displacement each tick and the vehicle decides what the collision
//! verdict does with it.

use serde::{Deserialize, Serialize};

use super::params::PhysicsParams;

/// Mutable physics quantities, updated every tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsState {
    /// Signed scalar velocity along the heading (negative = reversing).
    pub velocity: f32,
    /// Sideways velocity built up while drifting.
    pub lateral_velocity: f32,
    /// Current traction in `[grip floor, base_grip]`.
    pub grip: f32,
    /// Fore/aft weight shift from throttle and braking.
    pub weight_transfer: f32,
    /// Extra heading offset applied to movement while drifting, radians.
    pub drift_angle: f32,
    /// Whether the last steering call was a drift.
    pub is_drifting: bool,
}

impl Default for PhysicsState {
    fn default() -> Self {
        Self {
            velocity: 0.0,
            lateral_velocity: 0.0,
            grip: 1.0,
            weight_transfer: 0.0,
            drift_angle: 0.0,
            is_drifting: false,
        }
    }
}

/// Integrates control input into velocity and heading deltas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsEngine {
    /// Tuning constants (explicit, never derived).
    pub params: PhysicsParams,
    /// Current physics state.
    pub state: PhysicsState,
}

impl PhysicsEngine {
    /// Creates an engine at rest with the given constants.
    pub fn new(params: PhysicsParams) -> Self {
        Self {
            params,
            state: PhysicsState::default(),
        }
    }

    /// Steering rate for the current speed, degrees per tick.
    ///
    /// Authority shrinks linearly from `base_steering_rate` at standstill to
    /// `min_steering_rate` at max speed.
    pub fn steering_rate(&self) -> f32 {
        let speed_ratio = self.state.velocity.abs() / self.params.max_speed;
        self.params.base_steering_rate
            - (self.params.base_steering_rate - self.params.min_steering_rate) * speed_ratio
    }

    /// Applies one tick of throttle in `[-1, 1]`.
    ///
    /// Positive throttle accelerates with a drag term that halves the gain at
    /// max speed, negative throttle brakes at a fixed rate and zero throttle
    /// lets friction decay the velocity. The result is always clamped to
    /// `[-max_speed * 0.5, max_speed]`.
    pub fn apply_acceleration(&mut self, throttle: f32) {
        let throttle = throttle.clamp(-1.0, 1.0);

        if throttle > 0.0 {
            let speed_ratio = self.state.velocity.abs() / self.params.max_speed;
            let accel_modifier = 1.0 - speed_ratio * 0.5;
            self.state.velocity += self.params.acceleration_rate * throttle * accel_modifier;
            self.state.weight_transfer = 0.3;
        } else if throttle < 0.0 {
            self.state.velocity -= self.params.brake_power;
            self.state.weight_transfer = -0.5;
        } else {
            self.state.velocity *= self.params.friction;
            self.state.weight_transfer *= 0.9;
        }

        self.state.velocity = self
            .state
            .velocity
            .clamp(-self.params.max_speed * 0.5, self.params.max_speed);
    }

    /// Applies one tick of steering in `[-1, 1]` and returns the heading delta
    /// in radians.
    ///
    /// Normal steering loses authority with speed (understeer) and bleeds a
    /// little velocity while turning. Drifting boosts the steering rate,
    /// accumulates a bounded drift angle, builds lateral velocity and decays
    /// grip toward a floor; grip recovers gradually on non-drift ticks.
    pub fn apply_steering(&mut self, steering_input: f32, is_drifting: bool) -> f32 {
        let steering_input = steering_input.clamp(-1.0, 1.0);
        self.state.is_drifting = is_drifting;

        if self.state.velocity.abs() <= 0.1 {
            return 0.0;
        }

        let speed_ratio = self.state.velocity.abs() / self.params.max_speed;

        let angle_change = if is_drifting && steering_input != 0.0 {
            let drift_steer = self.params.base_steering_rate * 1.5;
            let angle_change = drift_steer.to_radians() * steering_input;

            let max_drift = 0.5;
            self.state.drift_angle =
                (self.state.drift_angle + steering_input * 0.08).clamp(-max_drift, max_drift);

            self.state.velocity *= 0.995;
            self.state.grip = (self.state.grip - 0.05).max(0.3);
            self.state.lateral_velocity += steering_input * 0.5;

            angle_change
        } else {
            let steer_amount = self.steering_rate().to_radians() * steering_input;

            // Understeer at high speed
            let understeer = 1.0 - speed_ratio * self.params.understeer_factor;
            let angle_change = steer_amount * understeer;

            if steering_input.abs() > 0.0 {
                let turn_intensity = steering_input.abs() * speed_ratio;
                let speed_loss = self.params.turn_speed_penalty * turn_intensity;
                self.state.velocity *= 1.0 - speed_loss;
            }

            self.state.grip = (self.state.grip + 0.02).min(self.params.base_grip);
            self.state.drift_angle *= 0.85;
            self.state.lateral_velocity *= self.params.lateral_friction;

            angle_change
        };

        let max_lateral = 3.0;
        self.state.lateral_velocity = self.state.lateral_velocity.clamp(-max_lateral, max_lateral);

        // Grip loss when turning hard near the top end
        if steering_input.abs() > 0.0 && speed_ratio > 0.6 {
            let grip_loss = self.params.turn_grip_loss * speed_ratio * steering_input.abs();
            self.state.grip = (self.state.grip - grip_loss).max(0.5);
        }

        angle_change
    }

    /// Candidate displacement for this tick given the current heading.
    ///
    /// Drifting vehicles travel along `heading + drift_angle` so the nose can
    /// point into the corner while momentum carries wide.
    pub fn calculate_movement(&self, heading: f32) -> (f32, f32) {
        let move_angle = if self.state.is_drifting {
            heading + self.state.drift_angle
        } else {
            heading
        };
        (
            move_angle.cos() * self.state.velocity,
            move_angle.sin() * self.state.velocity,
        )
    }

    /// Display speed in km/h.
    pub fn speed_kmh(&self) -> i32 {
        (self.state.velocity.abs() * 7.5) as i32
    }

    /// Returns the engine to rest.
    pub fn reset(&mut self) {
        self.state = PhysicsState::default();
    }
}
