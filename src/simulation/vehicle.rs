//! The vehicle coordinator.
//!
//! A [`Vehicle`] owns one instance of each subsystem (physics, collision,
//! checkpoints, radar, fitness), applies control input, runs the per-tick
//! algorithm against the shared mask and exposes read-only state to the
//! renderer, HUD and training loop. There is exactly one vehicle type;
//! player and AI vehicles differ only in configuration (invincibility and
//! who produces their [`Controls`]).

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::checkpoint::CheckpointTracker;
use super::collision::CollisionChecker;
use super::controller::Controls;
use super::fitness::FitnessCalculator;
use super::mask::{Mask, Zone};
use super::params::Params;
use super::physics::PhysicsEngine;
use super::radar::Radar;

/// A simulated motor on the track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    /// Center position x, in mask pixels.
    pub x: f32,
    /// Center position y, in mask pixels.
    pub y: f32,
    /// Heading in radians (0 = facing +x).
    pub angle: f32,
    /// Visual bounding length in pixels.
    pub length: f32,
    /// Visual bounding width in pixels.
    pub width: f32,
    /// `false` once the vehicle has been destroyed; it stays dead for the
    /// remainder of the generation.
    pub alive: bool,
    /// Invincible vehicles (typically the player) never die, they only suffer
    /// velocity and position penalties.
    pub invincible: bool,

    /// Per-tick physics integrator.
    pub physics: PhysicsEngine,
    /// Pure mask classifier for this vehicle's collision box.
    pub collision: CollisionChecker,
    /// Sequential checkpoint and lap state machine.
    pub checkpoint: CheckpointTracker,
    /// Raycast proximity sensor.
    pub radar: Radar,
    /// Fitness accumulators and stuck detection.
    pub fitness: FitnessCalculator,

    start_x: f32,
    start_y: f32,
    start_angle: f32,
    respawn_timer: u32,
    respawn_stun_ticks: u32,
    blink_interval: u32,
    respawn_distance: f32,
    stuck_threshold: u32,
    // Heading change applied by controls since the last update, consumed by
    // the fitness update of the same tick.
    pending_heading_delta: f32,
}

impl Vehicle {
    /// Creates a vehicle at a spawn pose.
    pub fn new(x: f32, y: f32, angle: f32, params: &Params) -> Self {
        Self {
            x,
            y,
            angle,
            length: params.vehicle.length,
            width: params.vehicle.width,
            alive: true,
            invincible: false,
            physics: PhysicsEngine::new(params.physics.clone()),
            collision: CollisionChecker::new(
                params.vehicle.length,
                params.vehicle.width,
                params.vehicle.hitbox_scale,
            ),
            checkpoint: CheckpointTracker::new(params.race.total_checkpoints),
            radar: Radar::new(params.radar.clone()),
            fitness: FitnessCalculator::new(x, y, params.vehicle.novelty_cell_size),
            start_x: x,
            start_y: y,
            start_angle: angle,
            respawn_timer: 0,
            respawn_stun_ticks: params.vehicle.respawn_stun_ticks,
            blink_interval: params.vehicle.blink_interval,
            respawn_distance: params.vehicle.respawn_distance,
            stuck_threshold: params.vehicle.stuck_threshold,
            pending_heading_delta: 0.0,
        }
    }

    /// Applies one tick of control input.
    ///
    /// Input is ignored during respawn stun. Steering changes the heading
    /// immediately; the resulting delta is latched for this tick's fitness
    /// update.
    pub fn apply_controls(&mut self, controls: Controls) {
        if !self.alive || self.respawn_timer > 0 {
            return;
        }
        let controls = controls.clamped();
        self.physics.apply_acceleration(controls.throttle);
        let delta = self.physics.apply_steering(controls.steering, controls.drift);
        self.angle += delta;
        self.pending_heading_delta += delta;
    }

    /// Advances the vehicle by one tick against the mask.
    ///
    /// Computes the candidate displacement, classifies it, applies the zone
    /// consequences (death, knockback, damping, checkpoint progress), then
    /// recasts the radar and feeds the fitness accumulators from the final
    /// position. A mortal vehicle that the fitness calculator reports as stuck
    /// is killed.
    pub fn update(&mut self, mask: &dyn Mask) {
        if !self.alive {
            return;
        }

        // Respawn stun: no movement, no collision, just count down.
        if self.respawn_timer > 0 {
            self.respawn_timer -= 1;
            return;
        }

        let heading_delta = std::mem::take(&mut self.pending_heading_delta);
        let (prev_x, prev_y) = (self.x, self.y);

        let (dx, dy) = self.physics.calculate_movement(self.angle);
        self.x += dx;
        self.y += dy;

        match self.collision.classify(mask, self.x, self.y, self.angle) {
            Zone::OutOfBounds => {
                if self.invincible {
                    self.x = prev_x;
                    self.y = prev_y;
                    self.physics.state.velocity *= -0.3;
                } else {
                    self.alive = false;
                }
            }
            Zone::Wall => {
                if self.physics.state.velocity.abs() > self.physics.params.wall_explode_speed {
                    if self.invincible {
                        // Hard hit: knock back along the reverse heading and stun.
                        self.x = prev_x - self.angle.cos() * self.respawn_distance;
                        self.y = prev_y - self.angle.sin() * self.respawn_distance;
                        self.physics.state.velocity = 0.0;
                        self.respawn_timer = self.respawn_stun_ticks;
                    } else {
                        self.alive = false;
                    }
                } else {
                    // Soft hit: bounce off with damped, inverted velocity.
                    self.physics.state.velocity *= -0.4;
                    self.x = prev_x;
                    self.y = prev_y;
                }
            }
            Zone::Slow => {
                self.physics.state.velocity *= 0.99;
            }
            Zone::Checkpoint(n) => {
                let now = self.fitness.state.time_spent;
                self.checkpoint.process_contact(n, now);
            }
            Zone::Track => {
                self.checkpoint.clear_contact_flag();
            }
        }

        self.radar.update(self.x, self.y, self.angle, mask);
        self.fitness.update(self.x, self.y, heading_delta);

        if !self.invincible && self.fitness.is_stuck(self.stuck_threshold) {
            self.alive = false;
        }
    }

    /// Returns the vehicle to its spawn pose and resets every subsystem.
    pub fn reset(&mut self) {
        self.x = self.start_x;
        self.y = self.start_y;
        self.angle = self.start_angle;
        self.alive = true;
        self.respawn_timer = 0;
        self.pending_heading_delta = 0.0;
        self.physics.reset();
        self.checkpoint.reset();
        self.radar.reset();
        self.fitness.reset(self.start_x, self.start_y);
    }

    /// Signed scalar velocity.
    pub fn velocity(&self) -> f32 {
        self.physics.state.velocity
    }

    /// Overrides the velocity (training loops launch vehicles at speed).
    pub fn set_velocity(&mut self, velocity: f32) {
        self.physics.state.velocity = velocity;
    }

    /// Forward velocity cap.
    pub fn max_speed(&self) -> f32 {
        self.physics.params.max_speed
    }

    /// Display speed in km/h.
    pub fn speed_kmh(&self) -> i32 {
        self.physics.speed_kmh()
    }

    /// Completed laps.
    pub fn lap_count(&self) -> u32 {
        self.checkpoint.state.lap_count
    }

    /// Valid checkpoints passed in the current lap.
    pub fn checkpoint_count(&self) -> u32 {
        self.checkpoint.state.checkpoint_count
    }

    /// Total distance accumulated.
    pub fn distance_traveled(&self) -> f32 {
        self.fitness.state.distance_traveled
    }

    /// Ticks this vehicle has been updated.
    pub fn time_spent(&self) -> u32 {
        self.fitness.state.time_spent
    }

    /// Current fitness under the lap-aware scoring regime.
    pub fn fitness_score(&self) -> f32 {
        self.fitness.calculate(self.lap_count())
    }

    /// Quantized radar bands for the external evaluator.
    pub fn radar_data(&self) -> Vec<i32> {
        self.radar.get_data()
    }

    /// Radar reading scaled to `[0, 1]` as a fixed-length input vector.
    pub fn sensor_vector(&self) -> Array1<f32> {
        self.radar.sensor_vector()
    }

    /// `true` while the vehicle is in respawn stun.
    pub fn is_respawning(&self) -> bool {
        self.respawn_timer > 0
    }

    /// Whether the renderer should draw the vehicle this tick (blinks during
    /// respawn stun).
    pub fn is_visible(&self) -> bool {
        self.respawn_timer == 0 || (self.respawn_timer / self.blink_interval) % 2 == 1
    }
}
