//! Tunable simulation parameters and per-track configuration.
//!
//! Every rate in the physics model is an explicit constant here, not derived,
//! so tracks and experiments can retune handling without touching the engine.

use serde::{Deserialize, Serialize};

/// Physics constants for one vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsParams {
    /// Velocity gained per tick at full throttle (before drag).
    pub acceleration_rate: f32,
    /// Velocity lost per tick while braking/reversing.
    pub brake_power: f32,
    /// Per-tick velocity decay with no throttle (close to 1 = coasts far).
    pub friction: f32,
    /// Forward velocity cap; reverse is capped at half of this.
    pub max_speed: f32,
    /// Steering rate at standstill, degrees per tick.
    pub base_steering_rate: f32,
    /// Steering rate at max speed, degrees per tick.
    pub min_steering_rate: f32,
    /// Grip ceiling the vehicle recovers toward when not drifting.
    pub base_grip: f32,
    /// Grip lost per tick of hard turning at high speed.
    pub turn_grip_loss: f32,
    /// Fraction of speed lost per tick of full-lock turning at max speed.
    pub turn_speed_penalty: f32,
    /// How strongly steering authority fades with speed (0 = none).
    pub understeer_factor: f32,
    /// Per-tick decay of lateral velocity outside of drifts.
    pub lateral_friction: f32,
    /// Hitting a wall above this speed destroys a mortal vehicle.
    pub wall_explode_speed: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            acceleration_rate: 0.12,
            brake_power: 0.25,
            friction: 0.985,
            max_speed: 25.0,
            base_steering_rate: 4.5,
            min_steering_rate: 1.2,
            base_grip: 1.0,
            turn_grip_loss: 0.15,
            turn_speed_penalty: 0.02,
            understeer_factor: 0.3,
            lateral_friction: 0.92,
            wall_explode_speed: 8.0,
        }
    }
}

/// Radar geometry and quantization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarParams {
    /// Ray offsets relative to the heading, in degrees.
    pub angles: Vec<f32>,
    /// Maximum ray length in pixels.
    pub max_length: f32,
    /// Sampling stride along a ray in pixels.
    pub step: f32,
    /// Distance divisor for [`get_data`](crate::simulation::radar::Radar::get_data)
    /// quantization.
    pub unit: f32,
}

impl RadarParams {
    /// Number of rays.
    pub fn num_rays(&self) -> usize {
        self.angles.len()
    }
}

impl Default for RadarParams {
    fn default() -> Self {
        Self {
            angles: vec![-90.0, -45.0, 0.0, 45.0, 90.0],
            max_length: 300.0,
            step: 5.0,
            unit: 30.0,
        }
    }
}

/// Per-vehicle geometry and survival tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleParams {
    /// Visual bounding length in pixels.
    pub length: f32,
    /// Visual bounding width in pixels.
    pub width: f32,
    /// Fraction of the visual footprint used as the collision box.
    pub hitbox_scale: f32,
    /// Knockback distance applied to an invincible vehicle on a hard wall hit.
    pub respawn_distance: f32,
    /// Ticks of input-less stun after a hard wall hit.
    pub respawn_stun_ticks: u32,
    /// Ticks between visibility flips while stunned (respawn blink).
    pub blink_interval: u32,
    /// Consecutive same-cell ticks after which a mortal vehicle is stuck-killed.
    pub stuck_threshold: u32,
    /// Side length of the coarse novelty grid cells, in pixels.
    pub novelty_cell_size: f32,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            length: 140.0 / 1.5,
            width: 80.0 / 1.5,
            hitbox_scale: 0.4,
            respawn_distance: 150.0,
            respawn_stun_ticks: 60,
            blink_interval: 6,
            stuck_threshold: 30,
            novelty_cell_size: 50.0,
        }
    }
}

/// Race/generation rules read by the evaluation loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceParams {
    /// Checkpoints that must be touched in order per lap.
    pub total_checkpoints: u8,
    /// Lap count at which a vehicle wins and the generation ends.
    pub target_laps: u32,
    /// Wall-clock budget per generation, seconds.
    pub generation_time_budget: f32,
    /// Ticks a vehicle may go without a valid checkpoint before it is killed.
    pub checkpoint_timeout_ticks: u32,
}

impl Default for RaceParams {
    fn default() -> Self {
        Self {
            total_checkpoints: 4,
            target_laps: 3,
            generation_time_budget: 90.0,
            checkpoint_timeout_ticks: 20 * 60,
        }
    }
}

/// Everything the simulation needs to run one vehicle or one population.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Params {
    /// Physics constants.
    pub physics: PhysicsParams,
    /// Radar geometry.
    pub radar: RadarParams,
    /// Vehicle geometry and survival tuning.
    pub vehicle: VehicleParams,
    /// Race rules.
    pub race: RaceParams,
}

/// Immutable configuration of one track, keyed by name.
///
/// Replaces ad hoc global spawn/finish tables: the simulation receives one of
/// these at construction time and never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Track identifier (also the visual image stem).
    pub name: String,
    /// File name of the classified mask image.
    pub mask_file: String,
    /// Spawn position x, in mask pixels.
    pub spawn_x: f32,
    /// Spawn position y, in mask pixels.
    pub spawn_y: f32,
    /// Spawn heading in radians (0 = facing +x).
    pub spawn_angle: f32,
}

impl TrackConfig {
    /// Loads a track configuration from a JSON file.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// Saves the track configuration to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
