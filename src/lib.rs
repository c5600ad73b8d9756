//! # Motorsim - Top-Down Vehicle Simulation
//!
//! A deterministic, frame-stepped simulation of vehicles ("motors") driving over a
//! raster-classified track, usable both for interactive play and for headless
//! evaluation inside an evolutionary-training loop.
//!
//! ## Features
//!
//! - Per-tick physics with asymmetric throttle/brake, understeer and drift
//! - Mask-pixel collision classification (track / wall / slow / checkpoints)
//! - Sequential checkpoint and lap state machine with lap timing
//! - Fixed-angle raycast radar producing quantized sensor readings
//! - Fitness scoring with exploration novelty and stuck detection
//! - Parallel population evaluation over a shared read-only mask
//! - Real-time visualization with macroquad
//!
//! ## Core Modules
//!
//! - [`simulation::vehicle`] - Vehicle coordinator and per-tick algorithm
//! - [`simulation::physics`] - Velocity, steering and drift integration
//! - [`simulation::mask`] - Zone classification of the track raster
//! - [`simulation::checkpoint`] - Lap counting state machine
//! - [`simulation::radar`] - Raycast proximity sensor
//! - [`simulation::fitness`] - Fitness accumulation and stuck detection
//! - [`simulation::race`] - Generation evaluation for training loops

/// Core simulation logic and data structures.
pub mod simulation {
    /// Sequential checkpoint tracking and lap counting.
    pub mod checkpoint;
    /// Oriented bounding-box collision classification against the mask.
    pub mod collision;
    /// Controller interface consumed each tick (human input or external evaluator).
    pub mod controller;
    /// Fitness accumulation, novelty tracking and stuck detection.
    pub mod fitness;
    /// Zone classification of the raster mask shared by collision and radar.
    pub mod mask;
    /// Tunable simulation parameters and per-track configuration.
    pub mod params;
    /// Per-tick vehicle physics (acceleration, steering, drift).
    pub mod physics;
    /// Population evaluation for one training generation or race.
    pub mod race;
    /// Fixed-angle raycast distance sensor.
    pub mod radar;
    /// The vehicle coordinator owning one instance of each subsystem.
    pub mod vehicle;
}
