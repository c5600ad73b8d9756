//! Population evaluation for one training generation or race.
//!
//! A generation steps every vehicle once per tick against the same read-only
//! mask. Because the mask is immutable for the whole generation and each tick
//! only touches the vehicle's own state, the per-vehicle updates run in
//! parallel with rayon without any locking. A dead vehicle stays dead; the
//! generation ends when all vehicles are resolved, a vehicle reaches the
//! target lap count or the wall-clock budget elapses.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::controller::{Controls, Driver};
use super::mask::Mask;
use super::params::Params;
use super::vehicle::Vehicle;

/// Per-vehicle snapshot read by the external training loop each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Telemetry {
    /// Whether the vehicle is still being updated.
    pub alive: bool,
    /// Completed laps.
    pub lap_count: u32,
    /// Checkpoints passed in the current lap.
    pub checkpoint_count: u32,
    /// Total distance accumulated.
    pub distance_traveled: f32,
    /// Current fitness score.
    pub fitness: f32,
}

/// How a generation ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// A vehicle reached the target lap count.
    Winner {
        /// Index of the winning vehicle.
        index: usize,
        /// Its fitness at the moment of winning.
        fitness: f32,
    },
    /// Every vehicle died before anyone won.
    AllDead,
    /// The wall-clock budget elapsed with vehicles still alive.
    BudgetExhausted,
}

/// One generation of vehicles evaluated over a shared mask.
pub struct Evaluation {
    /// The population, in fixed evaluation order.
    pub vehicles: Vec<Vehicle>,
    tick: u32,
    target_laps: u32,
    time_budget: f32,
    checkpoint_timeout_ticks: u32,
    best_lap_count: u32,
    budget_anchor: Instant,
}

impl Evaluation {
    /// Spawns `count` mortal vehicles at the same pose, launched at max speed
    /// the way training runs start them.
    pub fn new(count: usize, spawn_x: f32, spawn_y: f32, spawn_angle: f32, params: &Params) -> Self {
        let vehicles = (0..count)
            .map(|_| {
                let mut vehicle = Vehicle::new(spawn_x, spawn_y, spawn_angle, params);
                vehicle.set_velocity(vehicle.max_speed());
                vehicle
            })
            .collect();

        Self {
            vehicles,
            tick: 0,
            target_laps: params.race.target_laps,
            time_budget: params.race.generation_time_budget,
            checkpoint_timeout_ticks: params.race.checkpoint_timeout_ticks,
            best_lap_count: 0,
            budget_anchor: Instant::now(),
        }
    }

    /// Ticks elapsed in this generation.
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Vehicles still being updated.
    pub fn alive_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.alive).count()
    }

    /// Advances every living vehicle by one tick.
    ///
    /// `controls` carries one decision per vehicle, produced externally from
    /// each vehicle's radar reading. Vehicles that stall for longer than the
    /// checkpoint timeout without valid checkpoint progress are killed.
    pub fn step(&mut self, mask: &dyn Mask, controls: &[Controls]) {
        assert_eq!(
            controls.len(),
            self.vehicles.len(),
            "one control decision per vehicle"
        );

        self.tick += 1;
        let timeout = self.checkpoint_timeout_ticks;

        self.vehicles
            .par_iter_mut()
            .zip(controls.par_iter())
            .for_each(|(vehicle, controls)| {
                if !vehicle.alive {
                    return;
                }
                vehicle.apply_controls(*controls);
                vehicle.update(mask);

                if vehicle.alive
                    && !vehicle.invincible
                    && vehicle.checkpoint.checkpoint_timeout(vehicle.time_spent(), timeout)
                {
                    vehicle.alive = false;
                }
            });

        // A fresh best lap restarts the wall-clock budget so a vehicle that is
        // actually lapping is never cut off mid-run.
        let best = self
            .vehicles
            .iter()
            .map(Vehicle::lap_count)
            .max()
            .unwrap_or(0);
        if best > self.best_lap_count {
            self.best_lap_count = best;
            self.budget_anchor = Instant::now();
            println!("[lap] best lap count now {best}, budget restarted");
        }
    }

    /// Whether and how the generation has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        if let Some(index) = self
            .vehicles
            .iter()
            .position(|v| v.lap_count() >= self.target_laps)
        {
            return Some(Outcome::Winner {
                index,
                fitness: self.vehicles[index].fitness_score(),
            });
        }

        if self.vehicles.iter().all(|v| !v.alive) {
            return Some(Outcome::AllDead);
        }

        if self.budget_anchor.elapsed().as_secs_f32() > self.time_budget {
            return Some(Outcome::BudgetExhausted);
        }

        None
    }

    /// Runs the generation to completion with one driver per vehicle.
    ///
    /// Decisions are taken serially from each vehicle's last radar reading,
    /// then the tick runs in parallel.
    pub fn run(&mut self, mask: &dyn Mask, drivers: &mut [Box<dyn Driver>]) -> Outcome {
        assert_eq!(drivers.len(), self.vehicles.len(), "one driver per vehicle");

        loop {
            let controls: Vec<Controls> = self
                .vehicles
                .iter()
                .zip(drivers.iter_mut())
                .map(|(vehicle, driver)| {
                    if vehicle.alive {
                        driver.drive(&vehicle.radar_data())
                    } else {
                        Controls::idle()
                    }
                })
                .collect();

            self.step(mask, &controls);

            if let Some(outcome) = self.outcome() {
                println!(
                    "[generation] finished after {} ticks: {:?}",
                    self.tick, outcome
                );
                return outcome;
            }
        }
    }

    /// Telemetry snapshot for the whole population.
    pub fn telemetry(&self) -> Vec<Telemetry> {
        self.vehicles
            .iter()
            .map(|v| Telemetry {
                alive: v.alive,
                lap_count: v.lap_count(),
                checkpoint_count: v.checkpoint_count(),
                distance_traveled: v.distance_traveled(),
                fitness: v.fitness_score(),
            })
            .collect()
    }

    /// Writes the telemetry snapshot to a JSON file.
    pub fn save_summary(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.telemetry())?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
