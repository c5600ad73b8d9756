#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use motorsim::simulation::controller::{Controls, Driver, RandomDriver};
use motorsim::simulation::mask::MaskBuffer;
use motorsim::simulation::params::Params;
use motorsim::simulation::race::{Evaluation, Outcome};

const TRACK: (u8, u8, u8) = (0, 0, 0);

fn open_mask() -> MaskBuffer {
    MaskBuffer::filled(4000, 4000, TRACK)
}

fn idle_controls(count: usize) -> Vec<Controls> {
    vec![Controls::idle(); count]
}

#[test]
fn test_population_launches_at_max_speed() {
    let params = Params::default();
    let evaluation = Evaluation::new(8, 2000.0, 2000.0, 0.0, &params);

    assert_eq!(evaluation.vehicles.len(), 8);
    for vehicle in &evaluation.vehicles {
        assert_eq!(vehicle.velocity(), params.physics.max_speed);
        assert!(vehicle.alive);
        assert!(!vehicle.invincible);
    }
}

#[test]
#[should_panic(expected = "one control decision per vehicle")]
fn test_step_rejects_mismatched_controls() {
    let params = Params::default();
    let mut evaluation = Evaluation::new(4, 2000.0, 2000.0, 0.0, &params);
    evaluation.step(&open_mask(), &idle_controls(3));
}

#[test]
fn test_step_advances_every_living_vehicle() {
    let params = Params::default();
    let mask = open_mask();
    let mut evaluation = Evaluation::new(5, 2000.0, 2000.0, 0.0, &params);

    for _ in 0..10 {
        evaluation.step(&mask, &idle_controls(5));
    }

    assert_eq!(evaluation.tick(), 10);
    assert_eq!(evaluation.alive_count(), 5);
    for vehicle in &evaluation.vehicles {
        assert_eq!(vehicle.time_spent(), 10);
        assert!(vehicle.x > 2000.0);
    }
}

#[test]
fn test_all_dead_outcome() {
    let params = Params::default();
    let mask = MaskBuffer::filled(500, 500, TRACK);

    // Spawned at the raster edge facing out: the first tick carries every
    // vehicle off the raster and kills the whole population.
    let mut evaluation = Evaluation::new(3, 10.0, 250.0, std::f32::consts::PI, &params);
    evaluation.step(&mask, &idle_controls(3));

    assert_eq!(evaluation.alive_count(), 0);
    assert_eq!(evaluation.outcome(), Some(Outcome::AllDead));
}

#[test]
fn test_budget_exhaustion_outcome() {
    let mut params = Params::default();
    params.race.generation_time_budget = 0.0;

    let mask = open_mask();
    let mut evaluation = Evaluation::new(3, 2000.0, 2000.0, 0.0, &params);
    evaluation.step(&mask, &idle_controls(3));

    assert_eq!(evaluation.alive_count(), 3);
    assert_eq!(evaluation.outcome(), Some(Outcome::BudgetExhausted));
}

#[test]
fn test_winner_outcome_reports_index_and_fitness() {
    let params = Params::default();
    let mask = open_mask();
    let mut evaluation = Evaluation::new(3, 2000.0, 2000.0, 0.0, &params);
    evaluation.step(&mask, &idle_controls(3));

    evaluation.vehicles[1].checkpoint.state.lap_count = params.race.target_laps;

    match evaluation.outcome() {
        Some(Outcome::Winner { index, fitness }) => {
            assert_eq!(index, 1);
            assert_eq!(fitness, evaluation.vehicles[1].fitness_score());
            // Lapping regime: the lap bonus alone dominates.
            assert!(fitness > 1000.0);
        }
        other => panic!("expected a winner, got {other:?}"),
    }
}

#[test]
fn test_stalled_vehicles_are_killed_after_checkpoint_timeout() {
    let mut params = Params::default();
    params.race.checkpoint_timeout_ticks = 5;

    let mask = open_mask();
    let mut evaluation = Evaluation::new(4, 2000.0, 2000.0, 0.0, &params);

    // No checkpoints exist on this mask, so every vehicle stalls out.
    for _ in 0..10 {
        evaluation.step(&mask, &idle_controls(4));
    }

    assert_eq!(evaluation.alive_count(), 0);
    assert_eq!(evaluation.outcome(), Some(Outcome::AllDead));
}

#[test]
fn test_run_drives_population_to_an_outcome() {
    let mut params = Params::default();
    params.race.generation_time_budget = 0.5;
    params.race.checkpoint_timeout_ticks = 50;

    let mask = open_mask();
    let mut evaluation = Evaluation::new(3, 2000.0, 2000.0, 0.0, &params);
    let mut drivers: Vec<Box<dyn Driver>> = (0..3)
        .map(|_| Box::new(RandomDriver::new()) as Box<dyn Driver>)
        .collect();

    let outcome = evaluation.run(&mask, &mut drivers);

    assert!(evaluation.tick() > 0);
    assert!(matches!(
        outcome,
        Outcome::AllDead | Outcome::BudgetExhausted
    ));
}

#[test]
fn test_telemetry_mirrors_population_state() {
    let params = Params::default();
    let mask = open_mask();
    let mut evaluation = Evaluation::new(4, 2000.0, 2000.0, 0.0, &params);

    for _ in 0..5 {
        evaluation.step(&mask, &idle_controls(4));
    }

    let telemetry = evaluation.telemetry();
    assert_eq!(telemetry.len(), 4);
    for (snapshot, vehicle) in telemetry.iter().zip(&evaluation.vehicles) {
        assert_eq!(snapshot.alive, vehicle.alive);
        assert_eq!(snapshot.lap_count, vehicle.lap_count());
        assert_eq!(snapshot.distance_traveled, vehicle.distance_traveled());
    }
}
