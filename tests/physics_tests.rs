#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use motorsim::simulation::params::PhysicsParams;
use motorsim::simulation::physics::PhysicsEngine;

fn engine() -> PhysicsEngine {
    PhysicsEngine::new(PhysicsParams::default())
}

#[test]
fn test_velocity_stays_clamped_under_any_throttle() {
    let mut engine = engine();
    let max = engine.params.max_speed;

    // Full throttle forever never exceeds max_speed.
    for _ in 0..1000 {
        engine.apply_acceleration(1.0);
        assert!(engine.state.velocity <= max);
        assert!(engine.state.velocity >= -max * 0.5);
    }
    assert!(engine.state.velocity > max * 0.9);

    // Full brake forever never exceeds the reverse cap.
    for _ in 0..1000 {
        engine.apply_acceleration(-1.0);
        assert!(engine.state.velocity >= -max * 0.5);
    }
    assert_eq!(engine.state.velocity, -max * 0.5);

    // Alternating input stays in range too.
    for i in 0..500 {
        let throttle = if i % 3 == 0 { 1.0 } else { -1.0 };
        engine.apply_acceleration(throttle);
        assert!(engine.state.velocity <= max && engine.state.velocity >= -max * 0.5);
    }
}

#[test]
fn test_throttle_input_is_clamped() {
    let mut a = engine();
    let mut b = engine();

    a.apply_acceleration(5.0);
    b.apply_acceleration(1.0);
    assert_eq!(a.state.velocity, b.state.velocity);
}

#[test]
fn test_friction_decays_velocity_when_coasting() {
    let mut engine = engine();
    engine.state.velocity = 10.0;

    engine.apply_acceleration(0.0);
    assert!(engine.state.velocity < 10.0);
    assert!(engine.state.velocity > 9.0);

    for _ in 0..2000 {
        engine.apply_acceleration(0.0);
    }
    assert!(engine.state.velocity.abs() < 0.01);
}

#[test]
fn test_no_steering_at_standstill() {
    let mut engine = engine();
    assert_eq!(engine.apply_steering(1.0, false), 0.0);
}

#[test]
fn test_understeer_reduces_authority_at_speed() {
    let mut slow = engine();
    slow.state.velocity = 2.0;
    let slow_delta = slow.apply_steering(1.0, false);

    let mut fast = engine();
    fast.state.velocity = 24.0;
    let fast_delta = fast.apply_steering(1.0, false);

    assert!(slow_delta > 0.0);
    assert!(fast_delta > 0.0);
    assert!(slow_delta > fast_delta);
}

#[test]
fn test_turning_bleeds_speed() {
    let mut engine = engine();
    engine.state.velocity = 20.0;
    engine.apply_steering(1.0, false);
    assert!(engine.state.velocity < 20.0);
}

#[test]
fn test_drift_builds_bounded_drift_angle_and_grip_floor() {
    let mut engine = engine();
    engine.state.velocity = 15.0;

    for _ in 0..100 {
        engine.apply_steering(1.0, true);
        assert!(engine.state.drift_angle <= 0.5);
        assert!(engine.state.grip >= 0.3);
    }
    assert_eq!(engine.state.drift_angle, 0.5);
    assert_eq!(engine.state.grip, 0.3);
    assert!(engine.state.lateral_velocity <= 3.0);

    // Grip recovers and the drift angle decays once the drift ends.
    let grip_after_drift = engine.state.grip;
    for _ in 0..50 {
        engine.apply_steering(0.0, false);
    }
    assert!(engine.state.grip > grip_after_drift);
    assert!(engine.state.drift_angle.abs() < 0.01);
}

#[test]
fn test_drift_boosts_steering_rate() {
    let mut normal = engine();
    normal.state.velocity = 15.0;
    let normal_delta = normal.apply_steering(1.0, false);

    let mut drifting = engine();
    drifting.state.velocity = 15.0;
    let drift_delta = drifting.apply_steering(1.0, true);

    assert!(drift_delta > normal_delta);
}

#[test]
fn test_movement_follows_heading_and_drift_angle() {
    let mut engine = engine();
    engine.state.velocity = 10.0;

    let (dx, dy) = engine.calculate_movement(0.0);
    assert!((dx - 10.0).abs() < 1e-5);
    assert!(dy.abs() < 1e-5);

    engine.state.is_drifting = true;
    engine.state.drift_angle = 0.3;
    let (dx_drift, dy_drift) = engine.calculate_movement(0.0);
    assert!((dx_drift - 10.0 * 0.3f32.cos()).abs() < 1e-5);
    assert!((dy_drift - 10.0 * 0.3f32.sin()).abs() < 1e-5);
}

#[test]
fn test_speed_kmh_display() {
    let mut engine = engine();
    engine.state.velocity = 10.0;
    assert_eq!(engine.speed_kmh(), 75);
    engine.state.velocity = -10.0;
    assert_eq!(engine.speed_kmh(), 75);
}

#[test]
fn test_reset_returns_to_rest() {
    let mut engine = engine();
    engine.state.velocity = 20.0;
    engine.apply_steering(1.0, true);
    engine.reset();
    assert_eq!(engine.state.velocity, 0.0);
    assert_eq!(engine.state.drift_angle, 0.0);
    assert_eq!(engine.state.grip, 1.0);
    assert!(!engine.state.is_drifting);
}
