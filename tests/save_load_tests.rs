#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use motorsim::simulation::controller::Controls;
use motorsim::simulation::mask::MaskBuffer;
use motorsim::simulation::params::{Params, TrackConfig};
use motorsim::simulation::race::{Evaluation, Telemetry};

fn temp_path(name: &str) -> String {
    let mut path = std::env::temp_dir();
    path.push(format!("motorsim-test-{}-{name}", std::process::id()));
    path.to_string_lossy().into_owned()
}

#[test]
fn test_track_config_round_trip() {
    let config = TrackConfig {
        name: "map-2".to_string(),
        mask_file: "assets/mask.png".to_string(),
        spawn_x: 1375.0,
        spawn_y: 1220.0,
        spawn_angle: 0.5,
    };

    let path = temp_path("track.json");
    config.save_to_file(&path).expect("save track config");
    let loaded = TrackConfig::load_from_file(&path).expect("load track config");
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.name, config.name);
    assert_eq!(loaded.mask_file, config.mask_file);
    assert_eq!(loaded.spawn_x, config.spawn_x);
    assert_eq!(loaded.spawn_y, config.spawn_y);
    assert_eq!(loaded.spawn_angle, config.spawn_angle);
}

#[test]
fn test_load_missing_track_config_fails() {
    assert!(TrackConfig::load_from_file("/nonexistent/track.json").is_err());
}

#[test]
fn test_load_rejects_malformed_track_config() {
    let path = temp_path("broken.json");
    std::fs::write(&path, "{\"name\": \"map-2\"").expect("write malformed file");
    assert!(TrackConfig::load_from_file(&path).is_err());
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_summary_is_valid_telemetry_json() {
    let params = Params::default();
    let mask = MaskBuffer::filled(4000, 4000, (0, 0, 0));

    let mut evaluation = Evaluation::new(3, 2000.0, 2000.0, 0.0, &params);
    for _ in 0..5 {
        evaluation.step(&mask, &[Controls::idle(); 3]);
    }

    let path = temp_path("summary.json");
    evaluation.save_summary(&path).expect("write summary");
    let json = std::fs::read_to_string(&path).expect("read summary back");
    std::fs::remove_file(&path).ok();

    let telemetry: Vec<Telemetry> = serde_json::from_str(&json).expect("parse summary");
    assert_eq!(telemetry.len(), 3);
    for snapshot in &telemetry {
        assert!(snapshot.alive);
        assert_eq!(snapshot.lap_count, 0);
        assert!(snapshot.distance_traveled > 0.0);
    }
}
