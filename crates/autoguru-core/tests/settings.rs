//! Tests for settings persistence

use autoguru_core::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_settings_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let settings = SimulationSettings {
        engine: EngineConfig::new(1500, TransmissionKind::Imt),
        tick_interval_ms: 50,
        curve: CurveGrid {
            min_rpm: 1000,
            max_rpm: 7000,
            step_rpm: 500,
        },
        seed: Some(17),
    };
    settings.save(&path).unwrap();

    let loaded = SimulationSettings::load(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_invalid_selection_loads_as_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{
            "engine": { "displacement_cc": 1750, "transmission": "Tiptronic" },
            "tick_interval_ms": 0
        }"#,
    )
    .unwrap();

    let loaded = SimulationSettings::load(&path).unwrap();
    assert_eq!(loaded.engine, EngineConfig::new(1200, TransmissionKind::Manual));
    assert_eq!(loaded.tick_interval_ms, 100);
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.json");

    assert!(matches!(
        SimulationSettings::load(&path),
        Err(SimError::IoError(_))
    ));
    assert_eq!(
        SimulationSettings::load_or_default(&path).unwrap(),
        SimulationSettings::default()
    );
}

#[test]
fn test_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ engine: ").unwrap();

    assert!(matches!(
        SimulationSettings::load(&path),
        Err(SimError::ParseError(_))
    ));
}

#[test]
fn test_session_uses_seeded_settings() {
    let settings = SimulationSettings {
        seed: Some(123),
        ..Default::default()
    };
    let mut a = Session::new(settings.clone());
    let mut b = Session::new(settings);
    a.start();
    b.start();
    a.set_throttle(70);
    b.set_throttle(70);

    for _ in 0..25 {
        assert_eq!(a.step(), b.step());
    }
}
