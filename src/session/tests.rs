use super::*;
use crate::colormap::ColorMap;
use crate::config::SessionConfig;
use crate::error::{FrameError, ThermcamError};
use crate::radiometry::TemperatureUnit;
use chrono::Local;

fn create_test_session() -> SessionState {
    SessionState::from_config(&SessionConfig::default(), (256, 192)).unwrap()
}

#[test]
fn test_defaults() {
    let session = create_test_session();

    assert_eq!(session.unit(), TemperatureUnit::Fahrenheit);
    assert_eq!(session.color_map(), ColorMap::Bone);
    assert_eq!(session.border_inset(), 20);
    assert_eq!(session.display_scale().ratio(), 2.5);
    assert_eq!(session.display_size(), (640, 480));
    assert!(session.crosshair_enabled());
    assert!(session.hud_enabled());
    assert!(session.labels_enabled());
    assert!(session.info_enabled());
    assert_eq!(session.recording(), RecordingState::Idle);
}

#[test]
fn test_colormap_cycle_closure() {
    let mut session = create_test_session();
    let catalog_len = session.catalog().len();

    for _ in 0..3 {
        session.apply(InputCommand::CycleColorMap);
    }
    let start = session.color_map_index();

    for _ in 0..catalog_len {
        assert_eq!(session.apply(InputCommand::CycleColorMap), Outcome::Changed);
    }
    assert_eq!(session.color_map_index(), start);
}

#[test]
fn test_colormap_wraps_to_first() {
    let config = SessionConfig {
        colormaps: vec![ColorMap::Hot, ColorMap::Ocean],
        ..SessionConfig::default()
    };
    let mut session = SessionState::from_config(&config, (256, 192)).unwrap();

    session.apply(InputCommand::CycleColorMap);
    assert_eq!(session.color_map(), ColorMap::Ocean);
    session.apply(InputCommand::CycleColorMap);
    assert_eq!(session.color_map(), ColorMap::Hot);
}

#[test]
fn test_toggles_are_independent() {
    let mut session = create_test_session();

    session.apply(InputCommand::ToggleCrosshair);
    assert!(!session.crosshair_enabled());
    assert!(session.hud_enabled());

    session.apply(InputCommand::ToggleHud);
    session.apply(InputCommand::ToggleLabels);
    session.apply(InputCommand::ToggleInfo);
    assert!(!session.hud_enabled());
    assert!(!session.labels_enabled());
    assert!(!session.info_enabled());

    session.apply(InputCommand::ToggleCrosshair);
    assert!(session.crosshair_enabled());
    assert!(!session.hud_enabled());

    session.apply(InputCommand::ToggleUnit);
    assert_eq!(session.unit(), TemperatureUnit::Celsius);
    session.apply(InputCommand::ToggleUnit);
    assert_eq!(session.unit(), TemperatureUnit::Fahrenheit);
}

#[test]
fn test_border_clamped_to_bounds() {
    let config = SessionConfig {
        border_inset: 3,
        border_min: 2,
        border_max: 4,
        ..SessionConfig::default()
    };
    let mut session = SessionState::from_config(&config, (256, 192)).unwrap();

    assert_eq!(session.apply(InputCommand::IncreaseBorder), Outcome::Changed);
    assert_eq!(session.border_inset(), 4);
    assert_eq!(
        session.apply(InputCommand::IncreaseBorder),
        Outcome::Rejected(Rejection::BorderAtLimit)
    );
    assert_eq!(session.border_inset(), 4);

    session.apply(InputCommand::DecreaseBorder);
    session.apply(InputCommand::DecreaseBorder);
    assert_eq!(session.border_inset(), 2);
    assert_eq!(
        session.apply(InputCommand::DecreaseBorder),
        Outcome::Rejected(Rejection::BorderAtLimit)
    );
    assert_eq!(session.border_inset(), 2);
}

#[test]
fn test_border_never_empties_interior() {
    // Small sensor where border_max alone would allow an empty interior
    let config = SessionConfig {
        border_inset: 2,
        border_min: 0,
        border_max: 10,
        ..SessionConfig::default()
    };
    let mut session = SessionState::from_config(&config, (10, 8)).unwrap();

    for _ in 0..20 {
        session.apply(InputCommand::IncreaseBorder);
    }
    // 2 * 3 < 8, 2 * 4 == 8
    assert_eq!(session.border_inset(), 3);
}

#[test]
fn test_empty_interior_rejected_at_construction() {
    let config = SessionConfig {
        border_inset: 4,
        ..SessionConfig::default()
    };
    let result = SessionState::from_config(&config, (10, 8));
    assert!(matches!(
        result,
        Err(ThermcamError::Frame(FrameError::EmptyInterior { border: 4, .. }))
    ));
}

#[test]
fn test_border_outside_bounds_rejected_at_construction() {
    let config = SessionConfig {
        border_inset: 50,
        border_min: 2,
        border_max: 10,
        ..SessionConfig::default()
    };
    let result = SessionState::from_config(&config, (256, 192));
    assert!(matches!(result, Err(ThermcamError::Config(_))));
}

#[test]
fn test_invalid_scale_range_rejected_at_construction() {
    let inverted = SessionConfig {
        display_scale: 1.0,
        scale_min: 1.0,
        scale_max: 0.5,
        ..SessionConfig::default()
    };
    let not_a_number = SessionConfig {
        scale_max: f64::NAN,
        ..SessionConfig::default()
    };
    let outside = SessionConfig {
        display_scale: 8.0,
        ..SessionConfig::default()
    };
    let no_step = SessionConfig {
        scale_step: 0.0,
        ..SessionConfig::default()
    };

    for config in [inverted, not_a_number, outside, no_step] {
        let result = SessionState::from_config(&config, (256, 192));
        assert!(matches!(result, Err(ThermcamError::Config(_))));
    }
}

#[test]
fn test_scale_keys_at_single_point_range() {
    let config = SessionConfig {
        display_scale: 2.0,
        scale_min: 2.0,
        scale_max: 2.0,
        ..SessionConfig::default()
    };
    let mut session = SessionState::from_config(&config, (256, 192)).unwrap();

    assert_eq!(
        session.apply(InputCommand::IncreaseScale),
        Outcome::Rejected(Rejection::ScaleAtLimit)
    );
    assert_eq!(
        session.apply(InputCommand::DecreaseScale),
        Outcome::Rejected(Rejection::ScaleAtLimit)
    );
    assert_eq!(session.display_scale().ratio(), 2.0);
}

#[test]
fn test_scale_steps_and_clamps() {
    let config = SessionConfig {
        display_scale: 1.5,
        scale_min: 1.0,
        scale_max: 2.25,
        scale_step: 0.5,
        ..SessionConfig::default()
    };
    let mut session = SessionState::from_config(&config, (256, 192)).unwrap();

    assert_eq!(session.apply(InputCommand::IncreaseScale), Outcome::Changed);
    assert_eq!(session.display_scale().ratio(), 2.0);
    assert_eq!(session.apply(InputCommand::IncreaseScale), Outcome::Changed);
    assert_eq!(session.display_scale().ratio(), 2.25);
    assert_eq!(
        session.apply(InputCommand::IncreaseScale),
        Outcome::Rejected(Rejection::ScaleAtLimit)
    );

    for _ in 0..5 {
        session.apply(InputCommand::DecreaseScale);
    }
    assert_eq!(session.display_scale().ratio(), 1.0);
    assert_eq!(session.display_size(), (256, 192));
}

#[test]
fn test_recording_locks_scale() {
    let mut session = create_test_session();

    assert_eq!(
        session.apply(InputCommand::StartRecording),
        Outcome::Effect(Effect::StartRecording)
    );
    session.begin_recording(Local::now());
    assert!(session.is_recording());

    let before = session.display_scale();
    assert_eq!(
        session.apply(InputCommand::IncreaseScale),
        Outcome::Rejected(Rejection::ScaleLockedWhileRecording)
    );
    assert_eq!(
        session.apply(InputCommand::DecreaseScale),
        Outcome::Rejected(Rejection::ScaleLockedWhileRecording)
    );
    assert_eq!(session.display_scale(), before);

    // Other mutations stay available while recording
    assert_eq!(session.apply(InputCommand::IncreaseBorder), Outcome::Changed);
    assert_eq!(session.apply(InputCommand::CycleColorMap), Outcome::Changed);

    assert_eq!(
        session.apply(InputCommand::StopRecording),
        Outcome::Effect(Effect::StopRecording)
    );
    session.end_recording();

    assert_eq!(session.apply(InputCommand::IncreaseScale), Outcome::Changed);
    assert_eq!(session.display_scale().ratio(), 3.0);
}

#[test]
fn test_recording_transitions_rejected_in_wrong_state() {
    let mut session = create_test_session();

    assert_eq!(
        session.apply(InputCommand::StopRecording),
        Outcome::Rejected(Rejection::NotRecording)
    );

    session.begin_recording(Local::now());
    assert_eq!(
        session.apply(InputCommand::StartRecording),
        Outcome::Rejected(Rejection::AlreadyRecording)
    );
}

#[test]
fn test_key_mapping() {
    let mut session = create_test_session();

    assert_eq!(session.handle_key('q'), Outcome::Effect(Effect::Quit));
    assert_eq!(session.handle_key('p'), Outcome::Effect(Effect::SaveStill));
    assert_eq!(session.handle_key('m'), Outcome::Changed);
    assert_eq!(session.color_map(), ColorMap::Turbo);
    assert_eq!(session.handle_key('b'), Outcome::Changed);
    assert_eq!(session.border_inset(), 21);
    assert_eq!(session.handle_key('n'), Outcome::Changed);
    assert_eq!(session.border_inset(), 20);
    assert_eq!(InputCommand::from_key('='), Some(InputCommand::IncreaseScale));
    assert_eq!(InputCommand::from_key('-'), Some(InputCommand::DecreaseScale));
}

#[test]
fn test_unrecognized_keys_are_noops() {
    let mut session = create_test_session();
    let snapshot = format!("{:?}", session);

    for key in ['z', 'Q', ' ', '1', 'é'] {
        assert_eq!(session.handle_key(key), Outcome::Ignored);
    }
    assert_eq!(format!("{:?}", session), snapshot);
}
