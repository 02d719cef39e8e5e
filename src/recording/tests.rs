use super::*;
use crate::config::SessionConfig;
use crate::error::{RecordingError, Result, ThermcamError};
use crate::session::{InputCommand, Outcome, Rejection, SessionState};
use chrono::{Duration as ChronoDuration, FixedOffset, Local, TimeZone};
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
struct SinkLog {
    opened: Vec<(PathBuf, u32, (u32, u32))>,
    frames: usize,
    finished: usize,
}

struct MemorySink {
    log: Arc<Mutex<SinkLog>>,
    fail_writes: bool,
}

impl VideoSink for MemorySink {
    fn write_frame(&mut self, _frame: &RgbImage) -> Result<()> {
        if self.fail_writes {
            return Err(RecordingError::Write {
                details: "disk full".to_string(),
            }
            .into());
        }
        self.log.lock().unwrap().frames += 1;
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<()> {
        self.log.lock().unwrap().finished += 1;
        Ok(())
    }
}

#[derive(Default)]
struct MemorySinkFactory {
    log: Arc<Mutex<SinkLog>>,
    fail_writes: bool,
}

impl SinkFactory for MemorySinkFactory {
    fn open(&self, path: &Path, fps: u32, frame_size: (u32, u32)) -> Result<Box<dyn VideoSink>> {
        self.log
            .lock()
            .unwrap()
            .opened
            .push((path.to_path_buf(), fps, frame_size));
        Ok(Box::new(MemorySink {
            log: Arc::clone(&self.log),
            fail_writes: self.fail_writes,
        }))
    }
}

fn create_test_session() -> SessionState {
    SessionState::from_config(&SessionConfig::default(), (256, 192)).unwrap()
}

fn create_controller(fail_writes: bool) -> (RecordingController, Arc<Mutex<SinkLog>>) {
    let factory = MemorySinkFactory {
        fail_writes,
        ..MemorySinkFactory::default()
    };
    let log = Arc::clone(&factory.log);
    (
        RecordingController::new(Box::new(factory), "/tmp/thermcam-test", 25),
        log,
    )
}

#[test]
fn test_timestamped_name() {
    let at = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 7, 9, 5, 3)
        .unwrap();
    assert_eq!(timestamped_name(&at, ".png"), "20240307_090503.png");
    assert_eq!(timestamped_name(&at, ".avi"), "20240307_090503.avi");
}

#[test]
fn test_same_second_names_collide() {
    let at = Local.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
    let later = at + ChronoDuration::milliseconds(900);
    assert_eq!(timestamped_name(&at, ".png"), timestamped_name(&later, ".png"));
}

#[test]
fn test_elapsed_formatting() {
    assert_eq!(format_hms(Duration::from_secs(3725)), "01:02:05");
    assert_eq!(format_elapsed(Duration::from_secs(3725)), "Rec:01:02:05");
    assert_eq!(format_elapsed(Duration::from_secs(0)), "Rec:00:00:00");
    assert_eq!(format_hms(Duration::from_millis(59_999)), "00:00:59");
    assert_eq!(format_hms(Duration::from_secs(100 * 3600 + 1)), "100:00:01");
}

#[test]
fn test_start_opens_sink_at_display_size() {
    let (mut controller, log) = create_controller(false);
    let mut session = create_test_session();
    let now = Local::now();

    let path = controller.start(&mut session, now).unwrap();

    assert!(session.is_recording());
    assert!(controller.is_active());
    assert_eq!(path, PathBuf::from("/tmp/thermcam-test").join(timestamped_name(&now, ".avi")));

    let log = log.lock().unwrap();
    assert_eq!(log.opened.len(), 1);
    assert_eq!(log.opened[0].1, 25);
    assert_eq!(log.opened[0].2, (640, 480));
}

#[test]
fn test_failed_open_stays_idle() {
    let mut controller =
        RecordingController::new(Box::new(UnavailableSinkFactory), "/tmp/thermcam-test", 25);
    let mut session = create_test_session();

    let result = controller.start(&mut session, Local::now());

    assert!(matches!(
        result,
        Err(ThermcamError::Recording(RecordingError::Unavailable))
    ));
    assert!(!session.is_recording());
    assert!(!controller.is_active());

    // Scale stays adjustable because nothing started
    assert_eq!(session.apply(InputCommand::IncreaseScale), Outcome::Changed);
}

#[test]
fn test_stop_releases_sink_and_unlocks_scale() {
    let (mut controller, log) = create_controller(false);
    let mut session = create_test_session();

    controller.start(&mut session, Local::now()).unwrap();
    assert_eq!(
        session.apply(InputCommand::IncreaseScale),
        Outcome::Rejected(Rejection::ScaleLockedWhileRecording)
    );

    let frame = RgbImage::new(640, 480);
    controller.write(&mut session, &frame).unwrap();
    controller.write(&mut session, &frame).unwrap();

    let stopped = controller.stop(&mut session).unwrap();
    assert!(stopped.is_some());
    assert!(!session.is_recording());
    assert!(!controller.is_active());

    {
        let log = log.lock().unwrap();
        assert_eq!(log.frames, 2);
        assert_eq!(log.finished, 1);
    }

    assert_eq!(session.apply(InputCommand::IncreaseScale), Outcome::Changed);
    assert!(controller.stop(&mut session).unwrap().is_none());
}

#[test]
fn test_write_without_recording_is_noop() {
    let (mut controller, log) = create_controller(false);
    let mut session = create_test_session();

    controller
        .write(&mut session, &RgbImage::new(640, 480))
        .unwrap();
    assert_eq!(log.lock().unwrap().frames, 0);
}

#[test]
fn test_write_failure_stops_recording() {
    let (mut controller, log) = create_controller(true);
    let mut session = create_test_session();

    controller.start(&mut session, Local::now()).unwrap();
    let result = controller.write(&mut session, &RgbImage::new(640, 480));

    assert!(result.is_err());
    assert!(!session.is_recording());
    assert!(!controller.is_active());
    assert_eq!(log.lock().unwrap().finished, 1);
}

#[test]
fn test_frame_size_change_is_rejected() {
    let (mut controller, log) = create_controller(false);
    let mut session = create_test_session();

    controller.start(&mut session, Local::now()).unwrap();
    let result = controller.write(&mut session, &RgbImage::new(320, 240));

    assert!(matches!(
        result,
        Err(ThermcamError::Recording(RecordingError::Write { .. }))
    ));
    assert!(!session.is_recording());
    assert_eq!(log.lock().unwrap().frames, 0);
}

#[test]
fn test_elapsed_label() {
    let (mut controller, _log) = create_controller(false);
    let mut session = create_test_session();
    let started = Local::now();

    assert!(controller.elapsed_label(&session, started).is_none());

    controller.start(&mut session, started).unwrap();
    let label = controller
        .elapsed_label(&session, started + ChronoDuration::seconds(3725))
        .unwrap();
    assert_eq!(label, "Rec:01:02:05");
}

#[test]
fn test_drop_finalizes_open_recording() {
    let (mut controller, log) = create_controller(false);
    let mut session = create_test_session();

    controller.start(&mut session, Local::now()).unwrap();
    drop(controller);

    assert_eq!(log.lock().unwrap().finished, 1);
}

#[test]
fn test_still_path_uses_png_suffix() {
    let (controller, _log) = create_controller(false);
    let at = Local.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(
        controller.still_path(&at),
        PathBuf::from("/tmp/thermcam-test/20230102_030405.png")
    );
}
