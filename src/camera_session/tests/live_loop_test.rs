use super::fixture::Fixture;
use crate::camera_session::error::CameraError;
use crate::camera_session::frame::CaptureResult;
use crate::camera_session::session::SessionState;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const INTERVAL: Duration = Duration::from_millis(700);

fn recorder() -> (Arc<Mutex<Vec<CaptureResult>>>, impl Fn(CaptureResult) + Send + 'static) {
    let frames = Arc::new(Mutex::new(Vec::new()));
    let sink = frames.clone();
    (frames, move |frame| sink.lock().unwrap().push(frame))
}

#[test]
fn test_live_loop_delivers_one_frame_per_tick() {
    let f = Fixture::new();
    f.session.start(None).unwrap();
    let (frames, on_frame) = recorder();

    f.session.start_live_loop(INTERVAL, on_frame).unwrap();

    f.timer.advance(Duration::from_millis(699));
    assert_eq!(frames.lock().unwrap().len(), 0);

    f.timer.advance(Duration::from_millis(1));
    assert_eq!(frames.lock().unwrap().len(), 1);

    f.timer.advance(INTERVAL * 2);
    let frames = frames.lock().unwrap();
    assert_eq!(frames.len(), 3);
    assert!(frames
        .iter()
        .all(|frame| (frame.width, frame.height) == (640, 480)));
}

#[test]
fn test_stop_live_loop_cancels_pending_tick() {
    let f = Fixture::new();
    f.session.start(None).unwrap();
    let (frames, on_frame) = recorder();
    f.session.start_live_loop(INTERVAL, on_frame).unwrap();

    f.timer.advance(Duration::from_millis(300));
    f.session.stop_live_loop();
    f.timer.advance(Duration::from_secs(5));

    assert!(frames.lock().unwrap().is_empty());
    assert!(!f.session.is_live());
    assert_eq!(f.timer.pending(), 0);
    assert_eq!(f.session.state(), SessionState::Active);

    f.session.stop_live_loop();
}

#[test]
fn test_stopping_session_halts_live_loop() {
    let f = Fixture::new();
    f.session.start(None).unwrap();
    let (frames, on_frame) = recorder();
    f.session.start_live_loop(INTERVAL, on_frame).unwrap();
    f.timer.advance(INTERVAL);

    f.session.stop();
    f.timer.advance(INTERVAL * 3);

    assert_eq!(frames.lock().unwrap().len(), 1);
    assert!(!f.session.is_live());
    assert_eq!(f.timer.pending(), 0);
}

#[test]
fn test_second_live_loop_is_ignored() {
    let f = Fixture::new();
    f.session.start(None).unwrap();
    let (first, on_first) = recorder();
    let (second, on_second) = recorder();

    f.session.start_live_loop(INTERVAL, on_first).unwrap();
    f.session.start_live_loop(INTERVAL, on_second).unwrap();
    f.timer.advance(INTERVAL);

    assert_eq!(first.lock().unwrap().len(), 1);
    assert!(second.lock().unwrap().is_empty());
    assert_eq!(f.timer.pending(), 1);
}

#[test]
fn test_live_loop_requires_active_session() {
    let f = Fixture::new();
    let (_, on_frame) = recorder();

    assert_eq!(
        f.session.start_live_loop(INTERVAL, on_frame),
        Err(CameraError::NotActive)
    );
    assert_eq!(f.timer.pending(), 0);
}

#[test]
fn test_ticks_without_frame_are_skipped() {
    let f = Fixture::new();
    f.session.start(None).unwrap();
    let (frames, on_frame) = recorder();
    f.session.start_live_loop(INTERVAL, on_frame).unwrap();

    f.video_surface.set_dimensions(0, 0);
    f.timer.advance(INTERVAL * 2);
    assert!(frames.lock().unwrap().is_empty());

    f.video_surface.set_dimensions(320, 240);
    f.timer.advance(INTERVAL);
    let frames = frames.lock().unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!((frames[0].width, frames[0].height), (320, 240));
}

#[test]
fn test_live_loop_survives_camera_switch() {
    let f = Fixture::new();
    f.session.start(None).unwrap();
    let (frames, on_frame) = recorder();
    f.session.start_live_loop(INTERVAL, on_frame).unwrap();

    f.session.switch_device().unwrap();
    f.timer.advance(INTERVAL);

    assert!(f.session.is_live());
    assert_eq!(frames.lock().unwrap().len(), 1);
}

#[test]
fn test_lost_camera_halts_live_loop() {
    let f = Fixture::new();
    f.session.start(None).unwrap();
    let (frames, on_frame) = recorder();
    f.session.start_live_loop(INTERVAL, on_frame).unwrap();

    f.video_surface.revoke();
    f.timer.advance(INTERVAL * 3);

    assert!(frames.lock().unwrap().is_empty());
    assert_eq!(f.session.state(), SessionState::Stopped);
    assert!(!f.session.is_live());
    assert_eq!(f.timer.pending(), 0);
    assert_eq!(f.device_provider.live_streams(), 0);
}
