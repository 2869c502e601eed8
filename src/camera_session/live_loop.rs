use crate::camera_session::error::CameraError;
use crate::camera_session::frame::CaptureResult;
use crate::camera_session::session::{CameraSession, Inner, SessionState};
use crate::library::timer::interface::TimerId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub(super) struct LiveLoop {
    timer_id: TimerId,
    running: Arc<AtomicBool>,
}

impl CameraSession {
    /// Captures a frame every `interval` and hands it to `on_frame`. Ticks
    /// where no frame is ready are skipped. A second call while a loop is
    /// running is ignored.
    pub fn start_live_loop<F>(&self, interval: Duration, on_frame: F) -> Result<(), CameraError>
    where
        F: Fn(CaptureResult) + Send + 'static,
    {
        let mut inner = self.lock();
        if inner.state != SessionState::Active {
            return Err(CameraError::NotActive);
        }
        if inner.live_loop.is_some() {
            let _ = self.logger.info("Live loop already running");
            return Ok(());
        }

        let running = Arc::new(AtomicBool::new(true));
        let tick_running = running.clone();
        let session = self.clone();

        let timer_id = self.timer.every(
            interval,
            Box::new(move || {
                if !tick_running.load(Ordering::SeqCst) {
                    return;
                }
                match session.capture_frame() {
                    Ok(Some(frame)) => on_frame(frame),
                    Ok(None) => {}
                    Err(error) => {
                        let _ = session
                            .logger
                            .warn(&format!("Live capture skipped: {}", error));
                    }
                }
            }),
        );

        inner.live_loop = Some(LiveLoop { timer_id, running });
        let _ = self
            .logger
            .info(&format!("Live loop started every {:?}", interval));
        Ok(())
    }

    pub fn stop_live_loop(&self) {
        let mut inner = self.lock();
        self.halt_live_loop(&mut inner);
    }

    pub fn is_live(&self) -> bool {
        self.lock().live_loop.is_some()
    }

    pub(super) fn halt_live_loop(&self, inner: &mut Inner) {
        if let Some(live_loop) = inner.live_loop.take() {
            live_loop.running.store(false, Ordering::SeqCst);
            self.timer.cancel(live_loop.timer_id);
            let _ = self.logger.info("Live loop stopped");
        }
    }
}
