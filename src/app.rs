use crate::camera_session::error::CameraError;
use crate::camera_session::frame::encode_jpeg;
use crate::camera_session::session::CameraSession;
use crate::config::Config;
use crate::library::logger::interface::Logger;
use crate::prediction::interface::PredictionService;
use crate::renderer::interface::Renderer;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

pub struct App {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    session: CameraSession,
    prediction_service: Arc<dyn PredictionService + Send + Sync>,
    renderer: Arc<dyn Renderer + Send + Sync>,
}

impl App {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        session: CameraSession,
        prediction_service: Arc<dyn PredictionService + Send + Sync>,
        renderer: Arc<dyn Renderer + Send + Sync>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("app"),
            session,
            prediction_service,
            renderer,
        }
    }

    pub fn start_camera(&self) -> Result<(), CameraError> {
        match self.session.start(Some(self.config.preferred_facing)) {
            Ok(_) => {
                self.show_camera_label();
                Ok(())
            }
            Err(error) => {
                self.show_error(&format!("Camera error: {}", error));
                Err(error)
            }
        }
    }

    /// Starts live analysis, or stops it when already running. Returns
    /// whether live analysis is running afterwards.
    pub fn toggle_live_analysis(&self) -> Result<bool, CameraError> {
        if self.session.is_live() {
            self.session.stop_live_loop();
            let _ = self.logger.info("Live analysis stopped");
            return Ok(false);
        }

        let logger = self.logger.clone();
        let prediction_service = self.prediction_service.clone();
        let renderer = self.renderer.clone();

        let started = self
            .session
            .start_live_loop(self.config.live_interval, move |frame| {
                let rendered = match prediction_service.predict_frame(&frame) {
                    Ok(prediction) => renderer.render_prediction(&prediction),
                    Err(error) => {
                        let _ = logger.warn(&format!("Frame analysis failed: {}", error));
                        renderer.render_error(&error.to_string())
                    }
                };
                if let Err(error) = rendered {
                    let _ = logger.warn(&format!("Render failed: {}", error));
                }
            });

        match started {
            Ok(()) => {
                let _ = self.logger.info("Live analysis started");
                Ok(true)
            }
            Err(error) => {
                self.show_error("Please start the camera first");
                Err(error)
            }
        }
    }

    pub fn switch_camera(&self) -> Result<(), CameraError> {
        match self.session.switch_device() {
            Ok(_) => {
                self.show_camera_label();
                Ok(())
            }
            Err(error) => {
                self.show_error(&format!("Camera error: {}", error));
                self.show_camera_label();
                Err(error)
            }
        }
    }

    pub fn handle_stream_ended(&self) {
        if let Err(error) = self.session.handle_stream_ended() {
            self.show_error(&format!("Camera error: {}", error));
            self.show_camera_label();
        }
    }

    pub fn stop_camera(&self) {
        self.session.stop();
        self.show_camera_label();
    }

    /// Analyzes an image file. Unreadable images are reported through the
    /// renderer; only failures of the prediction service are returned.
    pub fn analyze_upload(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let _ = self
            .logger
            .info(&format!("Analyzing upload {}", path.display()));

        let image = match image::open(path) {
            Ok(image) => image,
            Err(error) => {
                self.show_error(&format!("Invalid image: {}", error));
                return Ok(());
            }
        };

        let encoded = encode_jpeg(&image, self.config.jpeg_quality)?;
        let prediction = self.prediction_service.predict_upload(&encoded.encoded_image)?;
        self.renderer.render_prediction(&prediction)?;
        Ok(())
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let devices = self.session.enumerate_devices();
        let _ = self
            .logger
            .info(&format!("{} camera(s) available", devices.len()));

        self.start_camera()?;
        self.toggle_live_analysis()?;

        let started_at = Instant::now();
        let mut switched = false;

        while started_at.elapsed() < self.config.run_duration {
            if !switched && started_at.elapsed() >= self.config.switch_camera_after {
                switched = true;
                if let Err(error) = self.switch_camera() {
                    let _ = self.logger.warn(&format!("Switch failed: {}", error));
                }
            }
            std::thread::sleep(self.config.tick_rate);
        }

        self.stop_camera();
        Ok(())
    }

    fn show_camera_label(&self) {
        if let Err(error) = self.renderer.render_camera_label(&self.session.camera_label()) {
            let _ = self.logger.warn(&format!("Render failed: {}", error));
        }
    }

    fn show_error(&self, message: &str) {
        if let Err(error) = self.renderer.render_error(message) {
            let _ = self.logger.warn(&format!("Render failed: {}", error));
        }
    }
}
