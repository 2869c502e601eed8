use crate::camera_session::device::{
    describe_devices, describe_negotiated, display_label, distinct_count, pick_for_facing,
    switch_target, DeviceDescriptor,
};
use crate::camera_session::error::CameraError;
use crate::camera_session::frame::{encode_jpeg, CaptureResult};
use crate::camera_session::live_loop::LiveLoop;
use crate::config::Config;
use crate::device_provider::interface::{
    DeviceError, DeviceProvider, Facing, MediaStream, StreamRequest, VideoConstraint,
};
use crate::library::logger::interface::Logger;
use crate::library::timer::interface::Timer;
use crate::video_surface::interface::{SurfaceEvent, VideoSurface};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Starting,
    Active,
    SwitchingDevice,
    Stopped,
}

pub(super) struct Inner {
    pub(super) state: SessionState,
    pub(super) stream: Option<Box<dyn MediaStream>>,
    pub(super) current_device: Option<DeviceDescriptor>,
    pub(super) devices: Vec<DeviceDescriptor>,
    pub(super) devices_enumerated: bool,
    pub(super) permission_granted: bool,
    pub(super) live_loop: Option<LiveLoop>,
}

/// Owns the single camera stream and its binding to the video surface.
#[derive(Clone)]
pub struct CameraSession {
    pub(super) config: Config,
    pub(super) logger: Arc<dyn Logger + Send + Sync>,
    pub(super) device_provider: Arc<dyn DeviceProvider + Send + Sync>,
    pub(super) video_surface: Arc<dyn VideoSurface + Send + Sync>,
    pub(super) timer: Arc<dyn Timer + Send + Sync>,
    pub(super) inner: Arc<Mutex<Inner>>,
}

impl CameraSession {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_provider: Arc<dyn DeviceProvider + Send + Sync>,
        video_surface: Arc<dyn VideoSurface + Send + Sync>,
        timer: Arc<dyn Timer + Send + Sync>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("camera_session"),
            device_provider,
            video_surface,
            timer,
            inner: Arc::new(Mutex::new(Inner {
                state: SessionState::Idle,
                stream: None,
                current_device: None,
                devices: Vec::new(),
                devices_enumerated: false,
                permission_granted: false,
                live_loop: None,
            })),
        }
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> SessionState {
        self.lock().state
    }

    pub fn current_device(&self) -> Option<DeviceDescriptor> {
        self.lock().current_device.clone()
    }

    pub fn camera_label(&self) -> String {
        let inner = self.lock();
        display_label(&inner.devices, inner.current_device.as_ref())
    }

    /// Opens a camera, releasing any stream already held. Tries the
    /// enumerated device for `preferred_facing`, then a facing hint, then a
    /// strict facing requirement, then any camera.
    pub fn start(&self, preferred_facing: Option<Facing>) -> Result<DeviceDescriptor, CameraError> {
        let mut inner = self.lock();
        self.halt_live_loop(&mut inner);
        self.release_stream(&mut inner);
        inner.state = SessionState::Starting;

        if !inner.devices_enumerated {
            self.refresh_devices(&mut inner);
        }

        let facing = preferred_facing.unwrap_or(self.config.preferred_facing);
        let mut ladder = Vec::with_capacity(4);
        if let Some(device) = pick_for_facing(&inner.devices, facing) {
            ladder.push(VideoConstraint::Device(device.id.clone()));
        }
        ladder.push(VideoConstraint::FacingIdeal(facing));
        ladder.push(VideoConstraint::FacingExact(facing));
        ladder.push(VideoConstraint::Any);

        let _ = self
            .logger
            .info(&format!("Starting camera facing {:?}", facing));

        let result = self.open_and_attach(&mut inner, &ladder);

        match result {
            Ok(device) => {
                inner.state = SessionState::Active;
                let _ = self.logger.info(&format!("Camera {} active", device.id));
                Ok(device)
            }
            Err(error) => {
                inner.state = SessionState::Stopped;
                let _ = self
                    .logger
                    .error(&format!("Camera start failed: {}", error));
                Err(error)
            }
        }
    }

    pub fn stop(&self) {
        let mut inner = self.lock();
        if matches!(inner.state, SessionState::Idle | SessionState::Stopped) {
            return;
        }

        self.halt_live_loop(&mut inner);
        self.release_stream(&mut inner);
        inner.state = SessionState::Stopped;
        let _ = self.logger.info("Camera stopped");
    }

    /// Moves to the other camera. On failure the original camera is
    /// reattached and the session stays active.
    pub fn switch_device(&self) -> Result<DeviceDescriptor, CameraError> {
        let mut inner = self.lock();
        if inner.state != SessionState::Active {
            return Err(CameraError::NotActive);
        }
        let current = inner.current_device.clone().ok_or(CameraError::NotActive)?;

        self.refresh_devices(&mut inner);
        if distinct_count(&inner.devices) < 2 {
            let _ = self.logger.info("Switch requested with a single camera");
            return Err(CameraError::SingleCameraOnly);
        }
        let target = switch_target(&inner.devices, &current).ok_or(CameraError::SingleCameraOnly)?;

        let _ = self
            .logger
            .info(&format!("Switching camera {} -> {}", current.id, target.id));

        inner.state = SessionState::SwitchingDevice;
        self.release_stream(&mut inner);

        let wanted = current
            .declared_facing
            .map(Facing::opposite)
            .or(target.declared_facing)
            .unwrap_or(Facing::Back);

        let attempt = self
            .open_and_attach(&mut inner, &[VideoConstraint::Device(target.id.clone())])
            .or_else(|error| {
                let _ = self.logger.warn(&format!(
                    "Camera {} failed ({}), falling back to facing {:?} only",
                    target.id, error, wanted
                ));
                self.open_and_attach(
                    &mut inner,
                    &[
                        VideoConstraint::FacingIdeal(wanted),
                        VideoConstraint::FacingExact(wanted),
                    ],
                )
            });

        match attempt {
            Ok(device) => {
                inner.state = SessionState::Active;
                let _ = self.logger.info(&format!("Switched to camera {}", device.id));
                Ok(device)
            }
            Err(error) => {
                let _ = self.logger.warn(&format!(
                    "Switch failed ({}), restoring camera {}",
                    error, current.id
                ));
                self.restore(&mut inner, &current);
                Err(CameraError::SwitchFailed)
            }
        }
    }

    pub fn enumerate_devices(&self) -> Vec<DeviceDescriptor> {
        let mut inner = self.lock();
        self.refresh_devices(&mut inner)
    }

    /// Encodes the current surface frame. `Ok(None)` means no frame is ready yet.
    pub fn capture_frame(&self) -> Result<Option<CaptureResult>, CameraError> {
        let mut inner = self.lock();
        if inner.state != SessionState::Active {
            return Err(CameraError::NotActive);
        }

        let (width, height) = self.video_surface.dimensions();
        if width == 0 || height == 0 {
            return Ok(None);
        }

        let image = match self.video_surface.snapshot() {
            Ok(image) => image,
            Err(DeviceError::Revoked) => {
                self.lose_device(&mut inner);
                return Err(CameraError::DeviceLost);
            }
            Err(error) => {
                let _ = self.logger.warn(&format!("Snapshot failed: {}", error));
                return Ok(None);
            }
        };

        encode_jpeg(&image, self.config.jpeg_quality).map(Some)
    }

    pub fn handle_stream_ended(&self) -> Result<(), CameraError> {
        let mut inner = self.lock();
        match inner.state {
            SessionState::Active | SessionState::SwitchingDevice => {
                self.lose_device(&mut inner);
                Err(CameraError::DeviceLost)
            }
            _ => Ok(()),
        }
    }

    fn refresh_devices(&self, inner: &mut Inner) -> Vec<DeviceDescriptor> {
        // Labels stay empty until permission is granted, so open and drop a probe stream first.
        if !inner.permission_granted {
            match self.device_provider.open(&StreamRequest::probe(&self.config)) {
                Ok(mut probe) => {
                    probe.stop();
                    inner.permission_granted = true;
                }
                Err(error) => {
                    let _ = self
                        .logger
                        .warn(&format!("Permission probe failed: {}", error));
                }
            }
        }

        let devices = match self.device_provider.enumerate() {
            Ok(raw) => {
                inner.devices_enumerated = true;
                describe_devices(&raw)
            }
            Err(error) => {
                // Left unmarked so the next start enumerates again.
                let _ = self
                    .logger
                    .warn(&format!("Device enumeration failed: {}", error));
                Vec::new()
            }
        };

        let _ = self
            .logger
            .info(&format!("Found {} camera(s)", devices.len()));
        inner.devices = devices.clone();
        devices
    }

    fn open_first(&self, ladder: &[VideoConstraint]) -> Result<Box<dyn MediaStream>, Vec<DeviceError>> {
        let mut failures = Vec::with_capacity(ladder.len());
        for constraint in ladder {
            let request = StreamRequest::new(constraint.clone(), &self.config);
            match self.device_provider.open(&request) {
                Ok(stream) => return Ok(stream),
                Err(error) => {
                    let _ = self
                        .logger
                        .warn(&format!("Request {:?} failed: {}", constraint, error));
                    failures.push(error);
                }
            }
        }
        Err(failures)
    }

    fn open_and_attach(&self, inner: &mut Inner, ladder: &[VideoConstraint]) -> Result<DeviceDescriptor, CameraError> {
        let stream = self
            .open_first(ladder)
            .map_err(|failures| CameraError::from_tier_failures(&failures))?;
        self.attach(inner, stream)
    }

    fn attach(&self, inner: &mut Inner, stream: Box<dyn MediaStream>) -> Result<DeviceDescriptor, CameraError> {
        let settings = stream.settings();
        let events = self.video_surface.bind(stream.as_ref());
        inner.stream = Some(stream);
        inner.permission_granted = true;

        match events.recv_timeout(self.config.metadata_timeout) {
            Ok(SurfaceEvent::MetadataLoaded) => {}
            Err(_) => {
                self.release_stream(inner);
                return Err(CameraError::DeviceTimeout);
            }
        }

        let device = describe_negotiated(&settings, &inner.devices);
        inner.current_device = Some(device.clone());
        Ok(device)
    }

    fn restore(&self, inner: &mut Inner, original: &DeviceDescriptor) {
        let restored = self.open_and_attach(inner, &[VideoConstraint::Device(original.id.clone())]);

        match restored {
            Ok(_) => inner.state = SessionState::Active,
            Err(error) => {
                let _ = self
                    .logger
                    .error(&format!("Could not restore camera {}: {}", original.id, error));
                self.halt_live_loop(inner);
                inner.state = SessionState::Stopped;
            }
        }
    }

    fn lose_device(&self, inner: &mut Inner) {
        let _ = self.logger.error("Camera lost, stopping session");
        self.halt_live_loop(inner);
        self.release_stream(inner);
        inner.state = SessionState::Stopped;
    }

    pub(super) fn release_stream(&self, inner: &mut Inner) {
        if let Some(mut stream) = inner.stream.take() {
            stream.stop();
            self.video_surface.unbind();
        }
        inner.current_device = None;
    }
}
