use crate::camera_session::session::CameraSession;
use crate::config::Config;
use crate::device_provider::impl_fake::DeviceProviderFake;
use crate::device_provider::interface::{Facing, RawDevice};
use crate::library::logger::impl_console::LoggerConsole;
use crate::library::logger::interface::Logger;
use crate::library::timer::impl_fake::TimerFake;
use crate::video_surface::impl_fake::VideoSurfaceFake;
use std::sync::Arc;
use std::time::Duration;

#[allow(dead_code)]
pub struct Fixture {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_provider: Arc<DeviceProviderFake>,
    pub video_surface: Arc<VideoSurfaceFake>,
    pub timer: Arc<TimerFake>,
    pub session: CameraSession,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_devices(vec![front_camera(), back_camera()])
    }

    pub fn with_devices(devices: Vec<RawDevice>) -> Self {
        let config = Config {
            metadata_timeout: Duration::from_millis(50),
            ..Config::default()
        };
        let logger: Arc<dyn Logger + Send + Sync> =
            Arc::new(LoggerConsole::new(config.logger_timezone));
        let device_provider = Arc::new(DeviceProviderFake::new(logger.clone(), devices));
        let video_surface = Arc::new(VideoSurfaceFake::new(logger.clone(), 640, 480));
        let timer = Arc::new(TimerFake::new());
        let session = CameraSession::new(
            config.clone(),
            logger.clone(),
            device_provider.clone(),
            video_surface.clone(),
            timer.clone(),
        );

        Self {
            config,
            logger,
            device_provider,
            video_surface,
            timer,
            session,
        }
    }
}

pub fn front_camera() -> RawDevice {
    RawDevice::video("front-1", "Front Camera", Some(Facing::Front))
}

pub fn back_camera() -> RawDevice {
    RawDevice::video("back-1", "Back Camera", Some(Facing::Back))
}
