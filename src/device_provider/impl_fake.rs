use crate::device_provider::interface::{
    DeviceError, DeviceKind, DeviceProvider, MediaStream, RawDevice, StreamRequest, TrackSettings,
    VideoConstraint,
};
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub struct DeviceProviderFake {
    logger: Arc<dyn Logger + Send + Sync>,
    devices: Mutex<Vec<RawDevice>>,
    failures: Mutex<Vec<(VideoConstraint, DeviceError)>>,
    enumerate_failure: Mutex<Option<DeviceError>>,
    requests: Mutex<Vec<StreamRequest>>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    peak_live: AtomicUsize,
}

#[allow(dead_code)]
impl DeviceProviderFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, devices: Vec<RawDevice>) -> Self {
        Self {
            logger: logger.with_namespace("device_provider").with_namespace("fake"),
            devices: Mutex::new(devices),
            failures: Mutex::new(Vec::new()),
            enumerate_failure: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            opened: Arc::new(AtomicUsize::new(0)),
            closed: Arc::new(AtomicUsize::new(0)),
            peak_live: AtomicUsize::new(0),
        }
    }

    pub fn fail(&self, constraint: VideoConstraint, error: DeviceError) {
        self.failures.lock().unwrap().push((constraint, error));
    }

    pub fn fail_device(&self, id: &str, error: DeviceError) {
        self.fail(VideoConstraint::Device(id.to_string()), error);
    }

    pub fn clear_failures(&self) {
        self.failures.lock().unwrap().clear();
        *self.enumerate_failure.lock().unwrap() = None;
    }

    pub fn fail_enumeration(&self, error: DeviceError) {
        *self.enumerate_failure.lock().unwrap() = Some(error);
    }

    pub fn set_devices(&self, devices: Vec<RawDevice>) {
        *self.devices.lock().unwrap() = devices;
    }

    pub fn requests(&self) -> Vec<StreamRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn open_count(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn live_streams(&self) -> usize {
        self.open_count() - self.close_count()
    }

    pub fn peak_live_streams(&self) -> usize {
        self.peak_live.load(Ordering::SeqCst)
    }

    fn resolve(&self, constraint: &VideoConstraint) -> Result<RawDevice, DeviceError> {
        let devices = self.devices.lock().unwrap();
        let mut cameras = devices
            .iter()
            .filter(|device| device.kind == DeviceKind::VideoInput);

        let found = match constraint {
            VideoConstraint::Device(id) => cameras
                .find(|device| &device.id == id)
                .ok_or_else(|| DeviceError::Overconstrained(constraint.clone()))?,
            VideoConstraint::FacingExact(facing) => cameras
                .find(|device| device.facing == Some(*facing))
                .ok_or_else(|| DeviceError::Overconstrained(constraint.clone()))?,
            VideoConstraint::FacingIdeal(facing) => {
                let cameras: Vec<&RawDevice> = cameras.collect();
                cameras
                    .iter()
                    .find(|device| device.facing == Some(*facing))
                    .or(cameras.first())
                    .copied()
                    .ok_or(DeviceError::NotFound)?
            }
            VideoConstraint::Any => cameras.next().ok_or(DeviceError::NotFound)?,
        };

        Ok(found.clone())
    }
}

impl DeviceProvider for DeviceProviderFake {
    fn open(&self, request: &StreamRequest) -> Result<Box<dyn MediaStream>, DeviceError> {
        self.requests.lock().unwrap().push(request.clone());

        let failure = self
            .failures
            .lock()
            .unwrap()
            .iter()
            .find(|(constraint, _)| constraint == &request.video)
            .map(|(_, error)| error.clone());

        if let Some(error) = failure {
            let _ = self
                .logger
                .info(&format!("Refusing {:?}: {}", request.video, error));
            return Err(error);
        }

        let device = self.resolve(&request.video)?;
        self.opened.fetch_add(1, Ordering::SeqCst);
        self.peak_live.fetch_max(self.live_streams(), Ordering::SeqCst);
        let _ = self
            .logger
            .info(&format!("Opened stream on {} for {:?}", device.id, request.video));

        Ok(Box::new(MediaStreamFake {
            settings: TrackSettings {
                device_id: device.id,
                facing: device.facing,
                width: request.ideal_width,
                height: request.ideal_height,
            },
            closed: self.closed.clone(),
            stopped: false,
        }))
    }

    fn enumerate(&self) -> Result<Vec<RawDevice>, DeviceError> {
        if let Some(error) = self.enumerate_failure.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(self.devices.lock().unwrap().clone())
    }
}

pub struct MediaStreamFake {
    settings: TrackSettings,
    closed: Arc<AtomicUsize>,
    stopped: bool,
}

impl MediaStream for MediaStreamFake {
    fn settings(&self) -> TrackSettings {
        self.settings.clone()
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::device_provider::interface::Facing;
    use crate::library::logger::impl_console::LoggerConsole;

    fn provider() -> DeviceProviderFake {
        let config = Config::default();
        DeviceProviderFake::new(
            Arc::new(LoggerConsole::new(config.logger_timezone)),
            vec![
                RawDevice::video("front-1", "Front Camera", Some(Facing::Front)),
                RawDevice::video("back-1", "Back Camera", Some(Facing::Back)),
            ],
        )
    }

    #[test]
    fn ideal_facing_falls_back_to_first_camera() {
        let provider = provider();
        provider.set_devices(vec![RawDevice::video("usb-1", "USB Camera", None)]);

        let config = Config::default();
        let stream = provider
            .open(&StreamRequest::new(
                VideoConstraint::FacingIdeal(Facing::Back),
                &config,
            ))
            .unwrap();

        assert_eq!(stream.settings().device_id, "usb-1");
    }

    #[test]
    fn exact_facing_without_match_is_overconstrained() {
        let provider = provider();
        provider.set_devices(vec![RawDevice::video("usb-1", "USB Camera", None)]);

        let config = Config::default();
        let result = provider.open(&StreamRequest::new(
            VideoConstraint::FacingExact(Facing::Back),
            &config,
        ));

        assert!(matches!(result, Err(DeviceError::Overconstrained(_))));
        assert_eq!(provider.open_count(), 0);
    }

    #[test]
    fn stopping_a_stream_twice_counts_one_close() {
        let provider = provider();
        let config = Config::default();
        let mut stream = provider.open(&StreamRequest::probe(&config)).unwrap();

        stream.stop();
        stream.stop();

        assert_eq!(provider.open_count(), 1);
        assert_eq!(provider.close_count(), 1);
    }
}
