use crate::device_provider::interface::{DeviceError, MediaStream, TrackSettings};
use crate::library::logger::interface::Logger;
use crate::video_surface::interface::{SurfaceEvent, VideoSurface};
use image::{DynamicImage, Rgb, RgbImage};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

pub struct VideoSurfaceFake {
    logger: Arc<dyn Logger + Send + Sync>,
    dimensions: Mutex<(u32, u32)>,
    bound: Mutex<Option<TrackSettings>>,
    // Kept alive so a withheld metadata event times out instead of disconnecting.
    metadata_sender: Mutex<Option<Sender<SurfaceEvent>>>,
    withhold_metadata: AtomicBool,
    withhold_next: AtomicBool,
    revoked: AtomicBool,
}

#[allow(dead_code)]
impl VideoSurfaceFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, width: u32, height: u32) -> Self {
        Self {
            logger: logger.with_namespace("video_surface").with_namespace("fake"),
            dimensions: Mutex::new((width, height)),
            bound: Mutex::new(None),
            metadata_sender: Mutex::new(None),
            withhold_metadata: AtomicBool::new(false),
            withhold_next: AtomicBool::new(false),
            revoked: AtomicBool::new(false),
        }
    }

    pub fn set_dimensions(&self, width: u32, height: u32) {
        *self.dimensions.lock().unwrap() = (width, height);
    }

    pub fn withhold_metadata(&self, withhold: bool) {
        self.withhold_metadata.store(withhold, Ordering::SeqCst);
    }

    pub fn withhold_next_metadata(&self) {
        self.withhold_next.store(true, Ordering::SeqCst);
    }

    pub fn revoke(&self) {
        self.revoked.store(true, Ordering::SeqCst);
    }

    pub fn bound_device(&self) -> Option<String> {
        self.bound
            .lock()
            .unwrap()
            .as_ref()
            .map(|settings| settings.device_id.clone())
    }
}

impl VideoSurface for VideoSurfaceFake {
    fn bind(&self, stream: &dyn MediaStream) -> Receiver<SurfaceEvent> {
        let settings = stream.settings();
        let _ = self
            .logger
            .info(&format!("Bound stream from {}", settings.device_id));
        *self.bound.lock().unwrap() = Some(settings);

        let (tx, rx) = channel();
        let withhold_once = self.withhold_next.swap(false, Ordering::SeqCst);
        if !withhold_once && !self.withhold_metadata.load(Ordering::SeqCst) {
            let _ = tx.send(SurfaceEvent::MetadataLoaded);
        }
        *self.metadata_sender.lock().unwrap() = Some(tx);
        rx
    }

    fn unbind(&self) {
        *self.bound.lock().unwrap() = None;
        *self.metadata_sender.lock().unwrap() = None;
    }

    fn dimensions(&self) -> (u32, u32) {
        match *self.bound.lock().unwrap() {
            Some(_) => *self.dimensions.lock().unwrap(),
            None => (0, 0),
        }
    }

    fn snapshot(&self) -> Result<DynamicImage, DeviceError> {
        if self.revoked.load(Ordering::SeqCst) {
            return Err(DeviceError::Revoked);
        }
        if self.bound.lock().unwrap().is_none() {
            return Err(DeviceError::Other("no stream bound".to_string()));
        }

        let (width, height) = *self.dimensions.lock().unwrap();
        let mut rng = rand::rng();
        let noise: u8 = rng.random_range(0..32);

        // Skin-toned gradient so the frame is not flat.
        let frame = RgbImage::from_fn(width, height, |x, y| {
            let shade = ((x + y) % 64) as u8;
            Rgb([
                200u8.saturating_sub(shade) + noise / 2,
                150u8.saturating_sub(shade),
                120u8.saturating_sub(shade / 2),
            ])
        });

        Ok(DynamicImage::ImageRgb8(frame))
    }
}
