use crate::device_provider::interface::{DeviceError, MediaStream};
use image::DynamicImage;
use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    MetadataLoaded,
}

pub trait VideoSurface: Send + Sync {
    /// Binds the stream; the receiver yields `MetadataLoaded` once the
    /// surface knows the frame size.
    fn bind(&self, stream: &dyn MediaStream) -> Receiver<SurfaceEvent>;

    fn unbind(&self);

    fn dimensions(&self) -> (u32, u32);

    fn snapshot(&self) -> Result<DynamicImage, DeviceError>;
}
