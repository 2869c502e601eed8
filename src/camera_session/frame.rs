use crate::camera_session::error::CameraError;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureResult {
    pub encoded_image: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<CaptureResult, CameraError> {
    let rgb = image.to_rgb8();
    let mut encoded_image = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded_image, quality).encode_image(&rgb)?;

    Ok(CaptureResult {
        encoded_image,
        width: rgb.width(),
        height: rgb.height(),
    })
}
