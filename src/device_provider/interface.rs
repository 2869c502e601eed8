use crate::config::Config;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Front,
    Back,
}

impl Facing {
    pub fn opposite(self) -> Self {
        match self {
            Facing::Front => Facing::Back,
            Facing::Back => Facing::Front,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    VideoInput,
    AudioInput,
    AudioOutput,
}

/// Device metadata exactly as the platform reports it. The label is empty
/// until camera permission has been granted.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDevice {
    pub id: String,
    pub kind: DeviceKind,
    pub label: String,
    pub facing: Option<Facing>,
}

impl RawDevice {
    pub fn video(id: &str, label: &str, facing: Option<Facing>) -> Self {
        Self {
            id: id.to_string(),
            kind: DeviceKind::VideoInput,
            label: label.to_string(),
            facing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VideoConstraint {
    Device(String),
    FacingIdeal(Facing),
    FacingExact(Facing),
    Any,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamRequest {
    pub video: VideoConstraint,
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub ideal_frame_rate: Option<u32>,
}

impl StreamRequest {
    pub fn new(video: VideoConstraint, config: &Config) -> Self {
        Self {
            video,
            ideal_width: config.ideal_width,
            ideal_height: config.ideal_height,
            ideal_frame_rate: Some(config.ideal_frame_rate),
        }
    }

    /// Throwaway low-resolution request used only to obtain permission.
    pub fn probe(config: &Config) -> Self {
        Self {
            video: VideoConstraint::Any,
            ideal_width: config.probe_width,
            ideal_height: config.probe_height,
            ideal_frame_rate: None,
        }
    }
}

/// What the hardware actually negotiated, which can differ from the request.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSettings {
    pub device_id: String,
    pub facing: Option<Facing>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeviceError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("no matching camera found")]
    NotFound,
    #[error("camera is in use by another application")]
    InUse,
    #[error("no camera satisfies constraint {0:?}")]
    Overconstrained(VideoConstraint),
    #[error("camera access was revoked")]
    Revoked,
    #[error("{0}")]
    Other(String),
}

pub trait MediaStream: Send {
    fn settings(&self) -> TrackSettings;

    fn stop(&mut self);
}

pub trait DeviceProvider: Send + Sync {
    fn open(&self, request: &StreamRequest) -> Result<Box<dyn MediaStream>, DeviceError>;

    fn enumerate(&self) -> Result<Vec<RawDevice>, DeviceError>;
}
