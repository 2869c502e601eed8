use crate::device_provider::interface::DeviceError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("no camera available")]
    NoCameraAvailable,
    #[error("camera is in use by another application")]
    DeviceInUse,
    #[error("camera is not active")]
    NotActive,
    #[error("only one camera available on this device")]
    SingleCameraOnly,
    #[error("failed to switch camera")]
    SwitchFailed,
    #[error("camera did not report video metadata in time")]
    DeviceTimeout,
    #[error("camera was disconnected")]
    DeviceLost,
    #[error("failed to encode frame: {0}")]
    Encode(String),
}

impl CameraError {
    /// Picks the error to report once every acquisition tier has failed.
    pub fn from_tier_failures(failures: &[DeviceError]) -> Self {
        if failures.contains(&DeviceError::PermissionDenied) {
            CameraError::PermissionDenied
        } else if failures.contains(&DeviceError::InUse) {
            CameraError::DeviceInUse
        } else {
            CameraError::NoCameraAvailable
        }
    }
}

impl From<image::ImageError> for CameraError {
    fn from(error: image::ImageError) -> Self {
        CameraError::Encode(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_provider::interface::VideoConstraint;

    #[test]
    fn permission_denial_wins_over_other_failures() {
        let failures = vec![
            DeviceError::InUse,
            DeviceError::PermissionDenied,
            DeviceError::NotFound,
        ];
        assert_eq!(
            CameraError::from_tier_failures(&failures),
            CameraError::PermissionDenied
        );
    }

    #[test]
    fn busy_device_is_reported_when_permission_was_granted() {
        let failures = vec![
            DeviceError::Overconstrained(VideoConstraint::Any),
            DeviceError::InUse,
        ];
        assert_eq!(
            CameraError::from_tier_failures(&failures),
            CameraError::DeviceInUse
        );
    }

    #[test]
    fn anything_else_means_no_camera() {
        assert_eq!(
            CameraError::from_tier_failures(&[DeviceError::NotFound]),
            CameraError::NoCameraAvailable
        );
        assert_eq!(
            CameraError::from_tier_failures(&[]),
            CameraError::NoCameraAvailable
        );
    }
}
