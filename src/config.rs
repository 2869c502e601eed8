use crate::device_provider::interface::Facing;
use chrono::Offset;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub live_interval: Duration,
    pub jpeg_quality: u8,
    /// Upper bound on waiting for the surface to report frame metadata.
    pub metadata_timeout: Duration,
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub ideal_frame_rate: u32,
    pub probe_width: u32,
    pub probe_height: u32,
    pub preferred_facing: Facing,
    pub rejection_min_confidence: f32,
    pub logger_timezone: chrono::FixedOffset,
    pub tick_rate: Duration,
    pub switch_camera_after: Duration,
    pub run_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            live_interval: Duration::from_millis(700),
            jpeg_quality: 85,
            metadata_timeout: Duration::from_secs(5),
            ideal_width: 1280,
            ideal_height: 720,
            ideal_frame_rate: 30,
            probe_width: 640,
            probe_height: 480,
            preferred_facing: Facing::Front,
            rejection_min_confidence: 0.35,
            logger_timezone: utc(),
            tick_rate: Duration::from_millis(100),
            switch_camera_after: Duration::from_secs(5),
            run_duration: Duration::from_secs(10),
        }
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}
