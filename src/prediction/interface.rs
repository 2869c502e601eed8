use crate::camera_session::frame::CaptureResult;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

impl Classification {
    /// Confidence as a percentage with two decimals, e.g. `"87.50"`.
    pub fn percentage(&self) -> String {
        format!("{:.2}", self.confidence * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Classified {
        top1: Classification,
        top5: Vec<Classification>,
    },
    Rejected(Classification),
    Failed {
        error: String,
    },
}

pub trait PredictionService: Send + Sync {
    fn predict_frame(
        &self,
        frame: &CaptureResult,
    ) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>>;

    fn predict_upload(
        &self,
        image: &[u8],
    ) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>>;
}
