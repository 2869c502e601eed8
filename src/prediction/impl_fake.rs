use crate::camera_session::frame::CaptureResult;
use crate::library::logger::interface::Logger;
use crate::prediction::interface::{Classification, Prediction, PredictionService};
use rand::distr::{Distribution, Uniform};
use rand::seq::SliceRandom;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const LABELS: [&str; 8] = [
    "Melanocytic nevus",
    "Melanoma",
    "Benign keratosis",
    "Basal cell carcinoma",
    "Actinic keratosis",
    "Vascular lesion",
    "Dermatofibroma",
    "Eczema",
];

const TOP_K: usize = 5;

pub struct PredictionServiceFake {
    logger: Arc<dyn Logger + Send + Sync>,
    min_confidence: f32,
    scripted: Mutex<VecDeque<Prediction>>,
}

impl PredictionServiceFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, min_confidence: f32) -> Self {
        Self {
            logger: logger.with_namespace("prediction").with_namespace("fake"),
            min_confidence,
            scripted: Mutex::new(VecDeque::new()),
        }
    }

    #[allow(dead_code)]
    pub fn push_response(&self, prediction: Prediction) {
        self.scripted.lock().unwrap().push_back(prediction);
    }

    fn predict(&self, image: &[u8]) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(prediction) = self.scripted.lock().unwrap().pop_front() {
            return Ok(prediction);
        }

        if image.is_empty() {
            return Ok(Prediction::Failed {
                error: "No image uploaded".to_string(),
            });
        }

        let mut rng = rand::rng();
        let weight_dist = Uniform::new(0.05f32, 1.0)?;

        let mut labels = LABELS.to_vec();
        labels.shuffle(&mut rng);

        let weights: Vec<f32> = labels.iter().map(|_| weight_dist.sample(&mut rng)).collect();
        let total: f32 = weights.iter().sum();

        let mut ranked: Vec<Classification> = labels
            .iter()
            .zip(weights)
            .map(|(label, weight)| Classification {
                label: label.to_string(),
                confidence: weight / total,
            })
            .collect();
        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        ranked.truncate(TOP_K);

        let top1 = ranked[0].clone();
        let _ = self.logger.info(&format!(
            "Predicted {} ({}%) for {} bytes",
            top1.label,
            top1.percentage(),
            image.len()
        ));

        if top1.confidence < self.min_confidence {
            return Ok(Prediction::Rejected(top1));
        }

        Ok(Prediction::Classified { top1, top5: ranked })
    }
}

impl PredictionService for PredictionServiceFake {
    fn predict_frame(
        &self,
        frame: &CaptureResult,
    ) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>> {
        self.predict(&frame.encoded_image)
    }

    fn predict_upload(
        &self,
        image: &[u8],
    ) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>> {
        self.predict(image)
    }
}
