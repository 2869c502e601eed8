use crate::prediction::interface::{Classification, Prediction};
use std::error::Error;

pub trait Renderer: Send + Sync {
    fn render_analysis(
        &self,
        top1: &Classification,
        top5: &[Classification],
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn render_rejection(&self, rejected: &Classification) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn render_error(&self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn render_camera_label(&self, label: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn render_prediction(&self, prediction: &Prediction) -> Result<(), Box<dyn Error + Send + Sync>> {
        match prediction {
            Prediction::Classified { top1, top5 } => self.render_analysis(top1, top5),
            Prediction::Rejected(rejected) => self.render_rejection(rejected),
            Prediction::Failed { error } => self.render_error(error),
        }
    }
}
