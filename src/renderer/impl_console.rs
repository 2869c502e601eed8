use crate::prediction::interface::Classification;
use crate::renderer::interface::Renderer;
use std::error::Error;

const BAR_WIDTH: usize = 20;

pub struct RendererConsole {}

impl RendererConsole {
    pub fn new() -> Self {
        Self {}
    }

    fn bar(confidence: f32) -> String {
        let filled = ((confidence.clamp(0.0, 1.0) * BAR_WIDTH as f32).round()) as usize;
        format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
    }
}

impl Renderer for RendererConsole {
    fn render_analysis(
        &self,
        top1: &Classification,
        top5: &[Classification],
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("┌ Primary Assessment");
        println!("│ {}  {}%", top1.label, top1.percentage());
        println!("│ {}", Self::bar(top1.confidence));
        if !top5.is_empty() {
            println!("├ Differential Diagnosis (Top {})", top5.len());
            for (index, classification) in top5.iter().enumerate() {
                println!(
                    "│ {}. {:<24} {:>6}%  {}",
                    index + 1,
                    classification.label,
                    classification.percentage(),
                    Self::bar(classification.confidence)
                );
            }
        }
        println!("└");
        Ok(())
    }

    fn render_rejection(&self, rejected: &Classification) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("┌ Predict");
        println!("│ Result: {}", rejected.label);
        println!("│ Reason: Low confidence / uncertain image.");
        println!("│ Model confidence: {}%", rejected.percentage());
        println!("│ Tip: Use a clear, close-up skin image with good lighting.");
        println!("└");
        Ok(())
    }

    fn render_error(&self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("┌ Analysis Error");
        println!("│ {}", message);
        println!("└");
        Ok(())
    }

    fn render_camera_label(&self, label: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("[camera] {}", label);
        Ok(())
    }
}
