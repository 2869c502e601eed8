use crate::prediction::interface::Classification;
use crate::renderer::interface::Renderer;
use std::error::Error;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Analysis {
        top1: Classification,
        top5: Vec<Classification>,
    },
    Rejection(Classification),
    Error(String),
    CameraLabel(String),
}

pub struct RendererFake {
    rendered: Mutex<Vec<Rendered>>,
}

#[allow(dead_code)]
impl RendererFake {
    pub fn new() -> Self {
        Self {
            rendered: Mutex::new(Vec::new()),
        }
    }

    pub fn rendered(&self) -> Vec<Rendered> {
        self.rendered.lock().unwrap().clone()
    }

    fn push(&self, rendered: Rendered) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.rendered
            .lock()
            .map_err(|e| e.to_string())?
            .push(rendered);
        Ok(())
    }
}

impl Renderer for RendererFake {
    fn render_analysis(
        &self,
        top1: &Classification,
        top5: &[Classification],
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.push(Rendered::Analysis {
            top1: top1.clone(),
            top5: top5.to_vec(),
        })
    }

    fn render_rejection(&self, rejected: &Classification) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.push(Rendered::Rejection(rejected.clone()))
    }

    fn render_error(&self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.push(Rendered::Error(message.to_string()))
    }

    fn render_camera_label(&self, label: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.push(Rendered::CameraLabel(label.to_string()))
    }
}
