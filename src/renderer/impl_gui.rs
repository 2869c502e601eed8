use crate::prediction::interface::Classification;
use crate::renderer::interface::Renderer;
use eframe::egui;
use std::error::Error;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
enum Panel {
    #[default]
    Waiting,
    Analysis {
        top1: Classification,
        top5: Vec<Classification>,
    },
    Rejection(Classification),
    Error(String),
}

#[derive(Debug, Clone, Default)]
struct View {
    camera_label: String,
    panel: Panel,
}

#[derive(Clone)]
struct ResultWindow {
    view: Arc<Mutex<View>>,
}

impl ResultWindow {
    fn confidence_row(ui: &mut egui::Ui, rank: Option<usize>, classification: &Classification) {
        let title = match rank {
            Some(rank) => format!("{}. {}", rank, classification.label),
            None => classification.label.clone(),
        };
        ui.label(egui::RichText::new(title).strong());
        ui.add(
            egui::ProgressBar::new(classification.confidence.clamp(0.0, 1.0))
                .text(format!("{}%", classification.percentage())),
        );
    }
}

impl eframe::App for ResultWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = match self.view.lock() {
            Ok(view) => view.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(egui::RichText::new(&view.camera_label).monospace());
            ui.separator();

            match &view.panel {
                Panel::Waiting => {
                    ui.label("Waiting for analysis...");
                }
                Panel::Analysis { top1, top5 } => {
                    ui.heading("Primary Assessment");
                    Self::confidence_row(ui, None, top1);
                    if !top5.is_empty() {
                        ui.add_space(10.0);
                        ui.heading(format!("Differential Diagnosis (Top {})", top5.len()));
                        for (index, classification) in top5.iter().enumerate() {
                            Self::confidence_row(ui, Some(index + 1), classification);
                        }
                    }
                }
                Panel::Rejection(rejected) => {
                    ui.heading(
                        egui::RichText::new("Predict").color(egui::Color32::from_rgb(239, 108, 0)),
                    );
                    ui.label(format!("Result: {}", rejected.label));
                    ui.label("Reason: Low confidence / uncertain image.");
                    Self::confidence_row(ui, None, rejected);
                    ui.label("Tip: Use a clear, close-up skin image with good lighting.");
                }
                Panel::Error(message) => {
                    ui.heading(
                        egui::RichText::new("Analysis Error")
                            .color(egui::Color32::from_rgb(211, 47, 47)),
                    );
                    ui.label(message.as_str());
                }
            }
        });

        // Results arrive from other threads.
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}

pub struct RendererGui {
    view: Arc<Mutex<View>>,
}

impl RendererGui {
    pub fn new() -> Self {
        Self {
            view: Arc::new(Mutex::new(View::default())),
        }
    }

    pub fn open(&self) {
        let view = self.view.clone();

        thread::spawn(move || {
            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default()
                    .with_inner_size([420.0, 480.0])
                    .with_resizable(true),
                ..Default::default()
            };

            let window = ResultWindow { view };

            let _ = eframe::run_native(
                "Skin Analysis",
                options,
                Box::new(|_cc| Box::new(window)),
            );
        });
    }

    fn update(&self, apply: impl FnOnce(&mut View)) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut view = self.view.lock().map_err(|e| e.to_string())?;
        apply(&mut *view);
        Ok(())
    }
}

impl Renderer for RendererGui {
    fn render_analysis(
        &self,
        top1: &Classification,
        top5: &[Classification],
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.update(|view| {
            view.panel = Panel::Analysis {
                top1: top1.clone(),
                top5: top5.to_vec(),
            }
        })
    }

    fn render_rejection(&self, rejected: &Classification) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.update(|view| view.panel = Panel::Rejection(rejected.clone()))
    }

    fn render_error(&self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.update(|view| view.panel = Panel::Error(message.to_string()))
    }

    fn render_camera_label(&self, label: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.update(|view| view.camera_label = label.to_string())
    }
}
