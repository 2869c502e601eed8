use app::App;
use camera_session::session::CameraSession;
use config::Config;
use device_provider::impl_fake::DeviceProviderFake;
use device_provider::interface::{Facing, RawDevice};
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use library::timer::impl_thread::TimerThread;
use prediction::impl_fake::PredictionServiceFake;
use renderer::impl_console::RendererConsole;
use renderer::impl_gui::RendererGui;
use renderer::interface::Renderer;
use std::path::Path;
use std::sync::Arc;
use video_surface::impl_fake::VideoSurfaceFake;

mod app;
mod camera_session;
mod config;
mod device_provider;
mod library;
mod prediction;
mod renderer;
mod video_surface;

#[cfg(test)]
mod app_test;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_provider = Arc::new(DeviceProviderFake::new(
        logger.clone(),
        vec![
            RawDevice::video("front-0", "Front Camera", Some(Facing::Front)),
            RawDevice::video("back-0", "Back Camera", Some(Facing::Back)),
        ],
    ));

    let video_surface = Arc::new(VideoSurfaceFake::new(logger.clone(), 640, 480));

    let timer = Arc::new(TimerThread::new(logger.clone()));

    let prediction_service = Arc::new(PredictionServiceFake::new(
        logger.clone(),
        config.rejection_min_confidence,
    ));

    let renderer: Arc<dyn Renderer + Send + Sync> = if args.iter().any(|arg| arg == "--gui") {
        let gui = RendererGui::new();
        gui.open();
        Arc::new(gui)
    } else {
        Arc::new(RendererConsole::new())
    };

    let session = CameraSession::new(
        config.clone(),
        logger.clone(),
        device_provider,
        video_surface,
        timer,
    );

    let app = App::new(config, logger, session, prediction_service, renderer);

    if let Some(upload) = args.iter().find(|arg| !arg.starts_with("--")) {
        app.analyze_upload(Path::new(upload))?;
    }

    app.run()?;

    Ok(())
}
