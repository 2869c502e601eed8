use crate::app::App;
use crate::camera_session::error::CameraError;
use crate::camera_session::tests::fixture::{front_camera, Fixture};
use crate::prediction::impl_fake::PredictionServiceFake;
use crate::prediction::interface::{Classification, Prediction};
use crate::renderer::impl_fake::{Rendered, RendererFake};
use image::RgbImage;
use std::path::Path;
use std::sync::Arc;

struct AppFixture {
    camera: Fixture,
    prediction_service: Arc<PredictionServiceFake>,
    renderer: Arc<RendererFake>,
    app: App,
}

impl AppFixture {
    fn new(camera: Fixture) -> Self {
        let prediction_service = Arc::new(PredictionServiceFake::new(camera.logger.clone(), 0.0));
        let renderer = Arc::new(RendererFake::new());
        let app = App::new(
            camera.config.clone(),
            camera.logger.clone(),
            camera.session.clone(),
            prediction_service.clone(),
            renderer.clone(),
        );

        Self {
            camera,
            prediction_service,
            renderer,
            app,
        }
    }
}

fn melanoma(confidence: f32) -> Classification {
    Classification {
        label: "Melanoma".to_string(),
        confidence,
    }
}

#[test]
fn test_live_analysis_renders_each_prediction() {
    let f = AppFixture::new(Fixture::new());
    f.prediction_service.push_response(Prediction::Classified {
        top1: melanoma(0.91),
        top5: vec![melanoma(0.91)],
    });
    f.prediction_service
        .push_response(Prediction::Rejected(melanoma(0.2)));

    f.app.start_camera().unwrap();
    assert_eq!(f.app.toggle_live_analysis(), Ok(true));
    f.camera.timer.advance(f.camera.config.live_interval * 2);

    assert_eq!(
        f.renderer.rendered(),
        vec![
            Rendered::CameraLabel("Front Camera".to_string()),
            Rendered::Analysis {
                top1: melanoma(0.91),
                top5: vec![melanoma(0.91)],
            },
            Rendered::Rejection(melanoma(0.2)),
        ]
    );
}

#[test]
fn test_toggling_twice_stops_live_analysis() {
    let f = AppFixture::new(Fixture::new());
    f.app.start_camera().unwrap();

    assert_eq!(f.app.toggle_live_analysis(), Ok(true));
    assert_eq!(f.app.toggle_live_analysis(), Ok(false));
    f.camera.timer.advance(f.camera.config.live_interval * 3);

    assert_eq!(f.renderer.rendered().len(), 1);
}

#[test]
fn test_live_analysis_needs_camera() {
    let f = AppFixture::new(Fixture::new());

    assert_eq!(f.app.toggle_live_analysis(), Err(CameraError::NotActive));
    assert_eq!(
        f.renderer.rendered(),
        vec![Rendered::Error("Please start the camera first".to_string())]
    );
}

#[test]
fn test_switch_on_single_camera_reports_error_and_keeps_label() {
    let f = AppFixture::new(Fixture::with_devices(vec![front_camera()]));
    f.app.start_camera().unwrap();

    assert_eq!(f.app.switch_camera(), Err(CameraError::SingleCameraOnly));

    let rendered = f.renderer.rendered();
    assert_eq!(
        rendered[1..].to_vec(),
        vec![
            Rendered::Error(format!("Camera error: {}", CameraError::SingleCameraOnly)),
            Rendered::CameraLabel("Front Camera".to_string()),
        ]
    );
}

#[test]
fn test_stop_camera_clears_label() {
    let f = AppFixture::new(Fixture::new());
    f.app.start_camera().unwrap();

    f.app.stop_camera();

    assert_eq!(
        f.renderer.rendered().last(),
        Some(&Rendered::CameraLabel("Unknown Camera".to_string()))
    );
    assert_eq!(f.camera.device_provider.live_streams(), 0);
}

#[test]
fn test_upload_of_unreadable_file_renders_error() {
    let f = AppFixture::new(Fixture::new());

    f.app
        .analyze_upload(Path::new("/definitely/missing/lesion.png"))
        .unwrap();

    match f.renderer.rendered().as_slice() {
        [Rendered::Error(message)] => assert!(message.starts_with("Invalid image")),
        other => panic!("Unexpected render: {:?}", other),
    }
}

#[test]
fn test_upload_is_analyzed_without_camera() {
    let f = AppFixture::new(Fixture::new());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lesion.png");
    RgbImage::from_pixel(32, 32, image::Rgb([180, 120, 100]))
        .save(&path)
        .unwrap();
    f.prediction_service
        .push_response(Prediction::Rejected(melanoma(0.3)));

    f.app.analyze_upload(&path).unwrap();

    assert_eq!(
        f.renderer.rendered(),
        vec![Rendered::Rejection(melanoma(0.3))]
    );
    assert_eq!(f.camera.device_provider.open_count(), 0);
}

#[test]
fn test_lost_camera_reports_error_and_stops_analysis() {
    let f = AppFixture::new(Fixture::new());
    f.app.start_camera().unwrap();
    f.app.toggle_live_analysis().unwrap();

    f.app.handle_stream_ended();
    f.camera.timer.advance(f.camera.config.live_interval * 2);

    assert_eq!(
        f.renderer.rendered(),
        vec![
            Rendered::CameraLabel("Front Camera".to_string()),
            Rendered::Error(format!("Camera error: {}", CameraError::DeviceLost)),
            Rendered::CameraLabel("Unknown Camera".to_string()),
        ]
    );
    assert_eq!(f.camera.device_provider.live_streams(), 0);

    f.app.handle_stream_ended();
    assert_eq!(f.renderer.rendered().len(), 3);
}
