use super::*;
use crate::config::{OverlayConfig, SessionConfig};
use crate::mapping::{DisplayPoint, SensorPoint};
use crate::radiometry::TemperatureUnit;
use crate::session::{InputCommand, SessionState};
use image::{Rgb, RgbImage};
use ndarray::Array2;

const BACKGROUND: u16 = 18000;

fn create_test_session() -> SessionState {
    SessionState::from_config(&SessionConfig::default(), (256, 192)).unwrap()
}

/// Uniform plane with one hot and one cold pixel inside the default search area
fn create_test_plane() -> Array2<u16> {
    let mut plane = Array2::from_elem((192, 256), BACKGROUND);
    plane[[50, 100]] = 20000;
    plane[[150, 30]] = 15000;
    plane
}

fn texts(plan: &OverlayPlan) -> Vec<&str> {
    plan.elements.iter().filter_map(|e| e.text()).collect()
}

#[test]
fn test_full_overlay_layout() {
    let session = create_test_session();
    let plane = create_test_plane();

    let plan = plan_overlay(&session, &plane.view(), &OverlayLayout::default(), None).unwrap();

    // 2 crosshair lines, center text, 2 markers, 2 labels, info text, search rect
    assert_eq!(plan.elements.len(), 9);

    assert_eq!(
        plan.elements[0].shape,
        Shape::Line {
            from: DisplayPoint::new(310, 240),
            to: DisplayPoint::new(330, 240),
        }
    );
    assert_eq!(
        plan.elements[1].shape,
        Shape::Line {
            from: DisplayPoint::new(320, 230),
            to: DisplayPoint::new(320, 250),
        }
    );
    assert_eq!(
        plan.elements[2].shape,
        Shape::Text {
            origin: DisplayPoint::new(575, 476),
            text: "46.58 F".to_string(),
        }
    );
}

#[test]
fn test_markers_follow_extremes() {
    let session = create_test_session();
    let plane = create_test_plane();

    let plan = plan_overlay(&session, &plane.view(), &OverlayLayout::default(), None).unwrap();
    let extremes = plan.extremes.unwrap();
    assert_eq!(extremes.max, SensorPoint::new(100, 50));
    assert_eq!(extremes.min, SensorPoint::new(30, 150));

    let hot = &plan.elements[3];
    assert_eq!(
        hot.shape,
        Shape::Marker {
            center: DisplayPoint::new(250, 125),
            radius: 1,
        }
    );
    assert_eq!(hot.style, StrokeStyle::outlined(BLACK, 2, RED));

    // Label sits (2, 7) sensor pixels away from the marker
    match &plan.elements[4].shape {
        Shape::Text { origin, .. } => assert_eq!(*origin, DisplayPoint::new(255, 143)),
        other => panic!("expected hot label, got {:?}", other),
    }

    let cold = &plan.elements[5];
    assert_eq!(
        cold.shape,
        Shape::Marker {
            center: DisplayPoint::new(75, 375),
            radius: 1,
        }
    );
    assert_eq!(cold.style, StrokeStyle::outlined(BLUE, 2, WHITE));
}

#[test]
fn test_labels_use_session_unit() {
    let mut session = create_test_session();
    session.apply(InputCommand::ToggleUnit);
    assert_eq!(session.unit(), TemperatureUnit::Celsius);

    let plane = create_test_plane();
    let plan = plan_overlay(&session, &plane.view(), &OverlayLayout::default(), None).unwrap();

    // Extremes pair with their right neighbour: 19000 and 16500 raw
    assert_eq!(
        texts(&plan),
        vec!["8.10 C", "23.73 C", "-15.34 C", "Bone"]
    );
}

#[test]
fn test_info_draws_search_area() {
    let session = create_test_session();
    let plane = create_test_plane();

    let plan = plan_overlay(&session, &plane.view(), &OverlayLayout::default(), None).unwrap();
    let rect = plan.elements.last().unwrap();

    assert_eq!(
        rect.shape,
        Shape::Rect {
            top_left: DisplayPoint::new(50, 50),
            bottom_right: DisplayPoint::new(590, 430),
        }
    );
    assert_eq!(rect.style, StrokeStyle::single(RED));
}

#[test]
fn test_recording_label_position() {
    let session = create_test_session();
    let plane = create_test_plane();

    let plan = plan_overlay(
        &session,
        &plane.view(),
        &OverlayLayout::default(),
        Some("Rec:00:01:02"),
    )
    .unwrap();

    assert_eq!(
        plan.elements.last().unwrap().shape,
        Shape::Text {
            origin: DisplayPoint::new(552, 11),
            text: "Rec:00:01:02".to_string(),
        }
    );
}

#[test]
fn test_disabled_overlays_skip_scan() {
    let mut session = create_test_session();
    session.apply(InputCommand::ToggleCrosshair);
    session.apply(InputCommand::ToggleHud);
    session.apply(InputCommand::ToggleInfo);

    let plane = create_test_plane();
    let plan = plan_overlay(&session, &plane.view(), &OverlayLayout::default(), None).unwrap();

    assert!(plan.elements.is_empty());
    assert!(plan.extremes.is_none());
}

#[test]
fn test_labels_off_keeps_markers() {
    let mut session = create_test_session();
    session.apply(InputCommand::ToggleCrosshair);
    session.apply(InputCommand::ToggleLabels);
    session.apply(InputCommand::ToggleInfo);

    let plane = create_test_plane();
    let plan = plan_overlay(&session, &plane.view(), &OverlayLayout::default(), None).unwrap();

    assert_eq!(plan.elements.len(), 2);
    assert!(plan
        .elements
        .iter()
        .all(|e| matches!(e.shape, Shape::Marker { .. })));
}

#[test]
fn test_layout_from_config() {
    let config = OverlayConfig {
        crosshair_half_length: 4,
        marker_outline_width: 5,
        ..OverlayConfig::default()
    };
    let layout = OverlayLayout::from_config(&config);
    assert_eq!(layout.crosshair_half_length, 4);
    assert_eq!(layout.marker_outline_width, 5);
    assert_eq!(layout.text_outline_width, 3);
}

#[test]
fn test_style_passes_draw_outline_first() {
    let style = StrokeStyle::outlined(BLACK, 3, WHITE);
    let passes: Vec<Stroke> = style.passes().collect();
    assert_eq!(passes.len(), 2);
    assert_eq!(passes[0].color, BLACK);
    assert_eq!(passes[0].thickness, 3);
    assert_eq!(passes[1].color, WHITE);

    assert_eq!(StrokeStyle::single(RED).passes().count(), 1);
}

#[test]
fn test_painter_draws_shapes() {
    let session = create_test_session();
    let plane = create_test_plane();
    let plan = plan_overlay(&session, &plane.view(), &OverlayLayout::default(), None).unwrap();

    let painter = OverlayPainter::without_text(13.0);
    let mut image = RgbImage::new(640, 480);
    painter.draw(&mut image, &plan.elements);

    // Crosshair center
    assert_eq!(*image.get_pixel(320, 240), RED);
    // Hot marker ring over its dark outline
    assert_eq!(*image.get_pixel(251, 125), RED);
    assert_eq!(*image.get_pixel(250, 125), BLACK);
    // Search area corners and edges
    assert_eq!(*image.get_pixel(50, 50), RED);
    assert_eq!(*image.get_pixel(50, 200), RED);
    assert_eq!(*image.get_pixel(590, 430), RED);
    // Inside the search area away from any element
    assert_eq!(*image.get_pixel(150, 300), Rgb([0, 0, 0]));
}

#[test]
fn test_missing_font_disables_text_only() {
    let config = OverlayConfig {
        font_path: "/nonexistent/thermcam-font.ttf".to_string(),
        ..OverlayConfig::default()
    };
    let painter = OverlayPainter::load(&config);
    assert!(!painter.has_font());

    let mut image = RgbImage::from_pixel(64, 64, Rgb([7, 7, 7]));
    painter.draw(
        &mut image,
        &[OverlayElement::new(
            Shape::Text {
                origin: DisplayPoint::new(10, 20),
                text: "Bone".to_string(),
            },
            StrokeStyle::outlined(BLACK, 3, WHITE),
        )],
    );
    assert!(image.pixels().all(|p| *p == Rgb([7, 7, 7])));
}
