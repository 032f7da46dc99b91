use egui::{Color32, Rect, pos2, vec2};
use tshirt_designer::element::{FixedTextMetrics, MIN_ELEMENT_SIZE, ShapeKind, TextMetrics, factory};
use tshirt_designer::id_generator::generate_id;
use tshirt_designer::widgets::Handle;
use tshirt_designer::{Document, Element, ElementError};

#[test]
fn test_text_box_is_measured_from_metrics() {
    let metrics = FixedTextMetrics::default();
    let text = factory::create_text(generate_id(), "Tee", Color32::BLACK, 20.0, pos2(5.0, 5.0), &metrics);

    assert_eq!(text.element_type(), "text");
    assert_eq!(text.rect(), Rect::from_min_size(pos2(5.0, 5.0), metrics.measure("Tee", 20.0)));
    assert!(text.hit_test(pos2(6.0, 6.0)));
    assert!(!text.hit_test(pos2(4.0, 6.0)));
    assert!(text.handles().is_empty());
}

#[test]
fn test_font_size_change_remeasures_text() {
    let metrics = FixedTextMetrics::default();
    let mut element = factory::create_text(generate_id(), "Tee", Color32::BLACK, 20.0, pos2(0.0, 0.0), &metrics);
    let before = element.rect();

    element.as_text_mut().unwrap().set_font_size(40.0, &metrics);
    let after = element.rect();
    assert_eq!(after.min, before.min);
    assert_eq!(after.width(), before.width() * 2.0);
    assert_eq!(after.height(), before.height() * 2.0);
}

#[test]
fn test_text_cannot_be_resized() {
    let metrics = FixedTextMetrics::default();
    let mut text = factory::create_text(generate_id(), "Tee", Color32::BLACK, 20.0, pos2(0.0, 0.0), &metrics);
    let result = text.resize(Rect::from_min_size(pos2(0.0, 0.0), vec2(200.0, 200.0)));
    assert!(matches!(result, Err(ElementError::NotResizable(_))));
}

#[test]
fn test_circles_are_always_square() {
    let mut circle = factory::create_shape(
        generate_id(),
        ShapeKind::Circle,
        Color32::BLUE,
        pos2(0.0, 0.0),
        vec2(60.0, 30.0),
    );
    assert_eq!(circle.rect().size(), vec2(60.0, 60.0));
    assert_eq!(circle.handles(), &Handle::CARDINALS);

    circle
        .resize(Rect::from_min_size(pos2(0.0, 0.0), vec2(80.0, 40.0)))
        .unwrap();
    let rect = circle.rect();
    assert_eq!(rect.width(), rect.height());
    assert_eq!(rect.center(), pos2(40.0, 20.0));
}

#[test]
fn test_rectangle_and_image_use_corner_handles() {
    let rect = factory::create_shape(
        generate_id(),
        ShapeKind::Rectangle,
        Color32::RED,
        pos2(0.0, 0.0),
        vec2(50.0, 50.0),
    );
    let image = factory::create_image(generate_id(), "logo.png#1", pos2(0.0, 0.0), vec2(50.0, 50.0));
    assert_eq!(rect.handles(), &Handle::CORNERS);
    assert_eq!(image.handles(), &Handle::CORNERS);
    assert_eq!(image.image_source(), Some("logo.png#1"));
}

#[test]
fn test_resize_rejects_rects_below_minimum() {
    let mut doc = Document::new();
    let id = doc
        .add_element(factory::create_image(generate_id(), "a", pos2(0.0, 0.0), vec2(50.0, 50.0)))
        .unwrap();

    let tiny = Rect::from_min_size(pos2(0.0, 0.0), vec2(MIN_ELEMENT_SIZE - 0.5, 40.0));
    assert!(matches!(doc.resize_element(id, tiny), Err(ElementError::TooSmall { .. })));
    assert_eq!(doc.find_element(id).unwrap().rect().size(), vec2(50.0, 50.0));
}

#[test]
fn test_add_increases_len_and_selects() {
    let mut doc = Document::new();
    assert!(doc.is_empty());

    let first = doc
        .add_element(factory::create_image(generate_id(), "a", pos2(0.0, 0.0), vec2(20.0, 20.0)))
        .unwrap();
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.selected_id(), Some(first));

    let second = doc
        .add_element(factory::create_image(generate_id(), "b", pos2(0.0, 0.0), vec2(20.0, 20.0)))
        .unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.selected_id(), Some(second));
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let mut doc = Document::new();
    let id = generate_id();
    doc.add_element(factory::create_image(id, "a", pos2(0.0, 0.0), vec2(20.0, 20.0)))
        .unwrap();
    let again = doc.add_element(factory::create_image(id, "b", pos2(0.0, 0.0), vec2(20.0, 20.0)));
    assert_eq!(again, Err(ElementError::DuplicateId(id)));
    assert_eq!(doc.len(), 1);
}

#[test]
fn test_delete_selected_clears_selection() {
    let mut doc = Document::new();
    let keep = doc
        .add_element(factory::create_image(generate_id(), "a", pos2(0.0, 0.0), vec2(20.0, 20.0)))
        .unwrap();
    let gone = doc
        .add_element(factory::create_image(generate_id(), "b", pos2(0.0, 0.0), vec2(20.0, 20.0)))
        .unwrap();

    let removed = doc.delete_selected().unwrap();
    assert_eq!(removed.id(), gone);
    assert_eq!(doc.selected_id(), None);
    assert!(doc.contains(keep));
    assert!(!doc.contains(gone));
    assert!(!doc.references_image("b"));
}
