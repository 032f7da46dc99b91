use egui::{Color32, Vec2, vec2};
use tshirt_designer::element::{FixedTextMetrics, ShapeKind};
use tshirt_designer::{Command, CommandContext, CommandError, DesignElement, DesignerConfig, Document, Element, ToolSettings};

struct Fixture {
    document: Document,
    settings: ToolSettings,
    config: DesignerConfig,
    metrics: FixedTextMetrics,
}

impl Fixture {
    fn new() -> Self {
        Self {
            document: Document::new(),
            settings: ToolSettings::default(),
            config: DesignerConfig::default(),
            metrics: FixedTextMetrics::default(),
        }
    }

    fn run(&mut self, command: Command) -> Result<(), CommandError> {
        let mut ctx = CommandContext::new(&mut self.document, &mut self.settings, &self.config, &self.metrics);
        command.execute(&mut ctx)
    }
}

#[test]
fn test_add_commands_append_and_select() {
    let mut fx = Fixture::new();

    fx.run(Command::AddText {
        content: "  Hello  ".to_owned(),
    })
    .unwrap();
    fx.run(Command::AddShape {
        kind: ShapeKind::Rectangle,
    })
    .unwrap();
    fx.run(Command::AddShape { kind: ShapeKind::Circle }).unwrap();

    assert_eq!(fx.document.len(), 3);
    let last = fx.document.elements().last().unwrap();
    assert_eq!(fx.document.selected_id(), Some(last.id()));

    let text = fx.document.elements()[0].as_text().unwrap();
    assert_eq!(text.content(), "Hello");
    assert_eq!(text.font_size(), fx.settings.font_size);
    assert_eq!(text.color(), fx.settings.color);
}

#[test]
fn test_empty_text_is_rejected() {
    let mut fx = Fixture::new();
    assert_eq!(
        fx.run(Command::AddText {
            content: "   ".to_owned()
        }),
        Err(CommandError::EmptyText)
    );
    assert!(fx.document.is_empty());
}

#[test]
fn test_new_elements_are_centred_then_cascade() {
    let mut fx = Fixture::new();
    let centre = (fx.config.canvas_size / 2.0).to_pos2();

    fx.run(Command::AddShape {
        kind: ShapeKind::Rectangle,
    })
    .unwrap();
    fx.run(Command::AddShape {
        kind: ShapeKind::Rectangle,
    })
    .unwrap();

    let first = fx.document.elements()[0].rect();
    let second = fx.document.elements()[1].rect();
    assert_eq!(first.center(), centre);
    assert_eq!(second.min - first.min, vec2(16.0, 16.0));
}

#[test]
fn test_large_images_are_scaled_to_fit() {
    let mut fx = Fixture::new();
    fx.run(Command::AddImage {
        source_key: "poster.png#1".to_owned(),
        size: vec2(2000.0, 1000.0),
    })
    .unwrap();

    let size = fx.document.elements()[0].rect().size();
    let bounds = fx.config.canvas_size * fx.config.max_image_fraction;
    assert!(size.x <= bounds.x + 0.01 && size.y <= bounds.y + 0.01);
    assert!((size.x / size.y - 2.0).abs() < 0.001);

    assert_eq!(
        fx.run(Command::AddImage {
            source_key: "broken".to_owned(),
            size: Vec2::ZERO,
        }),
        Err(CommandError::InvalidImageSize(Vec2::ZERO))
    );
}

#[test]
fn test_set_color_recolours_selection_and_settings() {
    let mut fx = Fixture::new();
    fx.run(Command::AddShape { kind: ShapeKind::Circle }).unwrap();

    fx.run(Command::SetColor(Color32::GREEN)).unwrap();
    assert_eq!(fx.settings.color, Color32::GREEN);
    assert_eq!(fx.document.selected_element().unwrap().color(), Some(Color32::GREEN));

    // With nothing selected only the setting changes
    fx.run(Command::ClearSelection).unwrap();
    fx.run(Command::SetColor(Color32::YELLOW)).unwrap();
    assert_eq!(fx.settings.color, Color32::YELLOW);
    assert_eq!(fx.document.elements()[0].color(), Some(Color32::GREEN));
}

#[test]
fn test_set_font_size_clamps_and_remeasures_selected_text() {
    let mut fx = Fixture::new();
    fx.run(Command::AddText {
        content: "Tee".to_owned(),
    })
    .unwrap();
    let before = fx.document.elements()[0].rect();

    fx.run(Command::SetFontSize(500.0)).unwrap();
    let (_, max) = fx.config.font_size_range;
    assert_eq!(fx.settings.font_size, max);

    let after = fx.document.elements()[0].rect();
    assert_eq!(after.min, before.min);
    assert!(after.height() > before.height());
    match &fx.document.elements()[0] {
        DesignElement::Text(text) => assert_eq!(text.font_size(), max),
        other => panic!("expected text, got {:?}", other),
    }

    assert_eq!(
        fx.run(Command::SetFontSize(f32::NAN)).map_err(|e| matches!(e, CommandError::InvalidFontSize(_))),
        Err(true)
    );
}

#[test]
fn test_delete_selected_removes_and_clears() {
    let mut fx = Fixture::new();
    fx.run(Command::AddShape {
        kind: ShapeKind::Rectangle,
    })
    .unwrap();
    fx.run(Command::DeleteSelected).unwrap();
    assert!(fx.document.is_empty());
    assert_eq!(fx.document.selected_id(), None);

    // Nothing selected is not an error
    fx.run(Command::DeleteSelected).unwrap();
}

#[test]
fn test_garment_colour_only_touches_settings() {
    let mut fx = Fixture::new();
    fx.run(Command::AddShape {
        kind: ShapeKind::Rectangle,
    })
    .unwrap();
    fx.run(Command::SetGarmentColor(Color32::BLACK)).unwrap();
    assert_eq!(fx.settings.garment_color, Color32::BLACK);
    assert_ne!(fx.document.elements()[0].color(), Some(Color32::BLACK));
}
