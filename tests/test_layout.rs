//! Integration tests for the layout engine.
//!
//! Checks the header positions, the per-kind body geometry and the
//! descending cursor over arbitrary element sequences.

use form_oxide::config::LayoutConfig;
use form_oxide::elements::{ElementKind, ElementStore, ElementUpdate};
use form_oxide::fonts::StandardFont;
use form_oxide::geometry::{Rect, Size};
use form_oxide::layout::{BodyLayout, LayoutEngine, TextMeasure};
use proptest::prelude::*;

const F: f32 = 25.0;

/// Every character is half the font size wide.
struct HalfEm;

impl TextMeasure for HalfEm {
    fn width_of_text_at_size(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.5
    }
}

fn store_with(kinds: &[ElementKind]) -> ElementStore {
    let mut store = ElementStore::new();
    for kind in kinds {
        store.add(*kind);
    }
    store
}

fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-3, "{} != {}", a, b);
}

proptest! {
    #[test]
    fn prop_cursor_strictly_decreases(
        kinds in prop::collection::vec(prop::sample::select(ElementKind::ALL.to_vec()), 1..40),
        sizes in prop::collection::vec(0u32..40, 40),
    ) {
        let mut store = store_with(&kinds);
        let ids: Vec<_> = store.elements().iter().map(|e| e.id).collect();
        for (id, size) in ids.into_iter().zip(sizes) {
            store.update(id, ElementUpdate::new().font_size(size));
        }

        let layout = LayoutEngine::default().layout(store.document(), &HalfEm);
        prop_assert_eq!(layout.elements.len(), kinds.len());
        prop_assert_eq!(layout.elements[0].cursor, layout.start_cursor);

        for element in &layout.elements {
            prop_assert!(element.next_cursor < element.cursor);
        }
        for pair in layout.elements.windows(2) {
            prop_assert_eq!(pair[1].cursor, pair[0].next_cursor);
        }
        prop_assert_eq!(layout.final_cursor, layout.elements[kinds.len() - 1].next_cursor);
    }

    #[test]
    fn prop_title_centered(title in "[ -~]{0,40}") {
        let mut store = store_with(&[ElementKind::Text]);
        store.set_title(title.clone());
        let font = StandardFont::TimesBold;

        let layout = LayoutEngine::default().layout(store.document(), &font);
        let expected = (595.0 - font.width_of_text_at_size(&title, 18.0)) / 2.0;
        prop_assert!((layout.title.origin.x - expected).abs() < 1e-3);
        prop_assert_eq!(layout.title.origin.y, 792.0);
        prop_assert_eq!(layout.title.size, 18.0);
    }
}

#[test]
fn test_description_lines_and_start_cursor() {
    let mut store = store_with(&[ElementKind::Text]);
    store.set_description("First line\nSecond\nThird one");

    let layout = LayoutEngine::default().layout(store.document(), &HalfEm);
    let ys: Vec<f32> = layout.description.iter().map(|l| l.origin.y).collect();
    assert_eq!(ys, vec![762.0, 747.0, 732.0]);
    for line in &layout.description {
        assert_close(line.origin.x, (595.0 - line.text.len() as f32 * 6.0) / 2.0);
        assert_eq!(line.size, 12.0);
    }
    assert_eq!(layout.start_cursor, 842.0 - 50.0 - 60.0 - 2.0 * 15.0);
}

#[test]
fn test_single_line_and_multi_line_geometry() {
    let store = store_with(&[ElementKind::Text, ElementKind::TextArea, ElementKind::Dropdown]);
    let layout = LayoutEngine::default().layout(store.document(), &HalfEm);
    let cursor = layout.start_cursor;

    let text = &layout.elements[0];
    assert_eq!(text.label.origin.y, cursor);
    assert_eq!(text.label.origin.x, 50.0);
    assert_eq!(
        text.body,
        BodyLayout::TextField {
            rect: Rect::new(50.0, cursor - 5.0 - F, 495.0, F)
        }
    );
    assert_eq!(text.next_cursor, cursor - 5.0 - F - (F + 10.0));

    let area = &layout.elements[1];
    let y = area.cursor - 5.0 - F;
    match &area.body {
        BodyLayout::TextArea { rect, font_size } => {
            assert_eq!(*rect, Rect::new(50.0, y - 2.0 * F, 495.0, 3.0 * F));
            assert_eq!(*font_size, 10.0);
        },
        other => panic!("unexpected body {:?}", other),
    }
    assert_eq!(area.next_cursor, y - (3.0 * F + 10.0));

    let dropdown = &layout.elements[2];
    match &dropdown.body {
        BodyLayout::Dropdown { rect, options } => {
            assert_eq!(rect.height, F);
            assert_eq!(rect.width, 495.0);
            assert_eq!(options, &["Option 1", "Option 2", "Option 3"]);
        },
        other => panic!("unexpected body {:?}", other),
    }
}

#[test]
fn test_option_geometry() {
    let config = LayoutConfig::default();
    let mut store = ElementStore::new();
    let checkbox = store.add(ElementKind::Checkbox);
    store.update(checkbox, ElementUpdate::new().options(["A", "B", "C", "D", "E"]));
    store.add(ElementKind::Radio);

    let layout = LayoutEngine::new(config.clone()).layout(store.document(), &HalfEm);

    let group = &layout.elements[0];
    assert_eq!(group.body_advance(&config), 5.0 * (F + 5.0) + 10.0);
    match &group.body {
        BodyLayout::Checkboxes { options } => {
            assert_eq!(options.len(), 5);
            for pair in options.windows(2) {
                assert_eq!(pair[0].control.y - pair[1].control.y, F + 5.0);
            }
            for option in options {
                assert_eq!(option.control.size(), Size::new(F, F));
                assert_eq!(option.caption.origin.x, 50.0 + F + 5.0);
                assert_eq!(option.caption.origin.y, option.control.y + 5.0);
                assert_eq!(option.caption.text, option.value);
            }
        },
        other => panic!("unexpected body {:?}", other),
    }

    let radio = &layout.elements[1];
    assert_eq!(radio.body_advance(&config), 3.0 * (F + 5.0) + 10.0);
    assert!(matches!(&radio.body, BodyLayout::RadioGroup { options } if options.len() == 3));
}

#[test]
fn test_empty_option_list_advances_spacing_only() {
    assert_eq!(LayoutEngine::default().options_advance(0), 10.0);
}

#[test]
fn test_static_text_at_label_size() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::FreeText);
    store.update(id, ElementUpdate::new().font_size(20).content("Thanks"));

    let layout = LayoutEngine::default().layout(store.document(), &HalfEm);
    let element = &layout.elements[0];
    match &element.body {
        BodyLayout::StaticText { text } => {
            assert_eq!(text.text, "Thanks");
            assert_eq!(text.size, 20.0);
            assert_eq!(text.origin.y, element.cursor - 5.0 - F);
        },
        other => panic!("unexpected body {:?}", other),
    }
    assert_eq!(element.label.size, 20.0);
    assert_eq!(element.body_advance(&LayoutConfig::default()), F + 10.0);
}

#[test]
fn test_overflow_reported_not_corrected() {
    let store = store_with(&[ElementKind::TextArea; 12]);
    let layout = LayoutEngine::default().layout(store.document(), &HalfEm);
    assert!(layout.overflows());
    assert!(layout.final_cursor < 0.0);

    let short = store_with(&[ElementKind::Text]);
    assert!(!LayoutEngine::default().layout(short.document(), &HalfEm).overflows());
}

#[test]
fn test_logo_scaling_uses_longer_side() {
    let engine = LayoutEngine::default();
    let wide = Size::new(200.0, 100.0);
    let factor = engine.logo_scale_factor(wide);
    assert_eq!(factor, 0.25);

    let scaled = wide.scale(factor);
    assert_eq!(engine.logo_rect(scaled), Rect::new(20.0, 842.0 - 20.0 - 25.0, 50.0, 25.0));

    let tall = Size::new(40.0, 400.0);
    assert_eq!(tall.scale(engine.logo_scale_factor(tall)).height, 50.0);
}
