//! Integration tests for JSON form descriptions.

use std::io::Write;

use form_oxide::backend::{FieldKind, RecordingBackend};
use form_oxide::elements::ElementBody;
use form_oxide::fonts::StandardFont;
use form_oxide::theme::ThemeId;
use form_oxide::{Error, FormAssembler, FormSpec, RenderReporter};

const PIZZA: &str = r#"{
  "title": "Pizza order",
  "description": "Fill in your order\nWe deliver in 30 minutes",
  "theme": "green-gradient",
  "font": "courier",
  "elements": [
    { "type": "text", "label": "Name", "required": true },
    { "type": "radio", "label": "Size", "options": ["Small", "Medium", "Large"] },
    { "type": "checkbox", "label": "Toppings", "options": ["Ham", "Olives"], "fontSize": 14 },
    { "type": "dropdown", "label": "Crust", "options": ["Thin", "Thick"] },
    { "type": "textarea", "label": "Notes" },
    { "type": "freetext", "content": "Thank you!" }
  ]
}"#;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PIZZA.as_bytes()).unwrap();

    let store = FormSpec::from_path(file.path()).unwrap().into_store().unwrap();
    let document = store.document();

    assert_eq!(document.title(), "Pizza order");
    assert_eq!(document.description_lines().len(), 2);
    assert_eq!(document.theme(), ThemeId::GreenGradient);
    assert_eq!(document.font(), StandardFont::Courier);
    assert_eq!(store.len(), 6);

    let elements = store.elements();
    assert_eq!(elements[0].label, "Name");
    assert!(elements[0].required);
    assert_eq!(elements[2].font_size.get(), 14);
    assert_eq!(elements[3].options().unwrap(), ["Thin", "Thick"]);
    assert_eq!(elements[4].label, "Notes");
    assert_eq!(elements[5].label, "Freetext 6");
    assert_eq!(
        elements[5].body,
        ElementBody::FreeText {
            content: "Thank you!".to_string()
        }
    );
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        FormSpec::from_path(dir.path().join("nope.json")),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_json_round_trip_keeps_names() {
    let spec = FormSpec::from_json(PIZZA).unwrap();
    let json = spec.to_json().unwrap();
    assert!(json.contains("\"type\": \"textarea\""));
    assert!(json.contains("\"fontSize\": 14"));
    assert_eq!(FormSpec::from_json(&json).unwrap(), spec);
}

#[tokio::test]
async fn test_loaded_form_renders() {
    let store = FormSpec::from_json(PIZZA).unwrap().into_store().unwrap();
    let backend = RecordingBackend::new();
    let log = backend.log();

    let plan = FormAssembler::default()
        .render(store.document(), backend, &RenderReporter::new())
        .await
        .unwrap();
    let plan = String::from_utf8(plan.bytes).unwrap();

    assert!(plan.starts_with("add page 595x842\nembed font Courier\n"));
    assert!(plan.contains("text field \"field-element-1\""));
    assert!(plan.trim_end().ends_with("save"));

    let kinds: Vec<&'static str> = log.fields().iter().map(|f| f.kind.as_str()).collect();
    assert_eq!(
        kinds,
        vec![
            "text field",
            "radio option",
            "radio option",
            "radio option",
            "checkbox",
            "checkbox",
            "dropdown",
            "multi-line text field",
        ]
    );
    assert_eq!(
        log.fields()[6].kind,
        FieldKind::Dropdown {
            options: vec!["Thin".to_string(), "Thick".to_string()]
        }
    );
}
