//! End-to-end render tests against the recording backend.
//!
//! Every scenario asserts the exact capability calls the assembler issues,
//! and the progress values observed while it issues them.

use form_oxide::backend::{BackendCall, FieldKind, RecordingBackend};
use form_oxide::elements::{ElementKind, ElementStore, ElementUpdate};
use form_oxide::geometry::{Rect, Size};
use form_oxide::theme::{Theme, ThemeId};
use form_oxide::{Error, FormAssembler, RenderReporter};

const F: f32 = 25.0;

async fn render(store: &ElementStore, backend: RecordingBackend) -> (Vec<BackendCall>, RenderReporter) {
    let reporter = RenderReporter::new();
    let log = backend.log();
    FormAssembler::default()
        .render(store.document(), backend.observe(&reporter), &reporter)
        .await
        .expect("render failed");
    (log.calls(), reporter)
}

#[tokio::test]
async fn test_empty_form_rejected() {
    let store = ElementStore::new();
    let backend = RecordingBackend::new();
    let log = backend.log();
    let reporter = RenderReporter::new();

    let result = FormAssembler::default()
        .render(store.document(), backend, &reporter)
        .await;

    assert!(matches!(result, Err(Error::EmptyDocument)));
    assert!(log.is_empty());
    assert_eq!(reporter.progress(), 0.0);
}

#[tokio::test]
async fn test_text_then_multiline_fields() {
    let mut store = ElementStore::new();
    store.add(ElementKind::Text);
    let area = store.add(ElementKind::TextArea);
    store.update(area, ElementUpdate::new().required(true));

    let backend = RecordingBackend::new();
    let log = backend.log();
    FormAssembler::default()
        .render(store.document(), backend, &RenderReporter::new())
        .await
        .unwrap();

    let fields = log.fields();
    assert_eq!(fields.len(), 2);

    assert_eq!(fields[0].kind, FieldKind::Text);
    assert_eq!(fields[0].name, "field-element-1");
    assert_eq!(fields[0].rect.height, F);
    assert!(!fields[0].required);

    assert_eq!(fields[1].kind, FieldKind::MultilineText { font_size: 10.0 });
    assert_eq!(fields[1].name, "field-element-2");
    assert_eq!(fields[1].rect.height, 3.0 * F);
    assert!(fields[1].required);
}

#[tokio::test]
async fn test_checkbox_group_options() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::Checkbox);
    store.update(id, ElementUpdate::new().label("Pick").options(["A", "B", "C"]));

    let (calls, _) = render(&store, RecordingBackend::new()).await;

    let body: Vec<&BackendCall> = calls
        .iter()
        .skip_while(|call| !matches!(call, BackendCall::DrawText { text, .. } if text == "Pick"))
        .skip(1)
        .take_while(|call| !matches!(call, BackendCall::Save))
        .collect();
    assert_eq!(body.len(), 6);

    let mut controls = Vec::new();
    for (i, pair) in body.chunks(2).enumerate() {
        match (pair[0], pair[1]) {
            (BackendCall::AddField { field, .. }, BackendCall::DrawText { text, .. }) => {
                assert_eq!(field.kind, FieldKind::Checkbox);
                assert_eq!(field.name, format!("field-element-1-{}", i));
                assert_eq!(text, ["A", "B", "C"][i]);
                controls.push(field.rect);
            },
            other => panic!("unexpected calls {:?}", other),
        }
    }
    for pair in controls.windows(2) {
        assert_eq!(pair[0].y - pair[1].y, F + 5.0);
        assert_eq!(pair[0].width, F);
    }
}

#[tokio::test]
async fn test_radio_group_shares_one_name() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::Radio);
    store.update(id, ElementUpdate::new().options(["Yes", "No"]));

    let backend = RecordingBackend::new();
    let log = backend.log();
    FormAssembler::default()
        .render(store.document(), backend, &RenderReporter::new())
        .await
        .unwrap();

    let fields = log.fields();
    assert_eq!(fields.len(), 2);
    assert!(fields.iter().all(|f| f.name == "field-element-1"));
    assert_eq!(fields[0].kind, FieldKind::RadioOption { value: "Yes".into() });
    assert_eq!(fields[1].kind, FieldKind::RadioOption { value: "No".into() });
}

#[tokio::test]
async fn test_logo_drawn_once_scaled() {
    let mut store = ElementStore::new();
    store.add(ElementKind::Dropdown);
    store.set_logo(vec![0x89u8, b'P', b'N', b'G']);

    let backend = RecordingBackend::new().with_image_size(Size::new(100.0, 250.0));
    let (calls, _) = render(&store, backend).await;

    let images: Vec<&BackendCall> = calls
        .iter()
        .filter(|call| matches!(call, BackendCall::DrawImage { .. }))
        .collect();
    assert_eq!(images.len(), 1);
    match images[0] {
        BackendCall::DrawImage { rect, .. } => {
            assert!((rect.height - 50.0).abs() < 1e-3);
            assert!((rect.width - 20.0).abs() < 1e-3);
            assert_eq!(rect.x, 20.0);
            assert!((rect.top() - (842.0 - 20.0)).abs() < 1e-3);
        },
        _ => unreachable!(),
    }

    let embeds = calls
        .iter()
        .filter(|call| matches!(call, BackendCall::EmbedImage { len: 4 }))
        .count();
    assert_eq!(embeds, 1);
}

#[tokio::test]
async fn test_background_uses_theme() {
    let mut store = ElementStore::new();
    store.add(ElementKind::FreeText);
    store.set_theme(ThemeId::PurpleGradient);

    let (calls, _) = render(&store, RecordingBackend::new()).await;
    let theme = Theme::resolve(ThemeId::PurpleGradient);
    assert_eq!(
        calls[2],
        BackendCall::DrawRectangle {
            page: form_oxide::backend::PageHandle(0),
            rect: Rect::page(595.0, 842.0),
            color: theme.background,
        }
    );
    for call in &calls {
        if let BackendCall::DrawText { color, .. } = call {
            assert_eq!(*color, theme.text);
        }
    }
}

#[tokio::test]
async fn test_progress_linear() {
    let mut store = ElementStore::new();
    for _ in 0..4 {
        store.add(ElementKind::FreeText);
    }

    let backend = RecordingBackend::new();
    let log = backend.log();
    let (calls, reporter) = render(&store, backend).await;
    let trace = log.progress_trace();
    assert_eq!(trace.len(), calls.len());

    // page, font, background, title, description, then two draws per element
    let header = 5;
    for k in 0..4 {
        let label = header + 2 * k;
        assert_eq!(trace[label], k as f32 / 4.0, "progress before element {}", k + 1);
        assert_eq!(trace[label + 1], k as f32 / 4.0);
    }
    assert!(trace[..header].iter().all(|p| *p == 0.0));
    assert_eq!(*trace.last().unwrap(), 1.0);

    assert_eq!(reporter.progress(), 0.0);
    assert!(!reporter.is_rendering());
    assert_eq!(reporter.last_error(), None);
}

#[tokio::test]
async fn test_failure_resets_progress() {
    let mut store = ElementStore::new();
    store.add(ElementKind::Text);
    store.add(ElementKind::Text);
    let reporter = RenderReporter::new();

    let result = FormAssembler::default()
        .render(
            store.document(),
            RecordingBackend::new().fail_on("save").observe(&reporter),
            &reporter,
        )
        .await;

    assert!(matches!(
        result,
        Err(Error::CapabilityFailure { operation: "save", .. })
    ));
    assert_eq!(reporter.progress(), 0.0);
    assert_eq!(
        reporter.last_error().as_deref(),
        Some("An error occurred while generating the PDF: save rejected by recording backend")
    );
}

#[tokio::test]
async fn test_rejected_logo_aborts_render() {
    let mut store = ElementStore::new();
    store.add(ElementKind::Text);
    store.set_logo(Vec::<u8>::new());

    let backend = RecordingBackend::new();
    let log = backend.log();
    let reporter = RenderReporter::new();
    let err = FormAssembler::default()
        .render(store.document(), backend, &reporter)
        .await
        .unwrap_err();

    assert!(err.is_capability_failure());
    assert!(log.fields().is_empty());
    assert!(!log.calls().contains(&BackendCall::Save));
    assert_eq!(
        reporter.last_error().as_deref(),
        Some("An error occurred while generating the PDF: image data is empty")
    );
}
