//! Integration tests for PDF output.
//!
//! Renders forms through the PDF backend and checks the produced document
//! structure: AcroForm fields, flags, appearance streams, images and
//! metadata. Also covers saving through the export module.

use std::io::Cursor;

use form_oxide::elements::{ElementKind, ElementStore, ElementUpdate};
use form_oxide::export::{self, DEFAULT_FILE_NAME};
use form_oxide::fonts::StandardFont;
use form_oxide::theme::ThemeId;
use form_oxide::writer::PdfWriterConfig;
use form_oxide::{FormAssembler, PdfBackend, RenderReporter, PDF_CONTENT_TYPE};

fn uncompressed() -> PdfBackend {
    PdfBackend::with_config(PdfWriterConfig::default().with_compress(false))
}

async fn render_text(store: &ElementStore) -> String {
    let rendered = FormAssembler::default()
        .render(store.document(), uncompressed(), &RenderReporter::new())
        .await
        .expect("render failed");
    assert_eq!(rendered.content_type, PDF_CONTENT_TYPE);
    String::from_utf8_lossy(&rendered.bytes).into_owned()
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageOutputFormat::Png)
        .expect("encode png");
    buf
}

fn all_kinds() -> ElementStore {
    let mut store = ElementStore::new();
    for kind in ElementKind::ALL {
        store.add(kind);
    }
    store
}

#[tokio::test]
async fn test_every_kind_produces_its_field() {
    let content = render_text(&all_kinds()).await;

    assert!(content.starts_with("%PDF-"));
    assert!(content.trim_end().ends_with("%%EOF"));
    assert!(content.contains("/AcroForm"));
    assert!(content.contains("/NeedAppearances true"));

    // text and multi-line text
    assert!(content.contains("/T (field-element-1)"));
    assert!(content.contains("/T (field-element-5)"));
    assert_eq!(content.matches("/FT /Tx").count(), 2);
    assert!(content.contains("/Ff 4096"));

    // three checkboxes, one radio parent with three kids
    for i in 0..3 {
        assert!(content.contains(&format!("/T (field-element-2-{})", i)));
    }
    assert!(content.contains("/T (field-element-3)"));
    assert!(content.contains("/Ff 49152"));
    assert!(content.contains("/N << /0 "));
    assert!(content.contains("/N << /2 "));

    // dropdown
    assert!(content.contains("/FT /Ch"));
    assert!(content.contains("/Ff 131072"));
    // radio parent and dropdown both list their option texts
    assert_eq!(content.matches("/Opt [(Option 1) (Option 2) (Option 3)]").count(), 2);

    // static text has no field
    assert!(!content.contains("field-element-6"));
    assert!(content.contains("(Enter your text here) Tj"));

    // one widget per text, checkbox, radio option and dropdown
    assert_eq!(content.matches("/Subtype /Widget").count(), 1 + 3 + 3 + 1 + 1);
}

async fn render_radio(options: &[&str]) -> String {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::Radio);
    store.update(id, ElementUpdate::new().options(options.iter().copied()));
    render_text(&store).await
}

#[tokio::test]
async fn test_radio_option_named_off_keeps_its_state() {
    let content = render_radio(&["On", "Off"]).await;

    assert!(content.contains("/Opt [(On) (Off)]"));
    assert_eq!(content.matches("/N << /0 ").count(), 1);
    assert_eq!(content.matches("/N << /1 ").count(), 1);
    // every kid has an on-state sorted ahead of /Off
    assert!(!content.contains("/N << /Off"));
    assert!(!content.contains("/D << /Off"));
}

#[tokio::test]
async fn test_repeated_radio_options_are_distinct() {
    let content = render_radio(&["A", "A"]).await;

    assert!(content.contains("/Opt [(A) (A)]"));
    assert_eq!(content.matches("/N << /0 ").count(), 1);
    assert_eq!(content.matches("/N << /1 ").count(), 1);
    assert!(!content.contains("/N << /A "));
}

#[tokio::test]
async fn test_required_flags() {
    let mut store = ElementStore::new();
    for kind in [ElementKind::Text, ElementKind::Radio, ElementKind::Dropdown] {
        let id = store.add(kind);
        store.update(id, ElementUpdate::new().required(true));
    }
    let content = render_text(&store).await;

    assert!(content.contains("/Ff 2 "));
    assert!(content.contains("/Ff 49154"));
    assert!(content.contains("/Ff 131074"));
}

#[tokio::test]
async fn test_header_and_theme_drawn() {
    let mut store = all_kinds();
    store.set_title("Pizza (large)");
    store.set_description("Pick toppings\nThen pay");
    store.set_theme(ThemeId::Dark);
    store.set_font(StandardFont::TimesBold);
    let content = render_text(&store).await;

    assert!(content.contains("/BaseFont /Times-Bold"));
    assert!(content.contains("/Encoding /WinAnsiEncoding"));
    assert!(content.contains("(Pizza \\(large\\)) Tj"));
    assert!(content.contains("(Pick toppings) Tj"));
    assert!(content.contains("(Then pay) Tj"));
    assert!(content.contains("0 0 595 842 re"));
}

#[tokio::test]
async fn test_logo_embedded_as_image() {
    let mut store = all_kinds();
    store.set_logo(png(4, 2));
    let content = render_text(&store).await;

    assert!(content.contains("/Subtype /Image"));
    assert!(content.contains("/Width 4"));
    assert!(content.contains("/Height 2"));
    assert!(content.contains("/Im1 Do"));
    assert!(content.contains("50 0 0 25 20 797 cm"));
}

#[tokio::test]
async fn test_unencodable_text_fails_render() {
    let mut store = all_kinds();
    store.set_title("Анкета");
    let reporter = RenderReporter::new();

    let err = FormAssembler::default()
        .render(store.document(), PdfBackend::new(), &reporter)
        .await
        .unwrap_err();

    assert!(err.is_capability_failure());
    let message = reporter.last_error().unwrap();
    assert!(message.starts_with("An error occurred while generating the PDF: Helvetica cannot encode"));
    assert_eq!(reporter.progress(), 0.0);
}

#[tokio::test]
async fn test_output_is_deterministic() {
    let store = all_kinds();
    let assembler = FormAssembler::default();
    let first = assembler
        .render(store.document(), PdfBackend::new(), &RenderReporter::new())
        .await
        .unwrap();
    let second = assembler
        .render(store.document(), PdfBackend::new(), &RenderReporter::new())
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_save_to_directory() {
    let dir = tempfile::tempdir().unwrap();
    let reporter = RenderReporter::new();

    let path = export::save_pdf(
        &FormAssembler::default(),
        all_kinds().document(),
        PdfBackend::new(),
        &reporter,
        dir.path(),
    )
    .await
    .unwrap();

    assert_eq!(path, dir.path().join(DEFAULT_FILE_NAME));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert_eq!(reporter.last_error(), None);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_save_failure_reports_download_message() {
    let dir = tempfile::tempdir().unwrap();
    let reporter = RenderReporter::new();

    let result = export::save_pdf(
        &FormAssembler::default(),
        all_kinds().document(),
        PdfBackend::new(),
        &reporter,
        dir.path().join("missing").join("form.pdf"),
    )
    .await;

    assert!(result.is_err());
    let message = reporter.last_error().unwrap();
    assert!(message.starts_with("An error occurred while downloading the PDF: "));
    assert!(message.ends_with(". Please try again."));
    assert!(!reporter.is_rendering());
}

#[tokio::test]
async fn test_save_empty_form_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let reporter = RenderReporter::new();

    let result = export::save_pdf(
        &FormAssembler::default(),
        ElementStore::new().document(),
        PdfBackend::new(),
        &reporter,
        dir.path(),
    )
    .await;

    assert!(matches!(result, Err(form_oxide::Error::EmptyDocument)));
    assert_eq!(
        reporter.last_error().as_deref(),
        Some("An error occurred while downloading the PDF: Cannot render a form with no elements. Please try again.")
    );
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
