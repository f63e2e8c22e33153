//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure: header, body,
//! xref table, and trailer. Besides page content it tracks the shared
//! resources (standard fonts, image XObjects) and the interactive form
//! (widgets, radio groups, the AcroForm dictionary).
//!
//! Object numbers are handed out as objects are created; catalog and page
//! tree are always objects 1 and 2.

use std::collections::BTreeMap;
use std::io::Write;

use bytes::Bytes;

use super::acroform::AcroFormBuilder;
use super::content_stream::ContentStreamBuilder;
use super::form_fields::{
    CheckboxWidget, ComboBoxWidget, FormFieldWidget, RadioButtonGroup, RadioButtonWidget,
    TextFieldWidget,
};
use super::image_handler::ImageData;
use super::object_serializer::ObjectSerializer;
use crate::error::{Error, Result};
use crate::fonts::{encode_win_ansi, StandardFont};
use crate::geometry::{Point, Rect, Size};
use crate::object::{Dictionary, Object, ObjectRef};
use crate::theme::Color;

const CATALOG_ID: u32 = 1;
const PAGES_ID: u32 = 2;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Whether to compress streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            creator: Some(crate::NAME.to_string()),
            compress: true,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the creator recorded in the document information dictionary.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Enable or disable FlateDecode compression of content and
    /// appearance streams.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Compress data using Flate/Deflate compression.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// A standard font registered in the page resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontResource {
    /// Resource name (F1, F2, ...)
    pub name: String,
    /// Font behind the resource
    pub font: StandardFont,
    /// Font dictionary
    pub object: ObjectRef,
}

impl FontResource {
    /// Width of `text` set in this font at `size` points.
    pub fn width_of_text_at_size(&self, text: &str, size: f32) -> f32 {
        self.font.width_of_text_at_size(text, size)
    }
}

/// An image XObject registered in the page resources.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageResource {
    /// Resource name (Im1, Im2, ...)
    pub name: String,
    /// Pixel dimensions
    pub natural_size: Size,
    /// XObject stream
    pub object: ObjectRef,
}

/// A page being built.
pub struct PageBuilder<'a> {
    writer: &'a mut PdfWriter,
    page_index: usize,
}

impl<'a> PageBuilder<'a> {
    /// Index of this page in the document.
    pub fn index(&self) -> usize {
        self.page_index
    }

    fn page(&mut self) -> &mut PageData {
        &mut self.writer.pages[self.page_index]
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) -> &mut Self {
        self.page().content.fill_rect(rect, color);
        self
    }

    /// Draw a single line of text with its baseline origin at `origin`.
    ///
    /// Fails when the text contains characters WinAnsiEncoding cannot
    /// represent.
    pub fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &FontResource,
        size: f32,
        color: Color,
    ) -> Result<&mut Self> {
        let encoded = encode_win_ansi(text).map_err(|ch| {
            Error::capability(
                "draw_text",
                format!(
                    "{} cannot encode \"{}\" (U+{:04X})",
                    font.font.base_font_name(),
                    ch,
                    ch as u32
                ),
            )
        })?;

        self.page()
            .content
            .set_font(&font.name, size)
            .fill_color(color)
            .text(encoded, origin.x, origin.y);
        Ok(self)
    }

    /// Draw an image scaled into `rect`.
    pub fn draw_image(&mut self, image: &ImageResource, rect: Rect) -> &mut Self {
        self.page().content.draw_image(&image.name, rect);
        self
    }

    /// Add a text field widget.
    pub fn add_text_field(&mut self, field: TextFieldWidget) -> Result<&mut Self> {
        let rect = field.rect();
        let normal = field.style().appearance().box_appearance(rect.width, rect.height)?;
        let ap = self.writer.add_appearance(rect, normal)?;
        self.add_merged_field(&field, ObjectSerializer::dict(vec![("N", Object::Reference(ap))]));
        Ok(self)
    }

    /// Add a drop-down widget.
    pub fn add_combo_box(&mut self, field: ComboBoxWidget) -> Result<&mut Self> {
        let rect = field.rect();
        let normal = field.style().appearance().box_appearance(rect.width, rect.height)?;
        let ap = self.writer.add_appearance(rect, normal)?;
        self.add_merged_field(&field, ObjectSerializer::dict(vec![("N", Object::Reference(ap))]));
        Ok(self)
    }

    /// Add a checkbox widget with on and off appearances.
    pub fn add_checkbox(&mut self, field: CheckboxWidget) -> Result<&mut Self> {
        let rect = field.rect();
        let generator = field.style().appearance();
        let on = generator.checkbox_on(rect.width, rect.height)?;
        let off = generator.box_appearance(rect.width, rect.height)?;
        let ap = self.writer.add_state_appearances(rect, field.export_value(), on, off)?;
        self.add_merged_field(&field, ap);
        Ok(self)
    }

    /// Add one option to the radio group `group`, creating the group on
    /// first use. `required` applies to the whole group.
    pub fn add_radio_button(
        &mut self,
        group: &str,
        widget: RadioButtonWidget,
        required: bool,
    ) -> Result<&mut Self> {
        let rect = widget.rect();
        let generator = widget.style().appearance();
        let on = generator.radio_on(rect.width, rect.height)?;
        let off = generator.radio_off(rect.width, rect.height)?;

        let index = self.writer.radio_group(group);
        let on_state = self.writer.radio_groups[index].group.next_on_state();
        let ap = self.writer.add_state_appearances(rect, &on_state, on, off)?;

        let page_ref = self.page().id;
        let parent = self.writer.radio_groups[index].parent;
        let mut dict = widget.build_widget_dict(page_ref, parent);
        dict.insert("AP".to_string(), ap);

        let kid = self.writer.add_object(Object::Dictionary(dict));
        self.page().annots.push(kid);

        let entry = &mut self.writer.radio_groups[index];
        if required {
            entry.group.set_required(true);
        }
        entry.group.push_button(widget);
        entry.kids.push(kid);
        Ok(self)
    }

    fn add_merged_field(&mut self, field: &dyn FormFieldWidget, ap: Object) {
        let page_ref = self.page().id;
        let mut dict = field.build_merged_dict(page_ref);
        dict.insert("AP".to_string(), ap);

        let field_ref = self.writer.add_object(Object::Dictionary(dict));
        self.page().annots.push(field_ref);
        self.writer.acroform.add_field(field_ref);
        log::trace!("field {} -> {}", field.field_name(), field_ref);
    }
}

/// Internal page data.
struct PageData {
    id: ObjectRef,
    width: f32,
    height: f32,
    content: ContentStreamBuilder,
    annots: Vec<ObjectRef>,
}

struct RadioGroupEntry {
    parent: ObjectRef,
    group: RadioButtonGroup,
    kids: Vec<ObjectRef>,
}

/// PDF document writer.
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    /// Object ID counter
    next_obj_id: u32,
    /// Finished objects (id -> object)
    objects: BTreeMap<u32, Object>,
    fonts: Vec<FontResource>,
    images: Vec<ImageResource>,
    radio_groups: Vec<RadioGroupEntry>,
    acroform: AcroFormBuilder,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            next_obj_id: PAGES_ID + 1,
            objects: BTreeMap::new(),
            fonts: Vec::new(),
            images: Vec::new(),
            radio_groups: Vec::new(),
            acroform: AcroFormBuilder::new(),
        }
    }

    /// Writer configuration.
    pub fn config(&self) -> &PdfWriterConfig {
        &self.config
    }

    /// Allocate a new object ID.
    fn alloc_obj_id(&mut self) -> ObjectRef {
        let id = self.next_obj_id;
        self.next_obj_id += 1;
        ObjectRef::new(id, 0)
    }

    fn add_object(&mut self, obj: Object) -> ObjectRef {
        let r = self.alloc_obj_id();
        self.objects.insert(r.id, obj);
        r
    }

    fn stream(&self, mut dict: Dictionary, data: Vec<u8>) -> Object {
        let data = if self.config.compress {
            match compress_data(&data) {
                Ok(compressed) => {
                    dict.insert("Filter".to_string(), Object::Name("FlateDecode".to_string()));
                    compressed
                },
                Err(e) => {
                    log::warn!("stream compression failed, writing uncompressed: {}", e);
                    data
                },
            }
        } else {
            data
        };
        Object::Stream {
            dict,
            data: Bytes::from(data),
        }
    }

    /// Add a page with the given dimensions.
    pub fn add_page(&mut self, width: f32, height: f32) -> PageBuilder<'_> {
        let id = self.alloc_obj_id();
        let page_index = self.pages.len();
        self.pages.push(PageData {
            id,
            width,
            height,
            content: ContentStreamBuilder::new(),
            annots: Vec::new(),
        });
        PageBuilder {
            writer: self,
            page_index,
        }
    }

    /// Resume building an existing page.
    pub fn page(&mut self, index: usize) -> Option<PageBuilder<'_>> {
        if index < self.pages.len() {
            Some(PageBuilder {
                writer: self,
                page_index: index,
            })
        } else {
            None
        }
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Register a standard font, reusing the resource if already present.
    pub fn embed_font(&mut self, font: StandardFont) -> FontResource {
        if let Some(existing) = self.fonts.iter().find(|f| f.font == font) {
            return existing.clone();
        }

        let object = self.add_object(ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Font")),
            ("Subtype", ObjectSerializer::name("Type1")),
            ("BaseFont", ObjectSerializer::name(font.base_font_name())),
            ("Encoding", ObjectSerializer::name("WinAnsiEncoding")),
        ]));
        let resource = FontResource {
            name: format!("F{}", self.fonts.len() + 1),
            font,
            object,
        };
        self.acroform.add_font(resource.name.clone(), object);
        log::debug!("embedded font {} as /{}", font.base_font_name(), resource.name);
        self.fonts.push(resource.clone());
        resource
    }

    /// Font used by field appearance strings: the first registered font,
    /// or Helvetica when nothing has been registered yet.
    pub fn form_font(&mut self) -> FontResource {
        match self.fonts.first() {
            Some(font) => font.clone(),
            None => self.embed_font(StandardFont::Helvetica),
        }
    }

    /// Register an already decoded image.
    pub fn register_image(&mut self, image: &ImageData) -> ImageResource {
        let smask = image.soft_mask_xobject().map(|mask| self.add_object(mask));
        let object = self.add_object(image.xobject(smask));

        let resource = ImageResource {
            name: format!("Im{}", self.images.len() + 1),
            natural_size: image.natural_size(),
            object,
        };
        log::debug!(
            "embedded {}x{} image as /{}",
            image.width,
            image.height,
            resource.name
        );
        self.images.push(resource.clone());
        resource
    }

    fn form_xobject(&self, rect: Rect, content: Vec<u8>) -> Object {
        let dict = ObjectSerializer::dict_map(vec![
            ("Type", ObjectSerializer::name("XObject")),
            ("Subtype", ObjectSerializer::name("Form")),
            ("BBox", ObjectSerializer::rect(Rect::new(0.0, 0.0, rect.width, rect.height))),
        ]);
        self.stream(dict, content)
    }

    fn add_appearance(&mut self, rect: Rect, content: Vec<u8>) -> Result<ObjectRef> {
        let obj = self.form_xobject(rect, content);
        Ok(self.add_object(obj))
    }

    /// `/AP << /N << /<on> on /Off off >> /D ... >>` for a two-state button.
    fn add_state_appearances(
        &mut self,
        rect: Rect,
        on_state: &str,
        on: Vec<u8>,
        off: Vec<u8>,
    ) -> Result<Object> {
        let on_ref = self.add_appearance(rect, on)?;
        let off_ref = self.add_appearance(rect, off)?;
        let states: Dictionary = [
            (on_state.to_string(), Object::Reference(on_ref)),
            ("Off".to_string(), Object::Reference(off_ref)),
        ]
        .into_iter()
        .collect();
        Ok(ObjectSerializer::dict(vec![
            ("N", Object::Dictionary(states.clone())),
            ("D", Object::Dictionary(states)),
        ]))
    }

    /// Index of the radio group `name`, created on first use.
    fn radio_group(&mut self, name: &str) -> usize {
        if let Some(index) = self.radio_groups.iter().position(|g| g.group.name() == name) {
            return index;
        }
        let parent = self.alloc_obj_id();
        self.acroform.add_field(parent);
        self.radio_groups.push(RadioGroupEntry {
            parent,
            group: RadioButtonGroup::new(name),
            kids: Vec::new(),
        });
        self.radio_groups.len() - 1
    }

    /// Build the complete PDF document.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        if self.pages.is_empty() {
            return Err(Error::capability("save", "document has no pages"));
        }

        let groups = std::mem::take(&mut self.radio_groups);
        for entry in &groups {
            let dict = entry.group.build_parent_dict(&entry.kids);
            self.objects.insert(entry.parent.id, Object::Dictionary(dict));
        }

        let resources = self.page_resources();
        let pages = std::mem::take(&mut self.pages);
        let mut kids = Vec::with_capacity(pages.len());
        for page in &pages {
            let raw = page.content.build()?;
            let contents = self.stream(Dictionary::new(), raw);
            let content_ref = self.add_object(contents);

            let mut page_dict = ObjectSerializer::dict_map(vec![
                ("Type", ObjectSerializer::name("Page")),
                ("Parent", Object::Reference(ObjectRef::new(PAGES_ID, 0))),
                ("MediaBox", ObjectSerializer::rect(Rect::page(page.width, page.height))),
                ("Contents", Object::Reference(content_ref)),
                ("Resources", resources.clone()),
            ]);
            if !page.annots.is_empty() {
                page_dict.insert(
                    "Annots".to_string(),
                    Object::Array(page.annots.iter().map(|r| Object::Reference(*r)).collect()),
                );
            }
            self.objects.insert(page.id.id, Object::Dictionary(page_dict));
            kids.push(Object::Reference(page.id));
        }

        self.objects.insert(
            PAGES_ID,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Pages")),
                ("Kids", Object::Array(kids)),
                ("Count", ObjectSerializer::integer(pages.len() as i64)),
            ]),
        );

        let mut catalog = ObjectSerializer::dict_map(vec![
            ("Type", ObjectSerializer::name("Catalog")),
            ("Pages", Object::Reference(ObjectRef::new(PAGES_ID, 0))),
        ]);
        if self.acroform.has_fields() {
            let form_font = self.form_font();
            let acroform = std::mem::take(&mut self.acroform)
                .with_default_appearance(format!("/{} 0 Tf 0 g", form_font.name));
            catalog.insert("AcroForm".to_string(), Object::Dictionary(acroform.build()));
        }
        self.objects.insert(CATALOG_ID, Object::Dictionary(catalog));

        let mut info_entries = Vec::new();
        if let Some(title) = &self.config.title {
            info_entries.push(("Title", ObjectSerializer::string(title)));
        }
        if let Some(creator) = &self.config.creator {
            info_entries.push(("Creator", ObjectSerializer::string(creator)));
            info_entries.push(("Producer", ObjectSerializer::string(creator)));
        }
        let info_ref = self.add_object(ObjectSerializer::dict(info_entries));

        self.write_file(info_ref)
    }

    fn page_resources(&self) -> Object {
        let mut resources = Dictionary::new();
        if !self.fonts.is_empty() {
            let fonts: Dictionary = self
                .fonts
                .iter()
                .map(|f| (f.name.clone(), Object::Reference(f.object)))
                .collect();
            resources.insert("Font".to_string(), Object::Dictionary(fonts));
        }
        if !self.images.is_empty() {
            let images: Dictionary = self
                .images
                .iter()
                .map(|i| (i.name.clone(), Object::Reference(i.object)))
                .collect();
            resources.insert("XObject".to_string(), Object::Dictionary(images));
        }
        Object::Dictionary(resources)
    }

    fn write_file(&self, info_ref: ObjectRef) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer::compact();
        let mut output = Vec::new();
        let mut offsets: BTreeMap<u32, usize> = BTreeMap::new();

        writeln!(output, "%PDF-{}", self.config.version)?;
        // Binary marker (recommended for binary content)
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        for (id, obj) in &self.objects {
            offsets.insert(*id, output.len());
            serializer.write_indirect(&mut output, ObjectRef::new(*id, 0), obj)?;
            writeln!(output)?;
        }

        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", self.next_obj_id)?;
        writeln!(output, "0000000000 65535 f ")?;
        for id in 1..self.next_obj_id {
            match offsets.get(&id) {
                Some(offset) => writeln!(output, "{:010} 00000 n ", offset)?,
                None => {
                    log::warn!("object {} was allocated but never written", id);
                    writeln!(output, "0000000000 00001 f ")?
                },
            }
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(self.next_obj_id as i64)),
            ("Root", Object::Reference(ObjectRef::new(CATALOG_ID, 0))),
            ("Info", Object::Reference(info_ref)),
        ]);
        writeln!(output, "trailer")?;
        serializer.write_object(&mut output, &trailer)?;
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        log::debug!(
            "wrote {} objects, {} bytes",
            self.objects.len(),
            output.len()
        );
        Ok(output)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
