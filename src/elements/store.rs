//! Element store: the mutable form document.

use bytes::Bytes;

use super::{ElementId, ElementKind, ElementUpdate, FormElement};
use crate::fonts::StandardFont;
use crate::theme::ThemeId;

/// Title of a new form.
pub const DEFAULT_TITLE: &str = "My Form";

/// Description of a new form.
pub const DEFAULT_DESCRIPTION: &str = "This is a sample form description.";

/// Form metadata plus the ordered element list.
///
/// Element order is render order. A document is only mutated through its
/// [`ElementStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct FormDocument {
    title: String,
    description: String,
    theme: ThemeId,
    font: StandardFont,
    logo: Option<Bytes>,
    elements: Vec<FormElement>,
}

impl Default for FormDocument {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            theme: ThemeId::default(),
            font: StandardFont::default(),
            logo: None,
            elements: Vec::new(),
        }
    }
}

impl FormDocument {
    /// Document title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Raw description, possibly containing line breaks.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Description split into display lines. Always at least one line.
    pub fn description_lines(&self) -> Vec<&str> {
        self.description
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect()
    }

    /// Selected theme.
    pub fn theme(&self) -> ThemeId {
        self.theme
    }

    /// Selected font.
    pub fn font(&self) -> StandardFont {
        self.font
    }

    /// Logo image bytes (PNG or JPEG), if any.
    pub fn logo(&self) -> Option<&[u8]> {
        self.logo.as_deref()
    }

    /// Elements in render order.
    pub fn elements(&self) -> &[FormElement] {
        &self.elements
    }

    /// Whether the form has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Owner of a [`FormDocument`] and its id counter.
///
/// Ids start at 1 and strictly increase for the lifetime of the store; an id
/// is never handed out twice, even after its element is deleted. Operations
/// on an unknown id change nothing and report the miss through their return
/// value.
#[derive(Debug, Clone)]
pub struct ElementStore {
    document: FormDocument,
    next_id: u64,
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStore {
    /// Create a store holding an empty form with default metadata.
    pub fn new() -> Self {
        Self {
            document: FormDocument::default(),
            next_id: 1,
        }
    }

    fn mint_id(&mut self) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a new element of `kind` with default attributes.
    pub fn add(&mut self, kind: ElementKind) -> ElementId {
        let id = self.mint_id();
        self.document.elements.push(FormElement::new(id, kind));
        log::debug!("Added {} ({})", id, kind);
        id
    }

    /// Remove the element with `id`. Returns whether one was removed.
    pub fn delete(&mut self, id: ElementId) -> bool {
        let before = self.document.elements.len();
        self.document.elements.retain(|element| element.id != id);
        let removed = self.document.elements.len() != before;
        if removed {
            log::debug!("Deleted {}", id);
        } else {
            log::debug!("Delete ignored: no {}", id);
        }
        removed
    }

    /// Append a copy of the element with `id` under a fresh id.
    ///
    /// The copy goes to the end of the list, not next to its source.
    pub fn duplicate(&mut self, id: ElementId) -> Option<ElementId> {
        let Some(source) = self.get(id).cloned() else {
            log::debug!("Duplicate ignored: no {}", id);
            return None;
        };

        let new_id = self.mint_id();
        self.document.elements.push(FormElement {
            id: new_id,
            ..source
        });
        log::debug!("Duplicated {} as {}", id, new_id);
        Some(new_id)
    }

    /// Merge `update` into the element with `id`. Returns whether the
    /// element exists.
    pub fn update(&mut self, id: ElementId, update: ElementUpdate) -> bool {
        match self.document.elements.iter_mut().find(|e| e.id == id) {
            Some(element) => {
                update.apply_to(element);
                log::debug!("Updated {}", id);
                true
            },
            None => {
                log::debug!("Update ignored: no {}", id);
                false
            },
        }
    }

    /// Look up an element.
    pub fn get(&self, id: ElementId) -> Option<&FormElement> {
        self.document.elements.iter().find(|e| e.id == id)
    }

    /// Elements in render order.
    pub fn elements(&self) -> &[FormElement] {
        &self.document.elements
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.document.elements.len()
    }

    /// Whether there are no elements.
    pub fn is_empty(&self) -> bool {
        self.document.elements.is_empty()
    }

    /// Set the form title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.document.title = title.into();
    }

    /// Set the description. Line breaks start new centered lines.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.document.description = description.into();
    }

    /// Select the theme.
    pub fn set_theme(&mut self, theme: ThemeId) {
        self.document.theme = theme;
    }

    /// Select the font.
    pub fn set_font(&mut self, font: StandardFont) {
        self.document.font = font;
    }

    /// Attach a logo image (PNG or JPEG bytes).
    pub fn set_logo(&mut self, logo: impl Into<Bytes>) {
        self.document.logo = Some(logo.into());
    }

    /// Remove the logo.
    pub fn clear_logo(&mut self) {
        self.document.logo = None;
    }

    /// The current document.
    pub fn document(&self) -> &FormDocument {
        &self.document
    }

    /// Consume the store, keeping the document.
    pub fn into_document(self) -> FormDocument {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_defaults() {
        let store = ElementStore::new();
        let doc = store.document();
        assert_eq!(doc.title(), DEFAULT_TITLE);
        assert_eq!(doc.description(), DEFAULT_DESCRIPTION);
        assert_eq!(doc.theme(), ThemeId::Light);
        assert_eq!(doc.font(), StandardFont::Helvetica);
        assert!(doc.logo().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = ElementStore::new();
        let a = store.add(ElementKind::Text);
        let b = store.add(ElementKind::Text);
        assert!(store.delete(b));
        let c = store.add(ElementKind::Text);
        assert_eq!(a.value(), 1);
        assert_eq!(c.value(), 3);
    }

    #[test]
    fn test_duplicate_appends_copy() {
        let mut store = ElementStore::new();
        let first = store.add(ElementKind::Radio);
        store.add(ElementKind::Text);
        store.update(first, ElementUpdate::new().label("Size").required(true));

        let copy = store.duplicate(first).unwrap();
        let elements = store.elements();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[2].id, copy);
        assert_eq!(elements[2].label, "Size");
        assert!(elements[2].required);
        assert_eq!(elements[2].body, elements[0].body);
    }

    #[test]
    fn test_missing_id_is_noop() {
        let mut store = ElementStore::new();
        store.add(ElementKind::Text);
        let missing = ElementId::new(42);
        assert!(!store.delete(missing));
        assert!(store.duplicate(missing).is_none());
        assert!(!store.update(missing, ElementUpdate::new().label("x")));
        assert_eq!(store.len(), 1);

        // a failed duplicate does not consume an id
        assert_eq!(store.add(ElementKind::Text).value(), 2);
    }

    #[test]
    fn test_description_lines() {
        let mut store = ElementStore::new();
        store.set_description("one\r\ntwo\nthree");
        assert_eq!(store.document().description_lines(), ["one", "two", "three"]);
        store.set_description("");
        assert_eq!(store.document().description_lines(), [""]);
    }

    #[test]
    fn test_logo_set_and_clear() {
        let mut store = ElementStore::new();
        store.set_logo(vec![1u8, 2, 3]);
        assert_eq!(store.document().logo(), Some(&[1u8, 2, 3][..]));
        store.clear_logo();
        assert!(store.document().logo().is_none());
    }

    #[test]
    fn test_into_document_keeps_elements() {
        let mut store = ElementStore::new();
        store.set_title("Survey");
        store.add(ElementKind::Dropdown);
        let doc = store.into_document();
        assert_eq!(doc.title(), "Survey");
        assert_eq!(doc.elements().len(), 1);
        assert!(!doc.is_empty());
    }
}
