//! Document-level interactive form dictionary (ISO 32000-1:2008 Section 12.7.2).
//!
//! The AcroForm dictionary lives in the catalog and lists the top-level
//! fields, the default resources (`/DR`) that field appearance strings
//! name their fonts from, and a document-wide default appearance.

use crate::object::{Dictionary, Object, ObjectRef};

use super::object_serializer::ObjectSerializer;

/// Builder for the AcroForm dictionary.
#[derive(Debug, Clone)]
pub struct AcroFormBuilder {
    fields: Vec<ObjectRef>,
    fonts: Vec<(String, ObjectRef)>,
    need_appearances: bool,
    default_appearance: Option<String>,
}

impl Default for AcroFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AcroFormBuilder {
    /// Create an empty form that asks viewers to regenerate appearances.
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            fonts: Vec::new(),
            need_appearances: true,
            default_appearance: None,
        }
    }

    /// Add a top-level field.
    pub fn add_field(&mut self, field_ref: ObjectRef) {
        self.fields.push(field_ref);
    }

    /// Register a font under `/DR /Font`.
    pub fn add_font(&mut self, resource: impl Into<String>, font_ref: ObjectRef) {
        self.fonts.push((resource.into(), font_ref));
    }

    /// Set the NeedAppearances flag.
    pub fn with_need_appearances(mut self, need: bool) -> Self {
        self.need_appearances = need;
        self
    }

    /// Set the document-wide default appearance string.
    pub fn with_default_appearance(mut self, da: impl Into<String>) -> Self {
        self.default_appearance = Some(da.into());
        self
    }

    /// Whether any field has been added.
    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Number of top-level fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Build the dictionary.
    pub fn build(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert(
            "Fields".to_string(),
            Object::Array(self.fields.iter().map(|r| Object::Reference(*r)).collect()),
        );

        if !self.fonts.is_empty() {
            let fonts: Dictionary = self
                .fonts
                .iter()
                .map(|(name, r)| (name.clone(), Object::Reference(*r)))
                .collect();
            dict.insert(
                "DR".to_string(),
                ObjectSerializer::dict(vec![("Font", Object::Dictionary(fonts))]),
            );
        }

        if self.need_appearances {
            dict.insert("NeedAppearances".to_string(), Object::Boolean(true));
        }
        if let Some(ref da) = self.default_appearance {
            dict.insert("DA".to_string(), Object::String(da.as_bytes().to_vec()));
        }

        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form() {
        let builder = AcroFormBuilder::new();
        assert!(!builder.has_fields());
        let dict = builder.build();
        assert_eq!(dict.get("Fields").and_then(Object::as_array).map(Vec::len), Some(0));
        assert_eq!(dict.get("NeedAppearances"), Some(&Object::Boolean(true)));
        assert!(!dict.contains_key("DR"));
    }

    #[test]
    fn test_fields_and_resources() {
        let mut builder = AcroFormBuilder::new()
            .with_need_appearances(false)
            .with_default_appearance("/F1 0 Tf 0 g");
        builder.add_field(ObjectRef::new(5, 0));
        builder.add_field(ObjectRef::new(6, 0));
        builder.add_font("F1", ObjectRef::new(3, 0));

        assert_eq!(builder.field_count(), 2);
        let dict = builder.build();
        assert!(!dict.contains_key("NeedAppearances"));

        let dr = dict.get("DR").and_then(Object::as_dict).unwrap();
        let fonts = dr.get("Font").and_then(Object::as_dict).unwrap();
        assert_eq!(fonts.get("F1").and_then(Object::as_reference), Some(ObjectRef::new(3, 0)));
        assert_eq!(dict.get("DA"), Some(&Object::String(b"/F1 0 Tf 0 g".to_vec())));
    }
}
