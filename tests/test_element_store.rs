//! Integration tests for the element store.
//!
//! Covers identity assignment, duplicate fidelity, order preservation and
//! the no-op behaviour of operations on unknown ids.

use form_oxide::elements::{ElementBody, ElementId, ElementKind, ElementStore, ElementUpdate};
use form_oxide::fonts::StandardFont;
use form_oxide::theme::ThemeId;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum StoreOp {
    Add(ElementKind),
    Duplicate(usize),
    Delete(usize),
    Relabel(usize),
}

fn arb_kind() -> impl Strategy<Value = ElementKind> {
    prop::sample::select(ElementKind::ALL.to_vec())
}

fn arb_op() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        3 => arb_kind().prop_map(StoreOp::Add),
        1 => any::<usize>().prop_map(StoreOp::Duplicate),
        1 => any::<usize>().prop_map(StoreOp::Delete),
        1 => any::<usize>().prop_map(StoreOp::Relabel),
    ]
}

/// Id of the element at `pick` modulo the length, if any.
fn pick(store: &ElementStore, pick: usize) -> Option<ElementId> {
    if store.is_empty() {
        None
    } else {
        Some(store.elements()[pick % store.len()].id)
    }
}

fn ids(store: &ElementStore) -> Vec<ElementId> {
    store.elements().iter().map(|e| e.id).collect()
}

proptest! {
    #[test]
    fn prop_ids_strictly_increase(ops in prop::collection::vec(arb_op(), 0..60)) {
        let mut store = ElementStore::new();
        let mut assigned: Vec<ElementId> = Vec::new();

        for op in ops {
            match op {
                StoreOp::Add(kind) => assigned.push(store.add(kind)),
                StoreOp::Duplicate(i) => {
                    if let Some(id) = pick(&store, i) {
                        assigned.extend(store.duplicate(id));
                    }
                },
                StoreOp::Delete(i) => {
                    if let Some(id) = pick(&store, i) {
                        store.delete(id);
                    }
                },
                StoreOp::Relabel(_) => {},
            }
        }

        for pair in assigned.windows(2) {
            prop_assert!(pair[0] < pair[1], "{} not below {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn prop_delete_and_update_preserve_order(ops in prop::collection::vec(arb_op(), 1..60)) {
        let mut store = ElementStore::new();
        for kind in ElementKind::ALL {
            store.add(kind);
        }

        for op in ops {
            let before = ids(&store);
            match op {
                StoreOp::Delete(i) => {
                    if let Some(id) = pick(&store, i) {
                        store.delete(id);
                        let expected: Vec<_> = before.iter().copied().filter(|e| *e != id).collect();
                        prop_assert_eq!(ids(&store), expected);
                    }
                },
                StoreOp::Relabel(i) => {
                    if let Some(id) = pick(&store, i) {
                        store.update(id, ElementUpdate::new().label("changed").required(true));
                        prop_assert_eq!(ids(&store), before);
                    }
                },
                StoreOp::Add(kind) => {
                    let id = store.add(kind);
                    prop_assert_eq!(ids(&store).last().copied(), Some(id));
                },
                StoreOp::Duplicate(i) => {
                    if let Some(id) = pick(&store, i) {
                        let copy = store.duplicate(id);
                        prop_assert_eq!(ids(&store).last().copied(), copy);
                        prop_assert_eq!(&ids(&store)[..before.len()], &before[..]);
                    }
                },
            }
        }
    }
}

#[test]
fn test_ids_not_reused_after_delete() {
    let mut store = ElementStore::new();
    let first = store.add(ElementKind::Text);
    let second = store.add(ElementKind::Text);
    store.delete(second);
    store.delete(first);

    let third = store.add(ElementKind::Text);
    assert_eq!(third.value(), 3);
    assert_eq!(store.elements()[0].label, "Text 3");
}

#[test]
fn test_duplicate_fidelity() {
    let mut store = ElementStore::new();
    let source = store.add(ElementKind::Radio);
    store.add(ElementKind::Text);
    store.update(
        source,
        ElementUpdate::new()
            .label("Size")
            .required(true)
            .font_size(16)
            .options(["S", "M", "L"]),
    );

    let copy = store.duplicate(source).unwrap();
    let elements = store.elements();
    assert_eq!(elements.len(), 3);
    assert_eq!(elements[2].id, copy);

    let original = store.get(source).unwrap();
    let duplicate = store.get(copy).unwrap();
    assert_ne!(original.id, duplicate.id);
    assert_eq!(duplicate.label, "Size");
    assert!(duplicate.required);
    assert_eq!(duplicate.font_size, original.font_size);
    assert_eq!(duplicate.body, original.body);
}

#[test]
fn test_unknown_ids_are_noops() {
    let mut store = ElementStore::new();
    store.add(ElementKind::Checkbox);
    let snapshot = store.elements().to_vec();
    let missing = ElementId::new(99);

    assert!(!store.delete(missing));
    assert_eq!(store.duplicate(missing), None);
    assert!(!store.update(missing, ElementUpdate::new().label("x")));
    assert_eq!(store.elements(), &snapshot[..]);

    // the failed duplicate must not consume an id
    assert_eq!(store.add(ElementKind::Text).value(), 2);
}

#[test]
fn test_update_merges_only_given_attributes() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::FreeText);
    store.update(id, ElementUpdate::new().content("Thank you!"));

    let element = store.get(id).unwrap();
    assert_eq!(element.label, "Freetext 1");
    assert!(!element.required);
    assert_eq!(element.font_size.get(), 12);
    assert_eq!(
        element.body,
        ElementBody::FreeText {
            content: "Thank you!".to_string()
        }
    );
}

#[test]
fn test_metadata_setters() {
    let mut store = ElementStore::new();
    store.set_title("Survey");
    store.set_description("Line one\nLine two");
    store.set_theme(ThemeId::Dark);
    store.set_font(StandardFont::CourierBold);
    store.set_logo(vec![1u8, 2, 3]);

    let document = store.document();
    assert_eq!(document.title(), "Survey");
    assert_eq!(document.description_lines(), vec!["Line one", "Line two"]);
    assert_eq!(document.theme(), ThemeId::Dark);
    assert_eq!(document.font(), StandardFont::CourierBold);
    assert_eq!(document.logo(), Some(&[1u8, 2, 3][..]));

    store.clear_logo();
    assert_eq!(store.document().logo(), None);
}
