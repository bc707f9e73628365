//! Property tests for structural invariants of the surface tree.

use inkline_dom::{Document, DomPosition, ElementTag};
use proptest::prelude::*;

fn tag_strategy() -> impl Strategy<Value = ElementTag> {
    prop_oneof![
        Just(ElementTag::Strong),
        Just(ElementTag::Em),
        Just(ElementTag::U),
        Just(ElementTag::Span),
        Just(ElementTag::P),
    ]
}

proptest! {
    /// Appending alternating text and element children keeps the tree
    /// structurally valid and the plain text equal to the concatenation.
    #[test]
    fn append_preserves_validity_and_text(
        pieces in proptest::collection::vec("[a-z ]{0,8}", 0..12),
        tags in proptest::collection::vec(tag_strategy(), 0..12),
    ) {
        let mut doc = Document::new();
        let mut expected = String::new();
        for (i, piece) in pieces.iter().enumerate() {
            let text = doc.create_text(piece.clone()).unwrap();
            if let Some(tag) = tags.get(i) {
                let el = doc.create_element(*tag).unwrap();
                doc.append_child(el, text).unwrap();
                doc.append_child(doc.root(), el).unwrap();
            } else {
                doc.append_child(doc.root(), text).unwrap();
            }
            expected.push_str(piece);
        }

        doc.validate().unwrap();
        prop_assert_eq!(doc.plain_text(doc.root()).unwrap(), expected);
    }

    /// Deleting a sub-range of a single text node removes exactly the
    /// covered characters.
    #[test]
    fn text_range_delete_removes_covered_chars(
        text in "[a-zé ]{1,24}",
        raw_start in 0usize..24,
        raw_len in 0usize..24,
    ) {
        let mut doc = Document::new();
        let node = doc.create_text(text.clone()).unwrap();
        doc.append_child(doc.root(), node).unwrap();

        let chars: Vec<char> = text.chars().collect();
        let start = raw_start % (chars.len() + 1);
        let end = (start + raw_len).min(chars.len());

        let range = doc
            .range(DomPosition::new(node, start), DomPosition::new(node, end))
            .unwrap();
        let covered = doc.range_text(&range).unwrap();
        prop_assert_eq!(covered.chars().count(), end - start);

        doc.delete_range_contents(&range).unwrap();
        let mut expected: String = chars[..start].iter().collect();
        expected.extend(&chars[end..]);
        prop_assert_eq!(doc.text(node).unwrap(), expected.as_str());
        doc.validate().unwrap();
    }

    /// A range captured before any mutation is rejected afterwards.
    #[test]
    fn any_mutation_invalidates_captured_ranges(insert in "[a-z]{1,4}") {
        let mut doc = Document::new();
        let node = doc.create_text("steady").unwrap();
        doc.append_child(doc.root(), node).unwrap();

        let range = doc.select_node_contents(node).unwrap();
        doc.splice_text(node, 0, 0, &insert).unwrap();

        prop_assert!(doc.range_text(&range).is_err());
    }
}
