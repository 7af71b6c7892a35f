//! Code block language labels.
//!
//! Syntax-highlighted blocks carry their language on the inner `<code>`
//! element. Copying it onto the outer `.highlight` block lets the stylesheet
//! render a language badge.

use crate::dom::Document;
use crate::types::dom::ElementId;

const BLOCK_CLASS: &str = "highlight";
const LANG_ATTRIBUTE: &str = "data-lang";

/// Labels every highlight block. Returns the labelled block ids.
pub fn label_code_blocks(doc: &mut dyn Document) -> Vec<ElementId> {
    let mut labelled = Vec::new();
    for block in doc.elements_with_class(BLOCK_CLASS) {
        let lang = doc
            .descendants(&block)
            .into_iter()
            .filter(|id| doc.tag(id).as_deref() == Some("code"))
            .find_map(|id| doc.attribute(&id, LANG_ATTRIBUTE))
            .filter(|lang| !lang.is_empty());
        if let Some(lang) = lang {
            doc.set_attribute(&block, LANG_ATTRIBUTE, &lang);
            labelled.push(block);
        }
    }
    labelled
}
