use scraper::{ElementRef, Html, Node, Selector};

/// Text of an element whose content is a single string, looking through
/// wrappers that have exactly one child. `None` for mixed content.
pub(crate) fn sole_string(el: ElementRef<'_>) -> Option<&str> {
    let mut children = el.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }

    match only.value() {
        Node::Text(text) => Some(&**text),
        Node::Element(_) => ElementRef::wrap(only).and_then(sole_string),
        _ => None,
    }
}

/// First element after `anchor` in document order matching `selector`.
pub(crate) fn find_next<'a>(
    doc: &'a Html,
    anchor: ElementRef<'a>,
    selector: &Selector,
) -> Option<ElementRef<'a>> {
    doc.tree
        .root()
        .descendants()
        .skip_while(|node| node.id() != anchor.id())
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| selector.matches(el))
}

pub(crate) fn trimmed_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
