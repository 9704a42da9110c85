use ego_tree;
use regex::Regex;
use scraper::{Html, Node};
use std::ops::Deref;

// Color wrapper for kept chapter and verse numbers. Written with the
// leading '#', which the symbol pass in `tidy` then deletes, so the
// tag lands in the output as <font color="7F9FD3">.
const NUMBER_TAG_OPEN: &str = r##"<font color="#7F9FD3">"##;
const NUMBER_TAG_CLOSE: &str = "</font>";

/// Convert a passage HTML fragment into clean plain text.
///
/// Walks the fragment's DOM tree, recognizing:
/// - `<span class="chapterNum">` → a color-tagged literal "1" when
///   `show_verse_num` is set, otherwise nothing
/// - `<sup class="verseNum">` → the marker's trimmed digits in the same
///   color tag when `show_verse_num` is set, otherwise nothing
/// - `<sup class="marker">` (footnotes, cross-references) → nothing
/// - any element classed `parabreak` or `newblock` → a single space
/// - all other elements → their text content, in document order
///
/// The flat text then has stray `+`, `*`, `#` symbols deleted,
/// whitespace runs collapsed to single spaces, and the ends trimmed.
/// Returns `None` when no text remains.
pub fn strip_verse_text(html: &str, show_verse_num: bool) -> Option<String> {
    let document = Html::parse_fragment(html);

    let mut out = String::new();
    for child in document.tree.root().children() {
        walk_node(child.id(), &document.tree, show_verse_num, &mut out);
    }

    let cleaned = tidy(&out);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn walk_node(
    node_id: ego_tree::NodeId,
    tree: &ego_tree::Tree<Node>,
    show_verse_num: bool,
    out: &mut String,
) {
    let node = tree.get(node_id).expect("valid node id");

    match node.value() {
        Node::Text(text) => out.push_str(text.deref()),
        Node::Element(elem) => {
            // Class attributes are whitespace-separated token lists
            let has_class = |class: &str| {
                elem.attr("class")
                    .map_or(false, |v| v.split_whitespace().any(|c| c == class))
            };

            if elem.name() == "span" && has_class("chapterNum") {
                // Chapter headings emit the literal "1", never the
                // heading's own digits.
                if show_verse_num {
                    out.push_str(NUMBER_TAG_OPEN);
                    out.push('1');
                    out.push_str(NUMBER_TAG_CLOSE);
                }
                return;
            }

            if elem.name() == "sup" && has_class("verseNum") {
                if show_verse_num {
                    out.push_str(NUMBER_TAG_OPEN);
                    out.push_str(descendant_text(node_id, tree).trim());
                    out.push_str(NUMBER_TAG_CLOSE);
                }
                return;
            }

            if elem.name() == "sup" && has_class("marker") {
                return;
            }

            if has_class("parabreak") || has_class("newblock") {
                // Block boundary: one space keeps the surrounding words
                // apart, the block's own content is dropped.
                out.push(' ');
                return;
            }

            // Container or formatting element: recurse into children.
            for child in node.children() {
                walk_node(child.id(), tree, show_verse_num, out);
            }
        }
        _ => {}
    }
}

/// Concatenated text of all descendants of a node, in document order.
fn descendant_text(node_id: ego_tree::NodeId, tree: &ego_tree::Tree<Node>) -> String {
    let node = tree.get(node_id).expect("valid node id");
    let mut text = String::new();

    for child in node.children() {
        match child.value() {
            Node::Text(t) => text.push_str(t.deref()),
            Node::Element(_) => text.push_str(&descendant_text(child.id(), tree)),
            _ => {}
        }
    }

    text
}

/// Final cleanup of the accumulated text.
fn tidy(text: &str) -> String {
    // Stray markup symbols left over from the source formatting
    let symbols = Regex::new(r"[+*#]").unwrap();
    let text = symbols.replace_all(text, "");

    // Collapse every whitespace run to a single space
    let whitespace = Regex::new(r"\s+").unwrap();
    let text = whitespace.replace_all(&text, " ");

    text.trim().to_string()
}
