//! In-place edits on an owned `Html` tree
//!
//! Every function here takes the tree by `&mut Html`, so callers can only
//! apply them to a parse or clone they own, never to a document they were
//! handed by reference.

use ego_tree::{NodeId, NodeRef};
use html5ever::{Attribute, LocalName, Namespace, QualName};
use scraper::node::{Element, Text};
use scraper::{ElementRef, Html, Node, Selector};

use super::markers;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Outermost nodes under `root` that match any selector (or are comments when
/// `comments` is set). Descendants of a match are not visited.
fn top_level_matches(
    root: NodeRef<'_, Node>,
    selectors: &[Selector],
    comments: bool,
) -> Vec<NodeId> {
    let mut matches = Vec::new();
    let mut stack: Vec<NodeRef<'_, Node>> = root.children().rev().collect();

    while let Some(node) = stack.pop() {
        if comments && node.value().is_comment() {
            matches.push(node.id());
            continue;
        }
        if let Some(element) = ElementRef::wrap(node) {
            if selectors.iter().any(|s| s.matches(&element)) {
                matches.push(node.id());
                continue;
            }
        }
        stack.extend(node.children().rev());
    }

    matches
}

/// Detach every noise element (and optionally comment) under `root`.
/// Returns the number of subtrees removed.
pub(crate) fn remove_noise(
    html: &mut Html,
    root: NodeId,
    selectors: &[Selector],
    comments: bool,
) -> usize {
    let Some(root) = html.tree.get(root) else {
        return 0;
    };
    let ids = top_level_matches(root, selectors, comments);

    for id in &ids {
        if let Some(mut node) = html.tree.get_mut(*id) {
            node.detach();
        }
    }
    ids.len()
}

/// Drop every attribute whose name is not in `allowed` from each element
/// under `root`. Returns the number of attributes removed.
pub(crate) fn retain_attributes(html: &mut Html, root: NodeId, allowed: &[String]) -> usize {
    let ids: Vec<NodeId> = match html.tree.get(root) {
        Some(root) => root
            .descendants()
            .skip(1)
            .filter(|n| n.value().is_element())
            .map(|n| n.id())
            .collect(),
        None => return 0,
    };

    let mut removed = 0;
    for id in ids {
        let Some(mut node) = html.tree.get_mut(id) else {
            continue;
        };
        let Node::Element(element) = node.value() else {
            continue;
        };

        let total = element.attrs().count();
        let kept: Vec<Attribute> = element
            .attrs()
            .filter(|(name, _)| allowed.iter().any(|a| a == name))
            .map(|(name, value)| Attribute {
                name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
                value: value.into(),
            })
            .collect();
        if kept.len() == total {
            continue;
        }

        removed += total - kept.len();
        *element = Element::new(element.name.clone(), kept);
    }
    removed
}

/// Replace each heading's content with its marker-wrapped text.
pub(crate) fn mark_headings(html: &mut Html, root: NodeId) -> usize {
    let headings: Vec<(NodeId, String)> = match html.tree.get(root) {
        Some(root) => root
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|e| markers::is_heading_tag(e.value().name()))
            .map(|e| (e.id(), e.value().name().to_string()))
            .collect(),
        None => return 0,
    };

    for (id, tag) in &headings {
        let Some(heading) = html.tree.get(*id).and_then(ElementRef::wrap) else {
            continue;
        };
        let marked = markers::heading(tag, &element_text(heading));
        set_text(html, *id, &marked);
    }
    headings.len()
}

/// Replace each list still attached under `root` with a `div` holding one
/// bulleted line per descendant `li`. Nested lists are flattened into the
/// outermost one.
pub(crate) fn flatten_lists(html: &mut Html, root: NodeId) -> usize {
    let lists: Vec<NodeId> = match html.tree.get(root) {
        Some(root) => root
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|e| matches!(e.value().name(), "ul" | "ol"))
            .map(|e| e.id())
            .collect(),
        None => return 0,
    };

    let mut replaced = 0;
    for id in lists {
        if !is_attached(html, root, id) {
            continue;
        }
        let Some(list) = html.tree.get(id).and_then(ElementRef::wrap) else {
            continue;
        };
        let items: Vec<String> = list
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|e| e.value().name() == "li")
            .map(element_text)
            .collect();
        let block = markers::bullet_block(&items);

        replace_with_block(html, id, &block);
        replaced += 1;
    }
    replaced
}

/// Heading markers first, then list flattening, so headings nested in list
/// items keep their markers in the bullet text.
pub(crate) fn convert_structure(html: &mut Html, root: NodeId) -> (usize, usize) {
    let headings = mark_headings(html, root);
    let lists = flatten_lists(html, root);
    (headings, lists)
}

/// Put back the newline the parser swallows after `<pre>`, `<textarea>` and
/// `<listing>` when their text starts with another one. The serializer does
/// not emit it, so without this each reparse eats one more leading newline.
pub(crate) fn restore_leading_newlines(html: &mut Html, root: NodeId) -> usize {
    let texts: Vec<NodeId> = match html.tree.get(root) {
        Some(root) => root
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|e| matches!(e.value().name(), "pre" | "textarea" | "listing"))
            .filter_map(|e| e.first_child())
            .filter(|c| matches!(c.value(), Node::Text(t) if t.starts_with('\n')))
            .map(|c| c.id())
            .collect(),
        None => return 0,
    };

    for id in &texts {
        if let Some(mut node) = html.tree.get_mut(*id) {
            if let Node::Text(text) = node.value() {
                let restored = format!("\n{}", &**text);
                *text = Text { text: restored.as_str().into() };
            }
        }
    }
    texts.len()
}

/// Serialized children of `id`
pub(crate) fn inner_html(html: &Html, id: NodeId) -> String {
    html.tree
        .get(id)
        .and_then(ElementRef::wrap)
        .map(|e| e.inner_html())
        .unwrap_or_default()
}

/// Concatenated text of an element and its descendants
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn html_name(local: &str) -> QualName {
    QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(local))
}

fn text_node(text: &str) -> Node {
    Node::Text(Text { text: text.into() })
}

fn is_attached(html: &Html, root: NodeId, id: NodeId) -> bool {
    html.tree
        .get(id)
        .map(|n| n.ancestors().any(|a| a.id() == root))
        .unwrap_or(false)
}

/// Replace all children of `id` with a single text node.
fn set_text(html: &mut Html, id: NodeId, text: &str) {
    let children: Vec<NodeId> = match html.tree.get(id) {
        Some(node) => node.children().map(|c| c.id()).collect(),
        None => return,
    };
    for child in children {
        if let Some(mut child) = html.tree.get_mut(child) {
            child.detach();
        }
    }
    if let Some(mut node) = html.tree.get_mut(id) {
        node.append(text_node(text));
    }
}

/// Swap `id` for a `div` whose only child is `text`.
fn replace_with_block(html: &mut Html, id: NodeId, text: &str) {
    let Some(mut node) = html.tree.get_mut(id) else {
        return;
    };
    let block = node
        .insert_before(Node::Element(Element::new(html_name("div"), Vec::new())))
        .id();
    node.detach();

    if let Some(mut block) = html.tree.get_mut(block) {
        block.append(text_node(text));
    }
}
