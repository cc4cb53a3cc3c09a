//! Test case name extraction from struct literals.

use phf::phf_set;
use tree_sitter::Node;

use crate::analysis::{string_literal, FieldSlot, GoSource};

/// Field names that carry a test case's name, lower-cased.
static DEFAULT_NAME_FIELDS: phf::Set<&'static str> = phf_set! {
    "name",
    "testname",
    "desc",
    "description",
    "title",
    "scenario",
};

/// The set of recognized name fields. Matching ignores case.
#[derive(Debug, Clone, Default)]
pub struct NameFields {
    extra: Vec<String>,
}

impl NameFields {
    /// The default set plus `extra` field names.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extra: extra
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn matches(&self, field: &str) -> bool {
        let lower = field.to_lowercase();
        DEFAULT_NAME_FIELDS.contains(lower.as_str()) || self.extra.iter().any(|e| *e == lower)
    }
}

/// Named children of `node`, without comments.
pub(crate) fn elements(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect();
    children
}

/// Unwrap a `literal_element` to the expression or literal it holds.
pub(crate) fn element_value(node: Node) -> Node {
    if node.kind() == "literal_element" {
        if let Some(inner) = elements(node).into_iter().next() {
            return inner;
        }
    }
    node
}

/// Split a `keyed_element` into key and value.
pub(crate) fn key_value(node: Node) -> Option<(Node, Node)> {
    if node.kind() != "keyed_element" {
        return None;
    }
    let parts = elements(node);
    match parts.as_slice() {
        [key, value] => Some((element_value(*key), element_value(*value))),
        _ => None,
    }
}

/// Determine the display name of one struct literal.
///
/// `body` is the `literal_value` of the element. `fields` is the element
/// type's field list when it is visible in this file; without it only the
/// key-value form can be resolved.
pub fn case_name(
    source: &GoSource,
    body: Node,
    fields: Option<&[FieldSlot]>,
    names: &NameFields,
) -> Option<String> {
    let values = elements(body);

    if values.iter().any(|n| n.kind() == "keyed_element") {
        return values.iter().filter_map(|n| key_value(*n)).find_map(|(key, value)| {
            if !matches!(key.kind(), "identifier" | "field_identifier") {
                return None;
            }
            if !names.matches(source.node_text(key)) {
                return None;
            }
            string_literal(source, value)
        });
    }

    positional_name(source, &values, fields?, names)
}

/// `{"foo", 1, 2}`: look up recognized fields by declaration order.
fn positional_name(
    source: &GoSource,
    values: &[Node],
    fields: &[FieldSlot],
    names: &NameFields,
) -> Option<String> {
    fields
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.name.as_deref().is_some_and(|n| names.matches(n)))
        .find_map(|(index, _)| {
            let value = values.get(index)?;
            string_literal(source, element_value(*value))
        })
}
