//! File-local type resolution.
//!
//! The outline never type-checks. It only answers two questions about a
//! composite literal's type using declarations visible in the same file:
//! what shape does the type have (struct, slice, map), and, for structs,
//! what is the ordered field list. Anything declared elsewhere resolves to
//! [`Resolved::Unknown`].
//!
//! Declarations inside a function are scoped to their enclosing block, so
//! two test functions may each declare their own `type tc struct{...}`.

use std::collections::HashMap;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};

use super::source::{language, GoSource};
use crate::error::OutlineError;

/// Tree-sitter query for type declarations anywhere in a file, including
/// declarations local to a function body.
const TYPE_DECLARATION_QUERY: &str = r#"
(type_declaration) @declaration
"#;

/// Bound on alias chains such as `type A = B` / `type B []C`.
const MAX_ALIAS_DEPTH: usize = 8;

/// One positional slot of a struct literal.
///
/// `a, b string` declares two slots; an embedded field is one unnamed slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSlot {
    pub name: Option<String>,
}

/// The shape of a type, as far as it can be seen from this file.
#[derive(Debug, Clone)]
pub enum Resolved<'tree> {
    /// A struct type with a visible field list.
    Struct(Vec<FieldSlot>),
    /// A slice or array type with the given element type.
    Sequence { element: Node<'tree> },
    /// A map type with the given key type.
    Map { key: Node<'tree> },
    /// Declared locally, but neither a struct, sequence nor map.
    Other,
    /// Not declared in this file (package-qualified, generic, or external).
    Unknown,
}

/// Block a declaration belongs to: a block node id, or `None` for the
/// package level.
type Scope = Option<usize>;

/// Index of type declarations in one file, keyed by scope and type name.
pub struct TypeIndex<'tree> {
    source: &'tree GoSource,
    specs: HashMap<(Scope, String), Node<'tree>>,
}

impl<'tree> TypeIndex<'tree> {
    /// Collect every `type` declaration in the file.
    ///
    /// A name declared more than once in the same scope keeps its first
    /// declaration.
    pub fn build(source: &'tree GoSource) -> Result<Self, OutlineError> {
        let query = Query::new(&language(), TYPE_DECLARATION_QUERY)?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, source.root(), source.bytes());

        let mut specs = HashMap::new();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let declaration = capture.node;
                let scope = enclosing_block(declaration).map(|block| block.id());
                let mut walker = declaration.walk();
                for spec in declaration.named_children(&mut walker) {
                    // type_spec and alias specs both carry name/type fields
                    let (Some(name), Some(ty)) = (
                        spec.child_by_field_name("name"),
                        spec.child_by_field_name("type"),
                    ) else {
                        continue;
                    };
                    specs
                        .entry((scope, source.node_text(name).to_string()))
                        .or_insert(ty);
                }
            }
        }

        tracing::trace!(file = source.name(), types = specs.len(), "indexed local types");
        Ok(Self { source, specs })
    }

    /// Number of indexed type names.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Resolve a type expression to its shape.
    pub fn resolve(&self, ty: Node<'tree>) -> Resolved<'tree> {
        self.resolve_at(ty, 0)
    }

    /// The ordered field slots of `ty`, if it is a struct visible here.
    ///
    /// A pointer element type (`[]*Case`) is looked through, since elided
    /// `{...}` entries of such a slice are struct literals too.
    pub fn struct_fields(&self, ty: Node<'tree>) -> Option<Vec<FieldSlot>> {
        let ty = if ty.kind() == "pointer_type" {
            let mut cursor = ty.walk();
            let pointee = ty.named_children(&mut cursor).find(|n| n.kind() != "comment");
            pointee?
        } else {
            ty
        };
        match self.resolve(ty) {
            Resolved::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Find the declaration a type name refers to, innermost block first.
    fn lookup(&self, ty: Node<'tree>) -> Option<&Node<'tree>> {
        let name = self.source.node_text(ty).to_string();
        let mut block = enclosing_block(ty);
        loop {
            let scope = block.map(|b| b.id());
            if let Some(declared) = self.specs.get(&(scope, name.clone())) {
                return Some(declared);
            }
            block = enclosing_block(block?);
        }
    }

    fn resolve_at(&self, ty: Node<'tree>, depth: usize) -> Resolved<'tree> {
        if depth > MAX_ALIAS_DEPTH {
            return Resolved::Unknown;
        }

        match ty.kind() {
            "struct_type" => Resolved::Struct(struct_slots(self.source, ty)),
            "slice_type" | "array_type" | "implicit_length_array_type" => {
                match ty.child_by_field_name("element") {
                    Some(element) => Resolved::Sequence { element },
                    None => Resolved::Unknown,
                }
            }
            "map_type" => match ty.child_by_field_name("key") {
                Some(key) => Resolved::Map { key },
                None => Resolved::Unknown,
            },
            "type_identifier" => match self.lookup(ty) {
                Some(declared) => self.resolve_at(*declared, depth + 1),
                None => Resolved::Unknown,
            },
            "parenthesized_type" => {
                let mut cursor = ty.walk();
                let inner = ty
                    .named_children(&mut cursor)
                    .find(|n| n.kind() != "comment");
                match inner {
                    Some(inner) => self.resolve_at(inner, depth + 1),
                    None => Resolved::Unknown,
                }
            }
            "qualified_type" | "generic_type" => Resolved::Unknown,
            _ => Resolved::Other,
        }
    }
}

/// The innermost `block` containing `node`.
fn enclosing_block(node: Node) -> Option<Node> {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.kind() == "block" {
            return Some(parent);
        }
        current = parent.parent();
    }
    None
}

/// Flatten a `struct_type` into positional slots.
fn struct_slots(source: &GoSource, struct_type: Node) -> Vec<FieldSlot> {
    let mut slots = Vec::new();
    let mut cursor = struct_type.walk();
    let Some(list) = struct_type
        .named_children(&mut cursor)
        .find(|n| n.kind() == "field_declaration_list")
    else {
        return slots;
    };

    let mut list_cursor = list.walk();
    for field in list.named_children(&mut list_cursor) {
        if field.kind() != "field_declaration" {
            continue;
        }
        let mut name_cursor = field.walk();
        let names: Vec<_> = field
            .children_by_field_name("name", &mut name_cursor)
            .map(|n| source.node_text(n).to_string())
            .collect();

        if names.is_empty() {
            // embedded field
            slots.push(FieldSlot { name: None });
        } else {
            slots.extend(names.into_iter().map(|name| FieldSlot { name: Some(name) }));
        }
    }
    slots
}
