//! Test case table discovery.
//!
//! Every composite literal in a test function body is inspected
//! structurally; the name of the variable it is bound to plays no part.
//! A literal that qualifies as a table is consumed whole: its entries become
//! test cases and the walk does not descend into it, so a `want: []T{...}`
//! field inside a table entry is never mistaken for a second table. Function
//! literals inside a consumed table are still walked, since a closure field
//! may declare tables of its own.

use tree_sitter::Node;

use super::names::{case_name, element_value, elements, key_value, NameFields};
use super::symbol::{Range, Symbol};
use crate::analysis::{string_literal, FieldSlot, GoSource, Resolved, TypeIndex};

/// How a composite literal can contribute test cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableShape {
    /// `map[string]V{...}`: keys are case names.
    Map,
    /// `[]T{...}`, `[N]T{...}` or a local slice type. `fields` is the element
    /// struct's field list when it is visible in this file.
    Slice { fields: Option<Vec<FieldSlot>> },
    /// A type not declared in this file, e.g. `Tests{...}` where `Tests`
    /// comes from another file of the package. Treated as a slice whose
    /// element fields are unknown.
    Optimistic,
    NotATable,
}

/// Walks function bodies for table literals.
pub struct TableFinder<'a> {
    source: &'a GoSource,
    types: &'a TypeIndex<'a>,
    names: &'a NameFields,
}

impl<'a> TableFinder<'a> {
    pub fn new(source: &'a GoSource, types: &'a TypeIndex<'a>, names: &'a NameFields) -> Self {
        Self {
            source,
            types,
            names,
        }
    }

    /// Collect the test cases of every table under `body`, in document order.
    ///
    /// Inside a consumed table only function literals are searched further;
    /// a table's cases come before those of the closures it holds.
    pub fn cases(&self, body: Node<'a>) -> Vec<Symbol> {
        let mut cases = Vec::new();
        let mut stack = vec![body];

        while let Some(node) = stack.pop() {
            if node.kind() == "composite_literal" {
                if let Some(found) = self.table_cases(node) {
                    cases.extend(found);
                    stack.extend(closures(node).into_iter().rev());
                    continue;
                }
            }

            let mut cursor = node.walk();
            let children: Vec<_> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }

        cases
    }

    /// Classify a composite literal by its type.
    pub fn shape(&self, literal: Node<'a>) -> TableShape {
        let Some(ty) = literal.child_by_field_name("type") else {
            return TableShape::NotATable;
        };

        match self.types.resolve(ty) {
            Resolved::Map { key } if self.source.node_text(key) == "string" => TableShape::Map,
            Resolved::Sequence { element } => TableShape::Slice {
                fields: self.types.struct_fields(element),
            },
            Resolved::Unknown => TableShape::Optimistic,
            _ => TableShape::NotATable,
        }
    }

    /// Extract the cases of `literal` if it is a table.
    ///
    /// Returns `None` when the literal is not a table and should be walked
    /// into; `Some` (possibly empty) when it was consumed as one.
    fn table_cases(&self, literal: Node<'a>) -> Option<Vec<Symbol>> {
        let body = literal.child_by_field_name("body")?;
        let entries = elements(body);

        let cases = match self.shape(literal) {
            TableShape::Map => {
                if !entries.iter().any(|n| n.kind() == "keyed_element") {
                    return None;
                }
                self.map_cases(&entries)
            }
            TableShape::Slice { fields } => self.slice_cases(&entries, fields.as_deref())?,
            TableShape::Optimistic => self.slice_cases(&entries, None)?,
            TableShape::NotATable => return None,
        };

        tracing::debug!(
            file = self.source.name(),
            at = %Range::from_node(literal).start,
            entries = entries.len(),
            cases = cases.len(),
            "found test table"
        );
        Some(cases)
    }

    fn map_cases(&self, entries: &[Node<'a>]) -> Vec<Symbol> {
        entries
            .iter()
            .filter_map(|entry| {
                let (key, _) = key_value(*entry)?;
                match string_literal(self.source, key) {
                    Some(name) => Some(Symbol::test_case(name, Range::from_node(*entry))),
                    None => {
                        tracing::trace!(key = self.source.node_text(key), "skipping non-string map key");
                        None
                    }
                }
            })
            .collect()
    }

    /// `None` if no entry is a struct literal, i.e. not a table after all.
    fn slice_cases(
        &self,
        entries: &[Node<'a>],
        fields: Option<&[FieldSlot]>,
    ) -> Option<Vec<Symbol>> {
        let structs: Vec<_> = entries
            .iter()
            .map(|entry| element_value(*entry))
            .filter(|value| matches!(value.kind(), "literal_value" | "composite_literal"))
            .collect();
        if structs.is_empty() {
            return None;
        }

        let cases = structs
            .into_iter()
            .filter_map(|element| {
                let name = self.element_name(element, fields);
                if name.is_none() {
                    tracing::trace!(at = %Range::from_node(element).start, "skipping unnamed table entry");
                }
                Some(Symbol::test_case(name?, Range::from_node(element)))
            })
            .collect();
        Some(cases)
    }

    /// Name a slice element: an elided `{...}` or an explicit `T{...}`.
    fn element_name(&self, element: Node<'a>, fields: Option<&[FieldSlot]>) -> Option<String> {
        if element.kind() == "literal_value" {
            return case_name(self.source, element, fields, self.names);
        }

        let body = element.child_by_field_name("body")?;
        let own_fields = element
            .child_by_field_name("type")
            .and_then(|ty| self.types.struct_fields(ty));
        case_name(self.source, body, own_fields.as_deref(), self.names)
    }
}

/// Outermost function literals under `node`, in document order.
fn closures(node: Node) -> Vec<Node> {
    let mut found = Vec::new();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if current.kind() == "func_literal" {
            found.push(current);
            continue;
        }
        let mut cursor = current.walk();
        let children: Vec<_> = current.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cases_in(source_text: &str) -> Vec<String> {
        let source = GoSource::parse("tables_test.go", source_text).unwrap();
        let types = TypeIndex::build(&source).unwrap();
        let names = NameFields::default();
        let finder = TableFinder::new(&source, &types, &names);
        finder
            .cases(source.root())
            .into_iter()
            .map(|s| s.name)
            .collect()
    }

    #[test]
    fn test_slice_table() {
        let names = cases_in(
            r#"
package main

var tests = []struct {
    name string
    in   int
}{
    {name: "one", in: 1},
    {name: "two", in: 2},
}
"#,
        );
        assert_eq!(names, vec!["one", "two"]);
    }

    #[test]
    fn test_map_table_keeps_source_order() {
        let names = cases_in(
            r#"
package main

var tests = map[string]int{
    "zeta":  1,
    "alpha": 2,
    key:     3,
    "mid":   4,
}
"#,
        );
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_non_string_map_is_not_a_table() {
        let names = cases_in(
            r#"
package main

var ids = map[int]struct{ name string }{
    1: {name: "inner"},
}
"#,
        );
        // map[int] is walked into; its values are not slice entries either
        assert!(names.is_empty());
    }

    #[test]
    fn test_nested_want_slice_is_not_a_second_table() {
        let names = cases_in(
            r#"
package main

type Want struct { Name string }

var tests = []struct {
    name string
    want []Want
}{
    {name: "outer", want: []Want{{Name: "inner"}}},
}
"#,
        );
        assert_eq!(names, vec!["outer"]);
    }

    #[test]
    fn test_table_inside_struct_literal_is_found() {
        let names = cases_in(
            r#"
package main

type Suite struct { cases []Case }
type Case struct { name string }

var s = Suite{cases: []Case{{name: "inside"}}}
"#,
        );
        assert_eq!(names, vec!["inside"]);
    }

    #[test]
    fn test_closure_inside_table_entry_is_walked() {
        let names = cases_in(
            r#"
package main

var tests = []struct {
    name  string
    check func()
}{
    {
        name: "outer",
        check: func() {
            inner := []struct{ desc string }{{desc: "from closure"}}
            _ = inner
        },
    },
    {name: "second"},
}
"#,
        );
        assert_eq!(names, vec!["outer", "second", "from closure"]);
    }

    #[test]
    fn test_typed_and_pointer_elements() {
        let names = cases_in(
            r#"
package main

type Case struct { name string; in int }

var tests = []*Case{
    &Case{name: "pointer"},
}

var more = []Case{
    Case{"typed positional", 1},
    makeCase(),
}
"#,
        );
        assert_eq!(names, vec!["typed positional"]);
    }

    #[test]
    fn test_scalar_slices_are_ignored() {
        let names = cases_in(
            r#"
package main

var xs = []string{"a", "b"}
var ys = []int{1, 2}
"#,
        );
        assert!(names.is_empty());
    }

    #[test]
    fn test_shape_classification() {
        let source = GoSource::parse(
            "shape_test.go",
            r#"
package main

type Config struct { name string }

var a = map[string]int{}
var b = []Config{}
var c = Remote{}
var d = Config{}
var e = map[int]int{}
"#,
        )
        .unwrap();
        let types = TypeIndex::build(&source).unwrap();
        let names = NameFields::default();
        let finder = TableFinder::new(&source, &types, &names);

        let mut literals = Vec::new();
        let mut stack = vec![source.root()];
        while let Some(node) = stack.pop() {
            if node.kind() == "composite_literal" {
                literals.push(node);
                continue;
            }
            let mut cursor = node.walk();
            let children: Vec<_> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }

        let shapes: Vec<_> = literals.into_iter().map(|l| finder.shape(l)).collect();
        assert_eq!(shapes[0], TableShape::Map);
        assert!(matches!(&shapes[1], TableShape::Slice { fields: Some(f) } if f.len() == 1));
        assert_eq!(shapes[2], TableShape::Optimistic);
        assert_eq!(shapes[3], TableShape::NotATable);
        assert_eq!(shapes[4], TableShape::NotATable);
    }
}
