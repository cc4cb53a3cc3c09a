//! Test function discovery.

use tree_sitter::Node;

use crate::analysis::GoSource;

/// A top-level function or method that qualifies as a test entry point.
#[derive(Debug, Clone, Copy)]
pub struct TestFunction<'tree> {
    pub name: &'tree str,
    /// The whole declaration, from `func` to the closing brace.
    pub declaration: Node<'tree>,
    pub body: Node<'tree>,
}

/// List the test functions of a file in document order.
///
/// A function qualifies when its name starts with `prefix`, it declares no
/// results, and it has a body. Methods qualify on the same terms, so suite
/// methods such as `func (s *Suite) TestParse()` are included.
pub fn test_functions<'tree>(source: &'tree GoSource, prefix: &str) -> Vec<TestFunction<'tree>> {
    let root = source.root();
    let mut cursor = root.walk();
    let functions = root
        .named_children(&mut cursor)
        .filter(|node| matches!(node.kind(), "function_declaration" | "method_declaration"))
        .filter_map(|declaration| {
            let name = source.node_text(declaration.child_by_field_name("name")?);
            if !name.starts_with(prefix) {
                return None;
            }
            if declaration.child_by_field_name("result").is_some() {
                tracing::trace!(function = name, "skipping function with results");
                return None;
            }
            let Some(body) = declaration.child_by_field_name("body") else {
                tracing::trace!(function = name, "skipping function without body");
                return None;
            };
            Some(TestFunction {
                name,
                declaration,
                body,
            })
        })
        .collect();
    functions
}
