//! Parsed Go source files.

use tree_sitter::{Language, Node, Parser, Tree};

use crate::error::OutlineError;

/// Longest snippet of offending source quoted in a syntax error.
const SNIPPET_LIMIT: usize = 24;

/// The tree-sitter grammar for Go.
pub fn language() -> Language {
    tree_sitter_go::LANGUAGE.into()
}

/// Holds a parsed tree-sitter tree and the source it was parsed from.
///
/// A `GoSource` only exists for syntactically valid input: construction
/// fails if tree-sitter had to recover from any error, so callers never see
/// a partially parsed file.
pub struct GoSource {
    tree: Tree,
    source: Vec<u8>,
    name: String,
}

impl GoSource {
    /// Parse Go source text. `name` is used in diagnostics only.
    pub fn parse(name: &str, source: impl Into<Vec<u8>>) -> Result<Self, OutlineError> {
        if name.is_empty() {
            return Err(OutlineError::EmptyName);
        }

        let source = source.into();
        check_utf8(name, &source)?;

        let mut parser = Parser::new();
        parser.set_language(&language())?;
        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| OutlineError::Parse {
                name: name.to_string(),
                line: 1,
                column: 1,
                message: "parser produced no syntax tree".to_string(),
            })?;

        let parsed = Self {
            tree,
            source,
            name: name.to_string(),
        };
        parsed.check_syntax()?;
        parsed.check_package_clause()?;
        Ok(parsed)
    }

    /// The display name this source was parsed under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw source bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.source
    }

    /// The root `source_file` node.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }

    fn check_syntax(&self) -> Result<(), OutlineError> {
        let root = self.root();
        if !root.has_error() {
            return Ok(());
        }

        match first_error(root) {
            Some(node) => {
                let message = if node.is_missing() {
                    format!("missing {:?}", node.kind())
                } else {
                    format!("unexpected {:?}", self.snippet(node))
                };
                Err(self.parse_error(node, message))
            }
            None => Err(self.parse_error(root, "syntax error".to_string())),
        }
    }

    /// Go requires every file to open with a package clause.
    fn check_package_clause(&self) -> Result<(), OutlineError> {
        let root = self.root();
        let mut cursor = root.walk();
        let first = root
            .named_children(&mut cursor)
            .find(|n| n.kind() != "comment");

        match first {
            Some(node) if node.kind() == "package_clause" => Ok(()),
            Some(node) => Err(self.parse_error(node, "expected 'package' clause".to_string())),
            None => Err(OutlineError::Parse {
                name: self.name.clone(),
                line: 1,
                column: 1,
                message: "expected 'package' clause, found end of file".to_string(),
            }),
        }
    }

    fn parse_error(&self, node: Node, message: String) -> OutlineError {
        let start = node.start_position();
        OutlineError::Parse {
            name: self.name.clone(),
            line: start.row + 1,
            column: start.column + 1,
            message,
        }
    }

    fn snippet(&self, node: Node) -> String {
        let text = self.node_text(node);
        let line = text.lines().next().unwrap_or("").trim();
        line.chars().take(SNIPPET_LIMIT).collect()
    }
}

/// Go source must be valid UTF-8.
fn check_utf8(name: &str, source: &[u8]) -> Result<(), OutlineError> {
    let Err(err) = std::str::from_utf8(source) else {
        return Ok(());
    };
    let offset = err.valid_up_to();
    let before = &source[..offset];
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);

    Err(OutlineError::Parse {
        name: name.to_string(),
        line: before.iter().filter(|&&b| b == b'\n').count() + 1,
        column: offset - line_start + 1,
        message: "illegal UTF-8 encoding".to_string(),
    })
}

/// Find the first ERROR or MISSING node in document order.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error)
}
