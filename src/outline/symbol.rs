//! Outline symbols in the editor's document-symbol format.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Detail string for a test function symbol.
pub const TEST_FUNCTION_DETAIL: &str = "test function";
/// Detail string for a test case symbol.
pub const TEST_CASE_DETAIL: &str = "test case";

/// Symbol role. Serialized as the editor's numeric `SymbolKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Function,
    Struct,
}

impl SymbolKind {
    /// The editor's `SymbolKind` value.
    pub fn code(&self) -> u8 {
        match self {
            SymbolKind::Function => 11,
            SymbolKind::Struct => 22,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            11 => Some(SymbolKind::Function),
            22 => Some(SymbolKind::Struct),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Function => "function",
            SymbolKind::Struct => "struct",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for SymbolKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for SymbolKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        SymbolKind::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown symbol kind {}", code)))
    }
}

/// A position in a file (0-indexed line, 0-indexed byte column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

impl From<tree_sitter::Point> for Position {
    /// tree-sitter points already use the 0-indexed convention.
    fn from(point: tree_sitter::Point) -> Self {
        Self::new(point.row, point.column)
    }
}

impl fmt::Display for Position {
    /// Human-readable, 1-indexed `line:column`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// A half-open source range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// The full span of a syntax node.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        Self::new(node.start_position().into(), node.end_position().into())
    }

    /// Whether `other` lies entirely within this range.
    pub fn contains(&self, other: &Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// A node of the outline: a test function or one of its test cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub detail: String,
    pub kind: SymbolKind,
    pub range: Range,
    pub children: Vec<Symbol>,
}

impl Symbol {
    pub fn test_function(name: impl Into<String>, range: Range, cases: Vec<Symbol>) -> Self {
        Self {
            name: name.into(),
            detail: TEST_FUNCTION_DETAIL.to_string(),
            kind: SymbolKind::Function,
            range,
            children: cases,
        }
    }

    pub fn test_case(name: impl Into<String>, range: Range) -> Self {
        Self {
            name: name.into(),
            detail: TEST_CASE_DETAIL.to_string(),
            kind: SymbolKind::Struct,
            range,
            children: Vec::new(),
        }
    }
}
