//! Outline extraction for table-driven tests.
//!
//! Given one Go file, produce the test functions it declares and, for each,
//! the named cases of its test tables:
//!
//! ```text
//! TestParse            (test function)
//! ├── "empty input"    (test case)
//! └── "trailing comma" (test case)
//! ```
//!
//! Extraction is a pure function of the source text. A test function with
//! no named cases is left out of the outline entirely.

mod functions;
mod names;
mod symbol;
mod tables;

use std::fs;
use std::path::{Path, PathBuf};

pub use functions::{test_functions, TestFunction};
pub use names::{case_name, NameFields};
pub use symbol::{
    Position, Range, Symbol, SymbolKind, TEST_CASE_DETAIL, TEST_FUNCTION_DETAIL,
};
pub use tables::{TableFinder, TableShape};

use crate::analysis::{GoSource, TypeIndex};
use crate::error::OutlineError;

/// Default prefix of test function names.
pub const DEFAULT_FUNCTION_PREFIX: &str = "Test";

/// Options for outline extraction.
#[derive(Debug, Clone)]
pub struct OutlineConfig {
    /// Functions whose names start with this prefix are test functions.
    pub function_prefix: String,
    /// Name fields recognized in addition to the built-in set.
    pub extra_name_fields: Vec<String>,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            function_prefix: DEFAULT_FUNCTION_PREFIX.to_string(),
            extra_name_fields: Vec::new(),
        }
    }
}

/// What to outline: a file on disk, or source text held in memory.
#[derive(Debug, Clone)]
pub enum Input {
    File(PathBuf),
    Source { name: String, text: Vec<u8> },
}

/// Extracts test outlines.
pub struct Outliner {
    prefix: String,
    names: NameFields,
}

impl Outliner {
    pub fn new(config: OutlineConfig) -> Self {
        Self {
            prefix: config.function_prefix,
            names: NameFields::with_extra(&config.extra_name_fields),
        }
    }

    /// Outline either kind of input.
    pub fn outline(&self, input: &Input) -> Result<Vec<Symbol>, OutlineError> {
        match input {
            Input::File(path) => self.outline_file(path),
            Input::Source { name, text } => self.outline_source(name, text.as_slice()),
        }
    }

    /// Read and outline a `.go` file.
    pub fn outline_file(&self, path: &Path) -> Result<Vec<Symbol>, OutlineError> {
        if path.as_os_str().is_empty() {
            return Err(OutlineError::EmptyPath);
        }
        if path.extension().and_then(|e| e.to_str()) != Some("go") {
            return Err(OutlineError::NotGoFile(path.to_path_buf()));
        }

        let text = fs::read(path).map_err(|source| OutlineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.outline_source(&path.to_string_lossy(), text)
    }

    /// Outline in-memory source text. `name` is used in diagnostics only.
    pub fn outline_source(
        &self,
        name: &str,
        text: impl Into<Vec<u8>>,
    ) -> Result<Vec<Symbol>, OutlineError> {
        let source = GoSource::parse(name, text)?;
        self.outline_parsed(&source)
    }

    /// Outline an already parsed file.
    pub fn outline_parsed(&self, source: &GoSource) -> Result<Vec<Symbol>, OutlineError> {
        let types = TypeIndex::build(source)?;
        let finder = TableFinder::new(source, &types, &self.names);

        let mut symbols = Vec::new();
        for function in test_functions(source, &self.prefix) {
            let cases = finder.cases(function.body);
            if cases.is_empty() {
                tracing::debug!(function = function.name, "no named test cases");
                continue;
            }
            tracing::debug!(function = function.name, cases = cases.len(), "outlined test function");
            symbols.push(Symbol::test_function(
                function.name,
                Range::from_node(function.declaration),
                cases,
            ));
        }

        Ok(symbols)
    }
}

impl Default for Outliner {
    fn default() -> Self {
        Self::new(OutlineConfig::default())
    }
}

/// Outline a `.go` file with the default configuration.
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<Vec<Symbol>, OutlineError> {
    Outliner::default().outline_file(path.as_ref())
}

/// Outline source text with the default configuration.
pub fn outline_source(name: &str, text: impl Into<Vec<u8>>) -> Result<Vec<Symbol>, OutlineError> {
    Outliner::default().outline_source(name, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_basic_table() {
        let source = r#"package main

import "testing"

func TestExample(t *testing.T) {
	tests := []struct {
		name  string
		input int
	}{
		{name: "normal case", input: 1},
		{name: "zero value", input: 0},
	}
	for _, tt := range tests {
		t.Run(tt.name, func(t *testing.T) {})
	}
}
"#;
        let symbols = outline_source("example_test.go", source).unwrap();
        assert_eq!(symbols.len(), 1);

        let func = &symbols[0];
        assert_eq!(func.name, "TestExample");
        assert_eq!(func.kind, SymbolKind::Function);
        assert_eq!(func.detail, TEST_FUNCTION_DETAIL);
        assert_eq!(func.range, Range::new(Position::new(4, 0), Position::new(15, 1)));

        let cases: Vec<_> = func.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(cases, vec!["normal case", "zero value"]);
        assert_eq!(
            func.children[0].range,
            Range::new(Position::new(9, 2), Position::new(9, 33))
        );
        for case in &func.children {
            assert_eq!(case.kind, SymbolKind::Struct);
            assert_eq!(case.detail, TEST_CASE_DETAIL);
            assert!(case.children.is_empty());
            assert!(func.range.contains(&case.range));
        }
    }

    #[test]
    fn test_function_without_named_cases_is_dropped() {
        let source = r#"package main

func TestNoNames(t *testing.T) {
	tests := []struct{ in, want int }{
		{in: 1, want: 1},
	}
	_ = tests
}
"#;
        assert!(outline_source("none_test.go", source).unwrap().is_empty());
    }

    #[test]
    fn test_tables_in_closures_and_range_clauses() {
        let source = r#"package main

func TestNested(t *testing.T) {
	t.Run("group", func(t *testing.T) {
		for _, tc := range []struct{ name string }{
			{name: "inside closure"},
		} {
			_ = tc
		}
	})
	var more = map[string]bool{"from var": true}
	_ = more
}
"#;
        let symbols = outline_source("nested_test.go", source).unwrap();
        let cases: Vec<_> = symbols[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(cases, vec!["inside closure", "from var"]);
    }

    #[test]
    fn test_suite_methods_are_outlined() {
        let source = r#"package main

func (s *Suite) TestMethod() {
	tests := []struct{ name string }{{name: "m1"}}
	_ = tests
}
"#;
        let symbols = outline_source("suite_test.go", source).unwrap();
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].name, "TestMethod");
        assert_eq!(symbols[0].range.start, Position::new(2, 0));
        assert_eq!(symbols[0].children[0].name, "m1");
    }

    #[test]
    fn test_same_local_type_name_in_two_functions() {
        let source = r#"package main

func TestA(t *testing.T) {
	type tc struct {
		in   int
		name string
	}
	_ = []tc{{1, "a"}}
}

func TestB(t *testing.T) {
	type tc struct {
		name string
		in   int
	}
	_ = []tc{{"b", 2}}
}
"#;
        let symbols = outline_source("shadow_test.go", source).unwrap();
        let outline: Vec<_> = symbols
            .iter()
            .map(|f| (f.name.as_str(), f.children[0].name.as_str()))
            .collect();
        assert_eq!(outline, vec![("TestA", "a"), ("TestB", "b")]);
    }

    #[test]
    fn test_extra_name_fields_and_prefix() {
        let source = r#"package main

func FuzzLabels(f *testing.F) {
	_ = []struct{ label string }{{label: "custom"}}
}

func TestLabels(t *testing.T) {
	_ = []struct{ label string }{{label: "ignored"}}
}
"#;
        let outliner = Outliner::new(OutlineConfig {
            function_prefix: "Fuzz".to_string(),
            extra_name_fields: vec!["Label".to_string()],
        });
        let symbols = outliner.outline_source("labels_test.go", source).unwrap();
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].name, "FuzzLabels");
        assert_eq!(symbols[0].children[0].name, "custom");
    }

    #[test]
    fn test_outline_is_deterministic() {
        let source = r#"package main

func TestMap(t *testing.T) {
	tests := map[string]int{"c": 3, "a": 1, "b": 2}
	_ = tests
}
"#;
        let first = serde_json::to_string(&outline_source("map_test.go", source).unwrap()).unwrap();
        let second = serde_json::to_string(&outline_source("map_test.go", source).unwrap()).unwrap();
        assert_eq!(first, second);
        assert!(first.find("\"c\"").unwrap() < first.find("\"a\"").unwrap());
    }

    #[test]
    fn test_input_validation() {
        let outliner = Outliner::default();
        assert!(matches!(
            outliner.outline(&Input::File(PathBuf::new())),
            Err(OutlineError::EmptyPath)
        ));
        assert!(matches!(
            outliner.outline(&Input::File(PathBuf::from("notes.txt"))),
            Err(OutlineError::NotGoFile(_))
        ));
        assert!(matches!(
            outliner.outline(&Input::Source {
                name: String::new(),
                text: b"package main\n".to_vec(),
            }),
            Err(OutlineError::EmptyName)
        ));
    }
}
