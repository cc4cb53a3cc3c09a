//! Output formatting for outline results.
//!
//! Supports three output formats:
//! - JSON: compact array of symbols, one line (the editor contract)
//! - Pretty JSON: the same array, indented
//! - Tree: colored terminal outline for human readability

use std::io::Write;

use clap::ValueEnum;
use colored::*;

use crate::outline::{Range, Symbol};

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    PrettyJson,
    Tree,
}

/// Write symbols in the requested format.
pub fn write<W: Write>(out: &mut W, symbols: &[Symbol], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, symbols),
        OutputFormat::PrettyJson => write_pretty_json(out, symbols),
        OutputFormat::Tree => write_tree(out, symbols),
    }
}

/// Write symbols as a single-line JSON array followed by a newline.
pub fn write_json<W: Write>(out: &mut W, symbols: &[Symbol]) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, symbols)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Write symbols as indented JSON.
pub fn write_pretty_json<W: Write>(out: &mut W, symbols: &[Symbol]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, symbols)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Write a human-readable outline.
pub fn write_tree<W: Write>(out: &mut W, symbols: &[Symbol]) -> anyhow::Result<()> {
    if symbols.is_empty() {
        writeln!(out, "{}", "No table-driven tests found.".dimmed())?;
        return Ok(());
    }

    for function in symbols {
        writeln!(
            out,
            "{} {}",
            function.name.bold(),
            span_label(&function.range).dimmed()
        )?;

        let last = function.children.len().saturating_sub(1);
        for (i, case) in function.children.iter().enumerate() {
            let branch = if i == last { "└──" } else { "├──" };
            writeln!(
                out,
                "{} {} {}",
                branch.dimmed(),
                display_name(&case.name).cyan(),
                span_label(&case.range).dimmed()
            )?;
        }
    }

    let cases: usize = symbols.iter().map(|s| s.children.len()).sum();
    writeln!(out)?;
    writeln!(
        out,
        "{} test function(s), {} test case(s)",
        symbols.len(),
        cases
    )?;
    out.flush()?;
    Ok(())
}

/// 1-indexed `start-end` label.
fn span_label(range: &Range) -> String {
    format!("[{}-{}]", range.start, range.end)
}

/// Case names may span lines; keep each entry on one line.
fn display_name(name: &str) -> String {
    format!("{:?}", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::Position;

    fn sample() -> Vec<Symbol> {
        let range = |a, b, c, d| Range::new(Position::new(a, b), Position::new(c, d));
        vec![Symbol::test_function(
            "TestExample",
            range(4, 0, 12, 1),
            vec![
                Symbol::test_case("normal case", range(6, 2, 6, 20)),
                Symbol::test_case("two\nlines", range(7, 2, 8, 3)),
            ],
        )]
    }

    #[test]
    fn test_json_is_one_line() {
        let mut buf = Vec::new();
        write_json(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("[{\"name\":\"TestExample\""));
        assert!(text.ends_with("}]\n"));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_empty_json_array() {
        let mut buf = Vec::new();
        write_json(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[]\n");
    }

    #[test]
    fn test_pretty_json_parses_back() {
        let mut buf = Vec::new();
        write(&mut buf, &sample(), OutputFormat::PrettyJson).unwrap();
        let back: Vec<Symbol> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_tree_output() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        write_tree(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("TestExample [5:1-13:2]"));
        assert!(text.contains("├── \"normal case\" [7:3-7:21]"));
        assert!(text.contains("└── \"two\\nlines\" [8:3-9:4]"));
        assert!(text.contains("1 test function(s), 2 test case(s)"));
    }
}
