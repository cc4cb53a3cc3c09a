//! go-tdt-outline - outline extractor for table-driven Go tests.
//!
//! Finds the test functions of a Go file and the named cases of their test
//! tables without compiling or type-checking anything, and reports them as
//! document symbols an editor can show in an outline view.
//!
//! # Architecture
//!
//! The codebase uses tree-sitter for AST-based analysis:
//!
//! - `analysis`: parsing, local type resolution and string literal decoding
//! - `outline`: test function discovery, table discovery, case naming, and
//!   the symbol model
//! - `report`: output formatting (JSON, pretty JSON, tree)
//! - `cli`: command-line entry point
//!
//! # Example
//!
//! ```no_run
//! let symbols = go_tdt_outline::outline_file("parser_test.go")?;
//! for function in &symbols {
//!     println!("{} ({} cases)", function.name, function.children.len());
//! }
//! # Ok::<(), go_tdt_outline::OutlineError>(())
//! ```
//!
//! # Logging
//!
//! The library emits `tracing` events and never installs a subscriber;
//! the binary decides where (and whether) they go.

pub mod analysis;
pub mod cli;
pub mod error;
pub mod outline;
pub mod report;

pub use analysis::{GoSource, TypeIndex};
pub use error::OutlineError;
pub use outline::{
    outline_file, outline_source, Input, OutlineConfig, Outliner, Position, Range, Symbol,
    SymbolKind,
};
pub use report::OutputFormat;
