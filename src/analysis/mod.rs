//! Tree-sitter backed source analysis.
//!
//! This module owns everything that touches the Go grammar directly:
//! - `source`: parsing, syntax validation and node text access
//! - `types`: file-local type resolution for composite literals
//! - `literal`: decoding of Go string literals
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Source text │────▶│ GoSource     │────▶│ TypeIndex    │
//! └─────────────┘     │ (tree, text) │     │ (local types)│
//!                     └──────────────┘     └──────────────┘
//!                            │                    │
//!                            ▼                    ▼
//!                     ┌───────────────────────────────┐
//!                     │ outline (functions, tables,   │
//!                     │ names) ──▶ Vec<Symbol>        │
//!                     └───────────────────────────────┘
//! ```

mod literal;
mod source;
mod types;

pub use literal::{string_literal, unquote};
pub use source::{language, GoSource};
pub use types::{FieldSlot, Resolved, TypeIndex};
