//! Command-line interface for go-tdt-outline.

use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use crate::error::OutlineError;
use crate::outline::{Input, OutlineConfig, Outliner, DEFAULT_FUNCTION_PREFIX};
use crate::report::{self, OutputFormat};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_PARSE_ERROR: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Path argument meaning "read source from standard input".
pub const STDIN_SENTINEL: &str = "-";

/// Display name for standard input when `--stdin-name` is not given.
pub const DEFAULT_STDIN_NAME: &str = "<stdin>";

/// Outline table-driven Go tests.
///
/// Prints the test functions of a Go file and the named cases of their
/// test tables as a JSON array, for editors to render in an outline view.
#[derive(Parser, Debug)]
#[command(name = "go-tdt-outline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Go file to outline, or `-` to read source from standard input
    pub path: String,

    /// Display name for source read from standard input
    #[arg(long, default_value = DEFAULT_STDIN_NAME)]
    pub stdin_name: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Additional struct field name that holds a test case name (repeatable)
    #[arg(long = "name-field", value_name = "FIELD")]
    pub name_fields: Vec<String>,

    /// Name prefix of test functions
    #[arg(long, default_value = DEFAULT_FUNCTION_PREFIX)]
    pub prefix: String,

    /// Log progress to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Extraction options selected on the command line.
    pub fn outline_config(&self) -> OutlineConfig {
        OutlineConfig {
            function_prefix: self.prefix.clone(),
            extra_name_fields: self.name_fields.clone(),
        }
    }

    /// Resolve the positional argument into an outline input.
    pub fn input<R: Read>(&self, stdin: &mut R) -> Result<Input, OutlineError> {
        if self.path.is_empty() {
            return Err(OutlineError::EmptyPath);
        }
        if self.path != STDIN_SENTINEL {
            return Ok(Input::File(PathBuf::from(&self.path)));
        }

        if self.stdin_name.is_empty() {
            return Err(OutlineError::EmptyName);
        }
        let mut text = Vec::new();
        stdin
            .read_to_end(&mut text)
            .map_err(|source| OutlineError::Io {
                path: PathBuf::from(&self.stdin_name),
                source,
            })?;
        Ok(Input::Source {
            name: self.stdin_name.clone(),
            text,
        })
    }
}

/// Map an outline error to the process exit code.
pub fn exit_code(err: &OutlineError) -> i32 {
    if err.is_parse_error() {
        EXIT_PARSE_ERROR
    } else {
        EXIT_ERROR
    }
}

/// Run the outline command.
///
/// Nothing is written to stdout unless the whole outline succeeded.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let input = match cli.input(&mut io::stdin().lock()) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(exit_code(&e));
        }
    };

    let outliner = Outliner::new(cli.outline_config());
    let symbols = match outliner.outline(&input) {
        Ok(symbols) => symbols,
        Err(e) => {
            tracing::debug!(error = ?e, "outline failed");
            eprintln!("Error: {}", e);
            return Ok(exit_code(&e));
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write(&mut out, &symbols, cli.format)?;

    Ok(EXIT_SUCCESS)
}
