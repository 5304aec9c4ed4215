//! The `deduce` command.
//!
//! Reads the source text (from `--file` or stdin), loads the symbol index,
//! runs [`TypeDeducer::deduce_type`] on the `--part` fragments at
//! `--offset`, and reports the outcome as JSON:
//!
//! ```json
//! {"success": true, "result": "\\App\\Models\\User"}
//! {"success": true, "result": null}
//! {"success": false, "result": "An --offset must be supplied into the source code!"}
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::deduce::TypeDeducer;
use crate::error::CommandError;
use crate::index::{SharedIndex, SymbolIndex};
use crate::types::SourceContext;

#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "phpantom-deduce",
    version,
    about = "Deduce the type of a PHP expression (a call chain, a literal, ...)"
)]
pub struct DeduceArgs {
    /// The file to examine.
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Read the source from stdin instead of from disk.  `--file` is then
    /// only used to look the file up in the index.
    #[arg(long)]
    pub stdin: bool,

    /// A part of the expression.  Repeat once per part, in access order.
    #[arg(long = "part", value_name = "PART")]
    pub parts: Vec<String>,

    /// The byte offset into the source to evaluate the expression at.
    #[arg(long, value_name = "N")]
    pub offset: Option<usize>,

    /// Symbol index dump (JSON).  Defaults to the configured index.
    #[arg(long, value_name = "PATH")]
    pub index: Option<PathBuf>,

    /// Configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl DeduceArgs {
    /// Reject argument combinations the command cannot work with.
    pub fn validate(&self) -> Result<(), CommandError> {
        if self.file.is_none() && !self.stdin {
            return Err(CommandError::InvalidInput(
                "Either a --file file must be supplied or --stdin must be passed!".to_string(),
            ));
        }
        if self.offset.is_none() {
            return Err(CommandError::InvalidInput(
                "An --offset must be supplied into the source code!".to_string(),
            ));
        }
        if self.parts.is_empty() {
            return Err(CommandError::InvalidInput(
                "You must specify at least one part using --part!".to_string(),
            ));
        }
        Ok(())
    }
}

/// The JSON document printed by the command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOutput {
    pub success: bool,
    pub result: Value,
}

impl CommandOutput {
    pub fn from_outcome(outcome: &Result<Option<String>, CommandError>) -> Self {
        match outcome {
            Ok(type_name) => Self {
                success: true,
                result: type_name.clone().map_or(Value::Null, Value::String),
            },
            Err(err) => Self {
                success: false,
                result: Value::String(err.to_string()),
            },
        }
    }
}

/// Run the command.  `stdin` is only read when `--stdin` is passed.
pub fn run(
    args: &DeduceArgs,
    config: &Config,
    stdin: &mut dyn Read,
) -> Result<Option<String>, CommandError> {
    args.validate()?;

    let source = read_source(args, stdin)?;
    let offset = args.offset.unwrap_or_default();
    if offset > source.len() {
        return Err(CommandError::InvalidInput(format!(
            "The offset {} lies beyond the end of the source ({} bytes)!",
            offset,
            source.len()
        )));
    }

    let index = match args.index.as_ref().or(config.index.as_ref()) {
        Some(path) => SharedIndex::new(SymbolIndex::load(path)?),
        None => {
            tracing::warn!("no symbol index given; only literal expressions can be typed");
            SharedIndex::unloaded()
        }
    };

    let deducer = TypeDeducer::with_index(index);
    let file = args.file.as_deref().map(Path::to_string_lossy);
    let context = SourceContext::new(file.as_deref(), &source, offset);

    let result = deducer.deduce_type(&context, &args.parts)?;
    tracing::debug!(parts = ?args.parts, offset, result = ?result, "deduced expression type");
    Ok(result)
}

fn read_source(args: &DeduceArgs, stdin: &mut dyn Read) -> Result<String, CommandError> {
    if args.stdin {
        let mut source = String::new();
        stdin
            .read_to_string(&mut source)
            .map_err(|source| CommandError::Io {
                path: "<stdin>".to_string(),
                source,
            })?;
        return Ok(source);
    }

    // `validate` guarantees a file when stdin is not used.
    let path = args.file.as_deref().unwrap_or(Path::new(""));
    std::fs::read_to_string(path).map_err(|source| CommandError::Io {
        path: path.display().to_string(),
        source,
    })
}
