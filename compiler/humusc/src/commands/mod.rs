//! Command handlers for the Humus CLI.
//!
//! The phase functions in [`phases`] turn source text into rendered output
//! or a diagnostic. The `*_file` wrappers read a file, print the result and
//! report failures through the terminal emitter.

mod explain;
mod phases;

use std::io::IsTerminal;

use humus_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use humus_diagnostic::Diagnostic;
use humus_parse::ParseOptions;

pub use explain::explain_error;
pub use phases::{ir, parse, tokens};

/// Output format for phase results.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Emit {
    #[default]
    Json,
    /// Rust `{:#?}` rendering.
    Debug,
}

impl Emit {
    pub fn from_name(name: &str) -> Option<Emit> {
        match name {
            "json" => Some(Emit::Json),
            "debug" => Some(Emit::Debug),
            _ => None,
        }
    }
}

/// Options shared by the phase commands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOptions {
    pub parse: ParseOptions,
    pub emit: Emit,
}

/// Split phase-command arguments into options and the file path.
///
/// Accepts `--limit=<n>` and `--emit=json|debug` in any position.
pub fn parse_command_args(args: &[String]) -> Result<(CommandOptions, Option<String>), String> {
    let mut options = CommandOptions::default();
    let mut path = None;
    for arg in args {
        if let Some(limit) = arg.strip_prefix("--limit=") {
            let limit = limit
                .parse::<u64>()
                .map_err(|_| format!("invalid dispatch limit '{limit}'"))?;
            options.parse = options.parse.with_dispatch_limit(limit);
        } else if let Some(emit) = arg.strip_prefix("--emit=") {
            options.emit =
                Emit::from_name(emit).ok_or_else(|| format!("unknown emit format '{emit}'"))?;
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else if path.is_none() {
            path = Some(arg.clone());
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
    }
    Ok((options, path))
}

type Phase = fn(&str, &CommandOptions) -> Result<String, Diagnostic>;

fn run_phase(phase: Phase, path: &str, options: &CommandOptions) {
    let source = read_file(path);
    match phase(&source, options) {
        Ok(output) => println!("{output}"),
        Err(diag) => {
            let mut emitter = TerminalEmitter::stderr(ColorMode::Auto, std::io::stderr().is_terminal())
                .with_source(path, source);
            emitter.emit(&diag);
            emitter.emit_summary(1, 0);
            emitter.flush();
            std::process::exit(1);
        }
    }
}

/// Tokenize a file and print its tokens.
pub fn tokens_file(path: &str, options: &CommandOptions) {
    run_phase(tokens, path, options);
}

/// Parse a file and print its syntax tree.
pub fn parse_file(path: &str, options: &CommandOptions) {
    run_phase(parse, path, options);
}

/// Parse and lower a file and print its behavior tree.
pub fn ir_file(path: &str, options: &CommandOptions) {
    run_phase(ir, path, options);
}

/// Read a file from disk, exiting with a user-friendly error message on failure.
fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}
