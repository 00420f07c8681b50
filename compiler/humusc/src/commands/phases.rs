//! The pipeline phases as text-producing functions.

use std::fmt::Debug;

use humus_diagnostic::{grammar_diagnostic, Diagnostic, ErrorCode};
use humus_ir::Token;
use humus_parse::Parser;
use serde::Serialize;
use tracing::debug;

use super::{CommandOptions, Emit};

/// One token of `tokens` output. Lines and columns are one-based.
#[derive(Debug, Serialize)]
struct TokenRecord<'a> {
    line: usize,
    column: usize,
    #[serde(flatten)]
    token: &'a Token,
}

fn parser(options: &CommandOptions) -> Result<Parser, Diagnostic> {
    Ok(Parser::new()
        .map_err(|error| grammar_diagnostic(&error))?
        .with_options(options.parse))
}

fn render<T: Serialize + Debug>(value: &T, emit: Emit) -> Result<String, Diagnostic> {
    match emit {
        Emit::Json => serde_json::to_string_pretty(value).map_err(|error| {
            Diagnostic::error(ErrorCode::E9001).with_message(format!("cannot render JSON: {error}"))
        }),
        Emit::Debug => Ok(format!("{value:#?}")),
    }
}

/// Tokens of `source`, with their positions.
pub fn tokens(source: &str, options: &CommandOptions) -> Result<String, Diagnostic> {
    let tokens = parser(options)?
        .tokenize(source)
        .map_err(|error| error.to_diagnostic())?;
    debug!(count = tokens.len(), "tokenized");
    match options.emit {
        Emit::Json => {
            let records: Vec<TokenRecord<'_>> = tokens
                .iter()
                .map(|spanned| TokenRecord {
                    line: spanned.position.row + 1,
                    column: spanned.position.col + 1,
                    token: &spanned.token,
                })
                .collect();
            render(&records, Emit::Json)
        }
        Emit::Debug => Ok(tokens
            .iter()
            .map(|spanned| {
                format!(
                    "{} {} {}",
                    spanned.position,
                    spanned.token.kind_name(),
                    spanned.token
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Syntax tree of the program in `source`.
pub fn parse(source: &str, options: &CommandOptions) -> Result<String, Diagnostic> {
    let program = parser(options)?
        .parse_program(source)
        .map_err(|error| error.to_diagnostic())?;
    render(&program, options.emit)
}

/// Behavior tree of the program in `source`.
pub fn ir(source: &str, options: &CommandOptions) -> Result<String, Diagnostic> {
    let program = parser(options)?
        .parse_program(source)
        .map_err(|error| error.to_diagnostic())?;
    let beh = humus_codegen::lower_program(&program).map_err(|error| error.to_diagnostic())?;
    render(&beh, options.emit)
}
