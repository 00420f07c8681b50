//! Syntax grammar and parse entry points for Humus.
//!
//! Parsing runs two grammars stacked on one event loop: the token grammar
//! from `humus_lexer` feeds a derived token stream into the syntax grammar
//! defined here, whose reductions build the [`humus_ir`] syntax tree.
//!
//! ```text
//! let parser = Parser::new()?;
//! let program = parser.parse_program("SEND (#Hello, \"World\") TO println")?;
//! ```

mod error;
mod grammar;
mod reduce;

use humus_ir::{Expr, Stmt, Value};
use humus_lexer::{LexError, Lexer, SpannedToken};
use humus_peg::{
    end, sequence, EventLoopConfig, Failure, GrammarError, Namespace, ParseError as MatchError,
    Parser as Matcher, Pattern,
};
use tracing::{debug, trace};

pub use error::ParseError;

/// Front-end settings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum deliveries per event-loop run; `None` is unlimited.
    pub dispatch_limit: Option<u64>,
}

impl ParseOptions {
    #[must_use]
    pub fn with_dispatch_limit(mut self, limit: u64) -> Self {
        self.dispatch_limit = Some(limit);
        self
    }

    pub fn event_loop_config(&self) -> EventLoopConfig {
        EventLoopConfig {
            dispatch_limit: self.dispatch_limit,
        }
    }
}

/// Token grammar and syntax grammar, ready to parse.
#[derive(Debug)]
pub struct Parser {
    lexer: Lexer,
    grammar: Namespace<Value>,
    options: ParseOptions,
}

impl Parser {
    pub fn new() -> Result<Self, GrammarError> {
        let lexer = Lexer::new()?;
        let mut grammar = Namespace::new();
        grammar::define(&mut grammar)?;
        reduce::install(&mut grammar)?;
        grammar.seal()?;
        debug!(rules = grammar.names().len(), "syntax grammar ready");
        Ok(Parser {
            lexer,
            grammar,
            options: ParseOptions::default(),
        })
    }

    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.lexer = self.lexer.with_config(options.event_loop_config());
        self.options = options;
        self
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn grammar(&self) -> &Namespace<Value> {
        &self.grammar
    }

    pub fn tokenize(&self, source: &str) -> Result<Vec<SpannedToken>, LexError> {
        self.lexer.tokenize(source)
    }

    /// Parse `source` as a single expression.
    pub fn parse_expr(&self, source: &str) -> Result<Expr, ParseError> {
        let whole = sequence([self.grammar.lookup("expr"), end()]);
        match leading(self.run(source, whole, "expr")?) {
            Value::Expr(expr) => Ok(expr),
            other => Err(unreduced("expression", &other)),
        }
    }

    /// Parse `source` as a single statement.
    pub fn parse_stmt(&self, source: &str) -> Result<Stmt, ParseError> {
        let whole = sequence([self.grammar.lookup("stmt"), end()]);
        match leading(self.run(source, whole, "stmt")?) {
            Value::Stmt(stmt) => Ok(stmt),
            other => Err(unreduced("statement", &other)),
        }
    }

    /// Parse `source` as a sequence of statements.
    pub fn parse_program(&self, source: &str) -> Result<Vec<Stmt>, ParseError> {
        let items = match self.run(source, self.grammar.lookup("humus"), "stmt")? {
            Value::List(items) => items,
            other => return Err(unreduced("statement list", &other)),
        };
        items
            .into_iter()
            .map(|item| match item {
                Value::Stmt(stmt) => Ok(stmt),
                other => Err(unreduced("statement", &other)),
            })
            .collect()
    }

    /// Match `pattern` against the tokens of `source`. On failure, `resume`
    /// names the rule that is retried where the match stopped.
    fn run(&self, source: &str, pattern: Pattern<Value>, resume: &str) -> Result<Value, ParseError> {
        let stream = self.lexer.stream(source);
        let outcome = Matcher::new(pattern)
            .with_config(self.options.event_loop_config())
            .parse(&stream);
        match outcome {
            Ok(success) => {
                // The token stream can end early and still look like end of input.
                if let Some(stall) = success.end.stall() {
                    return Err(LexError::Stalled(stall.clone()).into());
                }
                debug!(tokens = success.consumed(), "parsed");
                Ok(success.value)
            }
            Err(MatchError::Failed(failure)) => {
                let failure = self.refine(failure, resume);
                match failure.furthest.stall() {
                    Some(stall) => Err(LexError::Stalled(stall.clone()).into()),
                    None => Err(ParseError::Syntax(failure)),
                }
            }
            Err(MatchError::Halted(error)) => Err(ParseError::Halted(error)),
            Err(MatchError::Incomplete) => Err(ParseError::Incomplete),
        }
    }

    /// A repetition that stops early hides why it stopped: the failure
    /// surfaces at whatever follows it, usually the closing `end`. Retrying
    /// `resume` at that point recovers the underlying failure when it reaches
    /// at least as far.
    fn refine(&self, failure: Failure<Value>, resume: &str) -> Failure<Value> {
        if failure.furthest.is_end() {
            return failure;
        }
        let retry = Matcher::new(self.grammar.lookup(resume))
            .with_config(self.options.event_loop_config())
            .parse_at(failure.furthest.clone());
        match retry {
            Err(MatchError::Failed(deeper))
                if deeper.furthest.offset() >= failure.furthest.offset() =>
            {
                trace!(rule = resume, at = %deeper.furthest.position(), "refined failure");
                deeper
            }
            _ => failure,
        }
    }
}

/// First item of a `[value, end]` sequence.
fn leading(value: Value) -> Value {
    match value {
        Value::List(mut items) if !items.is_empty() => items.swap_remove(0),
        other => other,
    }
}

fn unreduced(expected: &'static str, found: &Value) -> ParseError {
    ParseError::Unreduced {
        expected,
        found: found.to_string(),
    }
}

pub fn parse_expr(source: &str) -> Result<Expr, ParseError> {
    Parser::new()?.parse_expr(source)
}

pub fn parse_stmt(source: &str) -> Result<Stmt, ParseError> {
    Parser::new()?.parse_stmt(source)
}

pub fn parse_program(source: &str) -> Result<Vec<Stmt>, ParseError> {
    Parser::new()?.parse_program(source)
}
