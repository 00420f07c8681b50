//! Character-level rules.
//!
//! ```text
//! tokens  <- token* EOF
//! token   <- _ lexeme
//! lexeme  <- symbol / number / char / string / ident / punct
//! symbol  <- '#' (punct / name)
//! number  <- '-'? [0-9]+ ('#' [0-9a-zA-Z]+)?
//! char    <- "'" (!"'" qchar) "'"
//! string  <- '"' (!'"' qchar)* '"'
//! qchar   <- '\' [nrt'"\[\]\\] / '\' 'u' hex hex hex hex / !'\' .
//! ident   <- name
//! name    <- [-0-9a-zA-Z!%&'*+/?@^_~]+
//! punct   <- [#$(),.:;=\[\\\]]
//! _       <- (comment / space)*
//! comment <- '#' [ \t] (!EOL .)*
//! EOL     <- '\n' / '\r'
//! EOF     <- _ !.
//! ```

use humus_ir::Value;
use humus_peg::{
    any, choice, end, not, one_or_more, optional, predicate_labeled, sequence, terminal, zero_or_more,
    GrammarError, Namespace, Pattern,
};

const NAME_CHARS: &str = "-!%&'*+/?@^_~";
const PUNCT_CHARS: &str = "#$(),.:;=[\\]";
const ESCAPE_CHARS: &str = "nrt'\"[]\\";

fn ch(c: char) -> Pattern<Value> {
    terminal(Value::Char(c))
}

fn char_class(label: &'static str, test: fn(char) -> bool) -> Pattern<Value> {
    predicate_labeled(label, move |v: &Value| v.as_char().is_some_and(test))
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || NAME_CHARS.contains(c)
}

fn is_punct_char(c: char) -> bool {
    PUNCT_CHARS.contains(c)
}

/// Add every token rule to `ns`.
pub(crate) fn define(ns: &mut Namespace<Value>) -> Result<(), GrammarError> {
    ns.define(
        "tokens",
        sequence([zero_or_more(ns.call("token")), ns.call("EOF")]),
    )?;
    ns.define("token", sequence([ns.call("_"), ns.call("lexeme")]))?;
    ns.define(
        "lexeme",
        choice([
            ns.call("symbol"),
            ns.call("number"),
            ns.call("char"),
            ns.call("string"),
            ns.call("ident"),
            ns.call("punct"),
        ]),
    )?;
    ns.define(
        "symbol",
        sequence([ch('#'), choice([ns.call("punct"), ns.call("name")])]),
    )?;
    ns.define(
        "number",
        sequence([
            optional(ch('-')),
            one_or_more(char_class("digit", |c| c.is_ascii_digit())),
            optional(sequence([
                ch('#'),
                one_or_more(char_class("digit or letter", |c| c.is_ascii_alphanumeric())),
            ])),
        ]),
    )?;
    ns.define(
        "char",
        sequence([
            ch('\''),
            sequence([not(ch('\'')), ns.call("qchar")]),
            ch('\''),
        ]),
    )?;
    ns.define(
        "string",
        sequence([
            ch('"'),
            zero_or_more(sequence([not(ch('"')), ns.call("qchar")])),
            ch('"'),
        ]),
    )?;
    let hex = || char_class("hex digit", |c| c.is_ascii_hexdigit());
    ns.define(
        "qchar",
        choice([
            sequence([
                ch('\\'),
                char_class("escape character", |c| ESCAPE_CHARS.contains(c)),
            ]),
            sequence([ch('\\'), ch('u'), hex(), hex(), hex(), hex()]),
            sequence([not(ch('\\')), any()]),
        ]),
    )?;
    ns.define("ident", ns.call("name"))?;
    ns.define("name", one_or_more(char_class("name character", is_name_char)))?;
    ns.define("punct", char_class("punctuation", is_punct_char))?;
    ns.define(
        "_",
        zero_or_more(choice([ns.call("comment"), ns.call("space")])),
    )?;
    ns.define(
        "comment",
        sequence([
            ch('#'),
            char_class("space or tab", |c| c == ' ' || c == '\t'),
            zero_or_more(sequence([not(ns.call("EOL")), any()])),
        ]),
    )?;
    ns.define("EOL", choice([ch('\n'), ch('\r')]))?;
    ns.define("space", char_class("whitespace", char::is_whitespace))?;
    ns.define("EOF", sequence([ns.call("_"), end()]))?;
    Ok(())
}
