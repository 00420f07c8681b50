//! Syntax rules, matched over the token stream.
//!
//! ```text
//! humus   <- stmt* !.
//! block   <- '[' stmt* ']'
//! stmt    <- 'LET' eqtn !'IN'
//!          / ('AFTER' expr)? 'SEND' expr 'TO' expr
//!          / 'CREATE' ident 'WITH' expr
//!          / 'BECOME' expr
//!          / 'THROW' expr
//!          / expr
//! expr    <- 'LET' eqtn 'IN' expr
//!          / 'IF' eqtn expr ('ELIF' eqtn expr)* ('ELSE' expr)?
//!          / 'CASE' expr 'OF' (ptrn ':' expr)+ 'END'
//!          / term (',' expr)?
//! term    <- 'NEW' term / const / call
//! call    <- ident ('(' expr? ')')? / '(' (expr ')' ('(' expr? ')')? / ')')
//! eqtn    <- ident '(' ptrn? ')' '=' expr / ptrn '=' ptrn
//! ptrn    <- pterm (',' ptrn)?
//! pterm   <- '_' / '$' term / '(' ptrn? ')' / const / ident
//! const   <- block / 'SELF' / '\' ptrn '.' expr
//!          / symbol / number / char / string
//!          / 'NIL' / 'TRUE' / 'FALSE' / '?'
//! ```
//!
//! `term (',' expr)?` accepts the same input as `term ',' expr / term`
//! without matching the leading term twice. `call` is factored the same way:
//! a parenthesized expression is matched once and then optionally applied,
//! so nested parentheses cost linear rather than exponential time. `()` is
//! never applied, which keeps `() (x)` two separate terms.

use humus_ir::{Keyword, Token, Value};
use humus_peg::{
    choice, end, not, one_or_more, optional, predicate_labeled, sequence, terminal, zero_or_more,
    GrammarError, Namespace, Pattern,
};

fn kw(keyword: Keyword) -> Pattern<Value> {
    terminal(Value::from(keyword))
}

fn punct(c: char) -> Pattern<Value> {
    terminal(Value::Token(Token::Punct(c)))
}

fn token_class(label: &'static str, test: fn(&Token) -> bool) -> Pattern<Value> {
    predicate_labeled(label, move |v: &Value| v.as_token().is_some_and(test))
}

/// `'(' expr? ')'` in argument position.
fn argument(ns: &Namespace<Value>) -> Pattern<Value> {
    sequence([punct('('), optional(ns.call("expr")), punct(')')])
}

/// Add every syntax rule to `ns`.
pub(crate) fn define(ns: &mut Namespace<Value>) -> Result<(), GrammarError> {
    ns.define("humus", sequence([zero_or_more(ns.call("stmt")), end()]))?;
    ns.define(
        "block",
        sequence([punct('['), zero_or_more(ns.call("stmt")), punct(']')]),
    )?;
    ns.define(
        "stmt",
        choice([
            sequence([kw(Keyword::Let), ns.call("eqtn"), not(kw(Keyword::In))]),
            sequence([
                optional(sequence([kw(Keyword::After), ns.call("expr")])),
                kw(Keyword::Send),
                ns.call("expr"),
                kw(Keyword::To),
                ns.call("expr"),
            ]),
            sequence([
                kw(Keyword::Create),
                ns.call("ident"),
                kw(Keyword::With),
                ns.call("expr"),
            ]),
            sequence([kw(Keyword::Become), ns.call("expr")]),
            sequence([kw(Keyword::Throw), ns.call("expr")]),
            ns.call("expr"),
        ]),
    )?;
    ns.define(
        "expr",
        choice([
            sequence([
                kw(Keyword::Let),
                ns.call("eqtn"),
                kw(Keyword::In),
                ns.call("expr"),
            ]),
            sequence([
                kw(Keyword::If),
                ns.call("eqtn"),
                ns.call("expr"),
                zero_or_more(sequence([
                    kw(Keyword::Elif),
                    ns.call("eqtn"),
                    ns.call("expr"),
                ])),
                optional(sequence([kw(Keyword::Else), ns.call("expr")])),
            ]),
            sequence([
                kw(Keyword::Case),
                ns.call("expr"),
                kw(Keyword::Of),
                one_or_more(sequence([ns.call("ptrn"), punct(':'), ns.call("expr")])),
                kw(Keyword::End),
            ]),
            sequence([
                ns.call("term"),
                optional(sequence([punct(','), ns.call("expr")])),
            ]),
        ]),
    )?;
    ns.define(
        "term",
        choice([
            sequence([kw(Keyword::New), ns.call("term")]),
            ns.call("const"),
            ns.call("call"),
        ]),
    )?;
    ns.define(
        "call",
        choice([
            sequence([ns.call("ident"), optional(argument(ns))]),
            sequence([
                punct('('),
                choice([
                    sequence([ns.call("expr"), punct(')'), optional(argument(ns))]),
                    punct(')'),
                ]),
            ]),
        ]),
    )?;
    ns.define(
        "eqtn",
        choice([
            sequence([
                ns.call("ident"),
                punct('('),
                optional(ns.call("ptrn")),
                punct(')'),
                punct('='),
                ns.call("expr"),
            ]),
            sequence([ns.call("ptrn"), punct('='), ns.call("ptrn")]),
        ]),
    )?;
    ns.define(
        "ptrn",
        sequence([
            ns.call("pterm"),
            optional(sequence([punct(','), ns.call("ptrn")])),
        ]),
    )?;
    ns.define(
        "pterm",
        choice([
            kw(Keyword::Any),
            sequence([punct('$'), ns.call("term")]),
            sequence([punct('('), optional(ns.call("ptrn")), punct(')')]),
            ns.call("const"),
            ns.call("ident"),
        ]),
    )?;
    ns.define(
        "const",
        choice([
            ns.call("block"),
            kw(Keyword::SelfRef),
            sequence([punct('\\'), ns.call("ptrn"), punct('.'), ns.call("expr")]),
            ns.call("symbol"),
            ns.call("number"),
            ns.call("char"),
            ns.call("string"),
            kw(Keyword::Nil),
            kw(Keyword::True),
            kw(Keyword::False),
            kw(Keyword::Undefined),
        ]),
    )?;
    ns.define(
        "ident",
        token_class("identifier", |t| matches!(t, Token::Ident(_))),
    )?;
    ns.define(
        "symbol",
        token_class("symbol", |t| matches!(t, Token::Symbol(_))),
    )?;
    ns.define(
        "number",
        token_class("number", |t| matches!(t, Token::Number(_))),
    )?;
    ns.define(
        "char",
        token_class("character literal", |t| matches!(t, Token::Char(_))),
    )?;
    ns.define(
        "string",
        token_class("string literal", |t| matches!(t, Token::String(_))),
    )?;
    Ok(())
}
