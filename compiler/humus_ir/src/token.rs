//! Lexical tokens.
//!
//! Produced by the token grammar and consumed by the syntax grammar. Every
//! reserved word and punctuation character is its own token, so the syntax
//! grammar matches them with plain terminals.

use std::fmt;

use serde::Serialize;

/// Reserved words. `?` and `_` are reserved too, even though they are
/// spelled with name characters rather than letters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    Let,
    In,
    After,
    Send,
    To,
    Create,
    With,
    Become,
    Throw,
    If,
    Elif,
    Else,
    Case,
    Of,
    End,
    New,
    SelfRef,
    Nil,
    True,
    False,
    Undefined,
    Any,
}

impl Keyword {
    pub const ALL: [Keyword; 22] = [
        Keyword::Let,
        Keyword::In,
        Keyword::After,
        Keyword::Send,
        Keyword::To,
        Keyword::Create,
        Keyword::With,
        Keyword::Become,
        Keyword::Throw,
        Keyword::If,
        Keyword::Elif,
        Keyword::Else,
        Keyword::Case,
        Keyword::Of,
        Keyword::End,
        Keyword::New,
        Keyword::SelfRef,
        Keyword::Nil,
        Keyword::True,
        Keyword::False,
        Keyword::Undefined,
        Keyword::Any,
    ];

    /// Source spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::Let => "LET",
            Keyword::In => "IN",
            Keyword::After => "AFTER",
            Keyword::Send => "SEND",
            Keyword::To => "TO",
            Keyword::Create => "CREATE",
            Keyword::With => "WITH",
            Keyword::Become => "BECOME",
            Keyword::Throw => "THROW",
            Keyword::If => "IF",
            Keyword::Elif => "ELIF",
            Keyword::Else => "ELSE",
            Keyword::Case => "CASE",
            Keyword::Of => "OF",
            Keyword::End => "END",
            Keyword::New => "NEW",
            Keyword::SelfRef => "SELF",
            Keyword::Nil => "NIL",
            Keyword::True => "TRUE",
            Keyword::False => "FALSE",
            Keyword::Undefined => "?",
            Keyword::Any => "_",
        }
    }

    /// Keyword spelled `name`, if it is one.
    pub fn from_name(name: &str) -> Option<Keyword> {
        Keyword::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

/// Serializes as the source spelling.
impl Serialize for Keyword {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric literal, `-16#2a` style.
///
/// `digits` are kept as written; `value` is `None` when they are not valid in
/// `radix` or do not fit an `i64`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Number {
    pub sign: Option<char>,
    pub radix: u32,
    pub digits: String,
    pub value: Option<i64>,
}

impl Number {
    /// Interpret `digits` in `radix`, applying `sign`.
    pub fn new(sign: Option<char>, radix: u32, digits: impl Into<String>) -> Self {
        let digits = digits.into();
        let value = if (2..=36).contains(&radix) {
            i64::from_str_radix(&digits, radix)
                .ok()
                .map(|v| if sign == Some('-') { -v } else { v })
        } else {
            None
        };
        Number {
            sign,
            radix,
            digits,
            value,
        }
    }

    /// Plain decimal number.
    pub fn decimal(value: i64) -> Self {
        let sign = (value < 0).then_some('-');
        Number::new(sign, 10, value.unsigned_abs().to_string())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sign) = self.sign {
            write!(f, "{sign}")?;
        }
        if self.radix != 10 {
            write!(f, "{}#", self.radix)?;
        }
        f.write_str(&self.digits)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Token {
    Keyword(Keyword),
    Punct(char),
    Ident(String),
    Symbol(String),
    String(String),
    Char(char),
    Number(Number),
}

impl Token {
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Token::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    pub fn is_punct(&self, c: char) -> bool {
        matches!(self, Token::Punct(p) if *p == c)
    }

    /// Category name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Keyword(_) => "keyword",
            Token::Punct(_) => "punctuation",
            Token::Ident(_) => "identifier",
            Token::Symbol(_) => "symbol",
            Token::String(_) => "string",
            Token::Char(_) => "char",
            Token::Number(_) => "number",
        }
    }
}

/// Renders tokens the way they are written in source.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(k) => write!(f, "{k}"),
            Token::Punct(c) => write!(f, "'{c}'"),
            Token::Ident(name) => f.write_str(name),
            Token::Symbol(name) => write!(f, "#{name}"),
            Token::String(s) => write!(f, "{s:?}"),
            Token::Char(c) => write!(f, "{c:?}"),
            Token::Number(n) => write!(f, "{n}"),
        }
    }
}

#[cfg(test)]
mod tests;
