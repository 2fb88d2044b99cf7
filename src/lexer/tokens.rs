use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("function", TokenKind::Function);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("end", TokenKind::End);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("not", TokenKind::Not);
        map.insert("Number", TokenKind::NumberType);
        map.insert("Boolean", TokenKind::BooleanType);
        map.insert("Text", TokenKind::TextType);
        map.insert("Any", TokenKind::AnyType);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Eof,
    Number,
    Text,
    Identifier,

    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,

    DefinedAs, // :=
    Dot,
    Comma,
    Colon,
    Arrow, // ->

    Plus,
    Dash,
    Star,
    Slash,
    Percent,
    Caret,

    Equals,    // =
    NotEquals, // !=
    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    // Reserved
    Let,
    Function,
    If,
    Then,
    Else,
    End,
    True,
    False,
    And,
    Or,
    Not,
    NumberType,
    BooleanType,
    TextType,
    AnyType,
}

impl TokenKind {
    /// Whether this kind is a reserved word, i.e. lexes from identifier
    /// text but can never be a declared name.
    pub fn is_reserved(&self) -> bool {
        RESERVED_LOOKUP.values().any(|kind| kind == self)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
}

impl Token {
    /// The line to attach to a diagnostic about this token. The `Eof`
    /// token has no meaningful line and renders as "end of file".
    pub fn diagnostic_line(&self) -> Option<u32> {
        if self.kind == TokenKind::Eof {
            None
        } else {
            Some(self.line)
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:?})", self.kind, self.text)
    }
}
