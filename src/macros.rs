//! Helper macros for the lexer.
//!
//! `mk_token!` builds a [`Token`](crate::lexer::tokens::Token) and
//! `mk_default_handler!` generates a handler for fixed-text tokens,
//! keeping the pattern table in `lexer.rs` declarative.

#[macro_export]
macro_rules! mk_token {
    ($kind:expr, $text:expr, $line:expr) => {
        Token {
            kind: $kind,
            text: $text,
            line: $line,
        }
    };
}

/// Generates a lexer handler for a token whose text is fixed, pushing
/// the token at the current line and advancing past it.
#[macro_export]
macro_rules! mk_default_handler {
    ($kind:expr, $text:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| {
            lexer.push(mk_token!($kind, String::from($text), lexer.line()));
            lexer.advance_n($text.len());
        }
    };
}
