use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorKind},
    mk_default_handler, mk_token,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: u32,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            tokens: vec![],
            source: String::from(source),
            pos: 0,
            line: 1,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Counts the newlines in a just-consumed stretch of source.
    pub fn track_lines(&mut self, consumed: &str) {
        self.line += consumed.matches('\n').count() as u32;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    let kind = RESERVED_LOOKUP
        .get(matched.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.push(mk_token!(kind, matched.clone(), lexer.line()));
    lexer.advance_n(matched.len());
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    lexer.push(mk_token!(TokenKind::Number, matched.clone(), lexer.line()));
    lexer.advance_n(matched.len());
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    lexer.advance_n(matched.len());
    lexer.track_lines(&matched);
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let start_line = lexer.line();

    // Strip the surrounding quotes, then process escapes.
    let raw = &matched[1..matched.len() - 1];
    let mut text = String::new();
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => text.push('\n'),
                Some('t') => text.push('\t'),
                Some('\\') => text.push('\\'),
                Some('"') => text.push('"'),
                Some(other) => {
                    text.push('\\');
                    text.push(other);
                }
                None => text.push('\\'),
            }
        } else {
            text.push(ch);
        }
    }

    lexer.advance_n(matched.len());
    lexer.track_lines(&matched);
    lexer.push(mk_token!(TokenKind::Text, text, start_line));
}

fn build_patterns() -> Vec<RegexPattern> {
    vec![
        RegexPattern { regex: Regex::new("[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("[0-9]+(\\.[0-9]+)?").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("\"(?:\\\\.|[^\"\\\\])*\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("//.*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(":=").unwrap(), handler: mk_default_handler!(TokenKind::DefinedAs, ":=") },
        RegexPattern { regex: Regex::new("->").unwrap(), handler: mk_default_handler!(TokenKind::Arrow, "->") },
        RegexPattern { regex: Regex::new("!=").unwrap(), handler: mk_default_handler!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("<=").unwrap(), handler: mk_default_handler!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new(">=").unwrap(), handler: mk_default_handler!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new("\\(").unwrap(), handler: mk_default_handler!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("\\)").unwrap(), handler: mk_default_handler!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("\\[").unwrap(), handler: mk_default_handler!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new("\\]").unwrap(), handler: mk_default_handler!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new(",").unwrap(), handler: mk_default_handler!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new(":").unwrap(), handler: mk_default_handler!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("\\.").unwrap(), handler: mk_default_handler!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new("\\^").unwrap(), handler: mk_default_handler!(TokenKind::Caret, "^") },
        RegexPattern { regex: Regex::new("\\*").unwrap(), handler: mk_default_handler!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("/").unwrap(), handler: mk_default_handler!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("%").unwrap(), handler: mk_default_handler!(TokenKind::Percent, "%") },
        RegexPattern { regex: Regex::new("\\+").unwrap(), handler: mk_default_handler!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("-").unwrap(), handler: mk_default_handler!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("=").unwrap(), handler: mk_default_handler!(TokenKind::Equals, "=") },
        RegexPattern { regex: Regex::new("<").unwrap(), handler: mk_default_handler!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new(">").unwrap(), handler: mk_default_handler!(TokenKind::Greater, ">") },
    ]
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut lexer = Lexer::new(source);
    let patterns = build_patterns();

    while !lexer.at_eof() {
        let mut matched = false;

        for pattern in patterns.iter() {
            let found = pattern.regex.find(lexer.remainder());

            if let Some(found) = found {
                if found.start() == 0 {
                    (pattern.handler)(&mut lexer, &pattern.regex);
                    matched = true;
                    break;
                }
            }
        }

        if !matched {
            let symbol = lexer.remainder().chars().next().unwrap_or_default();
            return Err(Error::new(
                ErrorKind::UnrecognisedSymbol {
                    symbol: symbol.to_string(),
                },
                Some(lexer.line()),
            ));
        }
    }

    let line = lexer.line();
    lexer.push(mk_token!(TokenKind::Eof, String::from("EOF"), line));
    Ok(lexer.tokens)
}
