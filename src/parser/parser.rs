use std::rc::Rc;

use crate::{
    ast::expressions::FunctionLit,
    errors::errors::{Error, ErrorKind},
    lexer::tokens::{Token, TokenKind},
    stdlib::standard_library,
};

use super::context::Context;

/// The parser state: a forward cursor over the token stream plus the
/// current lexical scope. Declarations and lookups go through the
/// scope; the dispatch tables live in [`super::lookups`] as statics.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    context: Rc<Context>,
}

impl Parser {
    /// A fresh parser over `tokens`, scoped to a fresh root context
    /// seeded with the standard library.
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            pos: 0,
            context: Context::root(standard_library()),
        }
    }

    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    /// The most recently consumed token.
    pub fn previous_token(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    /// Advances past the current token and returns it. The cursor never
    /// moves past the trailing `Eof` token.
    pub fn advance(&mut self) -> &Token {
        let current = self.pos;
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[current]
    }

    /// Consumes a token of the expected kind, or fails with the given
    /// grammar expectation as the diagnostic.
    pub fn expect(&mut self, expected_kind: TokenKind, message: &str) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            return Err(Error::new(
                ErrorKind::UnexpectedToken {
                    message: String::from(message),
                    token: token.text.clone(),
                },
                token.diagnostic_line(),
            ));
        }

        Ok(self.advance().clone())
    }

    pub fn at_eof(&self) -> bool {
        self.current_token_kind() == TokenKind::Eof
    }

    pub fn context(&self) -> &Rc<Context> {
        &self.context
    }

    /// Enters the body scope of a function literal.
    pub fn push_context(&mut self, function: Rc<FunctionLit>) {
        self.context = Context::child(Rc::clone(&self.context), function);
    }

    /// Leaves the current body scope.
    pub fn pop_context(&mut self) {
        self.context = self
            .context
            .parent()
            .expect("body scopes always have a parent");
    }
}
