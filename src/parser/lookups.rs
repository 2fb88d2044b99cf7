use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{ast::expressions::Expr, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser};

/// Infix binding precedence, lowest to highest. `Call` is the level of
/// the invocation rule for `(`, above every operator.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum Precedence {
    None,
    Or,
    And,
    Equality,
    Comparison,
    Additive,
    Multiplicative,
    Exponentiation,
    Call,
}

pub type PrefixHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type InfixHandler = fn(&mut Parser, Expr) -> Result<Expr, Error>;

/// One dispatch-table entry: how a token kind may begin an expression,
/// how it may continue one, and how tightly it binds when it does.
pub struct TokenRule {
    pub prefix: Option<PrefixHandler>,
    pub infix: Option<InfixHandler>,
    pub precedence: Precedence,
}

pub type TokenLookup = HashMap<TokenKind, TokenRule>;

lazy_static! {
    /// The process-wide dispatch table. Built once at startup, read-only
    /// afterwards.
    static ref TOKEN_LOOKUPS: TokenLookup = create_token_lookups();
}

pub fn rule_for(kind: TokenKind) -> Option<&'static TokenRule> {
    TOKEN_LOOKUPS.get(&kind)
}

pub fn infix_precedence(kind: TokenKind) -> Precedence {
    rule_for(kind)
        .map(|rule| rule.precedence)
        .unwrap_or(Precedence::None)
}

fn create_token_lookups() -> TokenLookup {
    let mut table = TokenLookup::new();

    // Literals and the constructs that can begin an expression
    nud(&mut table, TokenKind::Number, parse_literal);
    nud(&mut table, TokenKind::Text, parse_literal);
    nud(&mut table, TokenKind::True, parse_literal);
    nud(&mut table, TokenKind::False, parse_literal);
    nud(&mut table, TokenKind::Identifier, parse_reference);
    nud(&mut table, TokenKind::Dash, parse_unary);
    nud(&mut table, TokenKind::Not, parse_unary);
    nud(&mut table, TokenKind::OpenParen, parse_grouping);
    nud(&mut table, TokenKind::OpenBracket, parse_list);
    nud(&mut table, TokenKind::If, parse_conditional);
    nud(&mut table, TokenKind::Function, parse_function);

    // Logical
    led(&mut table, TokenKind::Or, Precedence::Or, parse_binary);
    led(&mut table, TokenKind::And, Precedence::And, parse_binary);

    // Equality and comparison
    led(&mut table, TokenKind::Equals, Precedence::Equality, parse_binary);
    led(&mut table, TokenKind::NotEquals, Precedence::Equality, parse_binary);
    led(&mut table, TokenKind::Less, Precedence::Comparison, parse_binary);
    led(&mut table, TokenKind::LessEquals, Precedence::Comparison, parse_binary);
    led(&mut table, TokenKind::Greater, Precedence::Comparison, parse_binary);
    led(&mut table, TokenKind::GreaterEquals, Precedence::Comparison, parse_binary);

    // Arithmetic
    led(&mut table, TokenKind::Plus, Precedence::Additive, parse_binary);
    led(&mut table, TokenKind::Dash, Precedence::Additive, parse_binary);
    led(&mut table, TokenKind::Star, Precedence::Multiplicative, parse_binary);
    led(&mut table, TokenKind::Slash, Precedence::Multiplicative, parse_binary);
    led(&mut table, TokenKind::Percent, Precedence::Multiplicative, parse_binary);
    led(&mut table, TokenKind::Caret, Precedence::Exponentiation, parse_binary);

    // Invocation
    led(&mut table, TokenKind::OpenParen, Precedence::Call, parse_invocation);

    table
}

fn nud(table: &mut TokenLookup, kind: TokenKind, handler: PrefixHandler) {
    let rule = table.entry(kind).or_insert(TokenRule {
        prefix: None,
        infix: None,
        precedence: Precedence::None,
    });
    rule.prefix = Some(handler);
}

fn led(table: &mut TokenLookup, kind: TokenKind, precedence: Precedence, handler: InfixHandler) {
    let rule = table.entry(kind).or_insert(TokenRule {
        prefix: None,
        infix: None,
        precedence: Precedence::None,
    });
    rule.infix = Some(handler);
    rule.precedence = precedence;
}
