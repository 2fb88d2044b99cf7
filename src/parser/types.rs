use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorKind},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Parses a type annotation:
/// `Number | Boolean | Text | Any | [ TYPE ] | ( TYPE ) -> TYPE`.
///
/// The annotation grammar is closed and has no precedence, so this is
/// plain recursion rather than a dispatch-table parse.
pub fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    let token = parser.advance().clone();

    match token.kind {
        TokenKind::NumberType => Ok(Type::Number),
        TokenKind::BooleanType => Ok(Type::Boolean),
        TokenKind::TextType => Ok(Type::Text),
        TokenKind::AnyType => Ok(Type::Any),
        TokenKind::OpenBracket => {
            let element = parse_type(parser)?;
            parser.expect(
                TokenKind::CloseBracket,
                "right bracket expected after the element type",
            )?;
            Ok(Type::list(element))
        }
        TokenKind::OpenParen => {
            let parameter = parse_type(parser)?;
            parser.expect(
                TokenKind::CloseParen,
                "right parenthesis expected after the parameter type",
            )?;
            parser.expect(TokenKind::Arrow, "arrow expected before the return type")?;
            let ret = parse_type(parser)?;
            Ok(Type::function(parameter, ret))
        }
        _ => Err(Error::new(
            ErrorKind::InvalidType {
                token: token.text.clone(),
            },
            token.diagnostic_line(),
        )),
    }
}
