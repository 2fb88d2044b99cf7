use std::rc::Rc;

use crate::{
    ast::expressions::{Declaration, Expr},
    errors::errors::{Error, ErrorKind},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_expr, parse_function_body, parse_function_header},
    lookups::Precedence,
    parser::Parser,
};

/// `let name := [function literal | expression] .`
///
/// A function declaration binds its name before the body parses, so
/// the body can invoke the function directly. Other declarations are
/// not visible to their own right-hand side.
pub fn parse_declaration(parser: &mut Parser) -> Result<Declaration, Error> {
    parser.expect(TokenKind::Let, "declarations begin with let")?;

    let current = parser.current_token();
    if current.kind.is_reserved() {
        return Err(Error::new(
            ErrorKind::ReservedName {
                name: current.text.clone(),
            },
            current.diagnostic_line(),
        ));
    }
    let identifier = parser.expect(TokenKind::Identifier, "declarations require a name")?;
    parser.expect(TokenKind::DefinedAs, "declarations require :=")?;

    let declaration = if parser.current_token_kind() == TokenKind::Function {
        parser.advance();
        let function = parse_function_header(parser)?;
        let declaration = parser
            .context()
            .declare(&identifier, Expr::Function(Rc::clone(&function)))?;
        parse_function_body(parser, &function)?;
        declaration
    } else {
        let expr = parse_expr(parser, Precedence::None)?;
        parser.context().declare(&identifier, expr)?
    };

    parser.expect(TokenKind::Dot, "declarations end with .")?;
    Ok(declaration)
}

/// Parses the whole program: one or more declarations, top to bottom.
pub fn parse_program(parser: &mut Parser) -> Result<Vec<Declaration>, Error> {
    let mut declarations = vec![];

    while !parser.at_eof() {
        declarations.push(parse_declaration(parser)?);
    }

    Ok(declarations)
}
