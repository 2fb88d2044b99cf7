use std::rc::Rc;

use crate::{
    ast::{
        expressions::{Expr, FunctionLit},
        types::Type,
    },
    errors::errors::{Error, ErrorKind},
    lexer::tokens::TokenKind,
    runtime::slot::Parameter,
};

use super::{
    lookups::{infix_precedence, rule_for, Precedence},
    parser::Parser,
    types::parse_type,
};

/// The precedence-climbing driver. The current token must have a prefix
/// rule; afterwards, infix rules apply while the next token binds more
/// tightly than `min`.
pub fn parse_expr(parser: &mut Parser, min: Precedence) -> Result<Expr, Error> {
    let token_kind = parser.current_token_kind();
    let prefix = rule_for(token_kind).and_then(|rule| rule.prefix).ok_or_else(|| {
        Error::new(
            ErrorKind::ExpressionExpected,
            parser.current_token().diagnostic_line(),
        )
    })?;

    let mut left = prefix(parser)?;

    while infix_precedence(parser.current_token_kind()) > min {
        let token_kind = parser.current_token_kind();
        let infix = rule_for(token_kind).and_then(|rule| rule.infix).ok_or_else(|| {
            Error::new(
                ErrorKind::OperatorExpected,
                parser.current_token().diagnostic_line(),
            )
        })?;

        left = infix(parser, left)?;
    }

    Ok(left)
}

pub fn parse_literal(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    match token.kind {
        TokenKind::Number => token.text.parse::<f64>().map(Expr::Number).map_err(|_| {
            Error::new(
                ErrorKind::InvalidNumber {
                    token: token.text.clone(),
                },
                token.diagnostic_line(),
            )
        }),
        TokenKind::Text => Ok(Expr::Text(Rc::from(token.text.as_str()))),
        TokenKind::True => Ok(Expr::Boolean(true)),
        TokenKind::False => Ok(Expr::Boolean(false)),
        _ => Err(Error::new(
            ErrorKind::ExpressionExpected,
            token.diagnostic_line(),
        )),
    }
}

/// A bare identifier: resolution returns the declared node itself, so a
/// reference shares structure with its declaration.
pub fn parse_reference(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();
    let context = Rc::clone(parser.context());
    context.resolve(&token)
}

/// `- e` and `not e`. The operand binds at `Exponentiation`, so only
/// invocation sits tighter: `-f(x)` negates the call's result.
pub fn parse_unary(parser: &mut Parser) -> Result<Expr, Error> {
    let operator = parser.advance().clone();
    let operand = parse_expr(parser, Precedence::Exponentiation)?;
    Expr::unary(&operator, operand)
}

pub fn parse_binary(parser: &mut Parser, left: Expr) -> Result<Expr, Error> {
    let operator = parser.advance().clone();

    // Exponentiation is right-associative: its right operand re-enters
    // one level below its own, every other operator at its own level.
    let right_min = match operator.kind {
        TokenKind::Caret => Precedence::Multiplicative,
        kind => infix_precedence(kind),
    };

    let right = parse_expr(parser, right_min)?;
    Expr::binary(left, &operator, right)
}

/// `( e )` — transparent grouping, no node of its own.
pub fn parse_grouping(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let grouped = parse_expr(parser, Precedence::None)?;
    parser.expect(TokenKind::CloseParen, "right parenthesis expected")?;

    Ok(grouped)
}

/// `[ e1, e2, ... ]` — possibly empty, elements unconstrained.
pub fn parse_list(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let mut elements = vec![];

    while parser.current_token_kind() != TokenKind::CloseBracket {
        elements.push(parse_expr(parser, Precedence::None)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseBracket, "right bracket expected to close the list")?;
    Ok(Expr::list(elements))
}

/// `if C1 then B1 [if C2 then B2 ...] else Bn end`. Guards must type
/// `Boolean`; the final `else` body is mandatory.
pub fn parse_conditional(parser: &mut Parser) -> Result<Expr, Error> {
    let keyword = parser.advance().clone();
    let mut conditions = vec![];
    let mut bodies = vec![];

    loop {
        let condition_line = parser.current_token().diagnostic_line();
        let condition = parse_expr(parser, Precedence::None)?;
        if condition.ty() != Type::Boolean {
            return Err(Error::new(
                ErrorKind::ConditionNotBoolean {
                    received: condition.ty().to_string(),
                },
                condition_line,
            ));
        }
        conditions.push(condition);

        parser.expect(TokenKind::Then, "then expected after the condition")?;
        bodies.push(parse_expr(parser, Precedence::None)?);

        if parser.current_token_kind() == TokenKind::If {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::Else, "else expected before the final body")?;
    bodies.push(parse_expr(parser, Precedence::None)?);
    parser.expect(TokenKind::End, "end expected to close the conditional")?;

    Expr::conditional(conditions, bodies, keyword.diagnostic_line())
}

/// `function ( TYPE name ) -> TYPE : body end` in expression position.
pub fn parse_function(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let function = parse_function_header(parser)?;
    parse_function_body(parser, &function)?;

    Ok(Expr::Function(function))
}

/// Parses everything up to and including the `:`, producing a literal
/// whose body is attached later. Declarations use the gap between
/// header and body to bind the name, which is what enables recursion.
pub fn parse_function_header(parser: &mut Parser) -> Result<Rc<FunctionLit>, Error> {
    parser.expect(TokenKind::OpenParen, "left parenthesis expected after function")?;
    let parameter_ty = parse_type(parser)?;
    let parameter = parser.expect(TokenKind::Identifier, "parameter name expected")?;
    parser.expect(TokenKind::CloseParen, "right parenthesis expected after the parameter")?;
    parser.expect(TokenKind::Arrow, "arrow expected before the return type")?;
    let return_ty = parse_type(parser)?;
    parser.expect(TokenKind::Colon, "colon expected before the function body")?;

    Ok(Rc::new(FunctionLit::new(
        Parameter::new(parameter_ty, &parameter.text),
        return_ty,
    )))
}

/// Parses the body inside a fresh scope owned by `function`, checks it
/// against the declared return type, and freezes the upvalues the body
/// parse accumulated.
pub fn parse_function_body(parser: &mut Parser, function: &Rc<FunctionLit>) -> Result<(), Error> {
    parser.push_context(Rc::clone(function));

    let body = parse_expr(parser, Precedence::None)?;
    if !body.ty().is_subtype_of(&function.return_type) {
        return Err(Error::new(
            ErrorKind::TypeMismatch {
                expected: function.return_type.to_string(),
                received: body.ty().to_string(),
            },
            parser.previous_token().diagnostic_line(),
        ));
    }

    function.freeze_upvalues(parser.context().take_upvalues());
    parser.pop_context();

    parser.expect(TokenKind::End, "end expected to close the function")?;
    function.set_body(body);

    Ok(())
}

/// `f ( arg )` — the argument parses first, then the target must be
/// function-typed and the argument a subtype of its parameter.
pub fn parse_invocation(parser: &mut Parser, left: Expr) -> Result<Expr, Error> {
    parser.advance();

    let argument = parse_expr(parser, Precedence::None)?;
    let invocation = Expr::invocation(left, argument, parser.previous_token().diagnostic_line())?;
    parser.expect(TokenKind::CloseParen, "right parenthesis expected after the argument")?;

    Ok(invocation)
}
