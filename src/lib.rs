//! Luma: the front end and evaluator of a small expression-oriented
//! language.
//!
//! A single pass turns the token stream into type-checked declarations:
//! parsing, subtyping checks, and scope resolution happen together, and
//! every resulting expression node evaluates directly. Programs are a
//! sequence of `let name := expression .` declarations, the last of
//! which must bind `main` to a function from `Text`.
//!
//! [`check`] parses and statically validates a program; [`run`] checks
//! it, applies `main` to the given input, and renders the result.

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod runtime;
pub mod stdlib;

use std::rc::Rc;

use ast::{
    expressions::{Declaration, Expr},
    types::Type,
};
use errors::errors::{Error, ErrorKind};
use lexer::lexer::tokenize;
use parser::{decl::parse_program, parser::Parser};
use runtime::values::Value;

/// Parses and statically validates `source`, returning the `main`
/// declaration. The final declaration must bind `main` to a function
/// whose parameter type is `Text`; everything else is a static error
/// raised at its point of detection.
pub fn check(source: &str) -> Result<Declaration, Error> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens);
    let program = parse_program(&mut parser)?;

    let main = program
        .last()
        .ok_or_else(|| Error::new(ErrorKind::MissingMain, None))?;

    let entry_is_valid = main.name() == "main"
        && matches!(&main.expr, Expr::Function(function) if function.parameter.ty == Type::Text);
    if !entry_is_valid {
        return Err(Error::new(
            ErrorKind::InvalidEntryPoint,
            main.token.diagnostic_line(),
        ));
    }

    Ok(main.clone())
}

/// Checks `source`, applies its `main` closure to a text literal built
/// from `input`, and renders the resulting value as text.
pub fn run(input: &str, source: &str) -> Result<String, Error> {
    let main = check(source)?;

    let closure = match main.expr.evaluate()? {
        Value::Closure(closure) => closure,
        _ => unreachable!("check validated that the entry point is a function literal"),
    };

    let result = closure.apply(&Expr::Text(Rc::from(input)))?;
    Ok(result.to_string())
}
