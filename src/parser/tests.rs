//! Unit tests for the parser: precedence, construct grammar, and the
//! static checks raised while nodes are built.

use crate::{
    ast::{expressions::Expr, types::Type},
    errors::errors::{Error, ErrorKind},
    lexer::lexer::tokenize,
    runtime::values::Value,
};

use super::{expr::parse_expr, lookups::Precedence, parser::Parser};

fn parse_expression(source: &str) -> Result<Expr, Error> {
    let tokens = tokenize(source).unwrap();
    let mut parser = Parser::new(tokens);
    parse_expr(&mut parser, Precedence::None)
}

fn evaluate(source: &str) -> Value {
    parse_expression(source).unwrap().evaluate().unwrap()
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    assert_eq!(evaluate("2 + 3 * 4"), Value::Number(14.0));
}

#[test]
fn test_grouping_overrides_precedence() {
    assert_eq!(evaluate("(2 + 3) * 4"), Value::Number(20.0));
}

#[test]
fn test_exponentiation_is_right_associative() {
    assert_eq!(evaluate("2 ^ 3 ^ 2"), Value::Number(512.0));
}

#[test]
fn test_exponentiation_binds_tighter_than_multiplication() {
    assert_eq!(evaluate("2 * 3 ^ 2"), Value::Number(18.0));
}

#[test]
fn test_comparison_binds_looser_than_addition() {
    assert_eq!(evaluate("2 + 3 < 6"), Value::Boolean(true));
}

#[test]
fn test_logical_operators() {
    assert_eq!(evaluate("true and false"), Value::Boolean(false));
    assert_eq!(evaluate("true or false"), Value::Boolean(true));
    assert_eq!(evaluate("1 < 2 and 2 < 3"), Value::Boolean(true));
}

#[test]
fn test_unary_operators() {
    assert_eq!(evaluate("-4 + 6"), Value::Number(2.0));
    assert_eq!(evaluate("not true"), Value::Boolean(false));
    assert_eq!(evaluate("not (1 = 2)"), Value::Boolean(true));
}

#[test]
fn test_unary_minus_binds_before_exponentiation() {
    // The operand of unary minus parses at exponentiation level.
    assert_eq!(evaluate("-2 ^ 2"), Value::Number(4.0));
}

#[test]
fn test_modulo() {
    assert_eq!(evaluate("7 % 3"), Value::Number(1.0));
}

#[test]
fn test_equality_on_values() {
    assert_eq!(evaluate("1 = 1"), Value::Boolean(true));
    assert_eq!(evaluate("\"a\" != \"b\""), Value::Boolean(true));
    assert_eq!(evaluate("[1, 2] = [1, 2]"), Value::Boolean(true));
}

#[test]
fn test_conditional_takes_first_true_branch() {
    assert_eq!(
        evaluate("if true then 1 if true then 2 else 3 end"),
        Value::Number(1.0)
    );
}

#[test]
fn test_conditional_falls_through_to_else() {
    assert_eq!(
        evaluate("if false then 1 if false then 2 else 3 end"),
        Value::Number(3.0)
    );
}

#[test]
fn test_list_literal_types() {
    assert_eq!(
        parse_expression("[1, 2, 3]").unwrap().ty(),
        Type::list(Type::Number)
    );
    // Heterogeneous lists are legal and type as [Any].
    assert_eq!(
        parse_expression("[1, true]").unwrap().ty(),
        Type::list(Type::Any)
    );
    assert_eq!(parse_expression("[]").unwrap().ty(), Type::list(Type::Any));
}

#[test]
fn test_empty_list_compares_against_typed_list() {
    assert_eq!(evaluate("[] = [1]"), Value::Boolean(false));
}

#[test]
fn test_arithmetic_requires_numbers() {
    let result = parse_expression("1 + true");
    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn test_logical_requires_booleans() {
    let result = parse_expression("1 and 2");
    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn test_equality_requires_related_types() {
    let result = parse_expression("1 = \"one\"");
    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn test_condition_must_be_boolean() {
    let result = parse_expression("if 1 then 2 else 3 end");
    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorKind::ConditionNotBoolean { .. }
    ));
}

#[test]
fn test_branches_must_be_compatible() {
    let result = parse_expression("if true then 1 else \"one\" end");
    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn test_expression_expected() {
    let error = parse_expression("* 2").unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::ExpressionExpected));
    assert_eq!(error.line(), Some(1));
}

#[test]
fn test_expression_expected_at_end_of_file() {
    let error = parse_expression("2 +").unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::ExpressionExpected));
    assert_eq!(error.line(), None);
}

#[test]
fn test_unresolved_identifier() {
    let error = parse_expression("nowhere").unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::NotDeclared { .. }));
}

#[test]
fn test_stdlib_is_in_scope_for_expressions() {
    assert_eq!(evaluate("length(\"four\")"), Value::Number(4.0));
    assert_eq!(evaluate("count([1, 2, 3])"), Value::Number(3.0));
}

#[test]
fn test_invocation_argument_must_match_parameter() {
    let result = parse_expression("length(5)");
    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn test_only_functions_can_be_invoked() {
    let result = parse_expression("(1 + 2)(3)");
    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorKind::NotInvocable { .. }
    ));
}

#[test]
fn test_function_literal_type() {
    let expr = parse_expression("function(Number x) -> Number : x + 1 end").unwrap();
    assert_eq!(expr.ty(), Type::function(Type::Number, Type::Number));
}

#[test]
fn test_function_body_must_match_return_type() {
    let result = parse_expression("function(Number x) -> Boolean : x + 1 end");
    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn test_function_body_may_be_subtype_of_return_type() {
    let expr = parse_expression("function(Number x) -> Any : x + 1 end").unwrap();
    assert_eq!(expr.ty(), Type::function(Type::Number, Type::Any));
}

#[test]
fn test_parameter_resolves_inside_body() {
    let expr = parse_expression("function(Number x) -> Number : x * x end").unwrap();
    let closure = match expr.evaluate().unwrap() {
        Value::Closure(closure) => closure,
        other => panic!("expected a closure, got {}", other),
    };

    assert_eq!(closure.apply(&Expr::Number(9.0)).unwrap(), Value::Number(81.0));
}

#[test]
fn test_invalid_type_annotation() {
    let result = parse_expression("function(Widget x) -> Number : 1 end");
    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorKind::InvalidType { .. }
    ));
}

#[test]
fn test_function_type_annotation() {
    let expr =
        parse_expression("function((Number) -> Number f) -> Number : f(1) end").unwrap();
    assert_eq!(
        expr.ty(),
        Type::function(Type::function(Type::Number, Type::Number), Type::Number)
    );
}

#[test]
fn test_list_type_annotation() {
    let expr = parse_expression("function([Number] xs) -> Number : count(xs) end").unwrap();
    assert_eq!(
        expr.ty(),
        Type::function(Type::list(Type::Number), Type::Number)
    );
}

#[test]
fn test_error_lines_point_at_the_operator() {
    let error = parse_expression("1 +\ntrue").unwrap_err();
    assert_eq!(error.line(), Some(1));
}
