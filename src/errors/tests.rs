//! Unit tests for error construction and rendering.

use crate::errors::errors::{Error, ErrorKind};

#[test]
fn test_error_carries_line() {
    let error = Error::new(
        ErrorKind::NotDeclared {
            name: "x".to_string(),
        },
        Some(3),
    );

    assert_eq!(error.line(), Some(3));
    assert_eq!(error.to_string(), "Line 3: name \"x\" is not declared");
}

#[test]
fn test_error_without_line_renders_end_of_file() {
    let error = Error::new(ErrorKind::ExpressionExpected, None);

    assert_eq!(error.line(), None);
    assert_eq!(error.to_string(), "end of file: expression expected");
}

#[test]
fn test_type_mismatch_display() {
    let error = Error::new(
        ErrorKind::TypeMismatch {
            expected: "Number".to_string(),
            received: "Text".to_string(),
        },
        Some(7),
    );

    assert_eq!(
        error.to_string(),
        "Line 7: types do not match: expected Number, received Text"
    );
}

#[test]
fn test_unexpected_token_display() {
    let error = Error::new(
        ErrorKind::UnexpectedToken {
            message: "declarations end with .".to_string(),
            token: "let".to_string(),
        },
        Some(2),
    );

    assert_eq!(
        error.to_string(),
        "Line 2: declarations end with ., found \"let\""
    );
}
