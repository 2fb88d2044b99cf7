//! The standard library: the bindings every program starts with.
//!
//! Each builtin is an ordinary expression node with a `Function` type,
//! backed by a plain fn pointer, so user code invokes it exactly like
//! any declared function.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{expressions::Expr, types::Type},
    runtime::values::{NativeFn, Value},
};

/// The initial bindings of the outermost scope, rebuilt fresh for every
/// parse so runs never share state.
pub fn standard_library() -> HashMap<String, Expr> {
    let mut bindings = HashMap::new();

    bind(&mut bindings, "length", Type::function(Type::Text, Type::Number), native_length);
    bind(&mut bindings, "number", Type::function(Type::Text, Type::Number), native_number);
    bind(&mut bindings, "text", Type::function(Type::Any, Type::Text), native_text);
    bind(&mut bindings, "floor", Type::function(Type::Number, Type::Number), native_floor);
    bind(&mut bindings, "count", Type::function(Type::list(Type::Any), Type::Number), native_count);

    bindings
}

fn bind(
    bindings: &mut HashMap<String, Expr>,
    name: &'static str,
    ty: Type,
    call: fn(Value) -> Value,
) {
    bindings.insert(String::from(name), Expr::builtin(NativeFn { name, call }, ty));
}

fn native_length(value: Value) -> Value {
    match value {
        Value::Text(text) => Value::Number(text.chars().count() as f64),
        _ => unreachable!("length's parameter type is Text"),
    }
}

// Unparseable text becomes NaN rather than a runtime failure.
fn native_number(value: Value) -> Value {
    match value {
        Value::Text(text) => Value::Number(text.trim().parse().unwrap_or(f64::NAN)),
        _ => unreachable!("number's parameter type is Text"),
    }
}

fn native_text(value: Value) -> Value {
    Value::Text(Rc::from(value.to_string().as_str()))
}

fn native_floor(value: Value) -> Value {
    match value {
        Value::Number(number) => Value::Number(number.floor()),
        _ => unreachable!("floor's parameter type is Number"),
    }
}

fn native_count(value: Value) -> Value {
    match value {
        Value::List(elements) => Value::Number(elements.len() as f64),
        _ => unreachable!("count's parameter type is a list"),
    }
}
