//! Unit tests for slots, closures, and values: the swap/restore
//! discipline and capture-at-creation semantics.

use std::rc::Rc;

use crate::{
    ast::{
        expressions::{Expr, FunctionLit},
        types::Type,
    },
    errors::errors::ErrorKind,
    runtime::{
        closure::Closure,
        slot::{Parameter, Slot},
        values::Value,
    },
};

#[test]
fn test_slot_guard_restores_on_drop() {
    let slot = Slot::default();
    assert_eq!(slot.read(), None);

    {
        let _outer = slot.swap_in(Some(Value::Number(1.0)));
        assert_eq!(slot.read(), Some(Value::Number(1.0)));

        {
            let _inner = slot.swap_in(Some(Value::Number(2.0)));
            assert_eq!(slot.read(), Some(Value::Number(2.0)));
        }

        assert_eq!(slot.read(), Some(Value::Number(1.0)));
    }

    assert_eq!(slot.read(), None);
}

#[test]
fn test_closure_captures_at_creation_time() {
    let outer = Rc::new(Parameter::new(Type::Number, "x"));

    // function(Number y) -> Number : x end, with x as its upvalue.
    let inner = Rc::new(FunctionLit::new(
        Parameter::new(Type::Number, "y"),
        Type::Number,
    ));
    inner.freeze_upvalues(vec![Rc::clone(&outer)]);
    inner.set_body(Expr::Parameter(Rc::clone(&outer)));

    let _bound = outer.slot.swap_in(Some(Value::Number(10.0)));
    let closure = match Expr::Function(Rc::clone(&inner)).evaluate().unwrap() {
        Value::Closure(closure) => closure,
        other => panic!("expected a closure, got {}", other),
    };

    // The slot moves on after the closure was created.
    let _rebound = outer.slot.swap_in(Some(Value::Number(99.0)));

    // Application must observe the captured 10, not the live 99.
    assert_eq!(
        closure.apply(&Expr::Number(0.0)).unwrap(),
        Value::Number(10.0)
    );

    // And the live slot is restored once application returns.
    assert_eq!(outer.slot.read(), Some(Value::Number(99.0)));
}

#[test]
fn test_sibling_closures_hold_independent_snapshots() {
    let outer = Rc::new(Parameter::new(Type::Number, "x"));
    let inner = Rc::new(FunctionLit::new(
        Parameter::new(Type::Number, "y"),
        Type::Number,
    ));
    inner.freeze_upvalues(vec![Rc::clone(&outer)]);
    inner.set_body(Expr::Parameter(Rc::clone(&outer)));

    let _first_binding = outer.slot.swap_in(Some(Value::Number(1.0)));
    let first = Closure::new(Rc::clone(&inner));

    let _second_binding = outer.slot.swap_in(Some(Value::Number(2.0)));
    let second = Closure::new(Rc::clone(&inner));

    assert_eq!(first.apply(&Expr::Number(0.0)).unwrap(), Value::Number(1.0));
    assert_eq!(second.apply(&Expr::Number(0.0)).unwrap(), Value::Number(2.0));
    // Applying one sibling never disturbs the other's snapshot.
    assert_eq!(first.apply(&Expr::Number(0.0)).unwrap(), Value::Number(1.0));
}

#[test]
fn test_slots_are_restored_when_the_body_fails() {
    let outer = Rc::new(Parameter::new(Type::Number, "x"));
    let never_bound = Rc::new(Parameter::new(Type::Number, "z"));

    let inner = Rc::new(FunctionLit::new(
        Parameter::new(Type::Number, "y"),
        Type::Number,
    ));
    inner.freeze_upvalues(vec![Rc::clone(&outer)]);
    inner.set_body(Expr::Parameter(Rc::clone(&never_bound)));

    let _bound = outer.slot.swap_in(Some(Value::Number(7.0)));
    let closure = Closure::new(Rc::clone(&inner));
    let _rebound = outer.slot.swap_in(Some(Value::Number(8.0)));

    let result = closure.apply(&Expr::Number(0.0));
    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorKind::UnboundParameter { .. }
    ));

    // The failed application still restored the live value.
    assert_eq!(outer.slot.read(), Some(Value::Number(8.0)));
}

#[test]
fn test_unbound_parameter_read_is_an_error() {
    let parameter = Rc::new(Parameter::new(Type::Number, "x"));
    let result = Expr::Parameter(parameter).evaluate();

    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorKind::UnboundParameter { .. }
    ));
}

#[test]
fn test_value_equality() {
    assert_eq!(Value::Number(1.0), Value::Number(1.0));
    assert_ne!(Value::Number(1.0), Value::Boolean(true));
    assert_eq!(
        Value::List(Rc::new(vec![Value::Number(1.0)])),
        Value::List(Rc::new(vec![Value::Number(1.0)]))
    );
    assert_ne!(
        Value::List(Rc::new(vec![Value::Number(1.0)])),
        Value::List(Rc::new(vec![]))
    );
}

#[test]
fn test_value_rendering() {
    assert_eq!(Value::Number(120.0).to_string(), "120");
    assert_eq!(Value::Number(2.5).to_string(), "2.5");
    assert_eq!(Value::Boolean(true).to_string(), "true");
    assert_eq!(Value::Text(Rc::from("hi")).to_string(), "hi");
    assert_eq!(
        Value::List(Rc::new(vec![Value::Number(1.0), Value::Number(2.0)])).to_string(),
        "[1, 2]"
    );
}
