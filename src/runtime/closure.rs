use std::rc::Rc;

use crate::{
    ast::expressions::{Expr, FunctionLit},
    errors::errors::Error,
};

use super::{
    slot::{Parameter, SlotGuard},
    values::Value,
};

/// A function literal paired with a snapshot of what each of its
/// upvalue slots held at the moment the literal was evaluated. The
/// snapshot is immutable; only live slots are touched during
/// application.
pub struct Closure {
    function: Rc<FunctionLit>,
    captured: Vec<(Rc<Parameter>, Option<Value>)>,
}

impl Closure {
    /// Snapshots the current value of every declared upvalue slot.
    pub fn new(function: Rc<FunctionLit>) -> Self {
        let captured = function
            .upvalues()
            .iter()
            .map(|parameter| (Rc::clone(parameter), parameter.slot.read()))
            .collect();

        Closure { function, captured }
    }

    /// Applies the closure to an argument expression:
    /// swap every captured snapshot into its live slot, evaluate the
    /// argument, bind the parameter slot, evaluate the body, and let
    /// the guards restore parameter and upvalues in reverse order.
    /// Restoration happens even when evaluation fails partway.
    pub fn apply(&self, argument: &Expr) -> Result<Value, Error> {
        let _captured: Vec<SlotGuard<'_>> = self
            .captured
            .iter()
            .map(|(parameter, snapshot)| parameter.slot.swap_in(snapshot.clone()))
            .collect();

        let argument = argument.evaluate()?;
        let _bound = self.function.parameter.slot.swap_in(Some(argument));

        self.function.body().evaluate()
    }
}

impl std::fmt::Debug for Closure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Closure({})", self.function.ty())
    }
}
