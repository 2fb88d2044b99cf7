use std::rc::Rc;

use crate::{
    ast::expressions::{BinaryOp, Expr, IfExpr, Invocation, ListLit, UnaryOp},
    errors::errors::{Error, ErrorKind},
    lexer::tokens::TokenKind,
};

use super::{closure::Closure, values::Value};

impl Expr {
    /// Evaluates the node eagerly. Type errors were excluded when the
    /// node was constructed; the only reachable failure is reading a
    /// parameter slot that was never bound.
    pub fn evaluate(&self) -> Result<Value, Error> {
        match self {
            Expr::Number(number) => Ok(Value::Number(*number)),
            Expr::Boolean(boolean) => Ok(Value::Boolean(*boolean)),
            Expr::Text(text) => Ok(Value::Text(Rc::clone(text))),
            Expr::List(list) => list.evaluate(),
            Expr::Unary(unary) => unary.evaluate(),
            Expr::Binary(binary) => binary.evaluate(),
            Expr::If(conditional) => conditional.evaluate(),
            Expr::Function(function) => {
                Ok(Value::Closure(Rc::new(Closure::new(Rc::clone(function)))))
            }
            Expr::Parameter(parameter) => parameter.slot.read().ok_or_else(|| {
                Error::new(
                    ErrorKind::UnboundParameter {
                        name: parameter.name.clone(),
                    },
                    None,
                )
            }),
            Expr::Invoke(invocation) => invocation.evaluate(),
            Expr::Builtin(builtin) => Ok(Value::Native(builtin.native)),
        }
    }
}

impl ListLit {
    fn evaluate(&self) -> Result<Value, Error> {
        let elements = self
            .elements
            .iter()
            .map(Expr::evaluate)
            .collect::<Result<Vec<Value>, Error>>()?;

        Ok(Value::List(Rc::new(elements)))
    }
}

impl UnaryOp {
    fn evaluate(&self) -> Result<Value, Error> {
        let operand = self.operand.evaluate()?;

        match self.operator.kind {
            TokenKind::Dash => Ok(Value::Number(-as_number(operand))),
            TokenKind::Not => Ok(Value::Boolean(!as_boolean(operand))),
            _ => unreachable!("unary nodes are built from - and not only"),
        }
    }
}

impl BinaryOp {
    fn evaluate(&self) -> Result<Value, Error> {
        let left = self.left.evaluate()?;
        let right = self.right.evaluate()?;

        let value = match self.operator.kind {
            TokenKind::Plus => Value::Number(as_number(left) + as_number(right)),
            TokenKind::Dash => Value::Number(as_number(left) - as_number(right)),
            TokenKind::Star => Value::Number(as_number(left) * as_number(right)),
            TokenKind::Slash => Value::Number(as_number(left) / as_number(right)),
            TokenKind::Percent => Value::Number(as_number(left) % as_number(right)),
            TokenKind::Caret => Value::Number(as_number(left).powf(as_number(right))),
            TokenKind::Less => Value::Boolean(as_number(left) < as_number(right)),
            TokenKind::LessEquals => Value::Boolean(as_number(left) <= as_number(right)),
            TokenKind::Greater => Value::Boolean(as_number(left) > as_number(right)),
            TokenKind::GreaterEquals => Value::Boolean(as_number(left) >= as_number(right)),
            TokenKind::Equals => Value::Boolean(left == right),
            TokenKind::NotEquals => Value::Boolean(left != right),
            TokenKind::And => Value::Boolean(as_boolean(left) && as_boolean(right)),
            TokenKind::Or => Value::Boolean(as_boolean(left) || as_boolean(right)),
            _ => unreachable!("binary nodes are built from operator tokens only"),
        };

        Ok(value)
    }
}

impl IfExpr {
    /// Guards are tested in source order; the first true guard selects
    /// its body, the trailing body runs when none matched. Unselected
    /// bodies are never evaluated.
    fn evaluate(&self) -> Result<Value, Error> {
        for (condition, body) in self.conditions.iter().zip(self.bodies.iter()) {
            if as_boolean(condition.evaluate()?) {
                return body.evaluate();
            }
        }

        self.bodies[self.conditions.len()].evaluate()
    }
}

impl Invocation {
    fn evaluate(&self) -> Result<Value, Error> {
        match self.target.evaluate()? {
            Value::Closure(closure) => closure.apply(&self.argument),
            Value::Native(native) => Ok((native.call)(self.argument.evaluate()?)),
            _ => unreachable!("invocation targets are statically function-typed"),
        }
    }
}

fn as_number(value: Value) -> f64 {
    match value {
        Value::Number(number) => number,
        _ => unreachable!("operand was statically checked to be a Number"),
    }
}

fn as_boolean(value: Value) -> bool {
    match value {
        Value::Boolean(boolean) => boolean,
        _ => unreachable!("operand was statically checked to be a Boolean"),
    }
}
