use std::cell::OnceCell;
use std::fmt::Debug;
use std::rc::Rc;

use crate::{
    errors::errors::{Error, ErrorKind},
    lexer::tokens::{Token, TokenKind},
    runtime::{slot::Parameter, values::NativeFn},
};

use super::types::Type;

/// A parsed, type-checked expression.
///
/// Nodes are cheap to clone: every composite variant is an `Rc`.
/// Identifier references share the declared node itself rather than
/// wrapping it, which is what makes a reference to a function
/// declaration see the literal (and lets recursion work).
#[derive(Debug, Clone)]
pub enum Expr {
    Number(f64),
    Boolean(bool),
    Text(Rc<str>),
    List(Rc<ListLit>),
    Unary(Rc<UnaryOp>),
    Binary(Rc<BinaryOp>),
    If(Rc<IfExpr>),
    Function(Rc<FunctionLit>),
    Parameter(Rc<Parameter>),
    Invoke(Rc<Invocation>),
    Builtin(Rc<Builtin>),
}

#[derive(Debug)]
pub struct ListLit {
    pub elements: Vec<Expr>,
    pub ty: Type,
}

#[derive(Debug)]
pub struct UnaryOp {
    pub operator: Token,
    pub operand: Expr,
    pub ty: Type,
}

#[derive(Debug)]
pub struct BinaryOp {
    pub left: Expr,
    pub operator: Token,
    pub right: Expr,
    pub ty: Type,
}

/// One or more guard/body pairs and a mandatory trailing `else` body;
/// `bodies.len() == conditions.len() + 1`.
#[derive(Debug)]
pub struct IfExpr {
    pub conditions: Vec<Expr>,
    pub bodies: Vec<Expr>,
    pub ty: Type,
}

/// A function literal. The parameter slot is created here, once, and
/// shared by every parameter reference in the body and every closure
/// that captures it. `body` and `upvalues` are attached after
/// construction because the literal is declared (and thus referencable
/// for recursion) before its body has been parsed.
pub struct FunctionLit {
    pub parameter: Rc<Parameter>,
    pub return_type: Type,
    body: OnceCell<Expr>,
    upvalues: OnceCell<Vec<Rc<Parameter>>>,
}

#[derive(Debug)]
pub struct Invocation {
    pub target: Expr,
    pub argument: Expr,
    pub ty: Type,
}

/// A standard-library function exposed as an expression node.
#[derive(Debug)]
pub struct Builtin {
    pub native: NativeFn,
    pub ty: Type,
}

impl Expr {
    /// The node's static type, decided at construction and never
    /// recomputed.
    pub fn ty(&self) -> Type {
        match self {
            Expr::Number(_) => Type::Number,
            Expr::Boolean(_) => Type::Boolean,
            Expr::Text(_) => Type::Text,
            Expr::List(list) => list.ty.clone(),
            Expr::Unary(unary) => unary.ty.clone(),
            Expr::Binary(binary) => binary.ty.clone(),
            Expr::If(conditional) => conditional.ty.clone(),
            Expr::Function(function) => function.ty(),
            Expr::Parameter(parameter) => parameter.ty.clone(),
            Expr::Invoke(invocation) => invocation.ty.clone(),
            Expr::Builtin(builtin) => builtin.ty.clone(),
        }
    }

    /// A list literal. Elements need not share a type: the literal is
    /// `[T]` when they all agree on `T` and `[Any]` otherwise, and
    /// consumers re-check at use sites through ordinary subtyping.
    pub fn list(elements: Vec<Expr>) -> Expr {
        let element_ty = match elements.split_first() {
            Some((first, rest)) => {
                let first_ty = first.ty();
                if rest.iter().all(|element| element.ty() == first_ty) {
                    first_ty
                } else {
                    Type::Any
                }
            }
            None => Type::Any,
        };

        Expr::List(Rc::new(ListLit {
            elements,
            ty: Type::list(element_ty),
        }))
    }

    pub fn unary(operator: &Token, operand: Expr) -> Result<Expr, Error> {
        let ty = match operator.kind {
            TokenKind::Dash => {
                require_operand(&operand, Type::Number, operator)?;
                Type::Number
            }
            TokenKind::Not => {
                require_operand(&operand, Type::Boolean, operator)?;
                Type::Boolean
            }
            _ => return Err(Error::new(ErrorKind::OperatorExpected, operator.diagnostic_line())),
        };

        Ok(Expr::Unary(Rc::new(UnaryOp {
            operator: operator.clone(),
            operand,
            ty,
        })))
    }

    pub fn binary(left: Expr, operator: &Token, right: Expr) -> Result<Expr, Error> {
        let ty = match operator.kind {
            TokenKind::Plus
            | TokenKind::Dash
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Percent
            | TokenKind::Caret => {
                require_operand(&left, Type::Number, operator)?;
                require_operand(&right, Type::Number, operator)?;
                Type::Number
            }
            TokenKind::Less
            | TokenKind::LessEquals
            | TokenKind::Greater
            | TokenKind::GreaterEquals => {
                require_operand(&left, Type::Number, operator)?;
                require_operand(&right, Type::Number, operator)?;
                Type::Boolean
            }
            TokenKind::Equals | TokenKind::NotEquals => {
                let left_ty = left.ty();
                let right_ty = right.ty();
                if !left_ty.is_compatible_with(&right_ty) {
                    return Err(Error::new(
                        ErrorKind::TypeMismatch {
                            expected: left_ty.to_string(),
                            received: right_ty.to_string(),
                        },
                        operator.diagnostic_line(),
                    ));
                }
                Type::Boolean
            }
            TokenKind::And | TokenKind::Or => {
                require_operand(&left, Type::Boolean, operator)?;
                require_operand(&right, Type::Boolean, operator)?;
                Type::Boolean
            }
            _ => return Err(Error::new(ErrorKind::OperatorExpected, operator.diagnostic_line())),
        };

        Ok(Expr::Binary(Rc::new(BinaryOp {
            left,
            operator: operator.clone(),
            right,
            ty,
        })))
    }

    /// Builds a conditional from already-parsed guards and bodies.
    /// Guards were checked `Boolean` as they were parsed; here every
    /// later body must be subtype-compatible with the first body, whose
    /// type becomes the type of the whole construct.
    pub fn conditional(
        conditions: Vec<Expr>,
        bodies: Vec<Expr>,
        line: Option<u32>,
    ) -> Result<Expr, Error> {
        let ty = bodies[0].ty();

        for body in bodies.iter().skip(1) {
            if !body.ty().is_compatible_with(&ty) {
                return Err(Error::new(
                    ErrorKind::TypeMismatch {
                        expected: ty.to_string(),
                        received: body.ty().to_string(),
                    },
                    line,
                ));
            }
        }

        Ok(Expr::If(Rc::new(IfExpr {
            conditions,
            bodies,
            ty,
        })))
    }

    pub fn invocation(target: Expr, argument: Expr, line: Option<u32>) -> Result<Expr, Error> {
        let (parameter_ty, return_ty) = match target.ty() {
            Type::Function(parameter, ret) => (*parameter, *ret),
            other => {
                return Err(Error::new(
                    ErrorKind::NotInvocable {
                        received: other.to_string(),
                    },
                    line,
                ))
            }
        };

        if !argument.ty().is_subtype_of(&parameter_ty) {
            return Err(Error::new(
                ErrorKind::TypeMismatch {
                    expected: parameter_ty.to_string(),
                    received: argument.ty().to_string(),
                },
                line,
            ));
        }

        Ok(Expr::Invoke(Rc::new(Invocation {
            target,
            argument,
            ty: return_ty,
        })))
    }

    pub fn builtin(native: NativeFn, ty: Type) -> Expr {
        Expr::Builtin(Rc::new(Builtin { native, ty }))
    }
}

fn require_operand(operand: &Expr, expected: Type, operator: &Token) -> Result<(), Error> {
    let received = operand.ty();
    if received != expected {
        return Err(Error::new(
            ErrorKind::TypeMismatch {
                expected: expected.to_string(),
                received: received.to_string(),
            },
            operator.diagnostic_line(),
        ));
    }
    Ok(())
}

impl FunctionLit {
    pub fn new(parameter: Parameter, return_type: Type) -> Self {
        FunctionLit {
            parameter: Rc::new(parameter),
            return_type,
            body: OnceCell::new(),
            upvalues: OnceCell::new(),
        }
    }

    pub fn ty(&self) -> Type {
        Type::function(self.parameter.ty.clone(), self.return_type.clone())
    }

    /// Attaches the parsed body. Called exactly once, after the literal
    /// has been declared into its scope.
    pub fn set_body(&self, body: Expr) {
        if self.body.set(body).is_err() {
            unreachable!("a function literal's body is attached exactly once");
        }
    }

    pub fn body(&self) -> &Expr {
        self.body
            .get()
            .expect("a function literal's body is attached before evaluation")
    }

    /// Freezes the ordered upvalue set accumulated while the body was
    /// being parsed. Called exactly once, when the body parse ends.
    pub fn freeze_upvalues(&self, upvalues: Vec<Rc<Parameter>>) {
        if self.upvalues.set(upvalues).is_err() {
            unreachable!("a function literal's upvalues are frozen exactly once");
        }
    }

    pub fn upvalues(&self) -> &[Rc<Parameter>] {
        self.upvalues.get().map(Vec::as_slice).unwrap_or(&[])
    }
}

// The body can reference the literal itself through recursion, so the
// derived representation would never terminate.
impl Debug for FunctionLit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FunctionLit({})", self.ty())
    }
}

/// A named top-level binding, in program order.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub token: Token,
    pub expr: Expr,
}

impl Declaration {
    pub fn name(&self) -> &str {
        &self.token.text
    }
}
