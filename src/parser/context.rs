use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    ast::expressions::{Declaration, Expr, FunctionLit},
    errors::errors::{Error, ErrorKind},
    lexer::tokens::Token,
    runtime::slot::Parameter,
};

/// A lexical scope: a node in a parent-linked chain rooted at the
/// standard-library bindings. A scope owning a function is the body
/// scope of that function literal; its `upvalues` list accumulates
/// every enclosing parameter the body turned out to reference, and is
/// frozen into the literal when the body parse completes.
pub struct Context {
    parent: Option<Rc<Context>>,
    function: Option<Rc<FunctionLit>>,
    bindings: RefCell<HashMap<String, Expr>>,
    upvalues: RefCell<Vec<Rc<Parameter>>>,
}

impl Context {
    pub fn root(bindings: HashMap<String, Expr>) -> Rc<Context> {
        Rc::new(Context {
            parent: None,
            function: None,
            bindings: RefCell::new(bindings),
            upvalues: RefCell::new(vec![]),
        })
    }

    pub fn child(parent: Rc<Context>, function: Rc<FunctionLit>) -> Rc<Context> {
        Rc::new(Context {
            parent: Some(parent),
            function: Some(function),
            bindings: RefCell::new(HashMap::new()),
            upvalues: RefCell::new(vec![]),
        })
    }

    pub fn parent(&self) -> Option<Rc<Context>> {
        self.parent.clone()
    }

    /// Binds `token`'s name to `expr` in this scope. Names are unique
    /// per scope; shadowing an outer scope is legal.
    pub fn declare(&self, token: &Token, expr: Expr) -> Result<Declaration, Error> {
        let mut bindings = self.bindings.borrow_mut();

        if bindings.contains_key(&token.text) {
            return Err(Error::new(
                ErrorKind::AlreadyDeclared {
                    name: token.text.clone(),
                },
                token.diagnostic_line(),
            ));
        }

        bindings.insert(token.text.clone(), expr.clone());
        Ok(Declaration {
            token: token.clone(),
            expr,
        })
    }

    /// Resolves an identifier, innermost scope first. Resolving to the
    /// parameter of an enclosing function records that parameter as an
    /// upvalue of every function scope the lookup crossed on the way
    /// out, which is exactly the set a closure of those literals must
    /// capture.
    pub fn resolve(self: &Rc<Self>, token: &Token) -> Result<Expr, Error> {
        let mut crossed: Vec<Rc<Context>> = vec![];
        let mut current = Rc::clone(self);

        loop {
            if let Some(function) = &current.function {
                if function.parameter.name == token.text {
                    let parameter = Rc::clone(&function.parameter);
                    for context in crossed.iter() {
                        context.record_upvalue(&parameter);
                    }
                    return Ok(Expr::Parameter(parameter));
                }
            }

            if let Some(expr) = current.bindings.borrow().get(&token.text) {
                return Ok(expr.clone());
            }

            if current.function.is_some() {
                crossed.push(Rc::clone(&current));
            }

            let parent = match &current.parent {
                Some(parent) => Rc::clone(parent),
                None => {
                    return Err(Error::new(
                        ErrorKind::NotDeclared {
                            name: token.text.clone(),
                        },
                        token.diagnostic_line(),
                    ))
                }
            };
            current = parent;
        }
    }

    fn record_upvalue(&self, parameter: &Rc<Parameter>) {
        let mut upvalues = self.upvalues.borrow_mut();
        if !upvalues.iter().any(|existing| Rc::ptr_eq(existing, parameter)) {
            upvalues.push(Rc::clone(parameter));
        }
    }

    /// Drains the accumulated upvalue list for freezing into the owning
    /// function literal.
    pub fn take_upvalues(&self) -> Vec<Rc<Parameter>> {
        self.upvalues.take()
    }
}
