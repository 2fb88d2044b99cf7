use std::cell::RefCell;

use crate::ast::types::Type;

use super::values::Value;

/// The mutable single-value cell backing one function parameter.
///
/// A slot starts unbound. Every mutation goes through [`Slot::swap_in`],
/// which hands back a guard that restores the previous content when it
/// drops — including on early returns out of a failing body — so the
/// save/restore discipline stays strictly nested on every exit path.
#[derive(Debug, Default)]
pub struct Slot {
    value: RefCell<Option<Value>>,
}

impl Slot {
    pub fn read(&self) -> Option<Value> {
        self.value.borrow().clone()
    }

    pub fn swap_in(&self, replacement: Option<Value>) -> SlotGuard<'_> {
        let saved = self.value.replace(replacement);
        SlotGuard { slot: self, saved }
    }
}

/// Restores a slot's saved content on drop.
pub struct SlotGuard<'a> {
    slot: &'a Slot,
    saved: Option<Value>,
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        *self.slot.value.borrow_mut() = self.saved.take();
    }
}

/// A declared function parameter: its type, its source name, and the
/// slot read by every reference to it. The `Rc<Parameter>` identity is
/// what upvalue tracking and closure snapshots key on.
#[derive(Debug)]
pub struct Parameter {
    pub ty: Type,
    pub name: String,
    pub slot: Slot,
}

impl Parameter {
    pub fn new(ty: Type, name: &str) -> Self {
        Parameter {
            ty,
            name: String::from(name),
            slot: Slot::default(),
        }
    }
}
