//! The variable register: name-free slots for script-declared variables.
//!
//! The tree builder declares every register variable once and bakes the
//! returned [`RegisterIndex`] into the nodes that read or write it. At
//! evaluation time a register access is a bounds-checked vector index, no
//! hashing and no name comparison. Names are kept only for the debugger.

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use tempo_ir::Name;
use tempo_value::Value;

/// Stable index of a register slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegisterIndex(u32);

impl RegisterIndex {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Register slot table.
///
/// Slots are never removed, so an index stays valid for the lifetime of the
/// table.
#[derive(Debug, Default)]
pub struct VarRegister {
    slots: RefCell<Vec<Value>>,
    names: RefCell<Vec<Name>>,
    by_name: RefCell<FxHashMap<Name, RegisterIndex>>,
}

impl VarRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a slot for `name`, or return the slot it already has.
    pub fn declare(&self, name: Name) -> RegisterIndex {
        if let Some(index) = self.by_name.borrow().get(&name) {
            return *index;
        }
        let mut slots = self.slots.borrow_mut();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "register tables never approach u32::MAX slots"
        )]
        let index = RegisterIndex(slots.len() as u32);
        slots.push(Value::Undefined);
        self.names.borrow_mut().push(name);
        self.by_name.borrow_mut().insert(name, index);
        index
    }

    /// Slot previously declared for `name`.
    pub fn lookup(&self, name: Name) -> Option<RegisterIndex> {
        self.by_name.borrow().get(&name).copied()
    }

    #[inline]
    pub fn get(&self, index: RegisterIndex) -> Value {
        self.slots
            .borrow()
            .get(index.index())
            .cloned()
            .unwrap_or_default()
    }

    #[inline]
    pub fn set(&self, index: RegisterIndex, value: Value) {
        if let Some(slot) = self.slots.borrow_mut().get_mut(index.index()) {
            *slot = value;
        }
    }

    pub fn name(&self, index: RegisterIndex) -> Option<Name> {
        self.names.borrow().get(index.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    /// Snapshot of `(name, value)` pairs in slot order.
    pub fn entries(&self) -> Vec<(Name, Value)> {
        let names = self.names.borrow();
        let slots = self.slots.borrow();
        names.iter().copied().zip(slots.iter().cloned()).collect()
    }
}

#[cfg(test)]
mod tests;
