//! Register binding: positional arguments into a script's local slots.
//!
//! One `Registers` value is created per call, handed to exactly one
//! interpreter and dropped when the call returns. Register names are
//! borrowed from the script; only the slots are allocated per call.

use smallvec::SmallVec;

use crate::Value;

/// Per-call slot array, positionally aligned with a script's register names.
///
/// `None` marks an unresolved slot; the interpreter resolves such a slot by
/// looking the register's name up in the context.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registers<'n> {
    names: &'n [String],
    slots: SmallVec<[Option<Value>; 8]>,
}

impl<'n> Registers<'n> {
    /// Bind `args` positionally onto `names`.
    ///
    /// Slot `i` receives `args[i]` for `i < min(args.len(), names.len())`.
    /// Missing arguments leave their slots unresolved and surplus arguments
    /// are ignored. Binding never fails.
    pub fn bind(names: &'n [String], args: &[Value]) -> Self {
        let bound = args.len().min(names.len());
        if args.len() > names.len() {
            tracing::debug!(
                registers = names.len(),
                args = args.len(),
                "ignoring surplus arguments"
            );
        }
        let slots = args[..bound]
            .iter()
            .cloned()
            .map(Some)
            .chain(std::iter::repeat(None))
            .take(names.len())
            .collect();
        Registers { names, slots }
    }

    /// Registers for a call without positional arguments.
    pub fn unbound(names: &'n [String]) -> Self {
        Self::bind(names, &[])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Name of register `index`.
    #[inline]
    pub fn name(&self, index: u32) -> Option<&'n str> {
        self.names.get(index as usize).map(String::as_str)
    }

    /// Value bound to register `index`, `None` when unresolved or out of range.
    #[inline]
    pub fn get(&self, index: u32) -> Option<&Value> {
        self.slots.get(index as usize).and_then(Option::as_ref)
    }

    /// Whether register `index` exists and holds a value.
    #[inline]
    pub fn is_resolved(&self, index: u32) -> bool {
        self.get(index).is_some()
    }

    /// Store a value into register `index`.
    ///
    /// Returns `false` when the index lies outside the slot array.
    pub fn set(&mut self, index: u32, value: Value) -> bool {
        match self.slots.get_mut(index as usize) {
            Some(slot) => {
                *slot = Some(value);
                true
            }
            None => false,
        }
    }
}
