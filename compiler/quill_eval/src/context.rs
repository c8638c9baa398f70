//! Variable contexts: the caller-supplied name → value environment.
//!
//! The interpreter consults the context for every free variable and for
//! every register left unresolved by the binder, and writes to it when a
//! script assigns to a free variable.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Value;

/// A pluggable variable environment.
///
/// Thread safety is the implementation's concern: the evaluator only ever
/// accesses a context through the `&mut` it was handed for one call.
pub trait Context {
    /// Look up a variable.
    fn get(&self, name: &str) -> Option<Value>;

    /// Whether the variable is defined.
    fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Define or overwrite a variable.
    fn set(&mut self, name: &str, value: Value);
}

/// A plain map-backed context.
#[derive(Clone, Debug, Default)]
pub struct MapContext {
    vars: FxHashMap<String, Value>,
}

impl MapContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Context for MapContext {
    fn get(&self, name: &str) -> Option<Value> {
        self.vars.get(name).cloned()
    }

    fn has(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    fn set(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_string(), value);
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MapContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        MapContext {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A context shared between threads.
///
/// Clones point at the same variables; reads and writes go through a
/// `parking_lot::RwLock`, so each individual `get`/`set` is atomic. A script
/// that reads then writes the same variable is not atomic as a whole.
#[derive(Clone, Default)]
pub struct SharedContext(Arc<RwLock<MapContext>>);

impl SharedContext {
    pub fn new(inner: MapContext) -> Self {
        SharedContext(Arc::new(RwLock::new(inner)))
    }

    /// Snapshot of the current variables.
    pub fn snapshot(&self) -> MapContext {
        self.0.read().clone()
    }
}

impl Context for SharedContext {
    fn get(&self, name: &str) -> Option<Value> {
        self.0.read().get(name)
    }

    fn has(&self, name: &str) -> bool {
        self.0.read().has(name)
    }

    fn set(&mut self, name: &str, value: Value) {
        self.0.write().set(name, value);
    }
}

impl fmt::Debug for SharedContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedContext({:?})", &*self.0.read())
    }
}
