//! # Observable field.
//!
//! [`Var`] is a stored value whose reads register a dependency (when a tracked
//! computation is running) and whose writes notify dependents. Writes are
//! change-detected: setting an equal value is a no-op, so dependents only ever
//! re-run for real changes.

use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use crate::reactive::runtime::{NodeId, Runtime, SinkRef, SourceNode};

struct VarCore<T> {
    id: NodeId,
    name: Cow<'static, str>,
    runtime: Runtime,
    value: RefCell<T>,
    dependents: RefCell<Vec<SinkRef>>,
}

impl<T: 'static> SourceNode for VarCore<T> {
    fn source_id(&self) -> NodeId {
        self.id
    }

    fn add_dependent(&self, sink: SinkRef) {
        let mut deps = self.dependents.borrow_mut();
        if !deps.iter().any(|d| d.id == sink.id) {
            deps.push(sink);
        }
    }

    fn remove_dependent(&self, id: NodeId) {
        self.dependents.borrow_mut().retain(|d| d.id != id);
    }
}

/// An observable field.
///
/// Cheap to clone; all clones refer to the same cell. Reads inside a
/// [`Reaction`](crate::Reaction) or [`Computed`](crate::Computed) install a
/// dependency edge; writes notify whatever is attached.
///
/// ## Example
/// ```
/// use netsignal::{Runtime, Var};
///
/// let rt = Runtime::new();
/// let flag = Var::new(&rt, "flag", false);
/// assert!(!flag.get());
/// flag.set(true);
/// assert!(flag.get());
/// ```
pub struct Var<T> {
    core: Rc<VarCore<T>>,
}

impl<T> Clone for Var<T> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
        }
    }
}

impl<T: Clone + 'static> Var<T> {
    /// Creates an observable field holding `value`.
    ///
    /// The name shows up in trace logs; prefer short snake_case.
    pub fn new(runtime: &Runtime, name: impl Into<Cow<'static, str>>, value: T) -> Self {
        Self {
            core: Rc::new(VarCore {
                id: runtime.next_node_id(),
                name: name.into(),
                runtime: runtime.clone(),
                value: RefCell::new(value),
                dependents: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Returns the current value.
    ///
    /// When called under a tracked computation, registers that computation as
    /// a dependent of this field.
    pub fn get(&self) -> T {
        let source: Rc<dyn SourceNode> = self.core.clone();
        self.core.runtime.observe(&source);
        self.core.value.borrow().clone()
    }

    /// Returns the field's name.
    pub fn name(&self) -> &str {
        &self.core.name
    }
}

impl<T: Clone + PartialEq + 'static> Var<T> {
    /// Stores `value` and notifies dependents, unless it equals the current
    /// value (then nothing happens at all).
    ///
    /// Outside an explicit [`Runtime::action`] this behaves as its own
    /// one-write action: affected reactions re-run before `set` returns.
    pub fn set(&self, value: T) {
        {
            let current = self.core.value.borrow();
            if *current == value {
                return;
            }
        }
        *self.core.value.borrow_mut() = value;
        tracing::trace!(var = %self.core.name, "observable changed");

        let core = Rc::clone(&self.core);
        self.core.runtime.action(move || {
            let snapshot: Vec<SinkRef> = core.dependents.borrow().clone();
            for dep in snapshot {
                if let Some(sink) = dep.node.upgrade() {
                    sink.dependency_changed();
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::Reaction;
    use std::cell::Cell;

    #[test]
    fn test_get_returns_stored_value() {
        let rt = Runtime::new();
        let v = Var::new(&rt, "v", 41u32);
        assert_eq!(v.get(), 41);
        v.set(42);
        assert_eq!(v.get(), 42);
    }

    #[test]
    fn test_set_notifies_attached_reaction() {
        let rt = Runtime::new();
        let v = Var::new(&rt, "v", 0u32);
        let seen = Rc::new(Cell::new(0u32));

        let _r = {
            let (v, seen) = (v.clone(), seen.clone());
            Reaction::new(&rt, "mirror", move || seen.set(v.get()))
        };
        assert_eq!(seen.get(), 0);

        v.set(7);
        assert_eq!(seen.get(), 7, "reaction re-ran with the new value");
    }

    #[test]
    fn test_set_equal_value_does_not_notify() {
        let rt = Runtime::new();
        let v = Var::new(&rt, "v", 5u32);
        let runs = Rc::new(Cell::new(0u32));

        let _r = {
            let (v, runs) = (v.clone(), runs.clone());
            Reaction::new(&rt, "count", move || {
                let _ = v.get();
                runs.set(runs.get() + 1);
            })
        };
        assert_eq!(runs.get(), 1);

        v.set(5);
        assert_eq!(runs.get(), 1, "equal write must not re-run dependents");
        v.set(6);
        assert_eq!(runs.get(), 2);
    }
}
