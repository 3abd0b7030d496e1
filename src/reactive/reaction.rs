//! # Observation context.
//!
//! [`Reaction`] runs a callback immediately and re-runs it whenever one of the
//! observables it read last time changes. Dependencies are re-collected on
//! every run, so a branch that stops reading a source also stops reacting to
//! it.
//!
//! Dropping (or disposing) the reaction detaches it from every source, which
//! is what drives the 1→0 deactivation transitions of any [`Computed`] it was
//! the last observer of.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::reactive::runtime::{NodeId, Runnable, Runtime, SinkNode, SinkRef, SourceNode};

struct ReactionCore {
    id: NodeId,
    name: Cow<'static, str>,
    runtime: Runtime,
    this: Weak<ReactionCore>,
    body: RefCell<Box<dyn FnMut()>>,
    sources: RefCell<Vec<Rc<dyn SourceNode>>>,
    scheduled: Cell<bool>,
    disposed: Cell<bool>,
}

impl ReactionCore {
    fn run(&self) {
        let node: Weak<dyn SinkNode> = self.this.clone();
        let sink = SinkRef { id: self.id, node };
        {
            let mut body = self.body.borrow_mut();
            self.runtime.track(sink, &self.sources, || (*body)());
        }
        // A body that wrote to its own dependencies outside an action has
        // deferred notifications pending; deliver them now that the body
        // borrow is released. No-op when nested or already flushing.
        self.runtime.flush();
    }

    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        for source in self.sources.take() {
            source.remove_dependent(self.id);
        }
        tracing::debug!(reaction = %self.name, "disposed");
    }
}

impl SinkNode for ReactionCore {
    fn dependency_changed(&self) {
        if self.disposed.get() || self.scheduled.replace(true) {
            return;
        }
        let runnable: Weak<dyn Runnable> = self.this.clone();
        self.runtime.schedule(runnable);
    }
}

impl Runnable for ReactionCore {
    fn run_scheduled(&self) {
        self.scheduled.set(false);
        if self.disposed.get() {
            return;
        }
        self.run();
    }
}

/// A running observation context.
///
/// The callback executes once at construction and again after every change to
/// a dependency it read on its previous run. The handle owns the subscription:
/// dropping it (or calling [`Reaction::dispose`]) stops all re-runs and
/// releases every dependency edge.
pub struct Reaction {
    core: Rc<ReactionCore>,
}

impl Reaction {
    /// Creates the reaction and runs `body` immediately under tracking.
    pub fn new(
        runtime: &Runtime,
        name: impl Into<Cow<'static, str>>,
        body: impl FnMut() + 'static,
    ) -> Self {
        let id = runtime.next_node_id();
        let core = Rc::new_cyclic(|this| ReactionCore {
            id,
            name: name.into(),
            runtime: runtime.clone(),
            this: this.clone(),
            body: RefCell::new(Box::new(body)),
            sources: RefCell::new(Vec::new()),
            scheduled: Cell::new(false),
            disposed: Cell::new(false),
        });
        core.run();
        Self { core }
    }

    /// Detaches from every dependency; the callback never runs again.
    ///
    /// Idempotent. Also invoked on drop.
    pub fn dispose(&self) {
        self.core.dispose();
    }

    /// Returns true once the reaction has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.core.disposed.get()
    }

    /// Returns the reaction's name.
    pub fn name(&self) -> &str {
        &self.core.name
    }
}

impl Drop for Reaction {
    fn drop(&mut self) {
        self.core.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::Var;

    #[test]
    fn test_runs_immediately_and_on_change() {
        let rt = Runtime::new();
        let v = Var::new(&rt, "v", 10u32);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let _r = {
            let (v, seen) = (v.clone(), seen.clone());
            Reaction::new(&rt, "record", move || seen.borrow_mut().push(v.get()))
        };
        v.set(20);
        v.set(30);
        assert_eq!(*seen.borrow(), vec![10, 20, 30]);
    }

    #[test]
    fn test_dispose_stops_reruns_and_is_idempotent() {
        let rt = Runtime::new();
        let v = Var::new(&rt, "v", 0u32);
        let runs = Rc::new(Cell::new(0u32));

        let r = {
            let (v, runs) = (v.clone(), runs.clone());
            Reaction::new(&rt, "count", move || {
                let _ = v.get();
                runs.set(runs.get() + 1);
            })
        };
        r.dispose();
        r.dispose();
        assert!(r.is_disposed());

        v.set(1);
        assert_eq!(runs.get(), 1, "disposed reaction must not re-run");
    }

    #[test]
    fn test_drop_detaches() {
        let rt = Runtime::new();
        let v = Var::new(&rt, "v", 0u32);
        let runs = Rc::new(Cell::new(0u32));
        {
            let _r = {
                let (v, runs) = (v.clone(), runs.clone());
                Reaction::new(&rt, "scoped", move || {
                    let _ = v.get();
                    runs.set(runs.get() + 1);
                })
            };
        }
        v.set(1);
        assert_eq!(runs.get(), 1, "dropped reaction must not re-run");
    }

    #[test]
    fn test_unread_dependencies_are_pruned() {
        let rt = Runtime::new();
        let gate = Var::new(&rt, "gate", true);
        let detail = Var::new(&rt, "detail", 0u32);
        let runs = Rc::new(Cell::new(0u32));

        let _r = {
            let (gate, detail, runs) = (gate.clone(), detail.clone(), runs.clone());
            Reaction::new(&rt, "branch", move || {
                runs.set(runs.get() + 1);
                if gate.get() {
                    let _ = detail.get();
                }
            })
        };
        assert_eq!(runs.get(), 1);

        gate.set(false); // re-run no longer reads `detail`
        assert_eq!(runs.get(), 2);

        detail.set(99);
        assert_eq!(runs.get(), 2, "pruned dependency must not trigger a re-run");
    }
}
