//! # Memoized derivation with activation hooks.
//!
//! [`Computed`] caches the result of a pure derivation plus a dirty bit, and
//! recomputes on the next read after any dependency fired dirty. It maintains
//! its own dependent list, which is what makes it a lifecycle boundary: the
//! moment the first dependent attaches (0→1) the activation hook fires, and
//! the moment the last one detaches (1→0) the deactivation hook fires and the
//! derivation detaches from its sources.
//!
//! ## States
//! ```text
//!            first dependent attaches
//!   Suspended ─────────────────────────► Active
//!   (no source edges,   ◄───────────────  (edges live, cache maintained)
//!    evaluate on demand)  last dependent
//!                         detaches
//! ```
//!
//! While suspended, reads evaluate the derivation on demand and nothing is
//! cached — dependencies are not tracked, so nothing can re-activate the
//! derivation behind the caller's back.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::reactive::runtime::{NodeId, Runtime, SinkNode, SinkRef, SourceNode};

/// Lifecycle callbacks fired at the 0↔1 dependent-count transitions of a
/// [`Computed`].
///
/// Both hooks are optional. Built builder-style:
///
/// ```
/// use netsignal::ActivationHooks;
///
/// let hooks = ActivationHooks::new()
///     .on_activate(|| println!("first observer arrived"))
///     .on_deactivate(|| println!("last observer left"));
/// # let _ = hooks;
/// ```
#[derive(Default)]
pub struct ActivationHooks {
    activate: Option<Box<dyn Fn()>>,
    deactivate: Option<Box<dyn Fn()>>,
}

impl ActivationHooks {
    /// Creates an empty hook set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the callback fired when the dependent count goes 0→1.
    pub fn on_activate(mut self, f: impl Fn() + 'static) -> Self {
        self.activate = Some(Box::new(f));
        self
    }

    /// Sets the callback fired when the dependent count goes 1→0.
    pub fn on_deactivate(mut self, f: impl Fn() + 'static) -> Self {
        self.deactivate = Some(Box::new(f));
        self
    }
}

struct ComputedCore<T> {
    id: NodeId,
    name: Cow<'static, str>,
    runtime: Runtime,
    this: Weak<ComputedCore<T>>,
    derive: Box<dyn Fn() -> T>,
    value: RefCell<Option<T>>,
    dirty: Cell<bool>,
    computing: Cell<bool>,
    dependents: RefCell<Vec<SinkRef>>,
    sources: RefCell<Vec<Rc<dyn SourceNode>>>,
    hooks: ActivationHooks,
}

impl<T: Clone + 'static> ComputedCore<T> {
    fn is_active(&self) -> bool {
        !self.dependents.borrow().is_empty()
    }

    fn sink_ref(&self) -> SinkRef {
        let node: Weak<dyn SinkNode> = self.this.clone();
        SinkRef { id: self.id, node }
    }

    /// Re-evaluates under tracking, refreshing source edges and the cache.
    fn recompute(&self) {
        if self.computing.replace(true) {
            // get() panics on re-entry before reaching here; belt for the
            // activation path.
            return;
        }
        let value = self
            .runtime
            .track(self.sink_ref(), &self.sources, || (self.derive)());
        *self.value.borrow_mut() = Some(value);
        self.dirty.set(false);
        self.computing.set(false);
    }

    /// 0→1: fire the activation hook, then eagerly recompute so source edges
    /// exist before the first change can happen.
    fn activate(&self) {
        tracing::debug!(computed = %self.name, "activated");
        if let Some(hook) = &self.hooks.activate {
            hook();
        }
        self.recompute();
    }

    /// 1→0: fire the deactivation hook, drop every source edge, and stop
    /// maintaining the cache.
    fn suspend(&self) {
        tracing::debug!(computed = %self.name, "deactivated");
        if let Some(hook) = &self.hooks.deactivate {
            hook();
        }
        for source in self.sources.take() {
            source.remove_dependent(self.id);
        }
        self.dirty.set(true);
    }
}

impl<T: Clone + 'static> SourceNode for ComputedCore<T> {
    fn source_id(&self) -> NodeId {
        self.id
    }

    fn add_dependent(&self, sink: SinkRef) {
        let became_active = {
            let mut deps = self.dependents.borrow_mut();
            if deps.iter().any(|d| d.id == sink.id) {
                return;
            }
            let was_empty = deps.is_empty();
            deps.push(sink);
            was_empty
        };
        if became_active {
            self.activate();
        }
    }

    fn remove_dependent(&self, id: NodeId) {
        let became_idle = {
            let mut deps = self.dependents.borrow_mut();
            let before = deps.len();
            deps.retain(|d| d.id != id);
            before > 0 && deps.is_empty()
        };
        if became_idle {
            self.suspend();
        }
    }
}

impl<T: Clone + 'static> SinkNode for ComputedCore<T> {
    fn dependency_changed(&self) {
        if self.dirty.replace(true) {
            return; // dependents were already notified
        }
        let snapshot: Vec<SinkRef> = self.dependents.borrow().clone();
        for dep in snapshot {
            if let Some(sink) = dep.node.upgrade() {
                sink.dependency_changed();
            }
        }
    }
}

/// A memoized derivation.
///
/// Cheap to clone; all clones share the cache and the dependent list. See the
/// module docs for the suspended/active lifecycle.
pub struct Computed<T> {
    core: Rc<ComputedCore<T>>,
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
        }
    }
}

impl<T: Clone + 'static> Computed<T> {
    /// Creates a derivation with no lifecycle hooks.
    pub fn new(
        runtime: &Runtime,
        name: impl Into<Cow<'static, str>>,
        derive: impl Fn() -> T + 'static,
    ) -> Self {
        Self::with_hooks(runtime, name, derive, ActivationHooks::default())
    }

    /// Creates a derivation with [`ActivationHooks`] fired at the 0↔1
    /// dependent-count transitions.
    pub fn with_hooks(
        runtime: &Runtime,
        name: impl Into<Cow<'static, str>>,
        derive: impl Fn() -> T + 'static,
        hooks: ActivationHooks,
    ) -> Self {
        let id = runtime.next_node_id();
        let core = Rc::new_cyclic(|this| ComputedCore {
            id,
            name: name.into(),
            runtime: runtime.clone(),
            this: this.clone(),
            derive: Box::new(derive),
            value: RefCell::new(None),
            dirty: Cell::new(true),
            computing: Cell::new(false),
            dependents: RefCell::new(Vec::new()),
            sources: RefCell::new(Vec::new()),
            hooks,
        });
        Self { core }
    }

    /// Returns the derived value.
    ///
    /// Under a tracked computation this registers the caller as a dependent
    /// (activating the derivation if it was suspended). Untracked reads return
    /// the cache while active, and evaluate on demand while suspended.
    ///
    /// # Panics
    /// Panics if the derivation (transitively) reads itself.
    pub fn get(&self) -> T {
        if self.core.computing.get() {
            panic!(
                "dependency cycle detected while evaluating computed '{}'",
                self.core.name
            );
        }

        let source: Rc<dyn SourceNode> = self.core.clone();
        self.core.runtime.observe(&source);

        if self.core.is_active() {
            if self.core.dirty.get() {
                self.core.recompute();
            }
            if let Some(value) = self.core.value.borrow().as_ref() {
                return value.clone();
            }
        }
        // Suspended: evaluate on demand, untracked, without touching the cache.
        self.core.computing.set(true);
        let value = (self.core.derive)();
        self.core.computing.set(false);
        value
    }

    /// Returns how many dependents are currently attached.
    ///
    /// Zero means the derivation is suspended (no source edges, no cache
    /// maintenance).
    pub fn observer_count(&self) -> usize {
        self.core.dependents.borrow().len()
    }

    /// Returns the derivation's name.
    pub fn name(&self) -> &str {
        &self.core.name
    }
}
