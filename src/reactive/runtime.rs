//! # Reactive runtime: tracking stack, action batching, scheduled delivery.
//!
//! [`Runtime`] is the shared handle every reactive node carries. It owns three
//! pieces of per-thread state:
//!
//! - the **tracking stack**: one frame per tracked computation currently on the
//!   call stack (a reaction run, or a computed recompute nested inside one);
//! - the **batch depth**: how many [`Runtime::action`] scopes are open;
//! - the **schedule**: reactions marked for re-run, drained when the outermost
//!   action closes.
//!
//! ## Delivery
//! A write notifies dependents immediately (dirty bits propagate through
//! computeds), but reactions only *run* at flush time. Flushing loops until the
//! schedule drains, so a reaction that writes during its own run is serviced in
//! a later pass of the same flush. A bounded pass count
//! ([`RuntimeConfig::max_flush_passes`]) cuts off reactions that never settle.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Graph-wide node identifier, unique per [`Runtime`].
pub(crate) type NodeId = u64;

/// Source side of a dependency edge (`Var`, `Computed`).
pub(crate) trait SourceNode {
    fn source_id(&self) -> NodeId;
    /// Adds `sink` as a dependent; must be idempotent per sink id.
    fn add_dependent(&self, sink: SinkRef);
    /// Removes the dependent with `id`, if present.
    fn remove_dependent(&self, id: NodeId);
}

/// Sink side of a dependency edge (`Computed`, `Reaction`).
pub(crate) trait SinkNode {
    /// Called when a tracked source changed (or may have changed).
    fn dependency_changed(&self);
}

/// A unit scheduled for re-run at flush time.
pub(crate) trait Runnable {
    fn run_scheduled(&self);
}

/// Weak, id-tagged handle to a sink, stored in source dependent lists.
#[derive(Clone)]
pub(crate) struct SinkRef {
    pub(crate) id: NodeId,
    pub(crate) node: Weak<dyn SinkNode>,
}

/// One tracked computation currently on the call stack.
struct Frame {
    sink: SinkRef,
    /// Sources read during this run, in first-read order.
    read: Vec<Rc<dyn SourceNode>>,
}

/// Tuning for a [`Runtime`].
#[derive(Clone, Copy, Debug)]
pub struct RuntimeConfig {
    /// Maximum delivery passes per flush before giving up on reactions that
    /// keep re-triggering themselves.
    ///
    /// - `0` = unbounded (only safe when every reaction is known to settle)
    /// - `n > 0` = after `n` passes the remaining schedule is dropped and an
    ///   error is logged
    pub max_flush_passes: usize,
}

impl Default for RuntimeConfig {
    /// Defaults to 100 flush passes, plenty for well-behaved graphs.
    fn default() -> Self {
        Self {
            max_flush_passes: 100,
        }
    }
}

struct RuntimeInner {
    config: RuntimeConfig,
    frames: RefCell<Vec<Frame>>,
    batch_depth: Cell<usize>,
    scheduled: RefCell<Vec<Weak<dyn Runnable>>>,
    flushing: Cell<bool>,
    next_id: Cell<NodeId>,
}

/// Shared handle to the reactive graph state.
///
/// Cheap to clone; all clones refer to the same graph. Not `Send`: the whole
/// reactive layer lives on one thread by design.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    /// Creates a runtime with default configuration.
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Creates a runtime with explicit tuning.
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            inner: Rc::new(RuntimeInner {
                config,
                frames: RefCell::new(Vec::new()),
                batch_depth: Cell::new(0),
                scheduled: RefCell::new(Vec::new()),
                flushing: Cell::new(false),
                next_id: Cell::new(1),
            }),
        }
    }

    /// Runs `f` as one action: writes inside it commit as a single observable
    /// unit, and affected reactions re-run once, after the outermost action
    /// closes.
    ///
    /// Actions nest; only the outermost one flushes. A plain
    /// [`Var::set`](crate::Var::set) outside any action behaves as its own
    /// one-write action.
    pub fn action<R>(&self, f: impl FnOnce() -> R) -> R {
        let depth = self.inner.batch_depth.get();
        self.inner.batch_depth.set(depth + 1);
        let result = f();
        self.inner.batch_depth.set(depth);
        if depth == 0 {
            self.flush();
        }
        result
    }

    pub(crate) fn next_node_id(&self) -> NodeId {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        id
    }

    /// Registers `source` with the innermost tracking frame, if any.
    ///
    /// Installs the dependency edge immediately (bind on read), which lets a
    /// suspended computed activate mid-read. Returns whether a frame was
    /// active.
    pub(crate) fn observe(&self, source: &Rc<dyn SourceNode>) -> bool {
        let sink = {
            let mut frames = self.inner.frames.borrow_mut();
            let Some(frame) = frames.last_mut() else {
                return false;
            };
            let seen = frame
                .read
                .iter()
                .any(|s| s.source_id() == source.source_id());
            if seen {
                return true;
            }
            frame.read.push(Rc::clone(source));
            frame.sink.clone()
        };
        // Borrow released: add_dependent may activate a computed, which
        // recomputes under a nested frame.
        source.add_dependent(sink);
        true
    }

    /// Runs `f` under a tracking frame for `sink`, then prunes edges to any
    /// source in `sources` that was not re-read.
    pub(crate) fn track<R>(
        &self,
        sink: SinkRef,
        sources: &RefCell<Vec<Rc<dyn SourceNode>>>,
        f: impl FnOnce() -> R,
    ) -> R {
        let sink_id = sink.id;
        self.inner.frames.borrow_mut().push(Frame {
            sink,
            read: Vec::new(),
        });
        let result = f();
        let frame = self
            .inner
            .frames
            .borrow_mut()
            .pop()
            .unwrap_or_else(|| unreachable!("tracking frame pushed above"));

        let old = sources.replace(frame.read);
        for src in old {
            let still_read = sources
                .borrow()
                .iter()
                .any(|s| s.source_id() == src.source_id());
            if !still_read {
                src.remove_dependent(sink_id);
            }
        }
        result
    }

    /// Queues a runnable for the next flush. Dedup is the caller's job (each
    /// reaction guards with its own `scheduled` flag).
    pub(crate) fn schedule(&self, runnable: Weak<dyn Runnable>) {
        self.inner.scheduled.borrow_mut().push(runnable);
    }

    /// Drains the schedule, re-running reactions until no more are queued.
    ///
    /// No-op while a tracked computation is on the stack (delivery would
    /// re-enter the running body) and on re-entrant calls; the deferred work
    /// is picked up when the outermost frame completes, or by the outer flush
    /// loop.
    pub(crate) fn flush(&self) {
        if !self.inner.frames.borrow().is_empty() {
            return;
        }
        if self.inner.flushing.replace(true) {
            return;
        }
        let limit = self.inner.config.max_flush_passes;
        let mut passes = 0usize;
        loop {
            let batch: Vec<Weak<dyn Runnable>> =
                self.inner.scheduled.borrow_mut().drain(..).collect();
            if batch.is_empty() {
                break;
            }
            passes += 1;
            if limit != 0 && passes > limit {
                tracing::error!(
                    passes,
                    "reaction schedule did not settle; dropping remaining runs"
                );
                self.inner.scheduled.borrow_mut().clear();
                break;
            }
            for weak in batch {
                if let Some(runnable) = weak.upgrade() {
                    runnable.run_scheduled();
                }
            }
        }
        self.inner.flushing.set(false);
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::{Reaction, Var};

    #[test]
    fn test_action_batches_multiple_writes_into_one_rerun() {
        let rt = Runtime::new();
        let a = Var::new(&rt, "a", 1u32);
        let b = Var::new(&rt, "b", 1u32);

        let runs = Rc::new(Cell::new(0u32));
        let _r = {
            let (a, b, runs) = (a.clone(), b.clone(), runs.clone());
            Reaction::new(&rt, "sum", move || {
                let _ = a.get() + b.get();
                runs.set(runs.get() + 1);
            })
        };
        assert_eq!(runs.get(), 1, "reaction runs once on creation");

        rt.action(|| {
            a.set(2);
            b.set(3);
        });
        assert_eq!(runs.get(), 2, "two writes in one action, one re-run");
    }

    #[test]
    fn test_nested_actions_flush_once_at_outermost_close() {
        let rt = Runtime::new();
        let v = Var::new(&rt, "v", 0u32);

        let runs = Rc::new(Cell::new(0u32));
        let _r = {
            let (v, runs) = (v.clone(), runs.clone());
            Reaction::new(&rt, "watch", move || {
                let _ = v.get();
                runs.set(runs.get() + 1);
            })
        };

        rt.action(|| {
            v.set(1);
            rt.action(|| v.set(2));
            // inner action closed, but no flush yet
            assert_eq!(runs.get(), 1, "no delivery inside the outer action");
            v.set(3);
        });
        assert_eq!(runs.get(), 2, "single delivery after the outermost close");
    }

    #[test]
    fn test_self_triggering_reaction_is_cut_off() {
        let rt = Runtime::with_config(RuntimeConfig {
            max_flush_passes: 10,
        });
        let v = Var::new(&rt, "v", 0u64);

        let runs = Rc::new(Cell::new(0u64));
        let _r = {
            let (v, runs) = (v.clone(), runs.clone());
            Reaction::new(&rt, "feedback", move || {
                let current = v.get();
                runs.set(runs.get() + 1);
                v.set(current + 1); // re-triggers itself forever
            })
        };
        // The guard must have terminated the loop; exact count depends on the
        // initial run plus the bounded flush passes.
        assert!(
            runs.get() <= 12,
            "runaway reaction must be cut off, ran {} times",
            runs.get()
        );
    }
}
