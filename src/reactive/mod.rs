//! Minimal reactive core: observable fields, memoized derivations, reactions.
//!
//! The dependency graph is explicit — each observable keeps a list of its
//! dependents and each dependent keeps the list of sources it last read. No
//! reflection, no macros, no global registry: a [`Runtime`] handle owns the
//! tracking stack and the batch/flush machinery, and every node carries a
//! clone of it.
//!
//! ## Architecture
//! ```text
//!            reads (tracked)                 reads (tracked)
//!   Var<T> ◄──────────────── Computed<T> ◄──────────────── Reaction
//!     │  set()                   │   dirty bit + cache        │ re-run
//!     │                          │   activation hooks         │
//!     └── notify dependents ─────┴── schedule ──► Runtime::flush()
//!                                                (end of outermost action)
//! ```
//!
//! ## Rules
//! - **Single-threaded**: every handle is `Rc`-based and `!Send`; the graph is
//!   guarded by the owning thread, not by locks.
//! - **Bind on read, prune after run**: a tracked read installs the dependency
//!   edge immediately; edges not re-read on the next run are dropped.
//! - **Batched delivery**: writes inside [`Runtime::action`] commit as one
//!   observable unit; each affected reaction re-runs once, afterwards.
//! - **Exact activation counting**: a [`Computed`] fires its activation hook on
//!   the 0→1 dependent transition and its deactivation hook on 1→0, never in
//!   between.

mod computed;
mod reaction;
mod runtime;
mod var;

pub use computed::{ActivationHooks, Computed};
pub use reaction::Reaction;
pub use runtime::{Runtime, RuntimeConfig};
pub use var::Var;
