//! End-to-end lifecycle of the observation-gated network status, driven
//! through a simulated host: construction snapshot, activation, observed
//! transitions, deactivation, staleness while unobserved, and re-activation.

#![cfg(feature = "simulated")]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, SystemTime};

use netsignal::{
    ConnectivityEvent, ConnectivityHost, NetworkStatus, Reaction, Runtime, SimulatedHost,
};

fn observer(runtime: &Runtime, status: &NetworkStatus) -> Reaction {
    let status = status.clone();
    Reaction::new(runtime, "lifecycle-observer", move || {
        let _ = status.is_online();
        let _ = status.last_changed_at();
    })
}

#[test]
fn test_full_staleness_scenario() {
    let runtime = Runtime::new();
    let host = SimulatedHost::new(true);
    let status = NetworkStatus::create(&runtime, Rc::new(host.clone()));

    // T0: construction snapshot, no subscription.
    let t0 = host.clock();
    assert!(status.is_online());
    assert_eq!(status.last_changed_at(), t0);
    assert_eq!(host.total_listeners(), 0);

    // Attach: subscription appears.
    let watcher = observer(&runtime, &status);
    assert_eq!(host.listener_count(ConnectivityEvent::Online), 1);
    assert_eq!(host.listener_count(ConnectivityEvent::Offline), 1);

    // T1: observed transition to offline.
    host.advance(Duration::from_secs(10));
    let t1 = host.clock();
    host.go_offline();
    assert!(!status.is_online());
    assert_eq!(status.last_changed_at(), t1);

    // Detach: subscription disappears.
    watcher.dispose();
    assert_eq!(host.total_listeners(), 0);

    // T2: transition while detached is invisible.
    host.advance(Duration::from_secs(10));
    host.go_online();
    assert!(host.is_online());
    assert!(!status.is_online(), "stale flag while unobserved");
    assert_eq!(status.last_changed_at(), t1, "stale timestamp while unobserved");

    // Re-attach: still stale until the next real event.
    let watcher = observer(&runtime, &status);
    assert!(!status.is_online(), "re-attach must not refresh the flag");
    assert_eq!(status.last_changed_at(), t1);

    // Next real event catches up.
    host.advance(Duration::from_secs(10));
    let t3 = host.clock();
    host.go_online();
    assert!(status.is_online());
    assert_eq!(status.last_changed_at(), t3);

    drop(watcher);
    assert_eq!(host.total_listeners(), 0);
}

#[test]
fn test_activation_cycles_never_duplicate_listeners() {
    let runtime = Runtime::new();
    let host = SimulatedHost::new(false);
    let status = NetworkStatus::create(&runtime, Rc::new(host.clone()));

    for cycle in 0..5 {
        let watcher = observer(&runtime, &status);
        assert_eq!(
            host.total_listeners(),
            2,
            "cycle {cycle}: exactly one listener per channel"
        );
        watcher.dispose();
        assert_eq!(host.total_listeners(), 0, "cycle {cycle}: all removed");
    }
}

#[test]
fn test_observers_see_flag_and_timestamp_in_sync() {
    let runtime = Runtime::new();
    let host = SimulatedHost::new(true);
    let status = NetworkStatus::create(&runtime, Rc::new(host.clone()));
    let t0 = host.clock();

    let seen: Rc<RefCell<Vec<(bool, SystemTime)>>> = Rc::new(RefCell::new(Vec::new()));
    let _watcher = {
        let status = status.clone();
        let seen = seen.clone();
        Reaction::new(&runtime, "pair-observer", move || {
            seen.borrow_mut()
                .push((status.is_online(), status.last_changed_at()));
        })
    };

    host.advance(Duration::from_secs(1));
    let t1 = host.clock();
    host.go_offline();

    host.advance(Duration::from_secs(1));
    let t2 = host.clock();
    host.go_online();

    assert_eq!(
        *seen.borrow(),
        vec![(true, t0), (false, t1), (true, t2)],
        "every observation must carry a matching flag/timestamp pair"
    );
}
