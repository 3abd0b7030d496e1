//! # Example: watch_status
//!
//! Renders a status line from a reaction, then walks the activation lifecycle:
//!
//! - attaching the watcher installs the host listeners;
//! - simulated transitions re-run the watcher with flag and timestamp in sync;
//! - disposing the watcher removes the listeners, after which transitions are
//!   invisible and reads report the stale flag.
//!
//! ## Run
//! ```bash
//! cargo run --example watch_status
//! ```

use std::rc::Rc;
use std::time::Duration;

use netsignal::{
    ConnectivityEvent, ConnectivityHost, NetworkStatus, Reaction, Runtime, SimulatedHost,
};

fn main() -> anyhow::Result<()> {
    let runtime = Runtime::new();
    let host = SimulatedHost::new(true);
    let status = NetworkStatus::create(&runtime, Rc::new(host.clone()));

    println!(
        "before attach: listeners={} (nothing is observing yet)",
        host.total_listeners()
    );

    let watcher = {
        let status = status.clone();
        Reaction::new(&runtime, "status-line", move || {
            if status.is_online() {
                println!("Network Status: Online");
            } else {
                println!(
                    "Network Status: Offline since {:?}",
                    status.last_changed_at()
                );
            }
        })
    };
    println!(
        "after attach: online listeners={}, offline listeners={}",
        host.listener_count(ConnectivityEvent::Online),
        host.listener_count(ConnectivityEvent::Offline),
    );

    host.advance(Duration::from_secs(30));
    host.go_offline();

    host.advance(Duration::from_secs(30));
    host.go_online();

    watcher.dispose();
    println!("after dispose: listeners={}", host.total_listeners());

    // Nobody is subscribed: this transition goes unseen.
    host.go_offline();
    println!(
        "stale read while unobserved: is_online={} (host says {})",
        status.is_online(),
        host.is_online()
    );
    Ok(())
}
