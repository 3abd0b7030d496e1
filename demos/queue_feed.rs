//! # Example: queue_feed
//!
//! Feeds a [`QueueHost`] from a producer thread, the way platform glue would:
//! the producer pushes `Online`/`Offline` through a bounded
//! [`ConnectivitySender`], and the loop thread drains them with `poll()`
//! between doing its own work.
//!
//! ## Run
//! ```bash
//! cargo run --example queue_feed
//! ```

use std::rc::Rc;
use std::thread;
use std::time::Duration;

use netsignal::{
    ConnectivityEvent, ConnectivityHost, NetworkStatus, QueueConfig, QueueHost, Reaction, Runtime,
};

fn main() -> anyhow::Result<()> {
    let (host, sender) = QueueHost::new(QueueConfig::default());
    let host = Rc::new(host);

    let runtime = Runtime::new();
    let dyn_host: Rc<dyn ConnectivityHost> = host.clone();
    let status = NetworkStatus::create(&runtime, dyn_host);

    let _watcher = {
        let status = status.clone();
        Reaction::new(&runtime, "status-line", move || {
            let line = if status.is_online() { "Online" } else { "Offline" };
            println!("Network Status: {line}");
        })
    };

    let producer = thread::spawn(move || {
        let script = [
            ConnectivityEvent::Offline,
            ConnectivityEvent::Online,
            ConnectivityEvent::Offline,
        ];
        for event in script {
            thread::sleep(Duration::from_millis(50));
            if sender.push(event).is_err() {
                break;
            }
        }
    });

    // The loop thread owns the reactive graph; poll between work slices.
    for _ in 0..10 {
        let applied = host.poll();
        if applied > 0 {
            println!("(applied {applied} event(s))");
        }
        thread::sleep(Duration::from_millis(25));
    }

    producer
        .join()
        .map_err(|_| anyhow::anyhow!("producer thread panicked"))?;
    Ok(())
}
