// src/system/signals.rs

use crate::CancellationToken;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::thread;

/// Sets `token` when the process receives Ctrl+C.
///
/// The listener lives on its own thread with a single-threaded runtime, so the
/// blocking step loop on the main thread is left alone. Once installed, Ctrl+C
/// no longer terminates the process directly: the executor notices the flag,
/// kills the running child and reports [`crate::system::executor::ExecutionError::Cancelled`].
pub fn watch_for_interrupt(token: &CancellationToken) {
    let token = Arc::clone(token);
    let spawned = thread::Builder::new()
        .name("ops-interrupt".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    log::warn!("Could not start the interrupt listener: {}", e);
                    return;
                }
            };
            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        log::debug!("Interrupt received, cancelling the running step.");
                        token.store(true, Ordering::SeqCst);
                    }
                    Err(e) => log::warn!("Could not listen for Ctrl+C: {}", e),
                }
            });
        });

    if let Err(e) = spawned {
        log::warn!("Could not spawn the interrupt listener thread: {}", e);
    }
}
