//! Project task runner.
//!
//! `op build` installs the web client's dependencies and bundles it, `op lint`
//! lints and formats the task sources and checks the formatting of the JS
//! sources. Every step is an external tool run to completion before the next
//! one starts; the first failure stops the sequence.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag set when the user asks to stop (Ctrl+C).
pub type CancellationToken = Arc<AtomicBool>;

/// Returns `true` once cancellation has been requested on `token`.
pub fn is_cancelled(token: &CancellationToken) -> bool {
    token.load(Ordering::SeqCst)
}

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;
