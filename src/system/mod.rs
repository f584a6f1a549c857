//! # System Interaction Layer
//!
//! The boundary between the task logic and the operating system.
//!
//! ## Modules
//!
//! - **`executor`**: spawns external processes inside a [`executor::ShellContext`]
//!   (allowed programs, working directory, cancellation scope) and reports how
//!   they ended. Process spawning sits behind the [`executor::CommandRunner`]
//!   trait so tasks can be exercised without the real tools.
//! - **`signals`**: turns Ctrl+C into a cancellation request.

pub mod executor;
pub mod signals;
