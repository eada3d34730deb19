// Per-platform timers and task spawning.
// WASM doesn't support threads, so futures there are spawned locally and need not be Send.

use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
#[path = "tokio.rs"]
mod platform;

#[cfg(target_arch = "wasm32")]
#[path = "wasm.rs"]
mod platform;

pub use platform::*;

/// The delay in milliseconds as `setTimeout` takes it, saturating at `i32::MAX`.
pub fn timeout_millis(duration: Duration) -> i32 {
	i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}
