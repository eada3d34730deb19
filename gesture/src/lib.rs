//! Reflects gesture actions pushed by a backend onto a video player.
//!
//! The crate is split the same way the page is:
//! - [ConnectionManager] keeps a channel open to the backend and reconnects forever.
//! - [Dispatcher] turns each [Action] into a history entry, a toast and a player mutation.
//! - [upload] posts a video file and swaps the player source on success.
//!
//! Everything meets in a [Session], which consumes a single stream of [Event]s.
//! The DOM and the transports live behind the [Player], [Surface], [Transport] and [Uploader] traits.

mod action;
mod connection;
mod dispatch;
mod error;
mod event;
mod history;
mod player;
mod session;
mod source;
mod toast;

pub mod runtime;
pub mod upload;

pub use action::*;
pub use connection::*;
pub use dispatch::*;
pub use error::*;
pub use event::*;
pub use history::*;
pub use player::*;
pub use session::*;
pub use source::*;
pub use toast::*;
pub use upload::{UploadResponse, Uploader};

// Re-export these crates.
pub use url;
