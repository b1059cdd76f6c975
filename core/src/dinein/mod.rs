// trolley/src/dinein/mod.rs

//! Shared dine-in table state over a socket channel.
//!
//! Multiple devices at one physical table edit the same order; the server is
//! the single authority and pushes the full table state to everyone. This
//! module owns the message shapes and the per-device session that prepares
//! and emits item updates.

pub mod channel;
pub mod message;
pub mod session;

pub use channel::{Clock, SystemClock, TableTransport};
pub use message::{Attribution, ChannelEvent, TableItem, TableItemStatus, TableMessage};
pub use session::TableSession;
