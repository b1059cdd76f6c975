// src/lib.rs

//! Trolley: a client-side cart synchronization engine for restaurant ordering.
//!
//! Trolley keeps a local, optimistically mutated cart and reconciles it with
//! a remote backend:
//!  - A closed command set over a keyed line-item mapping (add/update/
//!    increase/decrease/remove/clear/replace), applied by a pure reducer.
//!  - A sync coordinator that coalesces bursts of edits behind a trailing
//!    debounce window, pushes the whole snapshot, and rolls back to the last
//!    server-acknowledged snapshot when a push fails or times out.
//!  - A stale-response guard so a slow push can never clobber newer edits.
//!  - Message shapes and a session helper for shared dine-in table orders
//!    carried over a socket channel.

pub mod cart;
pub mod dinein;
pub mod error;
pub mod sync;

// --- Re-exports for the Public API ---

// Domain types users handle constantly
pub use crate::cart::command::CartCommand;
pub use crate::cart::item::{CartItem, CartModifierGroup, LineKey, ModifierSelection, OrderType};
pub use crate::cart::state::{Applied, CartState};
pub use crate::cart::store::CartStore;

// The sync surface
pub use crate::sync::config::SyncConfig;
pub use crate::sync::coordinator::SyncCoordinator;
pub use crate::sync::gateway::{CartGateway, CartPushRequest, CartPushResponse};

// Dine-in channel surface
pub use crate::dinein::channel::{Clock, SystemClock, TableTransport};
pub use crate::dinein::message::{Attribution, ChannelEvent, TableItem, TableItemStatus, TableMessage};
pub use crate::dinein::session::TableSession;

pub use crate::error::{TrolleyError, TrolleyResult};

/*
    Core Workflow:
    1. Build a `CartStore` (empty or via `CartState::new(order_type)`).
    2. Implement `CartGateway` over your HTTP client.
    3. `SyncCoordinator::spawn(store, gateway, SyncConfig::default())` once,
       inside a tokio runtime; `hydrate().await` to pull the server cart.
    4. Route every user edit through `coordinator.dispatch(CartCommand::...)`.
       Local state updates immediately; pushes coalesce behind the debounce
       window; failures roll the cart back, never surface to the dispatcher.
    5. For dine-in, skip the coordinator entirely: open a `TableSession` over
       your socket transport and emit item updates; consume `ChannelEvent`
       pushes for the authoritative table state.
*/
