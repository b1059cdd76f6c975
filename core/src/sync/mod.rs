// trolley/src/sync/mod.rs

//! Server synchronization: the gateway seam, timing configuration, and the
//! debounced sync coordinator that bridges local optimistic mutation to the
//! remote cart with whole-snapshot rollback on failure.

pub mod config;
pub mod coordinator;
pub mod gateway;

pub use config::SyncConfig;
pub use coordinator::SyncCoordinator;
pub use gateway::{CartGateway, CartPushRequest, CartPushResponse};
