// trolley/src/cart/mod.rs

//! The local cart: domain types, the closed command set, the pure reducer,
//! and the shared store handle. No I/O happens in this module; bridging to
//! the server lives in `crate::sync`.

pub mod command;
pub mod item;
pub mod state;
pub mod store;

pub use command::CartCommand;
pub use item::{CartItem, CartModifierGroup, LineKey, ModifierSelection, OrderType};
pub use state::{Applied, CartState};
pub use store::CartStore;
