// trolley/src/cart/item.rs

//! Domain types for cart line items.
//!
//! A line item is keyed by a client-generated [`LineKey`], NOT by the menu
//! item id it references: two lines may point at the same menu item with
//! different modifier selections. Display fields are cached at add-time so
//! the cart renders without re-fetching the menu.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Client-generated identity of one cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineKey(Uuid);

impl LineKey {
  /// Generates a fresh random key. Never derived from the menu item.
  pub fn generate() -> Self {
    LineKey(Uuid::new_v4())
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl From<Uuid> for LineKey {
  fn from(id: Uuid) -> Self {
    LineKey(id)
  }
}

impl fmt::Display for LineKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// One selectable option inside a modifier group (e.g. "Large" under "Size").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierSelection {
  pub id: i64,
  /// Reference to the modifier-item definition in the menu.
  pub modifier_item_id: i64,
  pub plu: String,
  /// Price override for this selection; `None` means the menu price applies.
  pub price: Option<f64>,
  pub quantity: u32,
}

/// A customization category applied to a line (e.g. "Size", "Extras"),
/// with its ordered selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartModifierGroup {
  pub id: i64,
  /// Reference to the modifier-group definition in the menu.
  pub modifier_group_id: i64,
  pub selections: Vec<ModifierSelection>,
}

/// One line in the cart.
///
/// Quantity is always >= 1 while the line exists; decrementing a line at
/// quantity 1 removes it instead of producing zero (see `CartState::apply`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
  /// Menu item id this line references.
  pub id: i64,
  pub category_id: i64,
  /// Price-list unit code.
  pub plu: String,
  pub quantity: u32,
  #[serde(default)]
  pub special_instruction: String,
  // Display fields cached at add-time.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  /// Currency symbol/code cached alongside the price display.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub symbol: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, rename = "image", skip_serializing_if = "Option::is_none")]
  pub image_url: Option<String>,
  #[serde(default)]
  pub modifier_groups: Vec<CartModifierGroup>,
}

/// How an order reaches the customer. Dine-in carts do not flow through the
/// sync coordinator at all; they live on the shared table channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
  Delivery,
  Takeaway,
  DineIn,
}

impl Default for OrderType {
  fn default() -> Self {
    OrderType::Delivery
  }
}

impl fmt::Display for OrderType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      OrderType::Delivery => write!(f, "delivery"),
      OrderType::Takeaway => write!(f, "takeaway"),
      OrderType::DineIn => write!(f, "dine_in"),
    }
  }
}
