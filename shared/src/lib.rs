//! Shared types for the cart admin workspace
//!
//! Order data model, single-field patches, amount parsing and the
//! timestamp helpers used by both the order store and invoice rendering.

pub mod error;
pub mod order;
pub mod util;

// Re-exports
pub use error::{FieldError, FieldResult};
pub use order::{Order, OrderField, OrderPatch, OrderStatus, parse_amount};
pub use serde::{Deserialize, Serialize};
