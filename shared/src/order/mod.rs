//! Order Module
//!
//! - Types: the order record as served by the remote order API
//! - Fields: the editable attribute set and single-field patches
//! - Amount: currency string parsing for amount fields

pub mod amount;
pub mod field;
pub mod types;

// Re-exports
pub use amount::parse_amount;
pub use field::{OrderField, OrderPatch};
pub use types::{Order, OrderStatus};
