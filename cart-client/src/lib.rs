//! Cart Client - order store over the remote order API
//!
//! Loads restaurant orders over HTTP, keeps the recent ones in memory,
//! and mediates search, single-field edits and deletes.

pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod types;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult, ErrorKind};
pub use http::{NetworkOrderApi, OrderApi};
pub use store::{DELETE_FAILED_NOTICE, OrderStore, UPDATE_FAILED_NOTICE, recent_orders};
pub use types::{ViewState, WritePolicies, WritePolicy};

// Re-export shared types for convenience
pub use shared::{FieldError, Order, OrderField, OrderPatch, OrderStatus};
