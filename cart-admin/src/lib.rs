//! cart-admin - admin dashboard for food cart orders
//!
//! Lists recent orders, edits single fields, deletes orders and prints
//! invoices, all against the remote order API.

pub mod commands;
pub mod config;
pub mod invoice;
pub mod logger;

pub use commands::{Cli, Command, render_table, run};
pub use config::Config;
pub use invoice::{InvoiceRenderer, StoreInfo, render_invoice};
pub use logger::init_logger;
