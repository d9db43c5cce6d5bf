//! # cart-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Code page conversion (windows-1252 by default, GBK for Chinese models)
//! - Network printing (TCP port 9100)
//!
//! What to print (the invoice layout) stays in `cart-admin`.
//!
//! ## Example
//!
//! ```ignore
//! use cart_printer::{EscPosBuilder, NetworkPrinter, Printer};
//!
//! let mut builder = EscPosBuilder::new(48);
//! builder.center();
//! builder.bold();
//! builder.line("TAX INVOICE");
//! builder.bold_off();
//! builder.left();
//! builder.line_lr("Grand Total", "₹472.50");
//! builder.cut_feed(4);
//!
//! let printer = NetworkPrinter::from_addr("192.168.1.100:9100")?;
//! printer.print(&builder.build()).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;

// Re-exports
pub use encoding::CodePage;
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use printer::{DEFAULT_PORT, NetworkPrinter, Printer};
