//! Command line surface over the order store
//!
//! Every command loads the recent orders first, then acts on them.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use cart_client::{ClientError, ErrorKind, NetworkOrderApi, OrderStore, WritePolicy};
use cart_printer::{CodePage, NetworkPrinter, Printer};
use clap::{Parser, Subcommand};
use shared::{Order, OrderField, OrderStatus};
use tracing::info;

use crate::config::Config;
use crate::invoice::InvoiceRenderer;

/// Admin orders dashboard
#[derive(Debug, Parser)]
#[command(name = "cart-admin", version, about = "Admin orders dashboard")]
pub struct Cli {
    /// Order API base URL (overrides CART_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List recent orders, newest first
    List {
        /// Filter by order number, name, payment method or date
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Change one field of an order
    Set {
        id: String,
        /// orderNumber, name, table, order, total, gst, grandTotal, paymentMethod
        field: OrderField,
        value: String,
    },
    /// Change the status of an order
    Status {
        id: String,
        /// Running, Delivered or "Not Acceptable"
        status: OrderStatus,
    },
    /// Delete an order
    Delete { id: String },
    /// Print an invoice
    Print {
        id: String,
        /// Write the HTML invoice to this file instead of stdout
        #[arg(long, conflicts_with = "printer")]
        html: Option<PathBuf>,
        /// Send to a network receipt printer (overrides PRINTER_ADDR)
        #[arg(long)]
        printer: Option<String>,
    },
}

/// Run one command; the returned code reflects per-operation failures
pub async fn run(cli: Cli, config: &Config) -> Result<ExitCode> {
    let mut client_config = config.client_config();
    if let Some(url) = cli.api_url {
        client_config.base_url = url;
    }
    let store = client_config
        .build_store()
        .context("Failed to set up order API client")?;

    info!(url = %client_config.base_url, "Loading orders");
    if let Err(e) = store.load().await {
        println!("Error: {}", e);
        return Ok(ExitCode::FAILURE);
    }

    match cli.command {
        Command::List { search } => {
            let view = match search {
                Some(term) => store.search(&term).await,
                None => store.filtered_orders().await,
            };
            print!("{}", render_table(&view));
            Ok(ExitCode::SUCCESS)
        }
        Command::Set { id, field, value } => update(&store, &id, field, &value).await,
        Command::Status { id, status } => {
            update(&store, &id, OrderField::Status, status.label()).await
        }
        Command::Delete { id } => match store.delete(&id).await {
            Ok(()) => {
                println!("Deleted order {}", id);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                report(&store, &e).await;
                Ok(ExitCode::FAILURE)
            }
        },
        Command::Print { id, html, printer } => {
            let order = store
                .get(&id)
                .await
                .with_context(|| format!("Order not found: {}", id))?;
            print_invoice(config, &order, html, printer.or_else(|| config.printer_addr.clone()))
                .await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn update(
    store: &OrderStore<NetworkOrderApi>,
    id: &str,
    field: OrderField,
    value: &str,
) -> Result<ExitCode> {
    match store.update_field(id, field, value).await {
        Ok(order) => {
            print!("{}", render_table(std::slice::from_ref(&order)));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            // Optimistic update: the local change stands, show it with the failure
            if e.kind() == ErrorKind::Update
                && store.policies().update == WritePolicy::Optimistic
            {
                if let Some(order) = store.get(id).await {
                    print!("{}", render_table(std::slice::from_ref(&order)));
                }
            }
            report(store, &e).await;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Show the operator what went wrong
async fn report(store: &OrderStore<NetworkOrderApi>, error: &ClientError) {
    match store.notice().await {
        Some(notice) => eprintln!("{} ({})", notice, error),
        None => eprintln!("{}", error),
    }
}

async fn print_invoice(
    config: &Config,
    order: &Order,
    html: Option<PathBuf>,
    printer: Option<String>,
) -> Result<()> {
    let renderer = InvoiceRenderer::new(order, &config.store);

    if let Some(addr) = printer {
        let code_page = CodePage::from_label(&config.printer_encoding)?;
        let data = renderer.render_escpos(config.printer_width, code_page);
        let printer = NetworkPrinter::from_addr(&addr)?;
        printer
            .print(&data)
            .await
            .with_context(|| format!("Failed to print invoice to {}", addr))?;
        println!("Invoice {} sent to {}", order.order_number, addr);
        return Ok(());
    }

    let page = renderer.render_html();
    match html {
        Some(path) => {
            std::fs::write(&path, page)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Invoice written to {}", path.display());
        }
        None => print!("{}", page),
    }
    Ok(())
}

// ========== Table Rendering ==========

const HEADERS: [&str; 12] = [
    "Serial No.",
    "Order Number",
    "Date & Time",
    "Name",
    "Table",
    "Order Details",
    "Total (₹)",
    "GST (₹)",
    "Grand Total (₹)",
    "Payment Method",
    "Status",
    "ID",
];

/// Longest order-details text shown in a table cell
const DETAILS_MAX: usize = 32;

/// Render orders as a plain-text table, or "No orders found"
pub fn render_table(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders found\n".to_string();
    }

    let rows: Vec<[String; 12]> = orders
        .iter()
        .enumerate()
        .map(|(idx, o)| {
            [
                (idx + 1).to_string(),
                o.order_number.clone(),
                format!("{} {}", o.date, o.time).trim().to_string(),
                o.name.clone(),
                o.table.clone(),
                clip(&o.order, DETAILS_MAX),
                o.total.to_string(),
                o.gst.to_string(),
                o.grand_total.to_string(),
                o.payment_method.clone(),
                o.status.label().to_string(),
                o.id.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(rule.join("-+-").as_str());
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 12], widths: &[usize; 12]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

/// Shorten text to `max` characters, marking the cut with "..."
fn clip(s: &str, max: usize) -> String {
    let s = s.replace(['\n', '\r'], " ");
    if s.chars().count() <= max {
        return s;
    }
    let head: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str, number: &str, name: &str) -> Order {
        Order {
            id: id.into(),
            order_number: number.into(),
            date: "2024-10-18".into(),
            time: "13:45".into(),
            name: name.into(),
            table: "3".into(),
            order: "1x Thali".into(),
            total: 200.0,
            gst: 10.0,
            grand_total: 210.0,
            payment_method: "Cash".into(),
            status: OrderStatus::Running,
        }
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(render_table(&[]), "No orders found\n");
    }

    #[test]
    fn test_table_rows_have_serial_numbers() {
        let table = render_table(&[order("a", "1001", "Ravi"), order("b", "1002", "Priya")]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Serial No. | Order Number"));
        assert!(lines[2].starts_with("1          | 1001"));
        assert!(lines[3].starts_with("2          | 1002"));
        assert!(lines[3].contains("Priya"));
        assert!(lines[3].contains("210"));
        assert!(lines[3].contains("Running"));
    }

    #[test]
    fn test_clip_long_details() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("a very long order description", 10), "a very ...");
        assert_eq!(clip("two\nlines", 20), "two lines");
    }

    #[test]
    fn test_cli_parses_commands() {
        let cli = Cli::try_parse_from(["cart-admin", "set", "abc", "grandTotal", "₹500"]).unwrap();
        match cli.command {
            Command::Set { id, field, value } => {
                assert_eq!(id, "abc");
                assert_eq!(field, OrderField::GrandTotal);
                assert_eq!(value, "₹500");
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["cart-admin", "status", "abc", "Not Acceptable"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Status { status: OrderStatus::NotAcceptable, .. }
        ));

        assert!(Cli::try_parse_from(["cart-admin", "set", "abc", "date", "x"]).is_err());
        assert!(
            Cli::try_parse_from([
                "cart-admin", "print", "abc", "--html", "a.html", "--printer", "10.0.0.1"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_cli_global_api_url() {
        let cli =
            Cli::try_parse_from(["cart-admin", "list", "--api-url", "http://localhost:4000"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:4000"));
    }
}
