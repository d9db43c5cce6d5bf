//! Invoice renderer
//!
//! Renders a single order as a printable tax invoice, either as an HTML
//! page for a browser print dialog or as ESC/POS bytes for a receipt
//! printer. Rendering is pure: nothing here touches the order store.

use cart_printer::{CodePage, EscPosBuilder};
use shared::Order;

/// Restaurant details printed in the invoice header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreInfo {
    pub name: String,
    pub address_lines: Vec<String>,
    pub contact: String,
}

impl Default for StoreInfo {
    fn default() -> Self {
        Self {
            name: "HooShop GROUP OF RESTAURANTS".into(),
            address_lines: vec!["Rohtak, Haryana".into(), "Rohtak - 124001".into()],
            contact: "9817409607".into(),
        }
    }
}

/// Invoice renderer for one order
pub struct InvoiceRenderer<'a> {
    order: &'a Order,
    store: &'a StoreInfo,
}

impl<'a> InvoiceRenderer<'a> {
    pub fn new(order: &'a Order, store: &'a StoreInfo) -> Self {
        Self { order, store }
    }

    /// Label/value rows shared by both layouts
    fn detail_rows(&self) -> [(&'static str, String); 9] {
        let o = self.order;
        [
            ("Bill No", o.order_number.clone()),
            ("Date & Time", format!("{} {}", o.date, o.time).trim().to_string()),
            ("Name", o.name.clone()),
            ("Table", o.table.clone()),
            ("Order Details", o.order.clone()),
            ("Total", format!("₹{}", o.total)),
            ("GST", format!("₹{}", o.gst)),
            ("Grand Total", format!("₹{}", o.grand_total)),
            ("Payment Method", o.payment_method.clone()),
        ]
    }

    /// Render as a standalone HTML page
    pub fn render_html(&self) -> String {
        let mut html = String::with_capacity(2048);
        html.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Invoice</title>");
        html.push_str("<style>@media print { .no-print { display: none; } }</style>");
        html.push_str("</head><body>\n");
        html.push_str(
            "<div style=\"padding: 20px; border: 1px solid black; margin-bottom: 20px;\">\n",
        );

        html.push_str(&format!("  <h2>{}</h2>\n", escape_html(&self.store.name)));
        html.push_str("  <p>Address</p>\n");
        for line in &self.store.address_lines {
            html.push_str(&format!("  <p>{}</p>\n", escape_html(line)));
        }
        html.push_str(&format!(
            "  <p>Contact: {}</p>\n",
            escape_html(&self.store.contact)
        ));
        html.push_str("  <p><strong>TAX INVOICE</strong></p>\n");

        for (label, value) in self.detail_rows() {
            html.push_str(&format!(
                "  <p><strong>{}:</strong> {}</p>\n",
                escape_html(label),
                escape_html(&value)
            ));
        }

        html.push_str("</div>\n</body></html>\n");
        html
    }

    /// Render as ESC/POS bytes for a receipt printer
    pub fn render_escpos(&self, width: usize, code_page: CodePage) -> Vec<u8> {
        let o = self.order;
        let mut b = EscPosBuilder::with_code_page(width, code_page);

        // Header
        b.center();
        b.bold();
        b.double_height();
        b.wrapped(&self.store.name);
        b.reset_size();
        b.bold_off();
        for line in &self.store.address_lines {
            b.line(line);
        }
        b.line(&format!("Contact: {}", self.store.contact));
        b.newline();
        b.bold();
        b.line("TAX INVOICE");
        b.bold_off();

        b.left();
        b.sep_double();
        b.line_lr(&format!("Bill No: {}", o.order_number), &o.date);
        b.line_lr(&format!("Table: {}", o.table), &o.time);
        if !o.name.is_empty() {
            b.line(&format!("Name: {}", o.name));
        }
        b.sep_single();

        // Order details (free text)
        b.wrapped(&o.order);
        b.sep_single();

        // Amounts
        b.line_lr("Total", &format!("₹{:.2}", o.total));
        b.line_lr("GST", &format!("₹{:.2}", o.gst));
        b.bold();
        b.line_lr("Grand Total", &format!("₹{:.2}", o.grand_total));
        b.bold_off();
        b.sep_double();
        if !o.payment_method.is_empty() {
            b.line_lr("Payment", &o.payment_method);
        }

        b.center();
        b.line("Thank you!");
        b.cut_feed(4);
        b.build()
    }
}

/// Render an order as an HTML invoice page
pub fn render_invoice(order: &Order, store: &StoreInfo) -> String {
    InvoiceRenderer::new(order, store).render_html()
}

/// Escape text for HTML element content
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
