//! Order record as served by the remote order API

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use super::amount::parse_amount;
use super::field::OrderPatch;
use crate::error::FieldError;
use crate::util::{localized_date, parse_order_timestamp};

// ============================================================================
// Order Status
// ============================================================================

/// Order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    /// Being prepared (also used when the record carries no status)
    #[default]
    Running,
    /// Handed over to the customer
    Delivered,
    /// Rejected by staff
    #[serde(rename = "Not Acceptable")]
    NotAcceptable,
}

impl OrderStatus {
    /// Every status, in display order
    pub const ALL: [OrderStatus; 3] = [Self::Running, Self::Delivered, Self::NotAcceptable];

    /// Label used on the wire and in the status selector
    pub fn label(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Delivered => "Delivered",
            Self::NotAcceptable => "Not Acceptable",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = FieldError;

    /// Accepts the labels case-insensitively, ignoring spaces and underscores
    /// ("not acceptable", "NOT_ACCEPTABLE", "NotAcceptable").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "running" => Ok(Self::Running),
            "delivered" => Ok(Self::Delivered),
            "notacceptable" => Ok(Self::NotAcceptable),
            _ => Err(FieldError::InvalidStatus(s.to_string())),
        }
    }
}

// ============================================================================
// Order
// ============================================================================

/// A restaurant order
///
/// Orders are created by the ordering front end; this side only loads,
/// edits, and deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Remote identifier, immutable
    #[serde(rename = "_id")]
    pub id: String,
    /// Bill number shown on the invoice
    #[serde(default, deserialize_with = "string_or_number")]
    pub order_number: String,
    /// Order date as entered by the ordering front end
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    /// Order time as entered by the ordering front end
    #[serde(default, deserialize_with = "null_as_empty")]
    pub time: String,
    /// Customer name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Table label
    #[serde(default, deserialize_with = "string_or_number")]
    pub table: String,
    /// Free-text order details
    #[serde(default, deserialize_with = "null_as_empty")]
    pub order: String,
    /// Net total
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total: f64,
    /// GST amount
    #[serde(default, deserialize_with = "lenient_amount")]
    pub gst: f64,
    /// Total including GST
    #[serde(default, deserialize_with = "lenient_amount")]
    pub grand_total: f64,
    /// Payment method label (cash, UPI, card...)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub payment_method: String,
    /// Current status, `Running` when absent
    #[serde(default, deserialize_with = "status_or_default")]
    pub status: OrderStatus,
}

impl Order {
    /// Point in time formed by `date` + `time`, if it parses
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_order_timestamp(&self.date, &self.time)
    }

    /// Return a copy of this order with one field replaced
    pub fn with_patch(&self, patch: &OrderPatch) -> Order {
        let mut next = self.clone();
        match patch {
            OrderPatch::OrderNumber(v) => next.order_number = v.clone(),
            OrderPatch::Name(v) => next.name = v.clone(),
            OrderPatch::Table(v) => next.table = v.clone(),
            OrderPatch::Order(v) => next.order = v.clone(),
            OrderPatch::Total(v) => next.total = *v,
            OrderPatch::Gst(v) => next.gst = *v,
            OrderPatch::GrandTotal(v) => next.grand_total = *v,
            OrderPatch::PaymentMethod(v) => next.payment_method = v.clone(),
            OrderPatch::Status(v) => next.status = *v,
        }
        next
    }

    /// Case-insensitive substring match used by search
    ///
    /// Tests the order number, customer name, payment method and the
    /// localized (M/D/YYYY) order date. An empty term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        if term.is_empty() {
            return true;
        }

        self.order_number.to_lowercase().contains(&term)
            || self.name.to_lowercase().contains(&term)
            || self.payment_method.to_lowercase().contains(&term)
            || localized_date(&self.date).to_lowercase().contains(&term)
    }
}

// ============================================================================
// Lenient field decoding
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(serde_json::Number),
}

/// Order numbers and table labels arrive as strings or bare numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StringOrNumber>::deserialize(deserializer)? {
        Some(StringOrNumber::Text(s)) => s,
        Some(StringOrNumber::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

/// Amounts arrive as numbers or numeric strings
///
/// Null, blank and non-numeric text ("N/A") all decode to zero.
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawAmount>::deserialize(deserializer)? {
        None => 0.0,
        Some(RawAmount::Number(n)) => n,
        Some(RawAmount::Text(s)) => parse_amount(&s).unwrap_or(0.0),
    })
}

/// Null text fields decode as empty strings
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Missing, null or blank status means `Running`
fn status_or_default<'de, D>(deserializer: D) -> Result<OrderStatus, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(OrderStatus::default()),
        Some(s) if s.trim().is_empty() => Ok(OrderStatus::default()),
        Some(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Order {
        serde_json::from_value(json!({
            "_id": "665f1c2e9b1d4a0012ab34cd",
            "orderNumber": "A-1042",
            "date": "2024-10-18",
            "time": "13:45:00",
            "name": "Priya Sharma",
            "table": "7",
            "order": "2x Paneer Tikka, 1x Lassi",
            "total": 450,
            "gst": 22.5,
            "grandTotal": 472.5,
            "paymentMethod": "UPI",
            "status": "Delivered"
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_full_record() {
        let order = sample();
        assert_eq!(order.id, "665f1c2e9b1d4a0012ab34cd");
        assert_eq!(order.order_number, "A-1042");
        assert_eq!(order.grand_total, 472.5);
        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[test]
    fn test_missing_status_defaults_to_running() {
        let order: Order = serde_json::from_value(json!({ "_id": "1" })).unwrap();
        assert_eq!(order.status, OrderStatus::Running);
        assert_eq!(order.total, 0.0);
        assert!(order.name.is_empty());

        let order: Order =
            serde_json::from_value(json!({ "_id": "1", "status": null })).unwrap();
        assert_eq!(order.status, OrderStatus::Running);
    }

    #[test]
    fn test_lenient_numbers_and_strings() {
        let order: Order = serde_json::from_value(json!({
            "_id": "2",
            "orderNumber": 17,
            "table": 4,
            "total": "₹1,200.00",
            "gst": ""
        }))
        .unwrap();
        assert_eq!(order.order_number, "17");
        assert_eq!(order.table, "4");
        assert_eq!(order.total, 1200.0);
        assert_eq!(order.gst, 0.0);
    }

    #[test]
    fn test_null_text_and_bad_amounts_decode_empty() {
        let order: Order = serde_json::from_value(json!({
            "_id": "b",
            "date": null,
            "time": null,
            "name": null,
            "order": null,
            "paymentMethod": null,
            "total": "N/A",
            "gst": null
        }))
        .unwrap();
        assert!(order.date.is_empty());
        assert!(order.name.is_empty());
        assert!(order.payment_method.is_empty());
        assert_eq!(order.total, 0.0);
        assert_eq!(order.gst, 0.0);
        assert!(order.timestamp().is_none());
    }

    #[test]
    fn test_reject_unknown_status() {
        let result: Result<Order, _> =
            serde_json::from_value(json!({ "_id": "3", "status": "Cooking" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_reject_missing_id() {
        let result: Result<Order, _> = serde_json::from_value(json!({ "name": "x" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_uses_wire_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["_id"], "665f1c2e9b1d4a0012ab34cd");
        assert_eq!(value["grandTotal"], 472.5);
        assert_eq!(value["paymentMethod"], "UPI");
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("running".parse::<OrderStatus>().unwrap(), OrderStatus::Running);
        assert_eq!(
            "Not Acceptable".parse::<OrderStatus>().unwrap(),
            OrderStatus::NotAcceptable
        );
        assert_eq!(
            "NOT_ACCEPTABLE".parse::<OrderStatus>().unwrap(),
            OrderStatus::NotAcceptable
        );
        assert!("pending".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_with_patch_leaves_source_untouched() {
        let order = sample();
        let next = order.with_patch(&OrderPatch::GrandTotal(500.0));
        assert_eq!(next.grand_total, 500.0);
        assert_eq!(order.grand_total, 472.5);
        assert_eq!(next.id, order.id);
        assert_eq!(next.name, order.name);
    }

    #[test]
    fn test_matches_is_case_insensitive_substring() {
        let order = sample();
        assert!(order.matches(""));
        assert!(order.matches("priya"));
        assert!(order.matches("SHAR"));
        assert!(order.matches("upi"));
        assert!(order.matches("a-10"));
        assert!(order.matches("10/18/2024"));
        assert!(!order.matches("card"));
    }
}
