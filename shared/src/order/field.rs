//! Editable order fields and single-field patches

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::amount::parse_amount;
use super::types::OrderStatus;
use crate::error::{FieldError, FieldResult};

/// An editable order attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    OrderNumber,
    Name,
    Table,
    Order,
    Total,
    Gst,
    GrandTotal,
    PaymentMethod,
    Status,
}

impl OrderField {
    /// Every editable field
    pub const ALL: [OrderField; 9] = [
        Self::OrderNumber,
        Self::Name,
        Self::Table,
        Self::Order,
        Self::Total,
        Self::Gst,
        Self::GrandTotal,
        Self::PaymentMethod,
        Self::Status,
    ];

    /// JSON key used by the order API
    pub fn wire_key(&self) -> &'static str {
        match self {
            Self::OrderNumber => "orderNumber",
            Self::Name => "name",
            Self::Table => "table",
            Self::Order => "order",
            Self::Total => "total",
            Self::Gst => "gst",
            Self::GrandTotal => "grandTotal",
            Self::PaymentMethod => "paymentMethod",
            Self::Status => "status",
        }
    }

    /// Amount fields go through [`parse_amount`]
    pub fn is_amount(&self) -> bool {
        matches!(self, Self::Total | Self::Gst | Self::GrandTotal)
    }
}

impl std::fmt::Display for OrderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_key())
    }
}

impl std::str::FromStr for OrderField {
    type Err = FieldError;

    /// Accepts the wire key in any case, with or without underscores
    /// (`grandTotal`, `grand_total`, `GRANDTOTAL`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().replace(['_', '-'], "").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.wire_key().to_ascii_lowercase() == key)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

/// A change to exactly one order field
///
/// Serializes as a single-key object, e.g. `{"grandTotal": 472.5}`, which
/// is the body the order API expects for a partial update.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderPatch {
    OrderNumber(String),
    Name(String),
    Table(String),
    Order(String),
    Total(f64),
    Gst(f64),
    GrandTotal(f64),
    PaymentMethod(String),
    Status(OrderStatus),
}

impl OrderPatch {
    /// Build a patch from raw user input
    ///
    /// Amount fields are stripped and parsed, status must be one of the
    /// fixed labels, everything else is taken verbatim.
    pub fn parse(field: OrderField, raw: &str) -> FieldResult<Self> {
        Ok(match field {
            OrderField::OrderNumber => Self::OrderNumber(raw.to_string()),
            OrderField::Name => Self::Name(raw.to_string()),
            OrderField::Table => Self::Table(raw.to_string()),
            OrderField::Order => Self::Order(raw.to_string()),
            OrderField::Total => Self::Total(parse_amount(raw)?),
            OrderField::Gst => Self::Gst(parse_amount(raw)?),
            OrderField::GrandTotal => Self::GrandTotal(parse_amount(raw)?),
            OrderField::PaymentMethod => Self::PaymentMethod(raw.to_string()),
            OrderField::Status => Self::Status(raw.parse()?),
        })
    }

    /// The field this patch changes
    pub fn field(&self) -> OrderField {
        match self {
            Self::OrderNumber(_) => OrderField::OrderNumber,
            Self::Name(_) => OrderField::Name,
            Self::Table(_) => OrderField::Table,
            Self::Order(_) => OrderField::Order,
            Self::Total(_) => OrderField::Total,
            Self::Gst(_) => OrderField::Gst,
            Self::GrandTotal(_) => OrderField::GrandTotal,
            Self::PaymentMethod(_) => OrderField::PaymentMethod,
            Self::Status(_) => OrderField::Status,
        }
    }
}

impl Serialize for OrderPatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        let key = self.field().wire_key();
        match self {
            Self::OrderNumber(v)
            | Self::Name(v)
            | Self::Table(v)
            | Self::Order(v)
            | Self::PaymentMethod(v) => map.serialize_entry(key, v)?,
            Self::Total(v) | Self::Gst(v) | Self::GrandTotal(v) => map.serialize_entry(key, v)?,
            Self::Status(v) => map.serialize_entry(key, v)?,
        }
        map.end()
    }
}
