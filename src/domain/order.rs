use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Delivery time of a stock order, carried on the wire as 24-hour `HH:mm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryTime(pub NaiveTime);

impl DeliveryTime {
    pub const FORMAT: &'static str = "%H:%M";

    pub fn parse(text: &str) -> Result<Self, chrono::ParseError> {
        NaiveTime::parse_from_str(text, Self::FORMAT).map(Self)
    }
}

impl fmt::Display for DeliveryTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl Serialize for DeliveryTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DeliveryTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        DeliveryTime::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// One product line of a submitted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub in_stock_quantity: u32,
}

impl OrderLine {
    pub fn amount(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// The two submission shapes. Only stock orders carry delivery scheduling.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderKind {
    Regular,
    Stock {
        delivery_date: Option<DateTime<Utc>>,
        delivery_time: Option<DeliveryTime>,
    },
}

/// A finalized order ready to be sent to the persistence endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSubmission {
    pub lines: Vec<OrderLine>,
    pub total: f64,
    pub branch: String,
    pub kind: OrderKind,
}

/// Wire representation of an order submission (`POST /orderplaceds` body).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub products: Vec<OrderLine>,
    pub total_amount: f64,
    #[serde(default)]
    pub is_stock_order: bool,
    pub delivery_date: Option<DateTime<Utc>>,
    pub delivery_time: Option<DeliveryTime>,
    pub branch: String,
}

impl OrderPayload {
    /// Sum of `quantity × price` over the submitted lines.
    pub fn line_total(&self) -> f64 {
        self.products.iter().map(OrderLine::amount).sum()
    }
}

impl From<OrderSubmission> for OrderPayload {
    fn from(submission: OrderSubmission) -> Self {
        let (is_stock_order, delivery_date, delivery_time) = match submission.kind {
            OrderKind::Regular => (false, None, None),
            OrderKind::Stock {
                delivery_date,
                delivery_time,
            } => (true, delivery_date, delivery_time),
        };
        Self {
            products: submission.lines,
            total_amount: submission.total,
            is_stock_order,
            delivery_date,
            delivery_time,
            branch: submission.branch,
        }
    }
}

impl From<OrderPayload> for OrderSubmission {
    /// Scheduling fields on a non-stock payload are dropped.
    fn from(payload: OrderPayload) -> Self {
        let kind = if payload.is_stock_order {
            OrderKind::Stock {
                delivery_date: payload.delivery_date,
                delivery_time: payload.delivery_time,
            }
        } else {
            OrderKind::Regular
        };
        Self {
            lines: payload.products,
            total: payload.total_amount,
            branch: payload.branch,
            kind,
        }
    }
}

/// Head-office response to a placed order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderResponse {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl fmt::Display for OrderResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderResponse::Pending => write!(f, "pending"),
            OrderResponse::Accepted => write!(f, "accepted"),
            OrderResponse::Rejected => write!(f, "rejected"),
        }
    }
}

/// A persisted order, as stored and returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub id: String,
    pub products: Vec<OrderLine>,
    pub total_amount: f64,
    pub is_stock_order: bool,
    pub delivery_date: Option<DateTime<Utc>>,
    pub delivery_time: Option<DeliveryTime>,
    pub branch: String,
    #[serde(default)]
    pub response: OrderResponse,
    pub created_at: DateTime<Utc>,
}

impl PlacedOrder {
    pub fn new(id: impl Into<String>, submission: OrderSubmission, created_at: DateTime<Utc>) -> Self {
        let payload = OrderPayload::from(submission);
        Self {
            id: id.into(),
            products: payload.products,
            total_amount: payload.total_amount,
            is_stock_order: payload.is_stock_order,
            delivery_date: payload.delivery_date,
            delivery_time: payload.delivery_time,
            branch: payload.branch,
            response: OrderResponse::Pending,
            created_at,
        }
    }
}

/// Order-history query: inclusive creation-date range plus response filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub response: Option<OrderResponse>,
}

impl OrderFilter {
    pub fn matches(&self, order: &PlacedOrder) -> bool {
        let created = order.created_at.date_naive();
        self.from.map_or(true, |from| created >= from)
            && self.to.map_or(true, |to| created <= to)
            && self.response.map_or(true, |response| order.response == response)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseUpdate {
    pub response: OrderResponse,
}
