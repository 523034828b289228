//! src/domain/order.rs

use crate::domain::{lenient, DocumentId, ValidationError};
use serde_json::{json, Value};

/// A customer order of the `food_orders` collection.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodOrder {
    #[serde(rename = "_id", deserialize_with = "lenient::document_id")]
    pub id: DocumentId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub customer: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub items: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub payment_status: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub payment_method: String,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub total: f64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub decline_reason: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Preparing,
    ReadyToBeDelivered,
    Completed,
    Declined,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::ReadyToBeDelivered => "Ready to be Delivered",
            OrderStatus::Completed => "Completed",
            OrderStatus::Declined => "Declined",
            OrderStatus::Other(s) => s,
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s.trim() {
            "" | "Pending" => OrderStatus::Pending,
            "Preparing" | "Accepted" => OrderStatus::Preparing,
            "Ready to be Delivered" => OrderStatus::ReadyToBeDelivered,
            "Completed" => OrderStatus::Completed,
            "Declined" => OrderStatus::Declined,
            other => OrderStatus::Other(other.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("paid") {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Pending
        }
    }
}

/// Vendor actions on an order, as they appear in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderAction {
    Accept,
    Decline,
    Prepared,
    Payment,
}

impl OrderAction {
    fn past_tense(&self) -> &'static str {
        match self {
            OrderAction::Accept => "accepted",
            OrderAction::Decline => "declined",
            OrderAction::Prepared => "marked as prepared",
            OrderAction::Payment => "marked as paid",
        }
    }
}

impl FoodOrder {
    pub fn order_status(&self) -> OrderStatus {
        OrderStatus::from(self.status.as_str())
    }

    pub fn payment(&self) -> PaymentStatus {
        PaymentStatus::from(self.payment_status.as_str())
    }

    pub fn is_cash(&self) -> bool {
        self.payment_method.trim().eq_ignore_ascii_case("cash")
    }

    pub fn total_display(&self) -> String {
        format!("LKR {:.2}", self.total)
    }

    pub fn items_display(&self) -> String {
        self.items.join(", ")
    }

    pub fn can_accept(&self) -> bool {
        self.order_status() == OrderStatus::Pending
    }

    pub fn can_mark_prepared(&self) -> bool {
        self.order_status() == OrderStatus::Preparing
    }

    /// Cash payments are collected on delivery. Complaints are filed at the
    /// same point.
    pub fn awaits_cash_payment(&self) -> bool {
        self.order_status() == OrderStatus::ReadyToBeDelivered
            && self.payment() == PaymentStatus::Pending
            && self.is_cash()
    }

    /// Fields to update for `action`, or an error if the order is not in a
    /// state where the action applies.
    pub fn transition(
        &self,
        action: OrderAction,
        decline_reason: Option<&str>,
    ) -> Result<Value, ValidationError> {
        let allowed = match action {
            OrderAction::Accept | OrderAction::Decline => self.can_accept(),
            OrderAction::Prepared => self.can_mark_prepared(),
            OrderAction::Payment => self.awaits_cash_payment(),
        };
        if !allowed {
            return Err(ValidationError::InvalidOrderTransition {
                from: self.order_status().as_str().to_owned(),
                action: action.past_tense(),
            });
        }
        Ok(match action {
            OrderAction::Accept => json!({ "status": OrderStatus::Preparing.as_str() }),
            OrderAction::Prepared => {
                json!({ "status": OrderStatus::ReadyToBeDelivered.as_str() })
            }
            OrderAction::Payment => json!({ "paymentStatus": PaymentStatus::Paid.as_str() }),
            OrderAction::Decline => {
                let reason = decline_reason.map(str::trim).unwrap_or_default();
                if reason.is_empty() {
                    return Err(ValidationError::MissingField("reason"));
                }
                json!({ "status": OrderStatus::Declined.as_str(), "declineReason": reason })
            }
        })
    }
}

/// Body stored in the `complaints` collection.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub order_id: String,
    pub customer: String,
    pub complaint: String,
    pub created_at: String,
}

impl Complaint {
    pub fn new(order: &FoodOrder, text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::MissingField("complaint"));
        }
        Ok(Self {
            order_id: order.id.to_string(),
            customer: order.customer.clone(),
            complaint: text.to_owned(),
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}
