//! Billing entity model and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{lenient, not_blank};
use crate::status::{BillingStatus, Recurrence};
use crate::types::{BillingId, ClientId};

/// A charge issued to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Billing {
    pub id: BillingId,
    pub client_id: ClientId,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub due_date: Option<String>,
    /// Stored status. Use [`crate::financial::derive_status`] for display.
    #[serde(default)]
    pub status: BillingStatus,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Billing {
    /// Amount, with a missing value counted as zero.
    pub fn amount_or_zero(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }
}

/// DTO for creating a new billing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBilling {
    pub client_id: ClientId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub amount: f64,
    #[validate(custom(function = "not_blank"))]
    pub due_date: String,
    /// Defaults to `pending` if omitted.
    #[serde(default)]
    pub status: BillingStatus,
    /// Defaults to `monthly` if omitted.
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// DTO for updating an existing billing. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateBilling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BillingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
