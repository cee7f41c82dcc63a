//! Promotion entity - A discount campaign
//!
//! A promotion carries a name, a discount percentage, a validity date range
//! and a free-form status. No rule relates the fields to each other: the end
//! date may precede the start date and any status text is accepted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PromotionId;

/// A discount campaign as stored and as exchanged over the API.
///
/// `id` is `None` until storage assigns one. Incoming payloads may omit it;
/// any id they do carry is never used to locate or overwrite a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PromotionId>,
    pub name: String,
    /// Percentage with fixed precision (5 digits, 2 after the point).
    pub discount_percentage: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
}

impl Promotion {
    pub fn new(
        name: impl Into<String>,
        discount_percentage: Decimal,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            discount_percentage,
            start_date,
            end_date,
            status: status.into(),
        }
    }

    pub fn with_id(mut self, id: PromotionId) -> Self {
        self.id = Some(id);
        self
    }

    /// Drop any caller-supplied id so storage generates a fresh one.
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    /// Build the record that results from applying `payload` to `self`.
    ///
    /// The id comes from `self`; the five mutable fields come from `payload`.
    pub fn with_updates_from(&self, payload: &Promotion) -> Promotion {
        Promotion {
            id: self.id,
            name: payload.name.clone(),
            discount_percentage: payload.discount_percentage,
            start_date: payload.start_date,
            end_date: payload.end_date,
            status: payload.status.clone(),
        }
    }
}
