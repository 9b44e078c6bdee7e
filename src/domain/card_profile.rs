//! Card profile entity - admin-owned card product templates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One charge associated with a card profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Fee {
    #[schema(example = "Maintenance Fee")]
    pub name: String,
    #[schema(example = 150.0)]
    pub value: f64,
    #[schema(example = "NGN")]
    pub currency: String,
    #[schema(example = "Monthly")]
    pub frequency: String,
    #[schema(example = "Issuance")]
    pub fee_impact: String,
}

/// Normalize a raw fees payload into a structured list.
///
/// Fees arrive as free-form JSON at the boundary; anything that is not an
/// array of fee records becomes an empty list rather than an error.
pub fn normalize_fees(value: Option<serde_json::Value>) -> Vec<Fee> {
    value
        .and_then(|v| serde_json::from_value::<Vec<Fee>>(v).ok())
        .unwrap_or_default()
}

/// Card profile domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CardProfile {
    /// Sequential profile identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Platinum Debit Card")]
    pub card_name: String,
    #[schema(example = "Premium banking card with extra benefits")]
    pub description: Option<String>,
    /// Leading digits identifying the issuing scheme; stored as metadata only
    #[schema(example = "506099")]
    pub bin_prefix: String,
    #[schema(example = "Visa")]
    pub card_scheme: String,
    /// Validity period in months
    #[schema(example = 36)]
    pub expiration: i32,
    #[schema(example = "NGN")]
    pub currency: String,
    #[schema(example = "Lagos Branch")]
    pub branch_blacklist: Option<String>,
    /// Charges attached to this card product
    pub fees: Vec<Fee>,
    /// Admin user who created the profile
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a card profile.
#[derive(Debug, Clone)]
pub struct NewCardProfile {
    pub card_name: String,
    pub description: Option<String>,
    pub bin_prefix: String,
    pub card_scheme: String,
    pub expiration: i32,
    pub currency: String,
    pub branch_blacklist: Option<String>,
    pub fees: Vec<Fee>,
}

/// Partial update for a card profile.
#[derive(Debug, Clone, Default)]
pub struct UpdateCardProfile {
    pub card_name: Option<String>,
    pub description: Option<String>,
    pub bin_prefix: Option<String>,
    pub card_scheme: Option<String>,
    pub expiration: Option<i32>,
    pub currency: Option<String>,
    pub branch_blacklist: Option<String>,
    pub fees: Option<Vec<Fee>>,
}

impl UpdateCardProfile {
    /// True when the payload carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.card_name.is_none()
            && self.description.is_none()
            && self.bin_prefix.is_none()
            && self.card_scheme.is_none()
            && self.expiration.is_none()
            && self.currency.is_none()
            && self.branch_blacklist.is_none()
            && self.fees.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fees_array_is_parsed() {
        let fees = normalize_fees(Some(json!([{
            "name": "Maintenance Fee",
            "value": 150.0,
            "currency": "NGN",
            "frequency": "Monthly",
            "fee_impact": "Issuance"
        }])));
        assert_eq!(fees.len(), 1);
        assert_eq!(fees[0].name, "Maintenance Fee");
    }

    #[test]
    fn non_array_fees_normalize_to_empty() {
        assert!(normalize_fees(Some(json!("not a list"))).is_empty());
        assert!(normalize_fees(Some(json!({"name": "x"}))).is_empty());
        assert!(normalize_fees(Some(json!(42))).is_empty());
        assert!(normalize_fees(None).is_empty());
    }
}
