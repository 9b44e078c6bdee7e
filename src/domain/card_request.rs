//! Card request entity and the dispatch status state machine.
//!
//! A card request tracks one print run of physical cards from the moment a
//! branch raises it until the branch acknowledges receipt. Its status moves
//! through a fixed sequence, one step at a time; skipping a step would let
//! the recorded state drift from the physical pipeline.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Dispatch workflow status, in fixed total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RequestStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Ready,
    Dispatched,
    Acknowledged,
}

impl RequestStatus {
    /// The full workflow sequence, order-significant.
    pub const SEQUENCE: [RequestStatus; 5] = [
        RequestStatus::Pending,
        RequestStatus::InProgress,
        RequestStatus::Ready,
        RequestStatus::Dispatched,
        RequestStatus::Acknowledged,
    ];

    /// Canonical string form as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::InProgress => "In Progress",
            RequestStatus::Ready => "Ready",
            RequestStatus::Dispatched => "Dispatched",
            RequestStatus::Acknowledged => "Acknowledged",
        }
    }

    /// Parse a status string; returns None for unrecognized values.
    pub fn parse(s: &str) -> Option<Self> {
        Self::SEQUENCE.iter().copied().find(|v| v.as_str() == s)
    }

    /// Zero-based position of this status in the workflow sequence.
    pub fn position(&self) -> usize {
        Self::SEQUENCE
            .iter()
            .position(|v| v == self)
            .expect("status is in SEQUENCE")
    }

    /// The single status allowed to follow this one, if any.
    /// `Acknowledged` is terminal and has no successor.
    pub fn next(&self) -> Option<Self> {
        Self::SEQUENCE.get(self.position() + 1).copied()
    }

    /// Whether `requested` is exactly one step forward from this status.
    pub fn allows(&self, requested: RequestStatus) -> bool {
        self.next() == Some(requested)
    }

    /// Whether this status ends the workflow.
    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl From<&str> for RequestStatus {
    fn from(s: &str) -> Self {
        // Stored values are constrained by the transition guard; fall back
        // to the initial state for anything unexpected.
        Self::parse(s).unwrap_or(RequestStatus::Pending)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Card request domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CardRequest {
    /// Sequential request identifier
    #[schema(example = 1)]
    pub id: i32,
    /// Branch raising the request
    #[schema(example = "Lagos Branch")]
    pub branch_name: String,
    /// Card product being requested
    #[schema(example = "Visa Debit Card")]
    pub card_type: String,
    /// Number of cards in the print run
    #[schema(example = 100)]
    pub quantity: i32,
    /// User who raised the request (taken from the caller's token)
    pub initiator: Uuid,
    /// Total charges for the run
    #[schema(value_type = f64, example = 2500.00)]
    pub card_charges: Decimal,
    /// Unique print-run label
    #[schema(example = "Batch-2024-001")]
    pub batch: String,
    /// Current workflow status
    pub status: RequestStatus,
    /// When the request was raised
    pub date_requested: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when raising a card request.
/// The initiator is never part of this payload.
#[derive(Debug, Clone)]
pub struct NewCardRequest {
    pub branch_name: String,
    pub card_type: String,
    pub quantity: i32,
    pub card_charges: Decimal,
    pub batch: String,
}

/// Partial update for a card request. Only these columns are mutable through
/// the generic update path; status must go through the transition guard,
/// and id/initiator/timestamps are never client-writable.
#[derive(Debug, Clone, Default)]
pub struct UpdateCardRequest {
    pub branch_name: Option<String>,
    pub card_type: Option<String>,
    pub quantity: Option<i32>,
    pub card_charges: Option<Decimal>,
    pub batch: Option<String>,
    /// Captured solely so attempts to change status here can be rejected.
    pub status: Option<String>,
}

impl UpdateCardRequest {
    /// True when no mutable column is present in the payload.
    pub fn is_empty(&self) -> bool {
        self.branch_name.is_none()
            && self.card_type.is_none()
            && self.quantity.is_none()
            && self.card_charges.is_none()
            && self.batch.is_none()
    }
}
