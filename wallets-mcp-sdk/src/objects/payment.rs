//! Outgoing payment outcomes.

use serde::{Deserialize, Serialize};

/// Final or interim status of an outgoing payment as reported by Blink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Success,
    Pending,
    AlreadyPaid,
    Failure,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Success => write!(f, "SUCCESS"),
            PaymentStatus::Pending => write!(f, "PENDING"),
            PaymentStatus::AlreadyPaid => write!(f, "ALREADY_PAID"),
            PaymentStatus::Failure => write!(f, "FAILURE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub status: PaymentStatus,
}
