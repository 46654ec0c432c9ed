use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::CoreError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    RequiresConfirmation,
    Succeeded,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::RequiresConfirmation => "REQUIRES_CONFIRMATION",
            PaymentStatus::Succeeded => "SUCCEEDED",
            PaymentStatus::Failed => "FAILED",
        }
    }
}

/// Card on file, or a card typed in on the payment screen
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Stored,
    New,
}

impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stored" => Ok(PaymentMethod::Stored),
            "new" => Ok(PaymentMethod::New),
            _ => Err(CoreError::UnknownVariant {
                kind: "payment method",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String, // Provider's ID (e.g., mock_pi_123)
    /// Display amount including currency symbol, e.g. "£45"
    pub amount: String,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait PaymentAdapter: Send + Sync {
    /// Create a payment intent with the provider
    async fn create_intent(
        &self,
        amount: &str,
        method: PaymentMethod,
        description: Option<String>,
    ) -> Result<PaymentIntent, Box<dyn std::error::Error + Send + Sync>>;

    /// Confirm a previously created intent
    async fn confirm(
        &self,
        intent: &PaymentIntent,
    ) -> Result<PaymentStatus, Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("stored".parse::<PaymentMethod>().unwrap(), PaymentMethod::Stored);
        assert_eq!(" New ".parse::<PaymentMethod>().unwrap(), PaymentMethod::New);
        assert!("cash".parse::<PaymentMethod>().is_err());
        assert_eq!(PaymentMethod::default(), PaymentMethod::Stored);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_value(PaymentMethod::New).unwrap(), "new");
        assert_eq!(serde_json::to_value(PaymentStatus::Succeeded).unwrap(), PaymentStatus::Succeeded.as_str());
    }
}
