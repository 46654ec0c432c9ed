use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skypass_core::payment::{PaymentAdapter, PaymentIntent, PaymentMethod, PaymentStatus};
use skypass_shared::PaymentPayload;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::models::VehicleType;

pub const DEFAULT_AMOUNT: &str = "£0";

/// Outcome of a payment attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentReceipt {
    /// `None` when the provider never issued an intent
    pub intent_id: Option<String>,
    pub amount: String,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
}

pub struct PaymentOrchestrator {
    adapter: Arc<dyn PaymentAdapter>,
}

impl PaymentOrchestrator {
    pub fn new(adapter: Arc<dyn PaymentAdapter>) -> Self {
        Self { adapter }
    }

    /// Create and confirm an intent in one go. Provider errors are folded
    /// into a `Failed` receipt.
    pub async fn pay(&self, amount: &str, method: PaymentMethod, description: Option<String>) -> PaymentReceipt {
        let intent = match self.adapter.create_intent(amount, method, description).await {
            Ok(intent) => intent,
            Err(e) => {
                error!("Failed to create payment intent for {}: {}", amount, e);
                return PaymentReceipt {
                    intent_id: None,
                    amount: amount.to_string(),
                    method,
                    status: PaymentStatus::Failed,
                };
            }
        };

        let status = match self.adapter.confirm(&intent).await {
            Ok(status) => status,
            Err(e) => {
                error!("Payment confirmation failed for {}: {}", intent.id, e);
                PaymentStatus::Failed
            }
        };

        info!("Payment {} for {}: {}", intent.id, intent.amount, status.as_str());
        PaymentReceipt {
            intent_id: Some(intent.id),
            amount: intent.amount,
            method,
            status,
        }
    }
}

/// Payment screen state, built from the navigation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentScreen {
    amount: String,
    vehicle_type: Option<VehicleType>,
    pickup_at: Option<DateTime<Utc>>,
    method: PaymentMethod,
}

impl PaymentScreen {
    /// Missing context falls back to a zero amount and no vehicle
    pub fn from_payload(payload: Option<PaymentPayload>) -> Self {
        let payload = payload.unwrap_or_default();
        Self {
            amount: payload
                .amount
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AMOUNT.to_string()),
            vehicle_type: payload.vehicle_type.and_then(|v| v.parse().ok()),
            pickup_at: payload.pickup_at,
            method: PaymentMethod::default(),
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn vehicle_type(&self) -> Option<VehicleType> {
        self.vehicle_type
    }

    pub fn pickup_at(&self) -> Option<DateTime<Utc>> {
        self.pickup_at
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn select_method(&mut self, method: PaymentMethod) {
        self.method = method;
    }

    pub fn pay_label(&self) -> String {
        format!("Pay {}", self.amount)
    }

    /// Submit the payment. Takes `self` so a screen can only be paid once.
    pub async fn confirm(self, orchestrator: &PaymentOrchestrator) -> PaymentReceipt {
        let description = self.vehicle_type.map(|v| match self.pickup_at {
            Some(at) => format!("{} transfer, pickup {}", v, at.format("%H:%M")),
            None => format!("{} transfer", v),
        });
        orchestrator.pay(&self.amount, self.method, description).await
    }
}

/// Demo provider; confirms everything unless built with [`MockPaymentAdapter::declining`]
#[derive(Default)]
pub struct MockPaymentAdapter {
    decline: bool,
}

impl MockPaymentAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declining() -> Self {
        Self { decline: true }
    }
}

#[async_trait::async_trait]
impl PaymentAdapter for MockPaymentAdapter {
    async fn create_intent(
        &self,
        amount: &str,
        method: PaymentMethod,
        description: Option<String>,
    ) -> Result<PaymentIntent, Box<dyn std::error::Error + Send + Sync>> {
        Ok(PaymentIntent {
            id: format!("mock_pi_{}", Uuid::new_v4().simple()),
            amount: amount.to_string(),
            method,
            status: PaymentStatus::RequiresConfirmation,
            description,
            created_at: Utc::now(),
        })
    }

    async fn confirm(&self, intent: &PaymentIntent) -> Result<PaymentStatus, Box<dyn std::error::Error + Send + Sync>> {
        if self.decline {
            return Err(format!("Simulated decline for {}", intent.id).into());
        }
        Ok(PaymentStatus::Succeeded)
    }
}
