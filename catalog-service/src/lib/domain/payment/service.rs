use std::sync::Arc;

use chrono::Utc;

use crate::payment::errors::PaymentError;
use crate::payment::models::CheckoutRequest;
use crate::payment::models::CheckoutSession;
use crate::payment::models::NewTransaction;
use crate::payment::models::TOKENS_PER_PURCHASE;
use crate::payment::models::TOKEN_PACK_PRICE;
use crate::payment::ports::PaymentGateway;
use crate::payment::ports::TransactionRepository;
use crate::user::ports::UserRepository;

/// Domain service for token purchases: opening checkout sessions and
/// settling gateway webhook notifications.
pub struct PaymentService {
    transactions: Arc<dyn TransactionRepository>,
    users: Arc<dyn UserRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentService {
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        users: Arc<dyn UserRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            transactions,
            users,
            gateway,
        }
    }

    /// Start a token purchase: record a pending transaction, then ask the
    /// gateway for a hosted-checkout redirect URL.
    pub async fn checkout(
        &self,
        user_id: i32,
        email: &str,
    ) -> Result<CheckoutSession, PaymentError> {
        let order_id = format!("order-{}-{}", user_id, Utc::now().timestamp_millis());

        self.transactions
            .create(NewTransaction {
                order_token: order_id.clone(),
                payment_status: "pending".to_string(),
                user_id,
            })
            .await?;

        self.gateway
            .create_transaction(&CheckoutRequest {
                order_id,
                gross_amount: TOKEN_PACK_PRICE,
                customer_email: email.to_string(),
                user_id,
            })
            .await
    }

    /// Settle a gateway webhook: confirm the status with the gateway,
    /// record it, and credit the buyer on a successful charge.
    pub async fn handle_notification(&self, order_id: Option<String>) -> Result<(), PaymentError> {
        let order_id = order_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PaymentError::Gateway("notification carries no order_id".to_string()))?;

        let notification = self.gateway.notification_status(&order_id).await?;

        self.transactions
            .update_status(&notification.order_id, &notification.transaction_status)
            .await?;

        if notification.is_settled() {
            if let Some(user_id) = notification.user_id() {
                self.users
                    .credit_tokens(user_id, TOKENS_PER_PURCHASE)
                    .await
                    .map_err(|e| PaymentError::Database(e.to_string()))?;
            }
        }

        Ok(())
    }
}
