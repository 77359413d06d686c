use async_trait::async_trait;

use crate::payment::errors::PaymentError;
use crate::payment::models::CheckoutRequest;
use crate::payment::models::CheckoutSession;
use crate::payment::models::NewTransaction;
use crate::payment::models::PaymentNotification;
use crate::payment::models::Transaction;

/// Persistence for payment records.
#[async_trait]
pub trait TransactionRepository: Send + Sync + 'static {
    async fn create(&self, transaction: NewTransaction) -> Result<Transaction, PaymentError>;

    /// Write the status reported by the gateway onto the matching record.
    async fn update_status(&self, order_token: &str, status: &str) -> Result<(), PaymentError>;
}

/// Outbound calls to the payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    /// Open a hosted-checkout session and return its redirect URL.
    async fn create_transaction(
        &self,
        checkout: &CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Confirm a webhook notification by fetching the transaction's status
    /// from the gateway.
    async fn notification_status(
        &self,
        order_id: &str,
    ) -> Result<PaymentNotification, PaymentError>;
}
