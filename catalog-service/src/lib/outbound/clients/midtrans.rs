use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::payment::errors::PaymentError;
use crate::payment::models::CheckoutRequest;
use crate::payment::models::CheckoutSession;
use crate::payment::models::PaymentNotification;
use crate::payment::ports::PaymentGateway;

/// Midtrans Snap client: hosted-checkout creation and transaction status
/// lookup. Authenticates with HTTP basic auth, server key as username.
pub struct MidtransClient {
    http: reqwest::Client,
    server_key: String,
    snap_base_url: String,
    api_base_url: String,
}

impl MidtransClient {
    pub fn new(http: reqwest::Client, server_key: String, is_production: bool) -> Self {
        let (snap_base_url, api_base_url) = if is_production {
            ("https://app.midtrans.com", "https://api.midtrans.com")
        } else {
            (
                "https://app.sandbox.midtrans.com",
                "https://api.sandbox.midtrans.com",
            )
        };

        Self {
            http,
            server_key,
            snap_base_url: snap_base_url.to_string(),
            api_base_url: api_base_url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SnapTransactionResponse {
    redirect_url: String,
}

#[derive(Debug, Deserialize)]
struct TransactionStatusResponse {
    order_id: String,
    transaction_status: String,
    custom_field1: Option<String>,
}

#[async_trait]
impl PaymentGateway for MidtransClient {
    async fn create_transaction(
        &self,
        checkout: &CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/snap/v1/transactions", self.snap_base_url);

        let body = json!({
            "transaction_details": {
                "order_id": checkout.order_id,
                "gross_amount": checkout.gross_amount,
            },
            "customer_details": {
                "first_name": "User",
                "email": checkout.customer_email,
            },
            // Echoed back in the webhook so the buyer is recoverable even
            // if the order id format changes
            "custom_field1": checkout.user_id.to_string(),
        });

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.server_key, Some(""))
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PaymentError::Gateway(format!(
                "checkout rejected with status {}",
                response.status()
            )));
        }

        let snap: SnapTransactionResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        Ok(CheckoutSession {
            redirect_url: snap.redirect_url,
        })
    }

    async fn notification_status(
        &self,
        order_id: &str,
    ) -> Result<PaymentNotification, PaymentError> {
        let url = format!("{}/v2/{}/status", self.api_base_url, order_id);

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.server_key, Some(""))
            .send()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PaymentError::Gateway(format!(
                "status lookup failed with status {}",
                response.status()
            )));
        }

        let status: TransactionStatusResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        Ok(PaymentNotification {
            order_id: status.order_id,
            transaction_status: status.transaction_status,
            custom_field1: status.custom_field1,
        })
    }
}
