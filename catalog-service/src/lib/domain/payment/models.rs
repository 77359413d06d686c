use chrono::DateTime;
use chrono::Utc;

/// Tokens credited per settled purchase.
pub const TOKENS_PER_PURCHASE: i32 = 5;

/// Charge amount for one token pack (gateway currency units).
pub const TOKEN_PACK_PRICE: i64 = 100_000;

/// Payment record. Created "pending" when checkout starts; the gateway's
/// webhook writes the terminal status later.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: i32,
    /// Order identifier shared with the gateway (`order-{user_id}-{millis}`).
    pub order_token: String,
    pub payment_status: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a new pending transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub order_token: String,
    pub payment_status: String,
    pub user_id: i32,
}

/// Checkout parameters handed to the gateway.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub order_id: String,
    pub gross_amount: i64,
    pub customer_email: String,
    /// Echoed back by the gateway in its notification (`custom_field1`).
    pub user_id: i32,
}

/// Gateway response to a checkout request.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub redirect_url: String,
}

/// Transaction status as confirmed with the gateway.
#[derive(Debug, Clone)]
pub struct PaymentNotification {
    pub order_id: String,
    pub transaction_status: String,
    pub custom_field1: Option<String>,
}

impl PaymentNotification {
    /// Terminal states indicating a successful charge.
    pub fn is_settled(&self) -> bool {
        matches!(self.transaction_status.as_str(), "settlement" | "capture")
    }

    /// The paying user's id: the structured custom field when present,
    /// otherwise the second `-`-separated segment of the order id.
    pub fn user_id(&self) -> Option<i32> {
        if let Some(raw) = &self.custom_field1 {
            return raw.parse().ok();
        }
        self.order_id
            .strip_prefix("order-")?
            .split('-')
            .next()?
            .parse()
            .ok()
    }
}
