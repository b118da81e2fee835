use serde::{Deserialize, Serialize};

/// Merchant-side fields Epsilon requires alongside every purchase.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PurchaseDetail {
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub item_code: String,
    pub item_name: String,
    /// Merchant order number; must be unique per contact code.
    pub order_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo2: Option<String>,
}
