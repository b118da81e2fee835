use serde::Serialize;

use crate::card::CreditCard;
use crate::detail::PurchaseDetail;
use crate::error::GatewayError;

/// Settlement type for card payments.
pub const CARD_ST_CODE: &str = "10000-0000-00000";

/// One-off charge (as opposed to a recurring plan).
pub const MISSION_CODE_ONE_TIME: &str = "1";

/// First-time charge for this order.
pub const PROCESS_CODE_FIRST: &str = "1";

/// Form body posted to the card payment script.
#[derive(Debug, Serialize)]
pub struct PurchaseRequest<'a> {
    pub contract_code: &'a str,
    pub user_id: &'a str,
    pub user_name: String,
    pub user_mail_add: &'a str,
    pub item_code: &'a str,
    pub item_name: &'a str,
    pub order_number: &'a str,
    pub st_code: &'static str,
    pub mission_code: &'static str,
    pub item_price: u64,
    pub process_code: &'static str,
    pub card_number: &'a str,
    pub expire_y: String,
    pub expire_m: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo1: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo2: Option<&'a str>,
}

impl<'a> PurchaseRequest<'a> {
    /// Build the form for a purchase, rejecting inputs Epsilon would refuse
    /// anyway before anything goes over the wire.
    pub fn build(
        contact_code: &'a str,
        amount: u64,
        card: &'a CreditCard,
        detail: &'a PurchaseDetail,
    ) -> Result<Self, GatewayError> {
        if contact_code.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "contact code must not be empty".to_string(),
            ));
        }
        if amount == 0 {
            return Err(GatewayError::InvalidRequest(
                "amount must be greater than zero".to_string(),
            ));
        }
        if !card.has_valid_month() {
            return Err(GatewayError::InvalidRequest(format!(
                "invalid expiry month: {}",
                card.month
            )));
        }

        let user_name = if detail.user_name.is_empty() {
            card.name()
        } else {
            detail.user_name.clone()
        };

        Ok(Self {
            contract_code: contact_code,
            user_id: &detail.user_id,
            user_name,
            user_mail_add: &detail.user_email,
            item_code: &detail.item_code,
            item_name: &detail.item_name,
            order_number: &detail.order_number,
            st_code: CARD_ST_CODE,
            mission_code: MISSION_CODE_ONE_TIME,
            item_price: amount,
            process_code: PROCESS_CODE_FIRST,
            card_number: &card.number,
            expire_y: card.expiry_year(),
            expire_m: card.expiry_month(),
            security_code: card.verification_value.as_deref(),
            memo1: detail.memo1.as_deref(),
            memo2: detail.memo2.as_deref(),
        })
    }
}
