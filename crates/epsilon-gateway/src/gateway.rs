use crate::card::CreditCard;
use crate::config::GatewayConfig;
use crate::detail::PurchaseDetail;
use crate::error::GatewayError;
use crate::request::PurchaseRequest;
use crate::response::Response;

/// Epsilon card-payment gateway.
///
/// Stateless apart from its configuration and HTTP client: each call is one
/// form POST and one reply. Transport failures and non-2xx statuses come back
/// as `Err`; a declined card comes back as `Ok` with `success() == false`.
#[derive(Debug, Clone)]
pub struct EpsilonGateway {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl EpsilonGateway {
    /// Gateway against the production endpoint.
    pub fn new(contact_code: impl Into<String>) -> Result<Self, GatewayError> {
        Self::with_config(GatewayConfig::new(contact_code))
    }

    /// Redirects are not followed, so a 3xx reply surfaces as a
    /// [`GatewayError::ResponseError`].
    pub fn with_config(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| GatewayError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Create a gateway with a custom reqwest::Client.
    pub fn with_http_client(config: GatewayConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Charge `amount` (minor units; yen have none) to `card`.
    pub async fn purchase(
        &self,
        amount: u64,
        card: &CreditCard,
        detail: &PurchaseDetail,
    ) -> Result<Response, GatewayError> {
        let form = PurchaseRequest::build(&self.config.contact_code, amount, card, detail)?;
        let url = self.config.purchase_url();

        tracing::debug!(
            order_number = %detail.order_number,
            amount,
            card = %card.masked_number(),
            url = %url,
            "sending purchase"
        );

        let resp = self
            .http
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| GatewayError::Http(format!("purchase request failed: {e}")))?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| GatewayError::Http(format!("failed to read purchase reply: {e}")))?;

        let response = classify(status, &body)?;
        tracing::info!(
            order_number = %detail.order_number,
            success = response.success(),
            trans_code = response.trans_code().unwrap_or_default(),
            err_code = response.err_code().unwrap_or_default(),
            "purchase completed"
        );
        Ok(response)
    }
}

/// Turn an HTTP status and body into the purchase outcome.
///
/// Any non-2xx status is a [`GatewayError::ResponseError`] and the body is
/// not parsed. A 2xx body is parsed into a [`Response`].
pub fn classify(status: u16, body: &[u8]) -> Result<Response, GatewayError> {
    if !(200..300).contains(&status) {
        tracing::warn!(status, "gateway returned non-success status");
        return Err(GatewayError::ResponseError {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }
    Response::parse(body)
}
