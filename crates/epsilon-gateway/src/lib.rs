//! Adapter for the Epsilon card-payment gateway.
//!
//! Translates a generic purchase into Epsilon's form-encoded request and
//! normalizes its CP932 XML reply into a [`Response`].
//!
//! # Outcomes
//!
//! - Transport failures and non-2xx statuses return [`GatewayError`]
//! - A declined card returns `Ok(Response)` with `success() == false` and the
//!   vendor's `err_code` / `err_detail` in `params`
//!
//! # Quick example
//!
//! ```no_run
//! use epsilon_gateway::{CreditCard, EpsilonGateway, PurchaseDetail};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let gateway = EpsilonGateway::new("12345678").unwrap();
//! let card = CreditCard::new("4242424242424242", 12, 2030, "Taro", "Yamada");
//! let detail = PurchaseDetail {
//!     user_id: "u-1".into(),
//!     user_email: "taro@example.com".into(),
//!     item_code: "ITEM-1".into(),
//!     item_name: "Notebook".into(),
//!     order_number: "10001".into(),
//!     ..Default::default()
//! };
//!
//! let response = gateway.purchase(1000, &card, &detail).await.unwrap();
//! if response.success() {
//!     println!("charged: {:?}", response.trans_code());
//! }
//! # }
//! ```

pub mod card;
pub mod config;
pub mod detail;
pub mod encoding;
pub mod error;
pub mod gateway;
pub mod request;
pub mod response;

pub use card::CreditCard;
pub use config::{ConfigError, GatewayConfig, LIVE_URL, SANDBOX_URL};
pub use detail::PurchaseDetail;
pub use error::GatewayError;
pub use gateway::{classify, EpsilonGateway};
pub use response::Response;
