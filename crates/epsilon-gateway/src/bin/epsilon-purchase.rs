use std::env;

use epsilon_gateway::{CreditCard, EpsilonGateway, GatewayConfig, PurchaseDetail};

fn required(name: &str) -> String {
    match env::var(name) {
        Ok(v) if !v.is_empty() => v,
        _ => {
            eprintln!("{name} environment variable is required");
            std::process::exit(2);
        }
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.is_empty())
}

fn parse<T: std::str::FromStr>(name: &str) -> T {
    let raw = required(name);
    raw.parse().unwrap_or_else(|_| {
        eprintln!("invalid {name}: {raw}");
        std::process::exit(2);
    })
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    {
        use tracing_subscriber::{fmt, EnvFilter};
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt().with_env_filter(env_filter).init();
    }

    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    let mut card = CreditCard::new(
        required("CARD_NUMBER"),
        parse("CARD_MONTH"),
        parse("CARD_YEAR"),
        optional("CARD_FIRST_NAME").unwrap_or_default(),
        optional("CARD_LAST_NAME").unwrap_or_default(),
    );
    if let Some(cvv) = optional("CARD_VERIFICATION_VALUE") {
        card = card.with_verification_value(cvv);
    }

    let detail = PurchaseDetail {
        user_id: required("PURCHASE_USER_ID"),
        user_name: optional("PURCHASE_USER_NAME").unwrap_or_default(),
        user_email: required("PURCHASE_USER_EMAIL"),
        item_code: required("PURCHASE_ITEM_CODE"),
        item_name: required("PURCHASE_ITEM_NAME"),
        order_number: required("PURCHASE_ORDER_NUMBER"),
        memo1: optional("PURCHASE_MEMO1"),
        memo2: optional("PURCHASE_MEMO2"),
    };
    let amount: u64 = parse("PURCHASE_AMOUNT");

    println!("Purchasing via: {}", config.purchase_url());
    println!("Card: {}\n", card.masked_number());

    let gateway = match EpsilonGateway::with_config(config) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    match gateway.purchase(amount, &card, &detail).await {
        Ok(response) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&response).unwrap_or_default()
            );
            if !response.success() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
