use std::env;

use tip_engine::api::{AppState, create_router};
use tip_engine::config::{RulesLoader, TipRules};
use tracing::info;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tip_engine=info".into()),
        )
        .init();

    let rules = match env::var("TIP_ENGINE_RULES") {
        Ok(path) => {
            let rules = RulesLoader::load(&path)?.into_rules();
            info!(path = %path, "Loaded tip rules");
            rules
        }
        Err(_) => {
            info!("TIP_ENGINE_RULES not set, using default tip rules");
            TipRules::default()
        }
    };
    info!(
        kitchen_rate_bp = rules.kitchen_rate_bp,
        bartender_rate_one_bp = rules.bartender_rate_one_bp,
        bartender_rate_two_bp = rules.bartender_rate_two_bp,
        eligibility_threshold_cents = rules.eligibility_threshold_cents,
        "Tip rules in effect"
    );

    let addr = env::var("TIP_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "tip-engine listening");

    axum::serve(listener, create_router(AppState::new(rules))).await?;
    Ok(())
}
