use common::{
    env_config::FmpConfig,
    error::{AppError, Res},
};

/// Fetches a live quote for the symbol from the FMP API and relays the JSON
/// untouched. One attempt, no retry; provider trouble surfaces as a server
/// error with the status logged.
pub async fn fetch_quote(config: &FmpConfig, symbol: &str) -> Res<serde_json::Value> {
    let url = format!("{}/quote/{}", config.base_url.trim_end_matches('/'), symbol);

    let client = reqwest::Client::new();
    let response = client
        .get(&url)
        .query(&[("apikey", config.api_key.as_str())])
        .send()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to reach quote provider: {}", e)))?;

    if !response.status().is_success() {
        log::warn!(
            "Quote provider returned {} for symbol {}",
            response.status(),
            symbol
        );
        return Err(AppError::Internal(format!(
            "Quote provider returned status {}",
            response.status()
        )));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to parse quote response: {}", e)))
}
