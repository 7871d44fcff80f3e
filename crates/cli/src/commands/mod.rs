pub mod lines;
pub mod params;

use offerdesk_backoffice::api::ApiClient;
use offerdesk_backoffice::BackofficeConfig;

/// Build a configured client from the environment.
pub fn client_from_env() -> Result<(ApiClient, BackofficeConfig), Box<dyn std::error::Error>> {
    let config = BackofficeConfig::from_env()?;
    let client = ApiClient::from_config(&config);
    Ok((client, config))
}
