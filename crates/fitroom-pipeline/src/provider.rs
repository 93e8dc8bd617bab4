pub mod google;

use fitroom_config::ProviderConfig;
use reqwest::Client;

pub use google::GoogleModelClient;

/// Build the pooled HTTP client shared by both model clients
///
/// The configured timeout applies to every model call; without one, calls
/// may wait indefinitely.
pub fn http_client(config: &ProviderConfig) -> reqwest::Result<Client> {
    let mut builder = Client::builder();

    if let Some(timeout) = config.timeout_duration() {
        builder = builder.timeout(timeout);
    }

    builder.build()
}
