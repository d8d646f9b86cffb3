use crate::api::{self, email::RelayConfig, handlers::account::AccountConfig};
use crate::cli::actions::Action;
use anyhow::{anyhow, Result};

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            origin,
            static_dir,
            relay_url,
            relay_api_key,
            email_from,
            email_from_name,
            code_ttl_seconds,
        } => {
            let relay = match (relay_url, relay_api_key, email_from) {
                (Some(url), Some(api_key), Some(from_email)) => Some(RelayConfig {
                    url,
                    api_key,
                    from_email,
                    from_name: email_from_name,
                }),
                (Some(_), _, _) => {
                    return Err(anyhow!(
                        "mail relay requires --relay-api-key and --email-from"
                    ))
                }
                _ => None,
            };

            let config = AccountConfig::new().with_code_ttl_seconds(code_ttl_seconds);

            api::new(port, dsn, origin, static_dir, relay, config).await
        }
    }
}
