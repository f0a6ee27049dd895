use std::time::Duration;

use crate::{
    config::Config,
    error,
    error::Result,
    info,
    management::VerifierStore,
    spotify::{SpotifyClient, auth::authenticate},
    success,
};

/// How long the flow waits for the user to finish in the browser.
const AUTH_TIMEOUT: Duration = Duration::from_secs(120);

/// Creates a session and authorizes it. Every command starts here since the
/// token only lives as long as the process.
pub async fn login(config: Config) -> Result<SpotifyClient> {
    let mut client = SpotifyClient::new(config, VerifierStore::default())?;

    info!("Waiting for authorization in the browser...");
    authenticate(&mut client, AUTH_TIMEOUT).await?;

    Ok(client)
}

pub async fn auth(config: Config) {
    match login(config).await {
        Ok(client) => {
            let scope = client
                .tokens()
                .token_data()
                .map(|data| data.token.scope.clone())
                .unwrap_or_default();
            success!("Authentication successful! Granted scope: {}", scope);
        }
        Err(e) => error!("Authentication failed: {}", e),
    }
}
