use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use reqwest::{Client, StatusCode};
use tokio::sync::Mutex;
use url::Url;

use crate::{
    config::Config,
    error::{Error, Result},
    management::VerifierStore,
    server::{self, CallbackState},
    types::{Token, TokenData},
    utils, warning,
};

use super::{
    SpotifyClient,
    schema::{TokenResponse, api_error},
};

/// Where a [`TokenManager`] stands in the authorization flow.
///
/// There is no refreshing state: a refresh only happens inside
/// [`TokenManager::get_valid_access_token`], which holds the manager mutably
/// until it completes, so the manager is never observed mid-refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    AwaitingCallback,
    Authenticated,
}

/// Owns the OAuth 2.0 PKCE flow and the session token.
///
/// The manager is an explicit session object: every client holds its own,
/// so independent sessions never share a token. Only the code verifier is
/// written to disk, the token lives as long as the manager.
///
/// # Flow
///
/// 1. [`TokenManager::launch_auth`] stores a fresh verifier and opens the
///    authorization page with its S256 challenge
/// 2. The platform redirects to the callback server with `code` or `error`
/// 3. [`TokenManager::handle_callback`] exchanges the code for a token
/// 4. [`TokenManager::get_valid_access_token`] hands out the access token,
///    refreshing it once it outlived `expires_in`
///
/// # Example
///
/// ```
/// let mut tokens = TokenManager::new(config, Client::new(), VerifierStore::default());
/// let url = tokens.launch_auth().await?;
/// // ... the redirect arrives with `params`
/// tokens.handle_callback(&params).await?;
/// let access_token = tokens.get_valid_access_token().await?;
/// ```
pub struct TokenManager {
    config: Config,
    http: Client,
    verifier_store: VerifierStore,
    token_data: Option<TokenData>,
    awaiting_callback: bool,
}

impl TokenManager {
    pub fn new(config: Config, http: Client, verifier_store: VerifierStore) -> Self {
        TokenManager {
            config,
            http,
            verifier_store,
            token_data: None,
            awaiting_callback: false,
        }
    }

    /// Starts the session from an already issued token.
    pub fn with_token_data(mut self, token_data: TokenData) -> Self {
        self.token_data = Some(token_data);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn token_data(&self) -> Option<&TokenData> {
        self.token_data.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token_data.is_some()
    }

    pub fn state(&self) -> AuthState {
        if self.token_data.is_some() {
            AuthState::Authenticated
        } else if self.awaiting_callback {
            AuthState::AwaitingCallback
        } else {
            AuthState::Unauthenticated
        }
    }

    /// Authorization endpoint URL carrying the PKCE parameters.
    pub fn authorize_url(&self, code_challenge: &str) -> Result<Url> {
        let url = Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("response_type", "code"),
                ("client_id", self.config.client_id.as_str()),
                ("scope", self.config.scope.as_str()),
                ("code_challenge_method", "S256"),
                ("code_challenge", code_challenge),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ],
        )?;
        Ok(url)
    }

    /// Generates and stores a fresh code verifier and returns the URL the
    /// user has to visit.
    pub async fn prepare_auth(&mut self) -> Result<Url> {
        let code_verifier = utils::generate_code_verifier();
        let code_challenge = utils::generate_code_challenge(&code_verifier);

        self.verifier_store.save(&code_verifier).await?;
        self.awaiting_callback = true;

        self.authorize_url(&code_challenge)
    }

    /// Prepares the flow and sends the user's browser to the authorization page.
    ///
    /// When no browser can be opened the URL is printed so the user can
    /// navigate there manually. The URL is returned either way.
    pub async fn launch_auth(&mut self) -> Result<Url> {
        let auth_url = self.prepare_auth().await?;

        if webbrowser::open(auth_url.as_str()).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                auth_url
            )
        }

        Ok(auth_url)
    }

    /// Completes the flow from the query parameters of the redirect.
    pub async fn handle_callback(&mut self, params: &HashMap<String, String>) -> Result<()> {
        if let Some(error) = params.get("error") {
            return Err(Error::auth(error.clone()));
        }

        let Some(code) = params.get("code").filter(|code| !code.is_empty()) else {
            return Err(Error::auth("missing code"));
        };

        self.exchange_code(code).await
    }

    /// Exchanges an authorization code for the session token.
    ///
    /// # Arguments
    ///
    /// * `code` - Authorization code from the redirect
    ///
    /// # Returns
    ///
    /// `Ok(())` once the token is stored. Fails with [`Error::Auth`] when no
    /// verifier is stored, on any non-200 response and when the response
    /// carries an `error` field or an unusable token. The stored verifier is
    /// kept after a failure so the same redirect can be retried.
    pub async fn exchange_code(&mut self, code: &str) -> Result<()> {
        let Some(verifier) = self.verifier_store.load().await? else {
            return Err(Error::auth("missing verifier"));
        };

        let token = self
            .request_token(
                &[
                    ("grant_type", "authorization_code"),
                    ("client_id", self.config.client_id.as_str()),
                    ("code", code),
                    ("redirect_uri", self.config.redirect_uri.as_str()),
                    ("code_verifier", verifier.as_str()),
                ],
                None,
            )
            .await?;

        self.token_data = Some(TokenData::new(token));
        self.awaiting_callback = false;

        // a verifier is single-use
        if let Err(e) = self.verifier_store.clear().await {
            warning!("Failed to remove code verifier: {}", e);
        }

        Ok(())
    }

    /// Returns the access token, refreshing it first when it outlived `expires_in`.
    ///
    /// A failed refresh is reported and the stale token is returned anyway,
    /// the next API call then fails with the platform's error.
    ///
    /// # Returns
    ///
    /// * `Ok(access_token)` - the current or freshly refreshed access token
    /// * `Err(Error::Auth)` - no token was ever issued, or the token expired
    ///   and has no refresh token
    pub async fn get_valid_access_token(&mut self) -> Result<String> {
        let Some(token_data) = &self.token_data else {
            return Err(Error::auth("no token"));
        };

        if token_data.is_expired() {
            let refresh_token = token_data.token.refresh_token.clone();
            if refresh_token.is_empty() {
                return Err(Error::auth("no refresh token"));
            }
            if let Err(e) = self.refresh(&refresh_token).await {
                warning!("Failed to refresh access token: {}", e);
            }
        }

        self.token_data
            .as_ref()
            .map(|data| data.token.access_token.clone())
            .ok_or_else(|| Error::auth("no token"))
    }

    async fn refresh(&mut self, refresh_token: &str) -> Result<()> {
        let token = self
            .request_token(
                &[
                    ("grant_type", "refresh_token"),
                    ("refresh_token", refresh_token),
                    ("client_id", self.config.client_id.as_str()),
                ],
                Some(refresh_token),
            )
            .await?;

        self.token_data = Some(TokenData::new(token));
        Ok(())
    }

    async fn request_token(
        &self,
        form: &[(&str, &str)],
        previous_refresh_token: Option<&str>,
    ) -> Result<Token> {
        let res = self
            .http
            .post(&self.config.token_url)
            .form(form)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status != StatusCode::OK {
            let reason = serde_json::from_str::<TokenResponse>(&body)
                .ok()
                .and_then(|response| response.error_message())
                .unwrap_or_else(|| api_error(status, &body).to_string());
            return Err(Error::Auth(format!(
                "failed to get token ({}): {}",
                status.as_u16(),
                reason
            )));
        }

        let response: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::auth(format!("unreadable token response: {}", e)))?;
        response.into_token(previous_refresh_token)
    }
}

/// Runs the complete authorization flow for `client`.
///
/// 1. Binds the local callback server
/// 2. Stores a fresh code verifier and opens the authorization page
/// 3. Waits for the redirect to reach the callback server
/// 4. Exchanges the code for the session token
///
/// Fails with [`Error::Auth`] when no redirect arrives within `max_wait`.
pub async fn authenticate(client: &mut SpotifyClient, max_wait: Duration) -> Result<()> {
    let shared_state: CallbackState = Arc::new(Mutex::new(None));

    let listener = server::bind(&client.tokens().config().server_addr).await?;
    let server_state = Arc::clone(&shared_state);
    let server = tokio::spawn(async move {
        if let Err(e) = server::start_api_server(listener, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let result: Result<()> = async {
        client.tokens_mut().launch_auth().await?;
        let params = wait_for_callback(Arc::clone(&shared_state), max_wait)
            .await
            .ok_or_else(|| Error::auth("authorization timed out"))?;
        client.tokens_mut().handle_callback(&params).await
    }
    .await;

    server.abort();
    result
}

/// Polls the callback state until the redirect arrived or
/// `max_wait` elapsed.
async fn wait_for_callback(
    shared_state: CallbackState,
    max_wait: Duration,
) -> Option<HashMap<String, String>> {
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let mut lock = shared_state.lock().await;
        if let Some(params) = lock.take() {
            return Some(params);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    None
}
