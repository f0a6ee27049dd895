use std::{collections::HashMap, net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    api,
    error::{Error, Result},
};

/// Query parameters of the last authorization redirect, if one arrived.
pub type CallbackState = Arc<Mutex<Option<HashMap<String, String>>>>;

pub fn router(state: CallbackState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(state))
}

/// Binds the callback server. Binding happens before the browser is sent to
/// the authorization page so the redirect cannot arrive too early.
pub async fn bind(server_addr: &str) -> Result<TcpListener> {
    let addr = SocketAddr::from_str(server_addr)
        .map_err(|e| Error::Config(format!("invalid server address {}: {}", server_addr, e)))?;
    Ok(TcpListener::bind(&addr).await?)
}

pub async fn start_api_server(listener: TcpListener, state: CallbackState) -> Result<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}
