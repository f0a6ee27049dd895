//! Callback server tests over a real local socket.

use std::sync::Arc;

use plorgcli::server::{self, CallbackState};
use serde_json::Value;
use tokio::sync::Mutex;

async fn spawn_server() -> (String, CallbackState) {
    let state: CallbackState = Arc::new(Mutex::new(None));
    let listener = server::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server_state = Arc::clone(&state);
    tokio::spawn(async move {
        server::start_api_server(listener, server_state).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

#[tokio::test]
async fn callback_captures_query_parameters() {
    let (base, state) = spawn_server().await;

    let body = reqwest::get(format!("{}/callback?code=abc&state=xyz", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Authentication received"));

    let params = state.lock().await.clone().unwrap();
    assert_eq!(params["code"], "abc");
    assert_eq!(params["state"], "xyz");
}

#[tokio::test]
async fn callback_with_error_reports_failure() {
    let (base, state) = spawn_server().await;

    let body = reqwest::get(format!("{}/callback?error=access_denied", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Login failed"));
    assert_eq!(
        state.lock().await.as_ref().unwrap()["error"],
        "access_denied"
    );
}

#[tokio::test]
async fn health_reports_status() {
    let (base, _state) = spawn_server().await;

    let json: Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "plorgcli");
    assert_eq!(json["callback_received"], false);
}

#[tokio::test]
async fn invalid_address_is_a_config_error() {
    match server::bind("not an address").await {
        Err(plorgcli::error::Error::Config(_)) => {}
        other => panic!("Expected Config error, got: {:?}", other.map(|_| ())),
    }
}
