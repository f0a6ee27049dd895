use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::server::CallbackState;

pub async fn health(Extension(shared_state): Extension<CallbackState>) -> Json<Value> {
    let callback_received = shared_state.lock().await.is_some();

    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "callback_received": callback_received
    }))
}
