use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::server::CallbackState;

/// Receives the authorization redirect and hands its query parameters to the
/// waiting auth flow. The code exchange itself happens in the flow.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<CallbackState>,
) -> Html<&'static str> {
    let page = if params.contains_key("error") {
        Html("<h4>Login failed.</h4><p>You can close this window.</p>")
    } else if params.contains_key("code") {
        Html("<h2>Authentication received.</h2><p>Close browser window.</p>")
    } else {
        Html("<h4>Missing authorization code.</h4>")
    };

    let mut state = shared_state.lock().await;
    *state = Some(params);

    page
}
