use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{debug, error};

use crate::error::RelayError;
use crate::AppState;

use super::models::{ChatRequest, ChatResponse};

/// `POST /api/chat`: forwards `chatInput` upstream and returns the reply.
///
/// A body that is not a JSON object with a string `chatInput` is rejected the
/// same way as an absent or empty field, before any upstream call. Non-string
/// values such as `42` or `true` count as missing.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, RelayError> {
    let chat_input = match payload {
        Ok(Json(request)) => request.chat_input.filter(|input| !input.is_empty()),
        Err(rejection) => {
            debug!("unreadable chat request body: {rejection}");
            None
        }
    };
    let Some(chat_input) = chat_input else {
        return Err(RelayError::Validation);
    };

    debug!(model = state.upstream.model(), "forwarding chat input upstream");
    let response_message = state.upstream.complete(&chat_input).await.map_err(|err| {
        error!("Error calling upstream chat completion: {err}");
        RelayError::from(err)
    })?;

    Ok(Json(ChatResponse { response_message }))
}
