use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use service_core::error::AppError;

use crate::dtos::{Envelope, PacketDescriptor};
use crate::startup::AppState;

/// Fixed message returned whenever a request fails validation.
const VALIDATION_ERROR_MESSAGE: &str = "Error while handling request! Please check your request.";

/// `POST /postPacket`: screen one traffic descriptor through the model.
///
/// A malformed body or any missing or falsy field rejects the request
/// before the provider is touched; provider failures surface as 5xx
/// envelopes.
pub async fn post_packet(
    State(state): State<AppState>,
    payload: Result<Json<PacketDescriptor>, JsonRejection>,
) -> Result<Json<Envelope>, AppError> {
    let descriptor = match payload {
        Ok(Json(descriptor)) => descriptor,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected packet request with unreadable body");
            return Err(AppError::BadRequest(anyhow::anyhow!(
                VALIDATION_ERROR_MESSAGE
            )));
        }
    };

    if !descriptor.is_complete() {
        tracing::warn!("Rejected packet descriptor with missing or empty fields");
        return Err(AppError::BadRequest(anyhow::anyhow!(
            VALIDATION_ERROR_MESSAGE
        )));
    }

    let prompt = descriptor.prompt();
    tracing::debug!(prompt_len = prompt.len(), "Forwarding packet descriptor to provider");

    let completion = state.text_provider.generate(&prompt).await.map_err(|e| {
        tracing::error!(error = %e, "AI provider call failed");
        AppError::from(e)
    })?;

    tracing::info!(completion_len = completion.len(), "Packet screening completed");

    Ok(Json(Envelope::success(completion)))
}
