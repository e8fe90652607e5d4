use std::slice;

use axum::{
    extract::State,
    response::IntoResponse,
    routing::post,
    Json,
};
use feedback_types::Submission;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    validate::{JsonBody, Valid, ValidationRejection},
};

#[cfg(feature = "openapi")]
#[derive(utoipa::OpenApi)]
#[openapi(paths(submit_feedback))]
struct ModuleDocs;

#[cfg(feature = "openapi")]
pub fn api_docs() -> utoipa::openapi::OpenApi {
    use utoipa::OpenApi as _;
    ModuleDocs::openapi()
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SubmitResponse {
    pub success: bool,
}

#[cfg_attr(feature = "openapi", utoipa::path(post, path = "", tag = "Feedback", operation_id = "submitFeedback",
    request_body = Submission,
    responses(
        (status = StatusCode::OK, description = "Feedback stored", body = SubmitResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid submission", body = crate::error::ErrorBody),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Missing store configuration or store failure", body = crate::error::ErrorBody)
    )))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    payload: Result<Valid<JsonBody<Submission>>, ValidationRejection<ApiError>>,
) -> ApiResult<impl IntoResponse> {
    let store_config = &state.config().store;
    // Configuration is checked first, nothing touches the store without it
    let credentials = store_config.credentials()?;
    let JsonBody(submission) = payload?.into_inner();

    let store = state.connector().connect(&credentials)?;
    store
        .insert(&store_config.store_table, slice::from_ref(&submission))
        .await?;
    info!(rating = %submission.rating, "Feedback stored");

    Ok((StatusCode::OK, Json(SubmitResponse { success: true })))
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new().route("/", post(submit_feedback))
}
