/*
 * Responsibility
 * - GET /status (登録 / 取得の状態遷移を JSON で返す)
 */
use axum::{Json, extract::State};
use serde::Serialize;

use crate::{services::submission::SubmissionState, state::AppState};

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub registration: SubmissionState,
    pub retrieval: SubmissionState,
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        registration: state.console.registration_state(),
        retrieval: state.console.retrieval_state(),
    })
}
