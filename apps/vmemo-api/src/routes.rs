use axum::{
	Json, Router,
	body::Bytes,
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use vmemo_service::{
	AddNoteRequest, AddNoteResponse, DeleteRequest, DeleteResponse, ListRequest, ListResponse,
	SearchRequest, SearchResponse, ServiceError, TranscribeResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/notes/add", post(add_note))
		.route("/v1/notes/list", get(list))
		.route("/v1/notes/search", post(search))
		.route("/v1/notes/delete", post(delete))
		.route("/v1/notes/transcribe", post(transcribe))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn add_note(
	State(state): State<AppState>,
	Json(payload): Json<AddNoteRequest>,
) -> Result<Json<AddNoteResponse>, ApiError> {
	let response = state.service.add_note(payload).await?;

	Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct ListParams {
	limit: Option<u32>,
}

async fn list(
	State(state): State<AppState>,
	Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
	let response = state.service.list(ListRequest { limit: params.limit }).await?;

	Ok(Json(response))
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state.service.search(payload).await?;

	Ok(Json(response))
}

async fn delete(
	State(state): State<AppState>,
	Json(payload): Json<DeleteRequest>,
) -> Result<Json<DeleteResponse>, ApiError> {
	let response = state.service.delete(payload).await?;

	Ok(Json(response))
}

async fn transcribe(
	State(state): State<AppState>,
	audio: Bytes,
) -> Result<Json<TranscribeResponse>, ApiError> {
	let response = state.service.transcribe(audio.to_vec()).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: &'static str,
	message: String,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let (status, error_code) = match &err {
			ServiceError::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
			ServiceError::Provider { .. } => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"),
			ServiceError::Store { .. } => (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE"),
		};

		Self { status, error_code, message: err.to_string() }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code.to_string(), message: self.message };

		(self.status, Json(body)).into_response()
	}
}
