use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use larder_service::{Error as ServiceError, ResultSet, SearchKind};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/search/ingredients", post(search_by_ingredients))
		.route("/v1/search/allergens", post(search_excluding))
		.route("/v1/search/{kind}/cached", get(cached))
		.route("/v1/recipes/newest", get(newest))
		.route("/v1/recipes/top-rated", get(top_rated))
		.with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
	pub query: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BrowseParams {
	pub limit: Option<u32>,
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search_by_ingredients(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<ResultSet>, ApiError> {
	let result = state.service.search_by_ingredients(&payload.query).await?;

	Ok(Json(result))
}

async fn search_excluding(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<ResultSet>, ApiError> {
	let result = state.service.search_excluding(&payload.query).await?;

	Ok(Json(result))
}

async fn cached(
	State(state): State<AppState>,
	Path(kind): Path<String>,
) -> Result<Json<ResultSet>, ApiError> {
	let kind = parse_kind(&kind)?;
	let Some(result) = state.service.restore(kind) else {
		return Err(json_error(
			StatusCode::NOT_FOUND,
			"not_found",
			format!("No cached result for {}.", kind.as_str()),
		));
	};

	Ok(Json(result))
}

async fn newest(
	State(state): State<AppState>,
	Query(params): Query<BrowseParams>,
) -> Result<Json<ResultSet>, ApiError> {
	let result = state.service.newest(params.limit).await?;

	Ok(Json(result))
}

async fn top_rated(
	State(state): State<AppState>,
	Query(params): Query<BrowseParams>,
) -> Result<Json<ResultSet>, ApiError> {
	let result = state.service.top_rated(params.limit).await?;

	Ok(Json(result))
}

fn parse_kind(raw: &str) -> Result<SearchKind, ApiError> {
	match raw {
		"ingredients" => Ok(SearchKind::Ingredients),
		"allergens" => Ok(SearchKind::Allergens),
		_ => Err(json_error(
			StatusCode::BAD_REQUEST,
			"invalid_request",
			format!("Unknown search kind {raw}."),
		)),
	}
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
	ApiError { status, error_code: code.into(), message: message.into() }
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "invalid_request", message),
			ServiceError::Gateway { message } =>
				json_error(StatusCode::BAD_GATEWAY, "gateway_unavailable", message),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
