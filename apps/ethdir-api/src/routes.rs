use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::{Deserialize, Serialize};

use ethdir_service::{
	CategoryPage, Error as ServiceError, FacetedQuery, HomePage, ListingDetail, ListingSummary,
	SearchPage,
};

use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListingsParams {
	#[serde(rename = "type")]
	pub listing_type: Option<String>,
	pub tag: Option<String>,
	pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
	pub tag: Option<String>,
	pub q: Option<String>,
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/health/ready", get(ready))
		.route("/listings", get(listings))
		.route("/pages/home", get(home_page))
		.route("/pages/search", get(search_page))
		.route("/pages/l/{slug}", get(listing_page))
		.route("/pages/{type}", get(category_page))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn ready(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
	state.service.ping().await?;

	Ok(StatusCode::OK)
}

/// JSON listing search. Only a failed base query is fatal; tag filter and annotation failures
/// degrade to unfiltered or untagged listings.
async fn listings(
	State(state): State<AppState>,
	Query(params): Query<ListingsParams>,
) -> Result<Json<Vec<ListingSummary>>, ApiError> {
	let query = FacetedQuery::parse(
		params.listing_type.as_deref(),
		params.q.as_deref(),
		params.tag.as_deref(),
		state.service.cfg.max_tag_ids as usize,
	)?;
	let result = state.service.search_listings(&query).await;

	if let Some(error) = result.errors.base_query {
		return Err(ServiceError::DataSourceUnavailable { message: error.message }.into());
	}

	Ok(Json(result.listings.into_iter().map(ListingSummary::from).collect()))
}

async fn home_page(State(state): State<AppState>) -> Json<HomePage> {
	Json(state.service.home().await)
}

async fn search_page(
	State(state): State<AppState>,
	Query(params): Query<PageParams>,
) -> Json<SearchPage> {
	Json(state.service.search_page(params.q.as_deref()).await)
}

async fn category_page(
	State(state): State<AppState>,
	Path(listing_type): Path<String>,
	Query(params): Query<PageParams>,
) -> Result<Json<CategoryPage>, ApiError> {
	let page = state
		.service
		.category_page(&listing_type, params.q.as_deref(), params.tag.as_deref())
		.await?;

	Ok(Json(page))
}

async fn listing_page(
	State(state): State<AppState>,
	Path(slug): Path<String>,
) -> Result<Json<ListingDetail>, ApiError> {
	let detail = state.service.listing_detail(&slug).await?;

	Ok(Json(detail))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
	error_code: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidInput { message } =>
				ApiError::new(StatusCode::BAD_REQUEST, "INVALID_INPUT", message),
			ServiceError::NotFound { message } =>
				ApiError::new(StatusCode::NOT_FOUND, "NOT_FOUND", message),
			ServiceError::DataSourceUnavailable { message } => {
				tracing::error!(error = %message, "Data source unavailable.");

				ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "DATA_SOURCE_UNAVAILABLE", message)
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error: self.message, error_code: self.error_code };

		(self.status, Json(body)).into_response()
	}
}
