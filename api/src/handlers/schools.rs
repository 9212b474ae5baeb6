//! School handlers
//!
//! `POST /school` adds a school, `GET /school` lists schools nearest first.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

use crate::app::LocationQuery;
use crate::domain::entities::{RankedSchool, School};
use crate::domain::ports::SchoolRepository;
use crate::domain::validation::ValidationIssue;
use crate::error::AppError;
use crate::response::ApiResponse;
use crate::AppState;

const CREATED_MESSAGE: &str = "School added successfully";
const CREATE_BAD_REQUEST: &str = "Bad request";
const CREATE_FAILED: &str = "Internal server error";

const LISTED_MESSAGE: &str = "Schools fetched successfully";
const LIST_BAD_REQUEST: &str = "Invalid user coordinates";
const LIST_FAILED: &str = "Failed to fetch schools";

/// Unwrap the JSON body
///
/// A request without a JSON content type is read as an empty object so
/// the missing fields are reported one by one.
fn request_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(Value::Object(Map::new())),
        Err(rejection) => Err(AppError::BadRequest {
            message: CREATE_BAD_REQUEST,
            issues: vec![ValidationIssue::malformed(rejection.body_text())],
        }),
    }
}

/// POST /school
///
/// Validate the body and store the school. The stored record, including
/// its new id, is echoed back.
pub async fn create_school<R>(
    State(state): State<AppState<R>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<ApiResponse<School>, AppError>
where
    R: SchoolRepository + 'static,
{
    let body = request_body(body)?;

    let school = state
        .school_commands
        .create_school(&body)
        .await
        .map_err(|e| AppError::from_service(e, CREATE_BAD_REQUEST, CREATE_FAILED))?;

    Ok(ApiResponse::ok(school, CREATED_MESSAGE))
}

/// GET /school?userLat=..&userLon=..
///
/// Every school with its distance in kilometres, nearest first.
pub async fn list_schools<R>(
    State(state): State<AppState<R>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<ApiResponse<Vec<RankedSchool>>, AppError>
where
    R: SchoolRepository + 'static,
{
    let Query(pairs) = query.map_err(|rejection| AppError::BadRequest {
        message: LIST_BAD_REQUEST,
        issues: vec![ValidationIssue::malformed(rejection.body_text())],
    })?;
    let query = LocationQuery::from_pairs(pairs);

    let ranked = state
        .school_queries
        .list_by_distance(&query)
        .await
        .map_err(|e| AppError::from_service(e, LIST_BAD_REQUEST, LIST_FAILED))?;

    Ok(ApiResponse::ok(ranked, LISTED_MESSAGE))
}

/// Fallback for unknown paths
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, ApiResponse::failure("Not found", None)).into_response()
}
