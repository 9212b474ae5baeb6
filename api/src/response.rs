//! Response envelope
//!
//! Every endpoint answers with `{data, success, error, message}`, plus
//! `issues` when input validation failed.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::domain::validation::ValidationIssue;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub success: bool,
    pub error: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<ValidationIssue>>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T, message: &'static str) -> Self {
        Self {
            data,
            success: true,
            error: false,
            message,
            issues: None,
        }
    }
}

impl ApiResponse<Vec<Value>> {
    /// Failure envelope; `data` is always an empty array
    pub fn failure(message: &'static str, issues: Option<Vec<ValidationIssue>>) -> Self {
        Self {
            data: Vec::new(),
            success: false,
            error: true,
            message,
            issues,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
