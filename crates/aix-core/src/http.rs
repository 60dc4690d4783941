// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers shared by the HTTP clients for external pricing and analysis APIs.

use serde::Deserialize;

/// Error envelope returned by the Prime Intellect APIs.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail within an API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
    pub message: String,
}

/// Renders a non-success response for logs and errors.
///
/// Uses the structured error envelope when the body has one, otherwise the
/// raw status and body.
pub fn describe_error_response(api: &str, status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(ApiErrorResponse {
            error:
                ApiErrorDetail {
                    type_: Some(kind),
                    message,
                },
        }) => format!("{api} API error ({kind}): {message}"),
        Ok(ApiErrorResponse { error }) => format!("{api} API error: {}", error.message),
        Err(_) => format!("{api} API returned {status}: {body}"),
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
pub fn is_transient_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503)
}
