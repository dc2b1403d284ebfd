use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// Which external feed an ingestion failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Instruments,
    MonthlyVolumes,
    WeeklyVolumes,
    Ratings,
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Feed::Instruments => "instrument list",
            Feed::MonthlyVolumes => "monthly volumes",
            Feed::WeeklyVolumes => "weekly volumes",
            Feed::Ratings => "ratings",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    /// Upstream fetch failed after the single fallback attempt. `status`
    /// carries the last HTTP status when the server answered; a transport
    /// error (timeout, DNS, connection reset) leaves it empty.
    #[error("Error fetching {feed} data. {message}")]
    Fetch {
        feed: Feed,
        status: Option<u16>,
        message: String,
    },

    /// The source template changed: sheet missing, expected column absent
    /// after renaming, or the workbook could not be read at all.
    #[error("{0}")]
    Parse(String),

    /// The parsed table had no usable rows after filtering.
    #[error("{0}")]
    Empty(String),

    #[error("Error importing data. {0}")]
    Persistence(#[from] sqlx::Error),
}

impl IngestError {
    pub fn http_status(&self) -> StatusCode {
        match self {
            IngestError::Fetch { status, .. } => status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            IngestError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            IngestError::Empty(_) => StatusCode::NO_CONTENT,
            IngestError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Domain-rule violation; `current_qty` rides along on oversell so the
    /// caller can display the held quantity.
    #[error("{message}")]
    Validation {
        message: String,
        current_qty: Option<i64>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            current_qty: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Ingest(err) => {
                let status = err.http_status();
                let body = Json(json!({
                    "message": err.to_string(),
                    "status_txt": "error",
                    "status": status.as_u16(),
                }));
                (status, body).into_response()
            }
            ApiError::Validation {
                message,
                current_qty,
            } => {
                let mut body = json!({ "error": message });
                if let Some(qty) = current_qty {
                    body["current_qty"] = json!(qty);
                }
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Database(err) => {
                let body = Json(json!({
                    "message": format!("Error importing data. {err}"),
                    "status_txt": "error",
                    "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_reports_upstream_status() {
        let err = IngestError::Fetch {
            feed: Feed::MonthlyVolumes,
            status: Some(404),
            message: "Failed to fetch data for both months.".to_string(),
        };
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert!(err.to_string().contains("both months"));
    }

    #[test]
    fn transport_error_maps_to_bad_gateway() {
        let err = IngestError::Fetch {
            feed: Feed::WeeklyVolumes,
            status: None,
            message: "connection reset".to_string(),
        };
        assert_eq!(err.http_status(), StatusCode::BAD_GATEWAY);
    }
}
