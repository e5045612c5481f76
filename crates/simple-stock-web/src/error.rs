use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use simple_stock_core::{HttpError, PipelineError, ValidationError};
use thiserror::Error;

/// Web-layer failures mapped to HTTP status codes.
#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Transport(#[from] HttpError),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Pipeline(PipelineError::SymbolNotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Pipeline(PipelineError::EmptyRangeResult { .. }) => StatusCode::NOT_FOUND,
            Self::Pipeline(PipelineError::DataFetchFailure { .. }) => StatusCode::BAD_GATEWAY,
            Self::Transport(_) | Self::Template(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "web.validation",
            Self::Pipeline(error) => error.code(),
            Self::Transport(_) => "web.transport",
            Self::Template(_) => "web.template",
            Self::Io(_) => "web.io",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            status: self.status().as_u16(),
            code: self.code(),
            message: self.to_string(),
        }
    }
}

/// JSON error payload, also used for the dashboard's error panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_stock_core::{SourceError, Symbol};

    #[test]
    fn pipeline_errors_map_to_distinct_statuses() {
        let symbol = Symbol::parse("AAPL").expect("valid symbol");
        let not_found = WebError::from(PipelineError::SymbolNotFound {
            symbol: symbol.clone(),
        });
        let upstream = WebError::from(PipelineError::DataFetchFailure {
            symbol,
            what: "profile",
            source: SourceError::rate_limited("429"),
        });

        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream.code(), "pipeline.data_fetch_failure");
    }

    #[test]
    fn validation_body_carries_message() {
        let error = WebError::from(ValidationError::InvalidDate {
            value: String::from("yesterday"),
        });
        let body = error.body();

        assert_eq!(body.status, 400);
        assert_eq!(body.code, "web.validation");
        assert!(body.message.contains("yesterday"));
    }

    #[test]
    fn client_setup_failure_is_server_error() {
        let error = WebError::from(HttpError::Setup(String::from("invalid user agent")));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.code(), "web.transport");
    }
}
