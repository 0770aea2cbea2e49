use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use serde::Serialize;

use crate::errors::AgentlinkError;

#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub code: &'static str,
    pub error: &'static str,
    pub message: &'a str,
}

impl ResponseError for AgentlinkError {
    fn status_code(&self) -> StatusCode {
        match self {
            AgentlinkError::Validation(_) | AgentlinkError::Serialization(_) => {
                StatusCode::BAD_REQUEST
            }
            AgentlinkError::NotFound(_) => StatusCode::NOT_FOUND,
            AgentlinkError::Lookup(_) => StatusCode::BAD_GATEWAY,
            AgentlinkError::DatabaseConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            code: self.code(),
            error: self.error_type(),
            message: self.message(),
        })
    }
}

/// Malformed JSON bodies render as validation errors
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| AgentlinkError::validation(err.to_string()).into())
}
