use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

/// Body of every successful response
#[derive(Debug, Serialize)]
pub struct SuccessEnvelope<T> {
    pub message: String,
    pub data: T,
}

/// Body of every failed response; `status` mirrors the HTTP status code
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub message: String,
    pub status: u16,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: status.as_u16(),
        }
    }
}

pub fn send_success<T: Serialize>(operation: &str, data: T) -> HttpResponse {
    HttpResponse::Ok().json(SuccessEnvelope {
        message: format!("operation from handler: {operation} successful"),
        data,
    })
}

pub fn send_error(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorEnvelope::new(status, message))
}
