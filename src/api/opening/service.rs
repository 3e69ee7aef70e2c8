use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use tracing::{error, info, warn};
use validator::Validate;

use crate::api::response::send_error;
use crate::api::validation::validation_message;
use crate::db::models::{NewOpening, OpeningRow};
use crate::db::opening_repository::OpeningRepository;
use super::models::OpeningRequest;

/// Service-level errors
///
/// The `Display` text is what clients see; store failures keep their cause
/// in `source` for the logs only.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("param: {name} (type: {kind}) is required")]
    MissingParam {
        name: &'static str,
        kind: &'static str,
    },

    #[error("{0}")]
    Validation(String),

    #[error("opening with id {0} not found")]
    NotFound(String),

    #[error("{message}")]
    Database {
        message: String,
        #[source]
        source: sqlx::Error,
    },
}

impl ServiceError {
    fn database(message: impl Into<String>) -> impl FnOnce(sqlx::Error) -> Self {
        let message = message.into();
        move |source| ServiceError::Database { message, source }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::MissingParam { .. } | ServiceError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::Database { message, source } => {
                error!("{}: {:?}", message, source);
            }
            other => warn!("Request rejected: {}", other),
        }
        send_error(self.status_code(), self.to_string())
    }
}

/// Opening service containing the request pipeline behind each handler
pub struct OpeningService {
    repository: OpeningRepository,
}

impl OpeningService {
    pub fn new(repository: OpeningRepository) -> Self {
        Self { repository }
    }

    /// Fetch one opening; an id that is not an integer can never match a row
    pub async fn show(&self, id: &str) -> Result<OpeningRow, ServiceError> {
        self.fetch(id).await
    }

    /// Persist an already validated request
    pub async fn create(&self, request: OpeningRequest) -> Result<OpeningRow, ServiceError> {
        info!("Service: Creating opening role={}, company={}", request.role, request.company);

        let opening = NewOpening::try_from(request)
            .map_err(|msg| ServiceError::Validation(msg.to_string()))?;

        let row = self
            .repository
            .create(&opening)
            .await
            .map_err(ServiceError::database("error while creating opening on database"))?;

        info!("Service: Opening created with id={}", row.id);
        Ok(row)
    }

    /// Remove an opening and hand back its last known state
    pub async fn delete(&self, id: &str) -> Result<OpeningRow, ServiceError> {
        let opening = self.fetch(id).await?;

        let removed = self
            .repository
            .delete(opening.id)
            .await
            .map_err(ServiceError::database(format!(
                "error while deleting opening with id {id} on database"
            )))?;

        // Lost a race with a concurrent delete
        if removed == 0 {
            return Err(ServiceError::NotFound(id.to_string()));
        }

        info!("Service: Opening {} deleted", opening.id);
        Ok(opening)
    }

    /// Replace every mutable field of an existing opening
    ///
    /// The lookup comes first so an unknown id is reported as such even when
    /// the body is also invalid.
    pub async fn update(
        &self,
        id: &str,
        request: OpeningRequest,
    ) -> Result<OpeningRow, ServiceError> {
        let existing = self.fetch(id).await?;

        request
            .validate()
            .map_err(|errors| ServiceError::Validation(validation_message(&errors)))?;
        let opening = NewOpening::try_from(request)
            .map_err(|msg| ServiceError::Validation(msg.to_string()))?;

        let row = self
            .repository
            .update(existing.id, &opening)
            .await
            .map_err(ServiceError::database(format!(
                "error while updating opening with id {id} on database"
            )))?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

        info!("Service: Opening {} updated", row.id);
        Ok(row)
    }

    pub async fn list(&self) -> Result<Vec<OpeningRow>, ServiceError> {
        self.repository
            .list()
            .await
            .map_err(ServiceError::database("error while listing openings on database"))
    }

    async fn fetch(&self, id: &str) -> Result<OpeningRow, ServiceError> {
        let Ok(numeric_id) = id.parse::<i64>() else {
            return Err(ServiceError::NotFound(id.to_string()));
        };

        self.repository
            .find_by_id(numeric_id)
            .await
            .map_err(ServiceError::database(format!(
                "error while fetching opening with id {id} on database"
            )))?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }
}
