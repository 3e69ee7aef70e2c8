use actix_web::{
    web::{self, Data, Query, ServiceConfig},
    HttpResponse,
};
use actix_web_validator::Json as ValidatedJson;

use crate::api::response::send_success;
use super::dto::IdQuery;
use super::models::OpeningRequest;
use super::service::{OpeningService, ServiceError};

async fn show_opening(
    service: Data<OpeningService>,
    query: Query<IdQuery>,
) -> Result<HttpResponse, ServiceError> {
    let id = query.require_id()?;
    let opening = service.show(id).await?;
    Ok(send_success("show-opening", opening))
}

/// Body is validated by the extractor before this runs
async fn create_opening(
    service: Data<OpeningService>,
    request: ValidatedJson<OpeningRequest>,
) -> Result<HttpResponse, ServiceError> {
    let opening = service.create(request.into_inner()).await?;
    Ok(send_success("create-opening", opening))
}

async fn delete_opening(
    service: Data<OpeningService>,
    query: Query<IdQuery>,
) -> Result<HttpResponse, ServiceError> {
    let id = query.require_id()?;
    let opening = service.delete(id).await?;
    Ok(send_success("delete-opening", opening))
}

/// The id is checked before the body is looked at; the service validates the
/// decoded body after the lookup
async fn update_opening(
    service: Data<OpeningService>,
    query: Query<IdQuery>,
    request: Result<web::Json<OpeningRequest>, actix_web::Error>,
) -> actix_web::Result<HttpResponse> {
    let id = query.require_id()?;
    let request = request?;
    let opening = service.update(id, request.into_inner()).await?;
    Ok(send_success("update-opening", opening))
}

async fn list_openings(service: Data<OpeningService>) -> Result<HttpResponse, ServiceError> {
    let openings = service.list().await?;
    Ok(send_success("list-openings", openings))
}

pub fn opening_config(config: &mut ServiceConfig) {
    config.service(
        web::scope("/api/v1")
            .service(
                web::resource("/opening")
                    .route(web::get().to(show_opening))
                    .route(web::post().to(create_opening))
                    .route(web::put().to(update_opening))
                    .route(web::delete().to(delete_opening)),
            )
            .service(web::resource("/openings").route(web::get().to(list_openings))),
    );
}
