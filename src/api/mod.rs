use actix_web::web;
use sqlx::{Pool, Sqlite};

use crate::db::opening_repository::OpeningRepository;

pub mod health;
pub mod opening;
pub mod response;
pub mod validation;

use self::health::health_config;
use self::opening::{handlers::opening_config, service::OpeningService};

/// Register shared state, extractor configs and every route on an app
///
/// The pool is the only dependency; the opening service is built around it here.
pub fn configure(
    pool: Pool<Sqlite>,
    max_payload_size: usize,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |config: &mut web::ServiceConfig| {
        let service = OpeningService::new(OpeningRepository::new(pool.clone()));

        config
            .app_data(web::Data::new(pool))
            .app_data(web::Data::new(service))
            .app_data(web::PayloadConfig::default().limit(max_payload_size))
            .app_data(validation::validated_json_config(max_payload_size))
            .app_data(validation::json_config(max_payload_size))
            .app_data(validation::query_config());

        health_config(config);
        opening_config(config);
    }
}
