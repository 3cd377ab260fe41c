use actix_web::error::InternalError;
use actix_web::{HttpRequest, HttpResponse, web};

use crate::domain::types::TypeConstraintError;
use crate::dto::ErrorDto;
use crate::services::ServiceError;

pub mod auth;
pub mod categories;
pub mod posts;
pub mod topics;
pub mod votes;

/// Render a service error as the JSON error body with its status code.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::Form(message) => HttpResponse::BadRequest().json(ErrorDto::new(message)),
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(ErrorDto::new("Authentication required"))
        }
        ServiceError::NotFound => HttpResponse::NotFound().json(ErrorDto::new("Not found")),
        ServiceError::Conflict { message, code } => {
            HttpResponse::BadRequest().json(ErrorDto::new(message).with_details(*code))
        }
        ServiceError::Internal => {
            HttpResponse::InternalServerError().json(ErrorDto::new("Internal server error"))
        }
    }
}

/// Parse a raw path segment into a typed identifier.
pub(crate) fn parse_id<T>(raw: i32) -> Result<T, HttpResponse>
where
    T: TryFrom<i32, Error = TypeConstraintError>,
{
    T::try_from(raw).map_err(|e| error_response(&ServiceError::from(e)))
}

fn bad_request(err: impl std::fmt::Display + std::fmt::Debug + 'static) -> actix_web::Error {
    let body = ErrorDto::new(err.to_string());
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Register every forum endpoint and make extractor failures answer with
/// the JSON error body instead of actix's plain-text default.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| bad_request(err)),
    )
    .app_data(web::PathConfig::default().error_handler(|err, _req| bad_request(err)))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| bad_request(err)))
    .service(auth::register)
    .service(auth::login)
    .service(auth::logout)
    .service(auth::me)
    .service(categories::list_categories)
    .service(categories::add_category)
    .service(categories::show_category)
    .service(topics::list_topics)
    .service(topics::create_topic)
    .service(topics::show_topic)
    .service(posts::list_posts)
    .service(posts::show_thread)
    .service(posts::create_post)
    .service(votes::vote_topic)
    .service(votes::topic_votes)
    .service(votes::vote_post)
    .service(votes::post_votes);
}
