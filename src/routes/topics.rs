use actix_web::{HttpResponse, Responder, get, post, web};

use crate::auth::AuthContext;
use crate::domain::types::{CategoryId, TopicId};
use crate::forms::topics::{AddTopicForm, AddTopicFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{error_response, parse_id};
use crate::services::ServiceError;
use crate::services::topics::{
    create_topic as create_topic_service, list_topics as list_topics_service,
    show_topic as show_topic_service,
};

#[get("/categories/{category_id}/topics")]
pub async fn list_topics(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id: CategoryId = match parse_id(category_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match list_topics_service(category_id, repo.get_ref()) {
        Ok(topics) => HttpResponse::Ok().json(topics),
        Err(err) => error_response(&err),
    }
}

#[post("/categories/{category_id}/topics")]
pub async fn create_topic(
    category_id: web::Path<i32>,
    auth: AuthContext,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddTopicForm>,
) -> impl Responder {
    let category_id: CategoryId = match parse_id(category_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let payload: AddTopicFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(&ServiceError::from(e)),
    };

    match create_topic_service(category_id, payload, &auth, repo.get_ref()) {
        Ok(created) => HttpResponse::Created().json(created),
        Err(err) => error_response(&err),
    }
}

#[get("/topics/{topic_id}")]
pub async fn show_topic(
    topic_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let topic_id: TopicId = match parse_id(topic_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match show_topic_service(topic_id, repo.get_ref()) {
        Ok(topic) => HttpResponse::Ok().json(topic),
        Err(err) => error_response(&err),
    }
}
