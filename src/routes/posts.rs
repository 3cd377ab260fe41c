use actix_web::{HttpResponse, Responder, get, post, web};

use crate::auth::AuthContext;
use crate::domain::types::TopicId;
use crate::forms::posts::{AddPostForm, AddPostFormPayload, PostListParams};
use crate::repository::DieselRepository;
use crate::routes::{error_response, parse_id};
use crate::services::ServiceError;
use crate::services::posts::{
    create_post as create_post_service, list_posts as list_posts_service,
    show_thread as show_thread_service,
};

#[get("/topics/{topic_id}/posts")]
pub async fn list_posts(
    topic_id: web::Path<i32>,
    params: web::Query<PostListParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let topic_id: TopicId = match parse_id(topic_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match list_posts_service(topic_id, params.into_inner().into(), repo.get_ref()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(&err),
    }
}

#[get("/topics/{topic_id}/thread")]
pub async fn show_thread(
    topic_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let topic_id: TopicId = match parse_id(topic_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match show_thread_service(topic_id, repo.get_ref()) {
        Ok(thread) => HttpResponse::Ok().json(thread),
        Err(err) => error_response(&err),
    }
}

#[post("/topics/{topic_id}/posts")]
pub async fn create_post(
    topic_id: web::Path<i32>,
    auth: AuthContext,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddPostForm>,
) -> impl Responder {
    let topic_id: TopicId = match parse_id(topic_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let payload: AddPostFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(&ServiceError::from(e)),
    };

    match create_post_service(topic_id, payload, &auth, repo.get_ref()) {
        Ok(post) => HttpResponse::Created().json(post),
        Err(err) => error_response(&err),
    }
}
