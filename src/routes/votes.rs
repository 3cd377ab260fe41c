use actix_web::{HttpResponse, Responder, get, post, web};

use crate::auth::AuthContext;
use crate::domain::types::{PostId, TopicId, VoteTarget};
use crate::forms::votes::{VoteForm, VoteFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{error_response, parse_id};
use crate::services::ServiceError;
use crate::services::votes::{cast_vote, vote_tally};

fn vote(
    target: VoteTarget,
    auth: &AuthContext,
    repo: &DieselRepository,
    form: VoteForm,
) -> HttpResponse {
    let payload: VoteFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(&ServiceError::from(e)),
    };

    match cast_vote(target, payload, auth, repo) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(err) => error_response(&err),
    }
}

fn tally(target: VoteTarget, auth: &AuthContext, repo: &DieselRepository) -> HttpResponse {
    match vote_tally(target, auth, repo) {
        Ok(tally) => HttpResponse::Ok().json(tally),
        Err(err) => error_response(&err),
    }
}

#[post("/topics/{topic_id}/vote")]
pub async fn vote_topic(
    topic_id: web::Path<i32>,
    auth: AuthContext,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<VoteForm>,
) -> impl Responder {
    match parse_id::<TopicId>(topic_id.into_inner()) {
        Ok(id) => vote(VoteTarget::Topic(id), &auth, repo.get_ref(), form),
        Err(response) => response,
    }
}

#[get("/topics/{topic_id}/votes")]
pub async fn topic_votes(
    topic_id: web::Path<i32>,
    auth: AuthContext,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match parse_id::<TopicId>(topic_id.into_inner()) {
        Ok(id) => tally(VoteTarget::Topic(id), &auth, repo.get_ref()),
        Err(response) => response,
    }
}

#[post("/posts/{post_id}/vote")]
pub async fn vote_post(
    post_id: web::Path<i32>,
    auth: AuthContext,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<VoteForm>,
) -> impl Responder {
    match parse_id::<PostId>(post_id.into_inner()) {
        Ok(id) => vote(VoteTarget::Post(id), &auth, repo.get_ref(), form),
        Err(response) => response,
    }
}

#[get("/posts/{post_id}/votes")]
pub async fn post_votes(
    post_id: web::Path<i32>,
    auth: AuthContext,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match parse_id::<PostId>(post_id.into_inner()) {
        Ok(id) => tally(VoteTarget::Post(id), &auth, repo.get_ref()),
        Err(response) => response,
    }
}
