use actix_web::{HttpResponse, Responder, get, post, web};

use crate::auth::AuthContext;
use crate::domain::types::CategoryId;
use crate::forms::categories::{AddCategoryForm, AddCategoryFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{error_response, parse_id};
use crate::services::ServiceError;
use crate::services::categories::{
    add_category as add_category_service, list_categories as list_categories_service,
    show_category as show_category_service,
};

#[get("/categories")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_categories_service(repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => error_response(&err),
    }
}

#[post("/categories")]
pub async fn add_category(
    auth: AuthContext,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddCategoryForm>,
) -> impl Responder {
    let payload: AddCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(&ServiceError::from(e)),
    };

    match add_category_service(payload, &auth, repo.get_ref()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(err) => error_response(&err),
    }
}

#[get("/categories/{category_id}")]
pub async fn show_category(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id: CategoryId = match parse_id(category_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match show_category_service(category_id, repo.get_ref()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(&err),
    }
}
