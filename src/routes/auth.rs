use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};

use crate::auth::AuthContext;
use crate::domain::user::UserProfile;
use crate::dto::users::UserDto;
use crate::forms::auth::{LoginForm, LoginFormPayload, RegisterForm, RegisterFormPayload};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::auth::{login as login_service, me as me_service, register as register_service};

/// Attach the profile's account to the session.
fn start_session(req: &HttpRequest, profile: &UserProfile) -> Result<(), HttpResponse> {
    Identity::login(&req.extensions(), profile.auth_user_id.to_string())
        .map(|_| ())
        .map_err(|e| {
            log::error!("Failed to start session for {}: {e}", profile.auth_user_id);
            error_response(&ServiceError::Internal)
        })
}

#[post("/auth/register")]
pub async fn register(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<RegisterForm>,
) -> impl Responder {
    let payload: RegisterFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(&ServiceError::from(e)),
    };

    match register_service(payload, repo.get_ref()) {
        Ok(profile) => match start_session(&req, &profile) {
            Ok(()) => HttpResponse::Created().json(UserDto::from(profile)),
            Err(response) => response,
        },
        Err(err) => error_response(&err),
    }
}

#[post("/auth/login")]
pub async fn login(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<LoginForm>,
) -> impl Responder {
    let payload: LoginFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(&ServiceError::from(e)),
    };

    match login_service(payload, repo.get_ref()) {
        Ok(profile) => match start_session(&req, &profile) {
            Ok(()) => HttpResponse::Ok().json(UserDto::from(profile)),
            Err(response) => response,
        },
        Err(err) => error_response(&err),
    }
}

#[post("/auth/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    HttpResponse::NoContent().finish()
}

#[get("/auth/me")]
pub async fn me(auth: AuthContext, repo: web::Data<DieselRepository>) -> impl Responder {
    match me_service(&auth, repo.get_ref()) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(err) => error_response(&err),
    }
}
