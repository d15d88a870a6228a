use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::users::UpdateProfileForm;
use crate::repository::DieselRepository;
use crate::routes::{bad_request, not_found, service_error_response};
use crate::services::ServiceError;
use crate::services::subscriptions::{self, SubscribeParams, SubscriptionListParams};
use crate::services::users::{self, UserListParams};

#[get("/users/")]
pub async fn list_users(
    params: web::Query<UserListParams>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match users::list_users(repo.get_ref(), user.as_ref(), params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => service_error_response(err, "list users"),
    }
}

#[get("/users/me/")]
pub async fn show_current_user(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match users::get_current_user(repo.get_ref(), &user) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(err) => service_error_response(err, "load current user"),
    }
}

#[patch("/users/me/")]
pub async fn edit_current_user(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateProfileForm>,
) -> impl Responder {
    match users::update_current_user(repo.get_ref(), &user, form) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(ServiceError::Conflict) => {
            bad_request("Пользователь с таким именем уже существует.")
        }
        Err(err) => service_error_response(err, "update current user"),
    }
}

#[get("/users/subscriptions/")]
pub async fn list_subscriptions(
    params: web::Query<SubscriptionListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match subscriptions::list_subscriptions(repo.get_ref(), &user, params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => service_error_response(err, "list subscriptions"),
    }
}

#[get("/users/{user_id}/")]
pub async fn show_user(
    path: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match users::get_user(repo.get_ref(), user.as_ref(), path.into_inner()) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(ServiceError::NotFound) => not_found("Пользователь не найден."),
        Err(err) => service_error_response(err, "load user"),
    }
}

#[post("/users/{user_id}/subscribe/")]
pub async fn subscribe(
    path: web::Path<i32>,
    params: web::Query<SubscribeParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let author_id = path.into_inner();

    match subscriptions::subscribe(repo.get_ref(), &user, author_id, params.into_inner()) {
        Ok(subscription) => HttpResponse::Created().json(subscription),
        Err(ServiceError::NotFound) => not_found("Пользователь не найден."),
        Err(err) => service_error_response(err, "subscribe"),
    }
}

#[delete("/users/{user_id}/subscribe/")]
pub async fn unsubscribe(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let author_id = path.into_inner();

    match subscriptions::unsubscribe(repo.get_ref(), &user, author_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(ServiceError::NotFound) => not_found("Вы не подписаны на данного пользователя."),
        Err(err) => service_error_response(err, "unsubscribe"),
    }
}
