use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod ingredients;
pub mod recipes;
pub mod tags;
pub mod users;

/// Error body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

pub(crate) fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorDetail::new(message))
}

pub(crate) fn not_found(message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorDetail::new(message))
}

pub(crate) fn forbidden() -> HttpResponse {
    HttpResponse::Forbidden().json(ErrorDetail::new(
        "У вас недостаточно прав для выполнения данного действия.",
    ))
}

/// Map the remaining service errors onto HTTP responses.
///
/// `action` is only used in the log line of unexpected failures.
pub(crate) fn service_error_response(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Form(message) => bad_request(message),
        ServiceError::NotFound => not_found("Страница не найдена."),
        ServiceError::Unauthorized => forbidden(),
        ServiceError::Conflict => bad_request("Запись с такими данными уже существует."),
        err => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError()
                .json(ErrorDetail::new("Внутренняя ошибка сервера."))
        }
    }
}

/// Render malformed JSON bodies as `{"detail": ...}` 400 responses.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = bad_request(err.to_string());
    InternalError::from_response(err, response).into()
}

/// Render malformed query strings as `{"detail": ...}` 400 responses.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = bad_request(err.to_string());
    InternalError::from_response(err, response).into()
}

/// Register every API endpoint on `cfg`.
///
/// Literal paths are registered before their `{id}` siblings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(tags::list_tags)
        .service(tags::upload_tags)
        .service(tags::add_tag)
        .service(tags::show_tag)
        .service(tags::delete_tag)
        .service(ingredients::list_ingredients)
        .service(ingredients::upload_ingredients)
        .service(ingredients::add_ingredient)
        .service(ingredients::show_ingredient)
        .service(ingredients::delete_ingredient)
        .service(recipes::download_shopping_cart)
        .service(recipes::list_recipes)
        .service(recipes::add_recipe)
        .service(recipes::show_recipe)
        .service(recipes::edit_recipe)
        .service(recipes::delete_recipe)
        .service(recipes::add_favorite)
        .service(recipes::delete_favorite)
        .service(recipes::add_to_shopping_cart)
        .service(recipes::delete_from_shopping_cart)
        .service(users::show_current_user)
        .service(users::edit_current_user)
        .service(users::list_subscriptions)
        .service(users::list_users)
        .service(users::show_user)
        .service(users::subscribe)
        .service(users::unsubscribe);
}
