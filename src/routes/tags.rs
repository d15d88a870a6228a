use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, delete, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;
use serde_json::json;

use crate::forms::catalog::UploadCatalogForm;
use crate::forms::tags::AddTagForm;
use crate::repository::DieselRepository;
use crate::routes::{bad_request, not_found, service_error_response};
use crate::services::{ServiceError, tags};

#[get("/tags/")]
pub async fn list_tags(repo: web::Data<DieselRepository>) -> impl Responder {
    match tags::list_tags(repo.get_ref()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => service_error_response(err, "list tags"),
    }
}

#[get("/tags/{tag_id}/")]
pub async fn show_tag(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let tag_id = path.into_inner();

    match tags::get_tag(repo.get_ref(), tag_id) {
        Ok(tag) => HttpResponse::Ok().json(tag),
        Err(ServiceError::NotFound) => not_found("Тэг не найден."),
        Err(err) => service_error_response(err, "load tag"),
    }
}

#[post("/tags/")]
pub async fn add_tag(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddTagForm>,
) -> impl Responder {
    match tags::create_tag(repo.get_ref(), &user, form) {
        Ok(tag) => HttpResponse::Created().json(tag),
        Err(ServiceError::Conflict) => {
            bad_request("Тэг с таким названием, цветом или слагом уже существует.")
        }
        Err(err) => service_error_response(err, "create tag"),
    }
}

#[delete("/tags/{tag_id}/")]
pub async fn delete_tag(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let tag_id = path.into_inner();

    match tags::remove_tag(repo.get_ref(), &user, tag_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(ServiceError::NotFound) => not_found("Тэг не найден или уже удален."),
        Err(err) => service_error_response(err, "delete tag"),
    }
}

#[post("/tags/upload")]
pub async fn upload_tags(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadCatalogForm>,
) -> impl Responder {
    match tags::upload_tags(repo.get_ref(), &user, form) {
        Ok(created) => HttpResponse::Created().json(json!({ "created": created })),
        Err(ServiceError::Conflict) => bad_request("Файл содержит уже существующие тэги."),
        Err(err) => service_error_response(err, "upload tags"),
    }
}
