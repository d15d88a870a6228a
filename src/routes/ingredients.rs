use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, delete, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;
use serde_json::json;

use crate::forms::catalog::UploadCatalogForm;
use crate::forms::ingredients::AddIngredientForm;
use crate::repository::DieselRepository;
use crate::routes::{bad_request, not_found, service_error_response};
use crate::services::ServiceError;
use crate::services::ingredients::{self, IngredientQuery};

#[get("/ingredients/")]
pub async fn list_ingredients(
    params: web::Query<IngredientQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match ingredients::list_ingredients(repo.get_ref(), params.into_inner()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => service_error_response(err, "list ingredients"),
    }
}

#[get("/ingredients/{ingredient_id}/")]
pub async fn show_ingredient(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match ingredients::get_ingredient(repo.get_ref(), path.into_inner()) {
        Ok(ingredient) => HttpResponse::Ok().json(ingredient),
        Err(ServiceError::NotFound) => not_found("Ингредиент не найден."),
        Err(err) => service_error_response(err, "load ingredient"),
    }
}

#[post("/ingredients/")]
pub async fn add_ingredient(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddIngredientForm>,
) -> impl Responder {
    match ingredients::create_ingredient(repo.get_ref(), &user, form) {
        Ok(ingredient) => HttpResponse::Created().json(ingredient),
        Err(err) => service_error_response(err, "create ingredient"),
    }
}

#[delete("/ingredients/{ingredient_id}/")]
pub async fn delete_ingredient(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ingredient_id = path.into_inner();

    match ingredients::remove_ingredient(repo.get_ref(), &user, ingredient_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(ServiceError::NotFound) => not_found("Ингредиент не найден или уже удален."),
        Err(err) => service_error_response(err, "delete ingredient"),
    }
}

#[post("/ingredients/upload")]
pub async fn upload_ingredients(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadCatalogForm>,
) -> impl Responder {
    match ingredients::upload_ingredients(repo.get_ref(), &user, form) {
        Ok(created) => HttpResponse::Created().json(json!({ "created": created })),
        Err(ServiceError::Conflict) => bad_request("Не удалось сохранить ингредиенты из файла."),
        Err(err) => service_error_response(err, "upload ingredients"),
    }
}
