use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, patch, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::relation::{RecipeRelation, ToggleAction};
use crate::forms::recipes::{RecipeForm, UpdateRecipeForm};
use crate::repository::DieselRepository;
use crate::routes::{bad_request, not_found, service_error_response};
use crate::services::ServiceError;
use crate::services::recipes::{self, RecipeListParams};
use crate::services::relations::{ToggleOutcome, toggle_recipe_relation};
use crate::services::shopping_cart::{SHOPPING_LIST_FILE_NAME, download_shopping_list};

#[get("/recipes/")]
pub async fn list_recipes(
    req: HttpRequest,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = match serde_html_form::from_str::<RecipeListParams>(req.query_string()) {
        Ok(params) => params,
        Err(err) => return bad_request(format!("Некорректные параметры запроса: {err}")),
    };

    match recipes::list_recipes(repo.get_ref(), user.as_ref(), params) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => service_error_response(err, "list recipes"),
    }
}

#[get("/recipes/download_shopping_cart/")]
pub async fn download_shopping_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match download_shopping_list(repo.get_ref(), &user) {
        Ok(text) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(
                    SHOPPING_LIST_FILE_NAME.to_string(),
                )],
            })
            .body(text),
        Err(err) => service_error_response(err, "build shopping list"),
    }
}

#[get("/recipes/{recipe_id}/")]
pub async fn show_recipe(
    path: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match recipes::get_recipe(repo.get_ref(), user.as_ref(), path.into_inner()) {
        Ok(recipe) => HttpResponse::Ok().json(recipe),
        Err(ServiceError::NotFound) => not_found("Рецепт не найден."),
        Err(err) => service_error_response(err, "load recipe"),
    }
}

#[post("/recipes/")]
pub async fn add_recipe(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<RecipeForm>,
) -> impl Responder {
    match recipes::create_recipe(repo.get_ref(), &user, form) {
        Ok(recipe) => HttpResponse::Created().json(recipe),
        Err(err) => service_error_response(err, "create recipe"),
    }
}

#[patch("/recipes/{recipe_id}/")]
pub async fn edit_recipe(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateRecipeForm>,
) -> impl Responder {
    let recipe_id = path.into_inner();

    match recipes::update_recipe(repo.get_ref(), &user, recipe_id, form) {
        Ok(recipe) => HttpResponse::Ok().json(recipe),
        Err(ServiceError::NotFound) => not_found("Рецепт не найден."),
        Err(err) => service_error_response(err, "update recipe"),
    }
}

#[delete("/recipes/{recipe_id}/")]
pub async fn delete_recipe(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let recipe_id = path.into_inner();

    match recipes::delete_recipe(repo.get_ref(), &user, recipe_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(ServiceError::NotFound) => not_found("Рецепт не найден."),
        Err(err) => service_error_response(err, "delete recipe"),
    }
}

fn relation_response(
    repo: &DieselRepository,
    user: &AuthenticatedUser,
    relation: RecipeRelation,
    recipe_id: i32,
    action: ToggleAction,
) -> HttpResponse {
    match toggle_recipe_relation(repo, user, relation, recipe_id, action) {
        Ok(ToggleOutcome::Added(recipe)) => HttpResponse::Created().json(recipe),
        Ok(ToggleOutcome::Removed) => HttpResponse::NoContent().finish(),
        Err(ServiceError::NotFound) => not_found(relation.missing_message()),
        Err(ServiceError::Conflict) => bad_request(relation.duplicate_message()),
        Err(err) => service_error_response(err, "update recipe relation"),
    }
}

#[post("/recipes/{recipe_id}/favorite/")]
pub async fn add_favorite(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    relation_response(
        repo.get_ref(),
        &user,
        RecipeRelation::Favorite,
        path.into_inner(),
        ToggleAction::Add,
    )
}

#[delete("/recipes/{recipe_id}/favorite/")]
pub async fn delete_favorite(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    relation_response(
        repo.get_ref(),
        &user,
        RecipeRelation::Favorite,
        path.into_inner(),
        ToggleAction::Remove,
    )
}

#[post("/recipes/{recipe_id}/shopping_cart/")]
pub async fn add_to_shopping_cart(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    relation_response(
        repo.get_ref(),
        &user,
        RecipeRelation::ShoppingCart,
        path.into_inner(),
        ToggleAction::Add,
    )
}

#[delete("/recipes/{recipe_id}/shopping_cart/")]
pub async fn delete_from_shopping_cart(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    relation_response(
        repo.get_ref(),
        &user,
        RecipeRelation::ShoppingCart,
        path.into_inner(),
        ToggleAction::Remove,
    )
}
