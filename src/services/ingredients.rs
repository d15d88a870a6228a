use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::Deserialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::ingredient::{Ingredient, IngredientListQuery};
use crate::forms::catalog::UploadCatalogForm;
use crate::forms::ingredients::AddIngredientForm;
use crate::repository::{IngredientReader, IngredientWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the ingredient list.
#[derive(Debug, Default, Deserialize)]
pub struct IngredientQuery {
    /// Case-insensitive prefix of the ingredient name.
    pub name: Option<String>,
}

pub fn list_ingredients<R>(repo: &R, query: IngredientQuery) -> ServiceResult<Vec<Ingredient>>
where
    R: IngredientReader + ?Sized,
{
    let mut list_query = IngredientListQuery::new();

    if let Some(prefix) = query.name.as_deref().map(str::trim) {
        if !prefix.is_empty() {
            list_query = list_query.name_prefix(prefix);
        }
    }

    repo.list_ingredients(list_query)
        .map_err(ServiceError::from)
}

pub fn get_ingredient<R>(repo: &R, ingredient_id: i32) -> ServiceResult<Ingredient>
where
    R: IngredientReader + ?Sized,
{
    repo.get_ingredient_by_id(ingredient_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a catalog ingredient. Admin only.
pub fn create_ingredient<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddIngredientForm,
) -> ServiceResult<Ingredient>
where
    R: IngredientWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_ingredient = form
        .into_new_ingredient()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_ingredient(&new_ingredient)
        .map_err(ServiceError::from)
}

/// Deletes a catalog ingredient and every recipe quantity using it. Admin only.
pub fn remove_ingredient<R>(
    repo: &R,
    user: &AuthenticatedUser,
    ingredient_id: i32,
) -> ServiceResult<()>
where
    R: IngredientWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_ingredient(ingredient_id)
        .map_err(ServiceError::from)
}

/// Imports ingredients from an uploaded `name,measurement_unit` CSV. Admin only.
pub fn upload_ingredients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    mut form: UploadCatalogForm,
) -> ServiceResult<usize>
where
    R: IngredientWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let ingredients = form
        .parse_ingredients()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_ingredients(&ingredients)
        .map_err(ServiceError::from)
}
