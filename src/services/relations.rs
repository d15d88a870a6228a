use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::recipe::ShortRecipe;
use crate::domain::relation::{RecipeRelation, ToggleAction};
use crate::repository::{
    RecipeReader, RecipeRelationReader, RecipeRelationWriter, UserReader, UserWriter,
};
use crate::services::users::resolve_user;
use crate::services::{ServiceError, ServiceResult};

const MISSING_RECIPE_MESSAGE: &str = "Указанного рецепта не существует";

/// Result of a favorite/shopping-cart toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added(ShortRecipe),
    Removed,
}

/// Apply `action` to the caller's `relation` with a recipe.
pub fn toggle_recipe_relation<R>(
    repo: &R,
    identity: &AuthenticatedUser,
    relation: RecipeRelation,
    recipe_id: i32,
    action: ToggleAction,
) -> ServiceResult<ToggleOutcome>
where
    R: RecipeReader
        + RecipeRelationReader
        + RecipeRelationWriter
        + UserReader
        + UserWriter
        + ?Sized,
{
    match action {
        ToggleAction::Add => {
            add_recipe_relation(repo, identity, relation, recipe_id).map(ToggleOutcome::Added)
        }
        ToggleAction::Remove => {
            remove_recipe_relation(repo, identity, relation, recipe_id)?;
            Ok(ToggleOutcome::Removed)
        }
    }
}

/// Adds a recipe to the caller's favorites or shopping cart.
///
/// An unknown recipe or an existing pair is a validation error.
pub fn add_recipe_relation<R>(
    repo: &R,
    identity: &AuthenticatedUser,
    relation: RecipeRelation,
    recipe_id: i32,
) -> ServiceResult<ShortRecipe>
where
    R: RecipeReader
        + RecipeRelationReader
        + RecipeRelationWriter
        + UserReader
        + UserWriter
        + ?Sized,
{
    let user = resolve_user(repo, identity)?;

    let Some(recipe) = repo
        .get_recipe_by_id(recipe_id)
        .map_err(ServiceError::from)?
    else {
        return Err(ServiceError::Form(MISSING_RECIPE_MESSAGE.to_string()));
    };

    if repo
        .relation_exists(relation, user.id, recipe.id)
        .map_err(ServiceError::from)?
    {
        return Err(ServiceError::Form(relation.duplicate_message().to_string()));
    }

    repo.add_relation(relation, user.id, recipe.id)
        .map_err(ServiceError::from)?;

    Ok(ShortRecipe::from(&recipe))
}

/// Removes a recipe from the caller's favorites or shopping cart.
pub fn remove_recipe_relation<R>(
    repo: &R,
    identity: &AuthenticatedUser,
    relation: RecipeRelation,
    recipe_id: i32,
) -> ServiceResult<()>
where
    R: RecipeReader + RecipeRelationWriter + UserReader + UserWriter + ?Sized,
{
    let user = resolve_user(repo, identity)?;

    if repo
        .get_recipe_by_id(recipe_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    repo.remove_relation(relation, user.id, recipe_id)
        .map_err(ServiceError::from)
}
