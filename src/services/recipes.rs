use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::NaiveDateTime;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::Paginated;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{
    recipe::{NewIngredientAmount, Recipe, RecipeIngredient, RecipeListQuery},
    relation::RecipeRelation,
    tag::Tag,
    user::User,
};
use crate::forms::recipes::{RecipeForm, RecipeFormError, UpdateRecipeForm};
use crate::repository::{
    IngredientReader, RecipeReader, RecipeRelationReader, RecipeWriter, SubscriptionReader,
    TagReader, UserReader, UserWriter,
};
use crate::services::users::{UserView, resolve_user, resolve_viewer, subscribed_ids};
use crate::services::{ServiceError, ServiceResult, page_bounds};

/// Query parameters accepted by the recipe list.
///
/// Parsed with `serde_html_form` so `tags` may repeat.
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub author: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_favorited: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_in_shopping_cart: bool,
}

/// Recipe as rendered to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeView {
    pub id: i32,
    pub tags: Vec<Tag>,
    pub author: UserView,
    pub ingredients: Vec<RecipeIngredient>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub pub_date: NaiveDateTime,
}

/// Lists recipes matching the query string, newest first.
pub fn list_recipes<R>(
    repo: &R,
    identity: Option<&AuthenticatedUser>,
    params: RecipeListParams,
) -> ServiceResult<Paginated<RecipeView>>
where
    R: RecipeReader
        + RecipeRelationReader
        + UserReader
        + UserWriter
        + SubscriptionReader
        + ?Sized,
{
    let viewer = resolve_viewer(repo, identity)?;
    let (page, per_page) = page_bounds(params.page, params.limit);

    let mut query = RecipeListQuery::new().paginate(page, per_page);

    if let Some(author_id) = params.author {
        query = query.author(author_id);
    }

    let slugs: Vec<String> = params
        .tags
        .iter()
        .map(|slug| slug.trim())
        .filter(|slug| !slug.is_empty())
        .map(str::to_string)
        .collect();
    if !slugs.is_empty() {
        query = query.tags(slugs);
    }

    // Relation flags only narrow the list for a known caller.
    if let Some(viewer) = viewer.as_ref() {
        if params.is_favorited {
            query = query.favorited_by(viewer.id);
        }
        if params.is_in_shopping_cart {
            query = query.in_shopping_cart_of(viewer.id);
        }
    }

    let (total, recipes) = repo.list_recipes(query).map_err(ServiceError::from)?;
    let views = build_views(repo, viewer.as_ref(), recipes)?;

    Ok(Paginated::new(views, page, total.div_ceil(per_page)))
}

pub fn get_recipe<R>(
    repo: &R,
    identity: Option<&AuthenticatedUser>,
    recipe_id: i32,
) -> ServiceResult<RecipeView>
where
    R: RecipeReader
        + RecipeRelationReader
        + UserReader
        + UserWriter
        + SubscriptionReader
        + ?Sized,
{
    let viewer = resolve_viewer(repo, identity)?;
    let recipe = load_recipe(repo, recipe_id)?;

    single_view(repo, viewer.as_ref(), recipe)
}

/// Publishes a recipe authored by the caller.
pub fn create_recipe<R>(
    repo: &R,
    identity: &AuthenticatedUser,
    form: RecipeForm,
) -> ServiceResult<RecipeView>
where
    R: RecipeReader
        + RecipeWriter
        + RecipeRelationReader
        + TagReader
        + IngredientReader
        + UserReader
        + UserWriter
        + SubscriptionReader
        + ?Sized,
{
    let author = resolve_user(repo, identity)?;

    let new_recipe = form
        .into_new_recipe(author.id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    ensure_catalog_references(repo, &new_recipe.tag_ids, &new_recipe.ingredients)?;

    let created = repo
        .create_recipe(&new_recipe)
        .map_err(ServiceError::from)?;
    log::info!("User {} published recipe {}", author.id, created.id);

    single_view(repo, Some(&author), created)
}

/// Edits a recipe. Only its author may do so.
pub fn update_recipe<R>(
    repo: &R,
    identity: &AuthenticatedUser,
    recipe_id: i32,
    form: UpdateRecipeForm,
) -> ServiceResult<RecipeView>
where
    R: RecipeReader
        + RecipeWriter
        + RecipeRelationReader
        + TagReader
        + IngredientReader
        + UserReader
        + UserWriter
        + SubscriptionReader
        + ?Sized,
{
    let user = resolve_user(repo, identity)?;
    let existing = load_recipe(repo, recipe_id)?;
    if existing.author_id != user.id {
        return Err(ServiceError::Unauthorized);
    }

    let updates = form
        .into_update_recipe()
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    ensure_catalog_references(repo, &updates.tag_ids, &updates.ingredients)?;

    let updated = repo
        .update_recipe(recipe_id, &updates)
        .map_err(ServiceError::from)?;

    single_view(repo, Some(&user), updated)
}

/// Deletes a recipe. Only its author may do so.
pub fn delete_recipe<R>(repo: &R, identity: &AuthenticatedUser, recipe_id: i32) -> ServiceResult<()>
where
    R: RecipeReader + RecipeWriter + UserReader + UserWriter + ?Sized,
{
    let user = resolve_user(repo, identity)?;
    let existing = load_recipe(repo, recipe_id)?;
    if existing.author_id != user.id {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_recipe(recipe_id).map_err(ServiceError::from)?;
    log::info!("User {} deleted recipe {}", user.id, recipe_id);

    Ok(())
}

pub(crate) fn load_recipe<R>(repo: &R, recipe_id: i32) -> ServiceResult<Recipe>
where
    R: RecipeReader + ?Sized,
{
    repo.get_recipe_by_id(recipe_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Every referenced tag and ingredient must exist in the catalog.
fn ensure_catalog_references<R>(
    repo: &R,
    tag_ids: &[i32],
    ingredients: &[NewIngredientAmount],
) -> ServiceResult<()>
where
    R: TagReader + IngredientReader + ?Sized,
{
    let wanted_tags: BTreeSet<i32> = tag_ids.iter().copied().collect();
    let tag_list: Vec<i32> = wanted_tags.iter().copied().collect();
    let found_tags = repo
        .get_tags_by_ids(&tag_list)
        .map_err(ServiceError::from)?;
    if found_tags.len() != wanted_tags.len() {
        return Err(ServiceError::Form(RecipeFormError::UnknownTag.to_string()));
    }

    let wanted_ingredients: BTreeSet<i32> =
        ingredients.iter().map(|item| item.ingredient_id).collect();
    let ingredient_list: Vec<i32> = wanted_ingredients.iter().copied().collect();
    let found_ingredients = repo
        .get_ingredients_by_ids(&ingredient_list)
        .map_err(ServiceError::from)?;
    if found_ingredients.len() != wanted_ingredients.len() {
        return Err(ServiceError::Form(
            RecipeFormError::UnknownIngredient.to_string(),
        ));
    }

    Ok(())
}

fn single_view<R>(repo: &R, viewer: Option<&User>, recipe: Recipe) -> ServiceResult<RecipeView>
where
    R: RecipeRelationReader + UserReader + SubscriptionReader + ?Sized,
{
    build_views(repo, viewer, vec![recipe])?
        .pop()
        .ok_or(ServiceError::NotFound)
}

/// Expand authors and compute per-viewer flags for a batch of recipes.
fn build_views<R>(
    repo: &R,
    viewer: Option<&User>,
    recipes: Vec<Recipe>,
) -> ServiceResult<Vec<RecipeView>>
where
    R: RecipeRelationReader + UserReader + SubscriptionReader + ?Sized,
{
    if recipes.is_empty() {
        return Ok(Vec::new());
    }

    let author_ids: Vec<i32> = recipes
        .iter()
        .map(|recipe| recipe.author_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let recipe_ids: Vec<i32> = recipes.iter().map(|recipe| recipe.id).collect();

    let authors: HashMap<i32, User> = repo
        .get_users_by_ids(&author_ids)
        .map_err(ServiceError::from)?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();
    let subscribed = subscribed_ids(repo, viewer, &author_ids)?;
    let favorited = related_ids(repo, viewer, RecipeRelation::Favorite, &recipe_ids)?;
    let in_cart = related_ids(repo, viewer, RecipeRelation::ShoppingCart, &recipe_ids)?;

    let mut views = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        let Some(author) = authors.get(&recipe.author_id) else {
            log::error!(
                "Recipe {} references missing author {}",
                recipe.id,
                recipe.author_id
            );
            return Err(ServiceError::NotFound);
        };

        views.push(RecipeView {
            id: recipe.id,
            tags: recipe.tags,
            author: UserView::new(author.clone(), subscribed.contains(&author.id)),
            ingredients: recipe.ingredients,
            is_favorited: favorited.contains(&recipe.id),
            is_in_shopping_cart: in_cart.contains(&recipe.id),
            name: recipe.name,
            image: recipe.image,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
            pub_date: recipe.pub_date,
        });
    }

    Ok(views)
}

fn related_ids<R>(
    repo: &R,
    viewer: Option<&User>,
    relation: RecipeRelation,
    recipe_ids: &[i32],
) -> ServiceResult<HashSet<i32>>
where
    R: RecipeRelationReader + ?Sized,
{
    let Some(viewer) = viewer else {
        return Ok(HashSet::new());
    };

    let ids = repo
        .related_recipe_ids(relation, viewer.id, recipe_ids)
        .map_err(ServiceError::from)?;

    Ok(ids.into_iter().collect())
}

/// Accept `1/0/true/false` for boolean query flags.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some("1") | Some("true") | Some("True") => Ok(true),
        Some("0") | Some("false") | Some("False") => Ok(false),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid boolean flag `{other}`"
        ))),
    }
}
