use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::pagination::Pagination;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::{
    ingredient::{Ingredient, IngredientListQuery, NewIngredient},
    recipe::{NewRecipe, Recipe, RecipeListQuery, UpdateRecipe},
    relation::RecipeRelation,
    shopping_list::CartIngredient,
    subscription::{NewSubscription, Subscription},
    tag::{NewTag, Tag},
    user::{NewUser, UpdateUser, User, UserListQuery},
};

pub mod ingredient;
pub mod recipe;
pub mod relation;
pub mod subscription;
pub mod tag;
pub mod user;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// SQL `(offset, limit)` for a page, or `None` when the page lies beyond
/// any addressable row.
pub(crate) fn page_window(pagination: &Pagination) -> Option<(i64, i64)> {
    let offset = (pagination.page.max(1) - 1).checked_mul(pagination.per_page)?;
    let offset = i64::try_from(offset).ok()?;
    let limit = i64::try_from(pagination.per_page).unwrap_or(i64::MAX);
    Some((offset, limit))
}

/// Read-only operations over user records.
pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    fn get_users_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<User>>;
    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
}

/// Write operations over user records.
pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
}

/// Read-only operations over tag records.
pub trait TagReader {
    fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<Tag>>;
    fn get_tags_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Tag>>;
    fn list_tags(&self) -> RepositoryResult<Vec<Tag>>;
}

/// Write operations over tag records.
pub trait TagWriter {
    fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
    fn create_tags(&self, new_tags: &[NewTag]) -> RepositoryResult<usize>;
    fn delete_tag(&self, tag_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over ingredient records.
pub trait IngredientReader {
    fn get_ingredient_by_id(&self, id: i32) -> RepositoryResult<Option<Ingredient>>;
    fn get_ingredients_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Ingredient>>;
    fn list_ingredients(&self, query: IngredientListQuery) -> RepositoryResult<Vec<Ingredient>>;
}

/// Write operations over ingredient records.
pub trait IngredientWriter {
    fn create_ingredient(&self, new_ingredient: &NewIngredient) -> RepositoryResult<Ingredient>;
    fn create_ingredients(&self, new_ingredients: &[NewIngredient]) -> RepositoryResult<usize>;
    fn delete_ingredient(&self, ingredient_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over recipes and their associations.
pub trait RecipeReader {
    fn get_recipe_by_id(&self, id: i32) -> RepositoryResult<Option<Recipe>>;
    fn list_recipes(&self, query: RecipeListQuery) -> RepositoryResult<(usize, Vec<Recipe>)>;
}

/// Write operations over recipes; each call is a single transaction.
pub trait RecipeWriter {
    fn create_recipe(&self, new_recipe: &NewRecipe) -> RepositoryResult<Recipe>;
    fn update_recipe(&self, recipe_id: i32, updates: &UpdateRecipe) -> RepositoryResult<Recipe>;
    fn delete_recipe(&self, recipe_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over the user-to-recipe join entities.
pub trait RecipeRelationReader {
    fn relation_exists(
        &self,
        relation: RecipeRelation,
        user_id: i32,
        recipe_id: i32,
    ) -> RepositoryResult<bool>;
    /// Subset of `recipe_ids` linked to `user_id` through `relation`.
    fn related_recipe_ids(
        &self,
        relation: RecipeRelation,
        user_id: i32,
        recipe_ids: &[i32],
    ) -> RepositoryResult<Vec<i32>>;
}

/// Write operations over the user-to-recipe join entities.
pub trait RecipeRelationWriter {
    fn add_relation(
        &self,
        relation: RecipeRelation,
        user_id: i32,
        recipe_id: i32,
    ) -> RepositoryResult<()>;
    fn remove_relation(
        &self,
        relation: RecipeRelation,
        user_id: i32,
        recipe_id: i32,
    ) -> RepositoryResult<()>;
}

/// Read-only operations over subscriptions.
pub trait SubscriptionReader {
    fn subscription_exists(&self, user_id: i32, author_id: i32) -> RepositoryResult<bool>;
    /// Subset of `author_ids` followed by `user_id`.
    fn subscribed_author_ids(&self, user_id: i32, author_ids: &[i32])
    -> RepositoryResult<Vec<i32>>;
    fn list_subscribed_authors(
        &self,
        user_id: i32,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<User>)>;
}

/// Write operations over subscriptions.
pub trait SubscriptionWriter {
    fn create_subscription(&self, new_subscription: &NewSubscription)
    -> RepositoryResult<Subscription>;
    fn delete_subscription(&self, user_id: i32, author_id: i32) -> RepositoryResult<()>;
}

/// Ingredient quantities of every recipe in a user's shopping cart.
pub trait ShoppingCartReader {
    fn list_cart_ingredients(&self, user_id: i32) -> RepositoryResult<Vec<CartIngredient>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_window_handles_overflowing_pages() {
        let first = Pagination {
            page: 1,
            per_page: 20,
        };
        assert_eq!(page_window(&first), Some((0, 20)));

        let third = Pagination {
            page: 3,
            per_page: 20,
        };
        assert_eq!(page_window(&third), Some((40, 20)));

        let huge = Pagination {
            page: usize::MAX / 2,
            per_page: 4,
        };
        assert_eq!(page_window(&huge), None);

        let unbounded = Pagination {
            page: 1,
            per_page: usize::MAX,
        };
        assert_eq!(page_window(&unbounded), Some((0, i64::MAX)));
    }
}
