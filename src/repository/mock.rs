use mockall::mock;

use super::{
    IngredientReader, IngredientWriter, RecipeReader, RecipeRelationReader, RecipeRelationWriter,
    RecipeWriter, ShoppingCartReader, SubscriptionReader, SubscriptionWriter, TagReader,
    TagWriter, UserReader, UserWriter,
};
use crate::domain::{
    ingredient::{Ingredient, IngredientListQuery, NewIngredient},
    recipe::{NewRecipe, Recipe, RecipeListQuery, UpdateRecipe},
    relation::RecipeRelation,
    shopping_list::CartIngredient,
    subscription::{NewSubscription, Subscription},
    tag::{NewTag, Tag},
    user::{NewUser, UpdateUser, User, UserListQuery},
};
use pushkind_common::pagination::Pagination;
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub TagReader {}

    impl TagReader for TagReader {
        fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<Tag>>;
        fn get_tags_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Tag>>;
        fn list_tags(&self) -> RepositoryResult<Vec<Tag>>;
    }
}

mock! {
    pub TagWriter {}

    impl TagWriter for TagWriter {
        fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
        fn create_tags(&self, new_tags: &[NewTag]) -> RepositoryResult<usize>;
        fn delete_tag(&self, tag_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub IngredientReader {}

    impl IngredientReader for IngredientReader {
        fn get_ingredient_by_id(&self, id: i32) -> RepositoryResult<Option<Ingredient>>;
        fn get_ingredients_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Ingredient>>;
        fn list_ingredients(&self, query: IngredientListQuery) -> RepositoryResult<Vec<Ingredient>>;
    }
}

mock! {
    pub IngredientWriter {}

    impl IngredientWriter for IngredientWriter {
        fn create_ingredient(&self, new_ingredient: &NewIngredient) -> RepositoryResult<Ingredient>;
        fn create_ingredients(&self, new_ingredients: &[NewIngredient]) -> RepositoryResult<usize>;
        fn delete_ingredient(&self, ingredient_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub UserReader {}

    impl UserReader for UserReader {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
        fn get_users_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<User>>;
        fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    }
}

mock! {
    pub UserWriter {}

    impl UserWriter for UserWriter {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
    }
}

mock! {
    pub ShoppingCartReader {}

    impl ShoppingCartReader for ShoppingCartReader {
        fn list_cart_ingredients(&self, user_id: i32) -> RepositoryResult<Vec<CartIngredient>>;
    }
}

mock! {
    pub Repository {}

    impl TagReader for Repository {
        fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<Tag>>;
        fn get_tags_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Tag>>;
        fn list_tags(&self) -> RepositoryResult<Vec<Tag>>;
    }

    impl IngredientReader for Repository {
        fn get_ingredient_by_id(&self, id: i32) -> RepositoryResult<Option<Ingredient>>;
        fn get_ingredients_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Ingredient>>;
        fn list_ingredients(&self, query: IngredientListQuery) -> RepositoryResult<Vec<Ingredient>>;
    }

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
        fn get_users_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<User>>;
        fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
    }

    impl ShoppingCartReader for Repository {
        fn list_cart_ingredients(&self, user_id: i32) -> RepositoryResult<Vec<CartIngredient>>;
    }

    impl RecipeReader for Repository {
        fn get_recipe_by_id(&self, id: i32) -> RepositoryResult<Option<Recipe>>;
        fn list_recipes(&self, query: RecipeListQuery) -> RepositoryResult<(usize, Vec<Recipe>)>;
    }

    impl RecipeWriter for Repository {
        fn create_recipe(&self, new_recipe: &NewRecipe) -> RepositoryResult<Recipe>;
        fn update_recipe(&self, recipe_id: i32, updates: &UpdateRecipe) -> RepositoryResult<Recipe>;
        fn delete_recipe(&self, recipe_id: i32) -> RepositoryResult<()>;
    }

    impl RecipeRelationReader for Repository {
        fn relation_exists(&self, relation: RecipeRelation, user_id: i32, recipe_id: i32) -> RepositoryResult<bool>;
        fn related_recipe_ids(&self, relation: RecipeRelation, user_id: i32, recipe_ids: &[i32]) -> RepositoryResult<Vec<i32>>;
    }

    impl RecipeRelationWriter for Repository {
        fn add_relation(&self, relation: RecipeRelation, user_id: i32, recipe_id: i32) -> RepositoryResult<()>;
        fn remove_relation(&self, relation: RecipeRelation, user_id: i32, recipe_id: i32) -> RepositoryResult<()>;
    }

    impl SubscriptionReader for Repository {
        fn subscription_exists(&self, user_id: i32, author_id: i32) -> RepositoryResult<bool>;
        fn subscribed_author_ids(&self, user_id: i32, author_ids: &[i32]) -> RepositoryResult<Vec<i32>>;
        fn list_subscribed_authors(&self, user_id: i32, pagination: Option<Pagination>) -> RepositoryResult<(usize, Vec<User>)>;
    }

    impl SubscriptionWriter for Repository {
        fn create_subscription(&self, new_subscription: &NewSubscription) -> RepositoryResult<Subscription>;
        fn delete_subscription(&self, user_id: i32, author_id: i32) -> RepositoryResult<()>;
    }
}
