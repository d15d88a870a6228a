use chrono::NaiveDateTime;
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::tag::Tag;

/// Domain representation of a published recipe with its tags and ingredients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipe {
    /// Unique identifier of the recipe.
    pub id: i32,
    /// Identifier of the user who published the recipe.
    pub author_id: i32,
    /// Human-readable name of the recipe.
    pub name: String,
    /// Image as a `data:image/...;base64,` URI.
    pub image: String,
    /// Cooking instructions.
    pub text: String,
    /// Cooking time in minutes.
    pub cooking_time: i32,
    /// Timestamp fixed when the recipe is first saved.
    pub pub_date: NaiveDateTime,
    /// Tags attached to the recipe, ordered by name.
    pub tags: Vec<Tag>,
    /// Ingredients with their quantities, in insertion order.
    pub ingredients: Vec<RecipeIngredient>,
}

/// Ingredient quantity as it appears inside a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipeIngredient {
    /// Identifier of the catalog ingredient.
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Quantity of a catalog ingredient submitted with a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NewIngredientAmount {
    pub ingredient_id: i32,
    pub amount: i32,
}

impl NewIngredientAmount {
    pub fn new(ingredient_id: i32, amount: i32) -> Self {
        Self {
            ingredient_id,
            amount,
        }
    }
}

/// Payload required to insert a new recipe together with its associations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub author_id: i32,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub tag_ids: Vec<i32>,
    pub ingredients: Vec<NewIngredientAmount>,
}

/// Patch applied to an existing recipe.
///
/// Tags and ingredients are always replaced wholesale; scalar fields are only
/// written when present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateRecipe {
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub tag_ids: Vec<i32>,
    pub ingredients: Vec<NewIngredientAmount>,
}

impl UpdateRecipe {
    /// Whether any scalar column is touched by this patch.
    pub fn has_field_changes(&self) -> bool {
        self.name.is_some()
            || self.image.is_some()
            || self.text.is_some()
            || self.cooking_time.is_some()
    }
}

/// Minimal recipe projection returned by relation toggles and subscriptions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortRecipe {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<&Recipe> for ShortRecipe {
    fn from(value: &Recipe) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            image: value.image.clone(),
            cooking_time: value.cooking_time,
        }
    }
}

/// Query definition used to list recipes.
#[derive(Debug, Clone, Default)]
pub struct RecipeListQuery {
    /// Exact author filter.
    pub author_id: Option<i32>,
    /// Tag slugs; a recipe matches when it carries any of them.
    pub tag_slugs: Vec<String>,
    /// Restrict to recipes favorited by this user.
    pub favorited_by: Option<i32>,
    /// Restrict to recipes in this user's shopping cart.
    pub in_shopping_cart_of: Option<i32>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl RecipeListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn author(mut self, author_id: i32) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn tags<I, S>(mut self, slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_slugs = slugs.into_iter().map(Into::into).collect();
        self
    }

    pub fn favorited_by(mut self, user_id: i32) -> Self {
        self.favorited_by = Some(user_id);
        self
    }

    pub fn in_shopping_cart_of(mut self, user_id: i32) -> Self {
        self.in_shopping_cart_of = Some(user_id);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }

    /// Return at most `limit` recipes from the first page.
    pub fn limit(self, limit: usize) -> Self {
        self.paginate(1, limit)
    }
}
