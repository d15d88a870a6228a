use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::recipe::{
    NewIngredientAmount as DomainNewIngredientAmount, NewRecipe as DomainNewRecipe,
    Recipe as DomainRecipe, RecipeIngredient as DomainRecipeIngredient,
    UpdateRecipe as DomainUpdateRecipe,
};
use crate::domain::tag::Tag as DomainTag;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(
    table_name = crate::schema::recipes,
    belongs_to(super::user::User, foreign_key = author_id)
)]
pub struct Recipe {
    pub id: i32,
    pub author_id: i32,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub pub_date: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub author_id: i32,
    pub name: &'a str,
    pub image: &'a str,
    pub text: &'a str,
    pub cooking_time: i32,
}

/// Changeset that leaves `author_id` and `pub_date` untouched.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
pub struct UpdateRecipe<'a> {
    pub name: Option<&'a str>,
    pub image: Option<&'a str>,
    pub text: Option<&'a str>,
    pub cooking_time: Option<i32>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(
    table_name = crate::schema::recipe_tags,
    belongs_to(Recipe, foreign_key = recipe_id),
    belongs_to(super::tag::Tag, foreign_key = tag_id)
)]
pub struct RecipeTag {
    pub id: i32,
    pub recipe_id: i32,
    pub tag_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_tags)]
pub struct NewRecipeTag {
    pub recipe_id: i32,
    pub tag_id: i32,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(
    table_name = crate::schema::ingredient_amounts,
    belongs_to(Recipe, foreign_key = recipe_id),
    belongs_to(super::ingredient::Ingredient, foreign_key = ingredient_id)
)]
pub struct IngredientAmount {
    pub id: i32,
    pub ingredient_id: i32,
    pub recipe_id: i32,
    pub amount: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredient_amounts)]
pub struct NewIngredientAmount {
    pub ingredient_id: i32,
    pub recipe_id: i32,
    pub amount: i32,
}

impl NewIngredientAmount {
    pub fn from_domain(recipe_id: i32, value: &DomainNewIngredientAmount) -> Self {
        Self {
            ingredient_id: value.ingredient_id,
            recipe_id,
            amount: value.amount,
        }
    }
}

impl From<(Recipe, Vec<DomainTag>, Vec<DomainRecipeIngredient>)> for DomainRecipe {
    fn from(value: (Recipe, Vec<DomainTag>, Vec<DomainRecipeIngredient>)) -> Self {
        let (recipe, tags, ingredients) = value;
        Self {
            id: recipe.id,
            author_id: recipe.author_id,
            name: recipe.name,
            image: recipe.image,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
            pub_date: recipe.pub_date,
            tags,
            ingredients,
        }
    }
}

impl<'a> From<&'a DomainNewRecipe> for NewRecipe<'a> {
    fn from(value: &'a DomainNewRecipe) -> Self {
        Self {
            author_id: value.author_id,
            name: value.name.as_str(),
            image: value.image.as_str(),
            text: value.text.as_str(),
            cooking_time: value.cooking_time,
        }
    }
}

impl<'a> From<&'a DomainUpdateRecipe> for UpdateRecipe<'a> {
    fn from(value: &'a DomainUpdateRecipe) -> Self {
        Self {
            name: value.name.as_deref(),
            image: value.image.as_deref(),
            text: value.text.as_deref(),
            cooking_time: value.cooking_time,
        }
    }
}
