use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::recipe::{NewIngredientAmount, NewRecipe, UpdateRecipe};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

/// Maximum allowed length for a recipe name.
const NAME_MAX_LEN: usize = 200;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Shortest cooking time accepted, in minutes.
pub const MIN_COOKING_TIME: i32 = 2;

lazy_static! {
    static ref IMAGE_DATA_URI_REGEX: Regex =
        Regex::new(r"^data:image/(png|jpeg|jpg|gif|webp);base64,[A-Za-z0-9+/]+={0,2}$")
            .expect("valid image regex");
}

pub type RecipeFormResult<T> = Result<T, RecipeFormError>;

/// Errors raised while validating recipe payloads.
///
/// The `Display` text of every variant is shown to the API client as is.
#[derive(Debug, Error)]
pub enum RecipeFormError {
    #[error("Некорректные данные рецепта: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Название рецепта не может быть пустым")]
    EmptyName,
    #[error("Описание рецепта не может быть пустым")]
    EmptyText,
    #[error("Изображение должно быть передано в формате base64")]
    InvalidImage,
    #[error("Не выбраны тэги")]
    NoTags,
    #[error("Указанного тэга не существует")]
    UnknownTag,
    #[error("Не выбраны ингредиенты")]
    NoIngredients,
    #[error("Вы уже использовали данный ингредиент")]
    DuplicateIngredient,
    #[error("Укажите верное количество ингредиента")]
    InvalidAmount,
    #[error("Указанного ингредиента не существует")]
    UnknownIngredient,
    #[error("Слишком маленькое время приготовления")]
    CookingTimeTooShort,
}

/// One `{id, amount}` entry of the `ingredients` array.
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientAmountInput {
    pub id: i32,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: i64,
}

/// Payload submitted when publishing a recipe.
#[derive(Debug, Deserialize, Validate)]
pub struct RecipeForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    pub image: String,
    #[validate(length(min = 1))]
    pub text: String,
    pub cooking_time: i32,
    #[serde(default)]
    pub tags: Vec<i32>,
    #[serde(default)]
    pub ingredients: Vec<IngredientAmountInput>,
}

impl RecipeForm {
    /// Validate the payload and build a recipe owned by `author_id`.
    pub fn into_new_recipe(self, author_id: i32) -> RecipeFormResult<NewRecipe> {
        self.validate()?;

        let name = sanitize_name(&self.name)?;
        let text = sanitize_text(&self.text)?;
        let image = check_image(&self.image)?;
        check_cooking_time(self.cooking_time)?;
        let tag_ids = collect_tags(&self.tags)?;
        let ingredients = collect_ingredients(&self.ingredients)?;

        Ok(NewRecipe {
            author_id,
            name,
            image,
            text,
            cooking_time: self.cooking_time,
            tag_ids,
            ingredients,
        })
    }
}

/// Payload submitted when editing a recipe.
///
/// `tags` and `ingredients` replace the stored sets; other fields are kept
/// when omitted.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRecipeForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    pub image: Option<String>,
    #[validate(length(min = 1))]
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    #[serde(default)]
    pub tags: Vec<i32>,
    #[serde(default)]
    pub ingredients: Vec<IngredientAmountInput>,
}

impl UpdateRecipeForm {
    pub fn into_update_recipe(self) -> RecipeFormResult<UpdateRecipe> {
        self.validate()?;

        let name = self.name.as_deref().map(sanitize_name).transpose()?;
        let text = self.text.as_deref().map(sanitize_text).transpose()?;
        let image = self.image.as_deref().map(check_image).transpose()?;
        if let Some(cooking_time) = self.cooking_time {
            check_cooking_time(cooking_time)?;
        }
        let tag_ids = collect_tags(&self.tags)?;
        let ingredients = collect_ingredients(&self.ingredients)?;

        Ok(UpdateRecipe {
            name,
            image,
            text,
            cooking_time: self.cooking_time,
            tag_ids,
            ingredients,
        })
    }
}

fn sanitize_name(value: &str) -> RecipeFormResult<String> {
    let name = sanitize_inline_text(value);
    if name.is_empty() {
        return Err(RecipeFormError::EmptyName);
    }
    Ok(name)
}

fn sanitize_text(value: &str) -> RecipeFormResult<String> {
    let text = sanitize_multiline_text(value);
    if text.is_empty() {
        return Err(RecipeFormError::EmptyText);
    }
    Ok(text)
}

fn check_image(value: &str) -> RecipeFormResult<String> {
    let image = value.trim();
    if !IMAGE_DATA_URI_REGEX.is_match(image) {
        return Err(RecipeFormError::InvalidImage);
    }
    Ok(image.to_string())
}

fn check_cooking_time(cooking_time: i32) -> RecipeFormResult<()> {
    if cooking_time < MIN_COOKING_TIME {
        return Err(RecipeFormError::CookingTimeTooShort);
    }
    Ok(())
}

/// Non-empty tag ids with repeats collapsed, first occurrence wins.
fn collect_tags(tags: &[i32]) -> RecipeFormResult<Vec<i32>> {
    if tags.is_empty() {
        return Err(RecipeFormError::NoTags);
    }

    let mut seen = HashSet::new();
    Ok(tags.iter().copied().filter(|id| seen.insert(*id)).collect())
}

fn collect_ingredients(
    items: &[IngredientAmountInput],
) -> RecipeFormResult<Vec<NewIngredientAmount>> {
    if items.is_empty() {
        return Err(RecipeFormError::NoIngredients);
    }

    let mut seen = HashSet::new();
    let mut ingredients = Vec::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id) {
            return Err(RecipeFormError::DuplicateIngredient);
        }
        let amount = i32::try_from(item.amount)
            .ok()
            .filter(|amount| *amount >= 1)
            .ok_or(RecipeFormError::InvalidAmount)?;
        ingredients.push(NewIngredientAmount::new(item.id, amount));
    }

    Ok(ingredients)
}

/// Accept either a JSON integer or a string holding one.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(i64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(value) => Ok(value),
        Amount::Text(value) => value
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom("Укажите верное количество ингредиента")),
    }
}
