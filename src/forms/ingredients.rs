use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::ingredient::NewIngredient;
use crate::forms::sanitize_inline_text;

const FIELD_MAX_LEN: usize = 200;
const FIELD_MAX_LEN_VALIDATOR: u64 = FIELD_MAX_LEN as u64;

pub type IngredientFormResult<T> = Result<T, IngredientFormError>;

#[derive(Debug, Error)]
pub enum IngredientFormError {
    #[error("Некорректные данные ингредиента: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Название ингредиента не может быть пустым")]
    EmptyName,
    #[error("Не указана единица измерения")]
    EmptyUnit,
}

/// Payload submitted when creating a catalog ingredient.
#[derive(Debug, Deserialize, Validate)]
pub struct AddIngredientForm {
    #[validate(length(min = 1, max = FIELD_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(min = 1, max = FIELD_MAX_LEN_VALIDATOR))]
    pub measurement_unit: String,
}

impl AddIngredientForm {
    pub fn into_new_ingredient(self) -> IngredientFormResult<NewIngredient> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(IngredientFormError::EmptyName);
        }

        let unit = sanitize_inline_text(&self.measurement_unit);
        if unit.is_empty() {
            return Err(IngredientFormError::EmptyUnit);
        }

        Ok(NewIngredient::new(name, unit))
    }
}
