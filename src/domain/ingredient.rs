use serde::{Deserialize, Serialize};

/// Catalog ingredient with its unit of measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

/// Payload required to insert a new ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

impl NewIngredient {
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            measurement_unit: measurement_unit.into().trim().to_string(),
        }
    }
}

/// Query definition used to list ingredients.
#[derive(Debug, Clone, Default)]
pub struct IngredientListQuery {
    /// Case-insensitive prefix the ingredient name must start with.
    pub name_prefix: Option<String>,
}

impl IngredientListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the results to names starting with `prefix`, ignoring case.
    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = Some(prefix.into());
        self
    }

    /// Whether `name` satisfies the prefix filter.
    pub fn matches(&self, name: &str) -> bool {
        match &self.name_prefix {
            Some(prefix) => name.to_lowercase().starts_with(&prefix.to_lowercase()),
            None => true,
        }
    }
}
