use serde::{Deserialize, Serialize};

/// User-to-recipe join entities that share the add/remove lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeRelation {
    Favorite,
    ShoppingCart,
}

impl RecipeRelation {
    /// Message reported when the pair already exists.
    pub fn duplicate_message(self) -> &'static str {
        match self {
            RecipeRelation::Favorite => "Рецепт уже в избранном",
            RecipeRelation::ShoppingCart => "Рецепт уже в корзине",
        }
    }

    /// Message reported when the pair does not exist.
    pub fn missing_message(self) -> &'static str {
        match self {
            RecipeRelation::Favorite => "Рецепта нет в избранном",
            RecipeRelation::ShoppingCart => "Рецепта нет в корзине",
        }
    }
}

/// Requested change to a [`RecipeRelation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Add,
    Remove,
}
