use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::{relation::RecipeRelation, shopping_list::CartIngredient},
    models::relation::{NewFavorite, NewShoppingListEntry},
    repository::{DieselRepository, RecipeRelationReader, RecipeRelationWriter, ShoppingCartReader},
};

impl RecipeRelationReader for DieselRepository {
    fn relation_exists(
        &self,
        relation: RecipeRelation,
        user_id: i32,
        recipe_id: i32,
    ) -> RepositoryResult<bool> {
        use crate::schema::{favorites, shopping_lists};

        let mut conn = self.conn()?;

        let count = match relation {
            RecipeRelation::Favorite => favorites::table
                .filter(favorites::user_id.eq(user_id))
                .filter(favorites::recipe_id.eq(recipe_id))
                .count()
                .get_result::<i64>(&mut conn)?,
            RecipeRelation::ShoppingCart => shopping_lists::table
                .filter(shopping_lists::user_id.eq(user_id))
                .filter(shopping_lists::recipe_id.eq(recipe_id))
                .count()
                .get_result::<i64>(&mut conn)?,
        };

        Ok(count > 0)
    }

    fn related_recipe_ids(
        &self,
        relation: RecipeRelation,
        user_id: i32,
        recipe_ids: &[i32],
    ) -> RepositoryResult<Vec<i32>> {
        use crate::schema::{favorites, shopping_lists};

        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;

        let ids = match relation {
            RecipeRelation::Favorite => favorites::table
                .filter(favorites::user_id.eq(user_id))
                .filter(favorites::recipe_id.eq_any(recipe_ids))
                .select(favorites::recipe_id)
                .load::<i32>(&mut conn)?,
            RecipeRelation::ShoppingCart => shopping_lists::table
                .filter(shopping_lists::user_id.eq(user_id))
                .filter(shopping_lists::recipe_id.eq_any(recipe_ids))
                .select(shopping_lists::recipe_id)
                .load::<i32>(&mut conn)?,
        };

        Ok(ids)
    }
}

impl RecipeRelationWriter for DieselRepository {
    fn add_relation(
        &self,
        relation: RecipeRelation,
        user_id: i32,
        recipe_id: i32,
    ) -> RepositoryResult<()> {
        use crate::schema::{favorites, shopping_lists};

        let mut conn = self.conn()?;

        match relation {
            RecipeRelation::Favorite => {
                diesel::insert_into(favorites::table)
                    .values(&NewFavorite { user_id, recipe_id })
                    .execute(&mut conn)?;
            }
            RecipeRelation::ShoppingCart => {
                diesel::insert_into(shopping_lists::table)
                    .values(&NewShoppingListEntry { user_id, recipe_id })
                    .execute(&mut conn)?;
            }
        }

        Ok(())
    }

    fn remove_relation(
        &self,
        relation: RecipeRelation,
        user_id: i32,
        recipe_id: i32,
    ) -> RepositoryResult<()> {
        use crate::schema::{favorites, shopping_lists};

        let mut conn = self.conn()?;

        let deleted = match relation {
            RecipeRelation::Favorite => diesel::delete(
                favorites::table
                    .filter(favorites::user_id.eq(user_id))
                    .filter(favorites::recipe_id.eq(recipe_id)),
            )
            .execute(&mut conn)?,
            RecipeRelation::ShoppingCart => diesel::delete(
                shopping_lists::table
                    .filter(shopping_lists::user_id.eq(user_id))
                    .filter(shopping_lists::recipe_id.eq(recipe_id)),
            )
            .execute(&mut conn)?,
        };

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

impl ShoppingCartReader for DieselRepository {
    fn list_cart_ingredients(&self, user_id: i32) -> RepositoryResult<Vec<CartIngredient>> {
        use crate::schema::{ingredient_amounts, ingredients, shopping_lists};

        let mut conn = self.conn()?;

        let recipe_ids = shopping_lists::table
            .filter(shopping_lists::user_id.eq(user_id))
            .select(shopping_lists::recipe_id)
            .load::<i32>(&mut conn)?;

        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = ingredient_amounts::table
            .inner_join(ingredients::table)
            .filter(ingredient_amounts::recipe_id.eq_any(&recipe_ids))
            .order((ingredients::name.asc(), ingredient_amounts::id.asc()))
            .select((
                ingredients::name,
                ingredients::measurement_unit,
                ingredient_amounts::amount,
            ))
            .load::<(String, String, i32)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(name, measurement_unit, amount)| {
                CartIngredient::new(name, measurement_unit, amount)
            })
            .collect())
    }
}
