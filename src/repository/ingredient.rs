use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::ingredient::{
    Ingredient as DomainIngredient, IngredientListQuery, NewIngredient as DomainNewIngredient,
};
use crate::models::ingredient::{Ingredient as DbIngredient, NewIngredient as DbNewIngredient};
use crate::repository::{DieselRepository, IngredientReader, IngredientWriter};

impl IngredientReader for DieselRepository {
    fn get_ingredient_by_id(&self, id: i32) -> RepositoryResult<Option<DomainIngredient>> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;
        let ingredient = ingredients::table
            .filter(ingredients::id.eq(id))
            .first::<DbIngredient>(&mut conn)
            .optional()?;

        Ok(ingredient.map(Into::into))
    }

    fn get_ingredients_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<DomainIngredient>> {
        use crate::schema::ingredients;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let rows = ingredients::table
            .filter(ingredients::id.eq_any(ids))
            .load::<DbIngredient>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn list_ingredients(
        &self,
        query: IngredientListQuery,
    ) -> RepositoryResult<Vec<DomainIngredient>> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;

        // SQLite `LIKE` folds ASCII case only, so the prefix match runs on decoded rows.
        let rows = ingredients::table
            .order((ingredients::name.desc(), ingredients::id.asc()))
            .load::<DbIngredient>(&mut conn)?;

        Ok(rows
            .into_iter()
            .filter(|row| query.matches(&row.name))
            .map(Into::into)
            .collect())
    }
}

impl IngredientWriter for DieselRepository {
    fn create_ingredient(
        &self,
        new_ingredient: &DomainNewIngredient,
    ) -> RepositoryResult<DomainIngredient> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;
        let insertable = DbNewIngredient::from(new_ingredient);

        let created = diesel::insert_into(ingredients::table)
            .values(&insertable)
            .get_result::<DbIngredient>(&mut conn)?;

        Ok(created.into())
    }

    fn create_ingredients(
        &self,
        new_ingredients: &[DomainNewIngredient],
    ) -> RepositoryResult<usize> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            let insertables: Vec<DbNewIngredient> =
                new_ingredients.iter().map(DbNewIngredient::from).collect();

            let inserted = diesel::insert_into(ingredients::table)
                .values(&insertables)
                .execute(conn)?;

            Ok(inserted)
        })
    }

    fn delete_ingredient(&self, ingredient_id: i32) -> RepositoryResult<()> {
        use crate::schema::{ingredient_amounts, ingredients};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let amounts = ingredient_amounts::table
                .filter(ingredient_amounts::ingredient_id.eq(ingredient_id));
            diesel::delete(amounts).execute(conn)?;

            let deleted =
                diesel::delete(ingredients::table.filter(ingredients::id.eq(ingredient_id)))
                    .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}
