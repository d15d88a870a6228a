use std::collections::{BTreeSet, HashMap};

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::{
        recipe::{
            NewIngredientAmount as DomainNewIngredientAmount, NewRecipe as DomainNewRecipe,
            Recipe as DomainRecipe, RecipeIngredient as DomainRecipeIngredient, RecipeListQuery,
            UpdateRecipe as DomainUpdateRecipe,
        },
        tag::Tag as DomainTag,
    },
    models::{
        recipe::{
            NewIngredientAmount as DbNewIngredientAmount, NewRecipe as DbNewRecipe,
            NewRecipeTag as DbNewRecipeTag, Recipe as DbRecipe, UpdateRecipe as DbUpdateRecipe,
        },
        tag::Tag as DbTag,
    },
    repository::{DieselRepository, RecipeReader, RecipeWriter, page_window},
    schema::recipes,
};

impl RecipeReader for DieselRepository {
    fn get_recipe_by_id(&self, id: i32) -> RepositoryResult<Option<DomainRecipe>> {
        let mut conn = self.conn()?;
        let recipe = recipes::table
            .filter(recipes::id.eq(id))
            .first::<DbRecipe>(&mut conn)
            .optional()?;

        match recipe {
            Some(db_recipe) => {
                let mut loaded = load_associations(&mut conn, vec![db_recipe])?;
                Ok(loaded.pop())
            }
            None => Ok(None),
        }
    }

    fn list_recipes(
        &self,
        query: RecipeListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainRecipe>)> {
        let mut conn = self.conn()?;

        let restricted_ids = resolve_restricted_ids(&mut conn, &query)?;
        if matches!(&restricted_ids, Some(ids) if ids.is_empty()) {
            return Ok((0, Vec::new()));
        }

        let total = filtered_recipes(query.author_id, restricted_ids.as_deref())
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered_recipes(query.author_id, restricted_ids.as_deref())
            .order((recipes::pub_date.desc(), recipes::id.desc()));

        if let Some(pagination) = &query.pagination {
            let Some((offset, limit)) = page_window(pagination) else {
                return Ok((total, Vec::new()));
            };
            items = items.offset(offset).limit(limit);
        }

        let db_recipes = items.load::<DbRecipe>(&mut conn)?;
        if db_recipes.is_empty() {
            return Ok((total, Vec::new()));
        }

        let recipes = load_associations(&mut conn, db_recipes)?;

        Ok((total, recipes))
    }
}

impl RecipeWriter for DieselRepository {
    fn create_recipe(&self, new_recipe: &DomainNewRecipe) -> RepositoryResult<DomainRecipe> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainRecipe, RepositoryError, _>(|conn| {
            let db_new = DbNewRecipe::from(new_recipe);

            let created = diesel::insert_into(recipes::table)
                .values(&db_new)
                .get_result::<DbRecipe>(conn)?;

            replace_associations(
                conn,
                created.id,
                &new_recipe.tag_ids,
                &new_recipe.ingredients,
            )?;

            load_single(conn, created)
        })
    }

    fn update_recipe(
        &self,
        recipe_id: i32,
        updates: &DomainUpdateRecipe,
    ) -> RepositoryResult<DomainRecipe> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainRecipe, RepositoryError, _>(|conn| {
            let target = recipes::table.filter(recipes::id.eq(recipe_id));

            let recipe = if updates.has_field_changes() {
                diesel::update(target)
                    .set(&DbUpdateRecipe::from(updates))
                    .get_result::<DbRecipe>(conn)
                    .optional()?
            } else {
                target.first::<DbRecipe>(conn).optional()?
            };

            let Some(recipe) = recipe else {
                return Err(RepositoryError::NotFound);
            };

            replace_associations(conn, recipe.id, &updates.tag_ids, &updates.ingredients)?;

            load_single(conn, recipe)
        })
    }

    fn delete_recipe(&self, recipe_id: i32) -> RepositoryResult<()> {
        use crate::schema::{favorites, ingredient_amounts, recipe_tags, shopping_lists};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe_id)))
                .execute(conn)?;
            diesel::delete(
                ingredient_amounts::table.filter(ingredient_amounts::recipe_id.eq(recipe_id)),
            )
            .execute(conn)?;
            diesel::delete(favorites::table.filter(favorites::recipe_id.eq(recipe_id)))
                .execute(conn)?;
            diesel::delete(shopping_lists::table.filter(shopping_lists::recipe_id.eq(recipe_id)))
                .execute(conn)?;

            let deleted =
                diesel::delete(recipes::table.filter(recipes::id.eq(recipe_id))).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}

fn filtered_recipes(
    author_id: Option<i32>,
    restricted_ids: Option<&[i32]>,
) -> recipes::BoxedQuery<'static, Sqlite> {
    let mut query = recipes::table.into_boxed::<Sqlite>();

    if let Some(author_id) = author_id {
        query = query.filter(recipes::author_id.eq(author_id));
    }

    if let Some(ids) = restricted_ids {
        query = query.filter(recipes::id.eq_any(ids.to_vec()));
    }

    query
}

/// Intersect the id sets implied by tag and relation filters.
///
/// Returns `None` when no such filter is active.
fn resolve_restricted_ids(
    conn: &mut SqliteConnection,
    query: &RecipeListQuery,
) -> RepositoryResult<Option<Vec<i32>>> {
    use crate::schema::{favorites, recipe_tags, shopping_lists, tags};

    let mut restriction: Option<BTreeSet<i32>> = None;
    let mut intersect = |ids: Vec<i32>| {
        let ids: BTreeSet<i32> = ids.into_iter().collect();
        restriction = Some(match restriction.take() {
            Some(current) => current.intersection(&ids).copied().collect(),
            None => ids,
        });
    };

    if !query.tag_slugs.is_empty() {
        let tag_ids = tags::table
            .filter(tags::slug.eq_any(&query.tag_slugs))
            .select(tags::id)
            .load::<i32>(conn)?;

        let recipe_ids = if tag_ids.is_empty() {
            Vec::new()
        } else {
            recipe_tags::table
                .filter(recipe_tags::tag_id.eq_any(&tag_ids))
                .select(recipe_tags::recipe_id)
                .distinct()
                .load::<i32>(conn)?
        };
        intersect(recipe_ids);
    }

    if let Some(user_id) = query.favorited_by {
        let recipe_ids = favorites::table
            .filter(favorites::user_id.eq(user_id))
            .select(favorites::recipe_id)
            .load::<i32>(conn)?;
        intersect(recipe_ids);
    }

    if let Some(user_id) = query.in_shopping_cart_of {
        let recipe_ids = shopping_lists::table
            .filter(shopping_lists::user_id.eq(user_id))
            .select(shopping_lists::recipe_id)
            .load::<i32>(conn)?;
        intersect(recipe_ids);
    }

    Ok(restriction.map(|ids| ids.into_iter().collect()))
}

/// Clear and re-create tag links and ingredient amounts of a recipe.
///
/// Must run inside the caller's transaction.
fn replace_associations(
    conn: &mut SqliteConnection,
    recipe_id: i32,
    tag_ids: &[i32],
    ingredients: &[DomainNewIngredientAmount],
) -> RepositoryResult<()> {
    use crate::schema::{ingredient_amounts, recipe_tags};

    diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe_id)))
        .execute(conn)?;
    diesel::delete(ingredient_amounts::table.filter(ingredient_amounts::recipe_id.eq(recipe_id)))
        .execute(conn)?;

    let unique_tags: BTreeSet<i32> = tag_ids.iter().copied().collect();
    if !unique_tags.is_empty() {
        let payload: Vec<DbNewRecipeTag> = unique_tags
            .into_iter()
            .map(|tag_id| DbNewRecipeTag { recipe_id, tag_id })
            .collect();

        diesel::insert_into(recipe_tags::table)
            .values(&payload)
            .execute(conn)?;
    }

    if !ingredients.is_empty() {
        let payload: Vec<DbNewIngredientAmount> = ingredients
            .iter()
            .map(|item| DbNewIngredientAmount::from_domain(recipe_id, item))
            .collect();

        diesel::insert_into(ingredient_amounts::table)
            .values(&payload)
            .execute(conn)?;
    }

    Ok(())
}

fn load_single(conn: &mut SqliteConnection, recipe: DbRecipe) -> RepositoryResult<DomainRecipe> {
    load_associations(conn, vec![recipe])?
        .pop()
        .ok_or(RepositoryError::NotFound)
}

fn load_associations(
    conn: &mut SqliteConnection,
    db_recipes: Vec<DbRecipe>,
) -> RepositoryResult<Vec<DomainRecipe>> {
    use crate::schema::{ingredient_amounts, ingredients, recipe_tags, tags};

    let recipe_ids: Vec<i32> = db_recipes.iter().map(|recipe| recipe.id).collect();

    let tag_rows = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq_any(&recipe_ids))
        .order(tags::name.asc())
        .select((recipe_tags::recipe_id, DbTag::as_select()))
        .load::<(i32, DbTag)>(conn)?;

    let mut tags_by_recipe: HashMap<i32, Vec<DomainTag>> = HashMap::new();
    for (recipe_id, tag) in tag_rows {
        tags_by_recipe.entry(recipe_id).or_default().push(tag.into());
    }

    let ingredient_rows = ingredient_amounts::table
        .inner_join(ingredients::table)
        .filter(ingredient_amounts::recipe_id.eq_any(&recipe_ids))
        .order(ingredient_amounts::id.asc())
        .select((
            ingredient_amounts::recipe_id,
            ingredients::id,
            ingredients::name,
            ingredients::measurement_unit,
            ingredient_amounts::amount,
        ))
        .load::<(i32, i32, String, String, i32)>(conn)?;

    let mut ingredients_by_recipe: HashMap<i32, Vec<DomainRecipeIngredient>> = HashMap::new();
    for (recipe_id, id, name, measurement_unit, amount) in ingredient_rows {
        ingredients_by_recipe
            .entry(recipe_id)
            .or_default()
            .push(DomainRecipeIngredient {
                id,
                name,
                measurement_unit,
                amount,
            });
    }

    let recipes = db_recipes
        .into_iter()
        .map(|recipe| {
            let recipe_id = recipe.id;
            let tags = tags_by_recipe.remove(&recipe_id).unwrap_or_default();
            let ingredients = ingredients_by_recipe.remove(&recipe_id).unwrap_or_default();
            DomainRecipe::from((recipe, tags, ingredients))
        })
        .collect();

    Ok(recipes)
}
