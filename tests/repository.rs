use std::collections::BTreeSet;

use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryError;
use pushkind_recipes::domain::{
    ingredient::{Ingredient, IngredientListQuery, NewIngredient},
    recipe::{NewIngredientAmount, NewRecipe, RecipeListQuery, UpdateRecipe},
    relation::RecipeRelation,
    tag::{NewTag, Tag},
    user::{NewUser, User},
};
use pushkind_recipes::repository::{
    DieselRepository, IngredientReader, IngredientWriter, RecipeReader, RecipeRelationReader,
    RecipeRelationWriter, RecipeWriter, ShoppingCartReader, TagReader, TagWriter, UserWriter,
};
use pushkind_recipes::schema::{favorites, ingredient_amounts, recipe_tags, shopping_lists};

mod common;

const IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

struct Catalog {
    author: User,
    breakfast: Tag,
    lunch: Tag,
    flour: Ingredient,
    milk: Ingredient,
    eggs: Ingredient,
}

fn seed_catalog(repo: &DieselRepository) -> Catalog {
    let author = repo
        .create_user(&NewUser::new("chef@example.com", "chef", "Anna", "Chef"))
        .expect("create user");
    let breakfast = repo
        .create_tag(
            &NewTag::new("Завтрак")
                .with_color("#e26c2d")
                .with_slug("breakfast"),
        )
        .expect("create tag");
    let lunch = repo
        .create_tag(&NewTag::new("Обед").with_color("#49b64e").with_slug("lunch"))
        .expect("create tag");
    let flour = repo
        .create_ingredient(&NewIngredient::new("Flour", "g"))
        .expect("create ingredient");
    let milk = repo
        .create_ingredient(&NewIngredient::new("Milk", "ml"))
        .expect("create ingredient");
    let eggs = repo
        .create_ingredient(&NewIngredient::new("Eggs", "pcs"))
        .expect("create ingredient");

    Catalog {
        author,
        breakfast,
        lunch,
        flour,
        milk,
        eggs,
    }
}

fn new_recipe(author_id: i32, name: &str, tag_ids: Vec<i32>, items: &[(i32, i32)]) -> NewRecipe {
    NewRecipe {
        author_id,
        name: name.to_string(),
        image: IMAGE.to_string(),
        text: "Mix and bake.".to_string(),
        cooking_time: 25,
        tag_ids,
        ingredients: items
            .iter()
            .map(|(id, amount)| NewIngredientAmount::new(*id, *amount))
            .collect(),
    }
}

#[test]
fn recipe_round_trip_returns_submitted_sets() {
    let test_db = common::TestDb::new("test_recipe_round_trip.db");
    let repo = test_db.repo();
    let catalog = seed_catalog(&repo);

    let created = repo
        .create_recipe(&new_recipe(
            catalog.author.id,
            "Pancakes",
            vec![catalog.lunch.id, catalog.breakfast.id],
            &[(catalog.milk.id, 300), (catalog.flour.id, 200)],
        ))
        .expect("create recipe");

    let loaded = repo
        .get_recipe_by_id(created.id)
        .expect("load recipe")
        .expect("recipe exists");

    let tag_ids: BTreeSet<i32> = loaded.tags.iter().map(|tag| tag.id).collect();
    assert_eq!(
        tag_ids,
        BTreeSet::from([catalog.breakfast.id, catalog.lunch.id])
    );

    let ingredients: BTreeSet<(i32, i32)> = loaded
        .ingredients
        .iter()
        .map(|item| (item.id, item.amount))
        .collect();
    assert_eq!(
        ingredients,
        BTreeSet::from([(catalog.milk.id, 300), (catalog.flour.id, 200)])
    );
    assert_eq!(loaded.author_id, catalog.author.id);
    assert_eq!(loaded.pub_date, created.pub_date);
}

#[test]
fn update_replaces_associations_and_keeps_pub_date() {
    let test_db = common::TestDb::new("test_recipe_update_replaces.db");
    let repo = test_db.repo();
    let catalog = seed_catalog(&repo);

    let created = repo
        .create_recipe(&new_recipe(
            catalog.author.id,
            "Omelette",
            vec![catalog.breakfast.id],
            &[(catalog.eggs.id, 3), (catalog.milk.id, 50)],
        ))
        .expect("create recipe");

    let updated = repo
        .update_recipe(
            created.id,
            &UpdateRecipe {
                name: Some("Big omelette".to_string()),
                tag_ids: vec![catalog.lunch.id],
                ingredients: vec![NewIngredientAmount::new(catalog.eggs.id, 6)],
                ..UpdateRecipe::default()
            },
        )
        .expect("update recipe");

    assert_eq!(updated.name, "Big omelette");
    assert_eq!(updated.text, created.text);
    assert_eq!(updated.pub_date, created.pub_date);
    assert_eq!(updated.tags.len(), 1);
    assert_eq!(updated.tags[0].id, catalog.lunch.id);
    assert_eq!(updated.ingredients.len(), 1);
    assert_eq!(updated.ingredients[0].amount, 6);

    let err = repo
        .update_recipe(
            created.id + 100,
            &UpdateRecipe {
                tag_ids: vec![catalog.lunch.id],
                ingredients: vec![NewIngredientAmount::new(catalog.eggs.id, 1)],
                ..UpdateRecipe::default()
            },
        )
        .expect_err("missing recipe");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn failed_update_rolls_back_associations() {
    let test_db = common::TestDb::new("test_recipe_update_rollback.db");
    let repo = test_db.repo();
    let catalog = seed_catalog(&repo);

    let created = repo
        .create_recipe(&new_recipe(
            catalog.author.id,
            "Bread",
            vec![catalog.breakfast.id],
            &[(catalog.flour.id, 500)],
        ))
        .expect("create recipe");

    // A zero amount violates the CHECK constraint after the old rows were cleared.
    let result = repo.update_recipe(
        created.id,
        &UpdateRecipe {
            tag_ids: vec![catalog.lunch.id],
            ingredients: vec![NewIngredientAmount::new(catalog.flour.id, 0)],
            ..UpdateRecipe::default()
        },
    );
    assert!(result.is_err());

    let loaded = repo
        .get_recipe_by_id(created.id)
        .expect("load recipe")
        .expect("recipe exists");
    assert_eq!(loaded.ingredients.len(), 1);
    assert_eq!(loaded.ingredients[0].amount, 500);
    assert_eq!(loaded.tags[0].id, catalog.breakfast.id);
}

#[test]
fn list_recipes_filters_by_author_tags_and_relations() {
    let test_db = common::TestDb::new("test_recipe_list_filters.db");
    let repo = test_db.repo();
    let catalog = seed_catalog(&repo);
    let other = repo
        .create_user(&NewUser::new("other@example.com", "other", "", ""))
        .expect("create user");

    let porridge = repo
        .create_recipe(&new_recipe(
            catalog.author.id,
            "Porridge",
            vec![catalog.breakfast.id],
            &[(catalog.milk.id, 200)],
        ))
        .expect("create recipe");
    let soup = repo
        .create_recipe(&new_recipe(
            other.id,
            "Soup",
            vec![catalog.lunch.id],
            &[(catalog.eggs.id, 1)],
        ))
        .expect("create recipe");

    let (total, all) = repo
        .list_recipes(RecipeListQuery::new().paginate(1, 10))
        .expect("list recipes");
    assert_eq!(total, 2);
    assert_eq!(all[0].id, soup.id);

    let (total, by_author) = repo
        .list_recipes(RecipeListQuery::new().author(other.id))
        .expect("list recipes");
    assert_eq!(total, 1);
    assert_eq!(by_author[0].id, soup.id);

    let (total, by_tags) = repo
        .list_recipes(RecipeListQuery::new().tags(["breakfast", "missing"]))
        .expect("list recipes");
    assert_eq!(total, 1);
    assert_eq!(by_tags[0].id, porridge.id);

    let (total, _) = repo
        .list_recipes(RecipeListQuery::new().tags(["missing"]))
        .expect("list recipes");
    assert_eq!(total, 0);

    repo.add_relation(RecipeRelation::Favorite, other.id, porridge.id)
        .expect("favorite");
    let (total, favorites) = repo
        .list_recipes(RecipeListQuery::new().favorited_by(other.id))
        .expect("list recipes");
    assert_eq!(total, 1);
    assert_eq!(favorites[0].id, porridge.id);

    let (total, _) = repo
        .list_recipes(RecipeListQuery::new().in_shopping_cart_of(other.id))
        .expect("list recipes");
    assert_eq!(total, 0);

    let (total, page) = repo
        .list_recipes(RecipeListQuery::new().limit(1))
        .expect("list recipes");
    assert_eq!(total, 2);
    assert_eq!(page.len(), 1);
}

#[test]
fn favorite_pair_is_unique() {
    let test_db = common::TestDb::new("test_favorite_pair_unique.db");
    let repo = test_db.repo();
    let catalog = seed_catalog(&repo);

    let recipe = repo
        .create_recipe(&new_recipe(
            catalog.author.id,
            "Toast",
            vec![catalog.breakfast.id],
            &[(catalog.flour.id, 100)],
        ))
        .expect("create recipe");

    repo.add_relation(RecipeRelation::Favorite, catalog.author.id, recipe.id)
        .expect("first favorite");
    assert!(
        repo.add_relation(RecipeRelation::Favorite, catalog.author.id, recipe.id)
            .is_err()
    );

    let mut conn = test_db.pool().get().expect("connection");
    let rows = favorites::table
        .filter(favorites::user_id.eq(catalog.author.id))
        .count()
        .get_result::<i64>(&mut conn)
        .expect("count favorites");
    assert_eq!(rows, 1);

    assert!(
        repo.relation_exists(RecipeRelation::Favorite, catalog.author.id, recipe.id)
            .expect("exists")
    );
    repo.remove_relation(RecipeRelation::Favorite, catalog.author.id, recipe.id)
        .expect("remove favorite");
    let err = repo
        .remove_relation(RecipeRelation::Favorite, catalog.author.id, recipe.id)
        .expect_err("already removed");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn deleting_recipe_cascades_to_join_rows() {
    let test_db = common::TestDb::new("test_recipe_delete_cascades.db");
    let repo = test_db.repo();
    let catalog = seed_catalog(&repo);

    let recipe = repo
        .create_recipe(&new_recipe(
            catalog.author.id,
            "Crepes",
            vec![catalog.breakfast.id, catalog.lunch.id],
            &[(catalog.flour.id, 150), (catalog.milk.id, 400)],
        ))
        .expect("create recipe");
    repo.add_relation(RecipeRelation::Favorite, catalog.author.id, recipe.id)
        .expect("favorite");
    repo.add_relation(RecipeRelation::ShoppingCart, catalog.author.id, recipe.id)
        .expect("cart");

    repo.delete_recipe(recipe.id).expect("delete recipe");

    assert!(repo.get_recipe_by_id(recipe.id).expect("load").is_none());
    assert!(
        repo.list_cart_ingredients(catalog.author.id)
            .expect("cart")
            .is_empty()
    );

    let mut conn = test_db.pool().get().expect("connection");
    let amounts = ingredient_amounts::table
        .filter(ingredient_amounts::recipe_id.eq(recipe.id))
        .count()
        .get_result::<i64>(&mut conn)
        .expect("count amounts");
    let tags = recipe_tags::table
        .filter(recipe_tags::recipe_id.eq(recipe.id))
        .count()
        .get_result::<i64>(&mut conn)
        .expect("count tags");
    let favorites = favorites::table
        .filter(favorites::recipe_id.eq(recipe.id))
        .count()
        .get_result::<i64>(&mut conn)
        .expect("count favorites");
    let carts = shopping_lists::table
        .filter(shopping_lists::recipe_id.eq(recipe.id))
        .count()
        .get_result::<i64>(&mut conn)
        .expect("count carts");
    assert_eq!((amounts, tags, favorites, carts), (0, 0, 0, 0));

    let err = repo.delete_recipe(recipe.id).expect_err("already deleted");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn ingredient_prefix_filter_is_case_insensitive() {
    let test_db = common::TestDb::new("test_ingredient_prefix_filter.db");
    let repo = test_db.repo();

    let created = repo
        .create_ingredients(&[
            NewIngredient::new("Milk", "ml"),
            NewIngredient::new("Mint", "g"),
            NewIngredient::new("Almond", "g"),
            NewIngredient::new("молоко", "мл"),
        ])
        .expect("create ingredients");
    assert_eq!(created, 4);

    let names: BTreeSet<String> = repo
        .list_ingredients(IngredientListQuery::new().name_prefix("mi"))
        .expect("list ingredients")
        .into_iter()
        .map(|ingredient| ingredient.name)
        .collect();
    assert_eq!(
        names,
        BTreeSet::from(["Milk".to_string(), "Mint".to_string()])
    );

    let cyrillic = repo
        .list_ingredients(IngredientListQuery::new().name_prefix("МОЛ"))
        .expect("list ingredients");
    assert_eq!(cyrillic.len(), 1);

    let all = repo
        .list_ingredients(IngredientListQuery::new())
        .expect("list ingredients");
    assert_eq!(all.len(), 4);
}

#[test]
fn deleting_tag_detaches_it_from_recipes() {
    let test_db = common::TestDb::new("test_tag_delete_detaches.db");
    let repo = test_db.repo();
    let catalog = seed_catalog(&repo);

    let recipe = repo
        .create_recipe(&new_recipe(
            catalog.author.id,
            "Salad",
            vec![catalog.breakfast.id, catalog.lunch.id],
            &[(catalog.eggs.id, 2)],
        ))
        .expect("create recipe");

    repo.delete_tag(catalog.lunch.id).expect("delete tag");

    let loaded = repo
        .get_recipe_by_id(recipe.id)
        .expect("load recipe")
        .expect("recipe exists");
    assert_eq!(loaded.tags.len(), 1);
    assert!(repo.get_tag_by_id(catalog.lunch.id).expect("load").is_none());

    let err = repo.delete_tag(catalog.lunch.id).expect_err("already deleted");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn duplicate_tag_slug_is_rejected() {
    let test_db = common::TestDb::new("test_duplicate_tag_slug.db");
    let repo = test_db.repo();

    repo.create_tag(&NewTag::new("Breakfast").with_slug("breakfast"))
        .expect("create tag");
    assert!(
        repo.create_tag(&NewTag::new("Morning").with_slug("breakfast"))
            .is_err()
    );
    assert_eq!(repo.list_tags().expect("list tags").len(), 1);
}

#[test]
fn page_far_beyond_the_end_is_empty() {
    let test_db = common::TestDb::new("test_recipe_huge_page.db");
    let repo = test_db.repo();
    let catalog = seed_catalog(&repo);

    repo.create_recipe(&new_recipe(
        catalog.author.id,
        "Waffles",
        vec![catalog.breakfast.id],
        &[(catalog.flour.id, 250)],
    ))
    .expect("create recipe");

    let (total, recipes) = repo
        .list_recipes(RecipeListQuery::new().paginate(usize::MAX / 2, 4))
        .expect("list recipes");
    assert_eq!(total, 1);
    assert!(recipes.is_empty());

    let (total, recipes) = repo
        .list_recipes(RecipeListQuery::new().limit(usize::MAX))
        .expect("list recipes");
    assert_eq!(total, 1);
    assert_eq!(recipes.len(), 1);
}
