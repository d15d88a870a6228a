use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(
    table_name = crate::schema::favorites,
    belongs_to(super::recipe::Recipe, foreign_key = recipe_id),
    belongs_to(super::user::User, foreign_key = user_id)
)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub recipe_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::favorites)]
pub struct NewFavorite {
    pub user_id: i32,
    pub recipe_id: i32,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(
    table_name = crate::schema::shopping_lists,
    belongs_to(super::recipe::Recipe, foreign_key = recipe_id),
    belongs_to(super::user::User, foreign_key = user_id)
)]
pub struct ShoppingListEntry {
    pub id: i32,
    pub user_id: i32,
    pub recipe_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::shopping_lists)]
pub struct NewShoppingListEntry {
    pub user_id: i32,
    pub recipe_id: i32,
}
