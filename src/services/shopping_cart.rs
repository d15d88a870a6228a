use std::collections::BTreeMap;

use chrono::{Datelike, Local};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::shopping_list::{CartIngredient, ShoppingListItem};
use crate::repository::{ShoppingCartReader, UserReader, UserWriter};
use crate::services::users::resolve_user;
use crate::services::{ServiceError, ServiceResult};

/// File name offered to the client for the shopping list download.
pub const SHOPPING_LIST_FILE_NAME: &str = "shopping_list.txt";

/// Builds the plain-text shopping list for the caller's cart.
pub fn download_shopping_list<R>(repo: &R, identity: &AuthenticatedUser) -> ServiceResult<String>
where
    R: ShoppingCartReader + UserReader + UserWriter + ?Sized,
{
    let user = resolve_user(repo, identity)?;

    let rows = repo
        .list_cart_ingredients(user.id)
        .map_err(ServiceError::from)?;
    let items = aggregate_shopping_list(rows);

    Ok(render_shopping_list(
        &user.username,
        &items,
        Local::now().year(),
    ))
}

/// Sum quantities per `(name, unit)` pair, ordered by name.
pub fn aggregate_shopping_list(rows: Vec<CartIngredient>) -> Vec<ShoppingListItem> {
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();

    for row in rows {
        *totals
            .entry((row.name, row.measurement_unit))
            .or_insert(0) += i64::from(row.amount);
    }

    totals
        .into_iter()
        .map(|((name, measurement_unit), amount)| ShoppingListItem {
            name,
            measurement_unit,
            amount,
        })
        .collect()
}

pub fn render_shopping_list(username: &str, items: &[ShoppingListItem], year: i32) -> String {
    let mut lines = Vec::with_capacity(items.len() + 4);
    lines.push(format!("Список покупок для пользователя: {username}"));
    lines.push(String::new());
    for item in items {
        lines.push(format!(
            "- {} ({}) - {}",
            item.name, item.measurement_unit, item.amount
        ));
    }
    lines.push(String::new());
    lines.push(format!("Pushkind Recipes ({year})"));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{identity, sample_user};

    #[test]
    fn same_ingredient_across_recipes_is_summed() {
        let items = aggregate_shopping_list(vec![
            CartIngredient::new("Flour", "g", 200),
            CartIngredient::new("Eggs", "pcs", 2),
            CartIngredient::new("Flour", "g", 300),
        ]);

        assert_eq!(
            items,
            vec![
                ShoppingListItem {
                    name: "Eggs".to_string(),
                    measurement_unit: "pcs".to_string(),
                    amount: 2,
                },
                ShoppingListItem {
                    name: "Flour".to_string(),
                    measurement_unit: "g".to_string(),
                    amount: 500,
                },
            ]
        );
    }

    #[test]
    fn different_units_stay_separate() {
        let items = aggregate_shopping_list(vec![
            CartIngredient::new("Sugar", "g", 100),
            CartIngredient::new("Sugar", "tbsp", 2),
        ]);

        assert_eq!(items.len(), 2);
    }

    #[test]
    fn render_matches_document_layout() {
        let items = aggregate_shopping_list(vec![
            CartIngredient::new("Flour", "g", 200),
            CartIngredient::new("Flour", "g", 300),
        ]);

        let text = render_shopping_list("baker", &items, 2025);

        assert_eq!(
            text,
            "Список покупок для пользователя: baker\n\n- Flour (g) - 500\n\nPushkind Recipes (2025)"
        );
    }

    #[test]
    fn download_uses_callers_cart() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(sample_user(6, "baker"))));
        repo.expect_list_cart_ingredients()
            .withf(|user_id| *user_id == 6)
            .times(1)
            .returning(|_| {
                Ok(vec![
                    CartIngredient::new("Flour", "g", 200),
                    CartIngredient::new("Flour", "g", 300),
                ])
            });

        let text = download_shopping_list(&repo, &identity("baker@example.com", &[]))
            .expect("document");

        assert!(text.starts_with("Список покупок для пользователя: baker\n\n"));
        assert!(text.contains("\n- Flour (g) - 500\n"));
        assert_eq!(text.matches("Flour").count(), 1);
    }

    #[test]
    fn empty_cart_renders_header_and_footer_only() {
        let text = render_shopping_list("nobody", &[], 2024);

        assert_eq!(
            text,
            "Список покупок для пользователя: nobody\n\n\nPushkind Recipes (2024)"
        );
    }
}
