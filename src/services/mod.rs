pub use pushkind_common::services::errors::{ServiceError, ServiceResult};

use pushkind_common::pagination::DEFAULT_ITEMS_PER_PAGE;

pub mod catalog;
pub mod ingredients;
pub mod recipes;
pub mod relations;
pub mod shopping_cart;
pub mod subscriptions;
pub mod tags;
pub mod users;

/// Upper bound for a client-supplied `?limit=`.
pub const MAX_ITEMS_PER_PAGE: usize = 100;

/// Resolve `?page=`/`?limit=` into a 1-based page and a page size in
/// `1..=MAX_ITEMS_PER_PAGE`.
pub(crate) fn page_bounds(page: Option<usize>, limit: Option<usize>) -> (usize, usize) {
    let page = page.filter(|value| *value > 0).unwrap_or(1);
    let per_page = limit
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
        .min(MAX_ITEMS_PER_PAGE);
    (page, per_page)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds_fall_back_to_defaults() {
        assert_eq!(page_bounds(None, None), (1, DEFAULT_ITEMS_PER_PAGE));
        assert_eq!(page_bounds(Some(0), Some(0)), (1, DEFAULT_ITEMS_PER_PAGE));
        assert_eq!(page_bounds(Some(3), Some(6)), (3, 6));
    }

    #[test]
    fn page_bounds_cap_the_page_size() {
        assert_eq!(
            page_bounds(Some(2), Some(usize::MAX)),
            (2, MAX_ITEMS_PER_PAGE)
        );
    }
}
