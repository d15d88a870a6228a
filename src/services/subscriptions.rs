use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{Paginated, Pagination};
use serde::{Deserialize, Serialize};

use crate::domain::recipe::{RecipeListQuery, ShortRecipe};
use crate::domain::subscription::NewSubscription;
use crate::domain::user::User;
use crate::repository::{
    RecipeReader, SubscriptionReader, SubscriptionWriter, UserReader, UserWriter,
};
use crate::services::users::resolve_user;
use crate::services::{ServiceError, ServiceResult, page_bounds};

const SELF_SUBSCRIPTION_MESSAGE: &str = "Нельзя подписаться на самого себя";
const DUPLICATE_SUBSCRIPTION_MESSAGE: &str = "Вы уже подписаны на данного пользователя";

/// Query parameters accepted when subscribing.
#[derive(Debug, Default, Deserialize)]
pub struct SubscribeParams {
    /// Cap on the number of recipes embedded per author.
    pub recipes_limit: Option<usize>,
}

/// Query parameters accepted by the subscriptions list.
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionListParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub recipes_limit: Option<usize>,
}

/// Followed author together with a slice of their recipes.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionView {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    pub recipes: Vec<ShortRecipe>,
    pub recipes_count: usize,
}

/// Follows `author_id` on behalf of the caller.
pub fn subscribe<R>(
    repo: &R,
    identity: &AuthenticatedUser,
    author_id: i32,
    params: SubscribeParams,
) -> ServiceResult<SubscriptionView>
where
    R: UserReader + UserWriter + SubscriptionReader + SubscriptionWriter + RecipeReader + ?Sized,
{
    let user = resolve_user(repo, identity)?;

    if user.id == author_id {
        return Err(ServiceError::Form(SELF_SUBSCRIPTION_MESSAGE.to_string()));
    }

    let author = repo
        .get_user_by_id(author_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if repo
        .subscription_exists(user.id, author.id)
        .map_err(ServiceError::from)?
    {
        return Err(ServiceError::Form(
            DUPLICATE_SUBSCRIPTION_MESSAGE.to_string(),
        ));
    }

    repo.create_subscription(&NewSubscription::new(user.id, author.id))
        .map_err(ServiceError::from)?;
    log::info!("User {} subscribed to {}", user.id, author.id);

    subscription_view(repo, author, params.recipes_limit)
}

/// Stops following `author_id`.
pub fn unsubscribe<R>(repo: &R, identity: &AuthenticatedUser, author_id: i32) -> ServiceResult<()>
where
    R: UserReader + UserWriter + SubscriptionWriter + ?Sized,
{
    let user = resolve_user(repo, identity)?;

    repo.delete_subscription(user.id, author_id)
        .map_err(ServiceError::from)
}

/// Lists the authors the caller follows.
pub fn list_subscriptions<R>(
    repo: &R,
    identity: &AuthenticatedUser,
    params: SubscriptionListParams,
) -> ServiceResult<Paginated<SubscriptionView>>
where
    R: UserReader + UserWriter + SubscriptionReader + RecipeReader + ?Sized,
{
    let user = resolve_user(repo, identity)?;
    let (page, per_page) = page_bounds(params.page, params.limit);

    let (total, authors) = repo
        .list_subscribed_authors(user.id, Some(Pagination { page, per_page }))
        .map_err(ServiceError::from)?;

    let views = authors
        .into_iter()
        .map(|author| subscription_view(repo, author, params.recipes_limit))
        .collect::<ServiceResult<Vec<_>>>()?;

    Ok(Paginated::new(views, page, total.div_ceil(per_page)))
}

fn subscription_view<R>(
    repo: &R,
    author: User,
    recipes_limit: Option<usize>,
) -> ServiceResult<SubscriptionView>
where
    R: RecipeReader + ?Sized,
{
    let mut query = RecipeListQuery::new().author(author.id);
    if let Some(limit) = recipes_limit {
        query = query.limit(limit);
    }

    let (recipes_count, recipes) = repo.list_recipes(query).map_err(ServiceError::from)?;

    Ok(SubscriptionView {
        email: author.email,
        id: author.id,
        username: author.username,
        first_name: author.first_name,
        last_name: author.last_name,
        is_subscribed: true,
        recipes: recipes.iter().map(ShortRecipe::from).collect(),
        recipes_count,
    })
}
