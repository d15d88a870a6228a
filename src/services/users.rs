use std::collections::HashSet;

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::Paginated;
use serde::{Deserialize, Serialize};

use crate::domain::user::{NewUser, User, UserListQuery};
use crate::forms::users::UpdateProfileForm;
use crate::repository::{SubscriptionReader, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, page_bounds};

/// Query parameters accepted by the users list.
#[derive(Debug, Default, Deserialize)]
pub struct UserListParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// User as rendered to API clients.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserView {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Whether the caller follows this user.
    pub is_subscribed: bool,
}

impl UserView {
    pub fn new(user: User, is_subscribed: bool) -> Self {
        Self {
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed,
        }
    }
}

/// Username variants tried before provisioning gives up.
const PROVISION_ATTEMPTS: usize = 5;

/// Find the local user behind an authenticated identity, creating it on first use.
///
/// When the derived username is already taken by another account, numbered
/// variants (`name-2`, `name-3`, ...) are tried.
pub fn resolve_user<R>(repo: &R, identity: &AuthenticatedUser) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let email = identity.email.to_lowercase();
    if let Some(user) = repo
        .get_user_by_email(&email)
        .map_err(ServiceError::from)?
    {
        return Ok(user);
    }

    let base = NewUser::from(identity);
    let mut last_err = None;

    for attempt in 0..PROVISION_ATTEMPTS {
        let new_user = if attempt == 0 {
            base.clone()
        } else {
            base.clone().with_username_suffix(attempt + 1)
        };

        match repo.create_user(&new_user) {
            Ok(user) => {
                log::info!("Provisioned local user {} for {}", user.id, user.email);
                return Ok(user);
            }
            Err(err) => {
                // A concurrent request may have provisioned the same identity.
                if let Some(user) = repo
                    .get_user_by_email(&email)
                    .map_err(ServiceError::from)?
                {
                    return Ok(user);
                }
                log::warn!(
                    "Could not provision {email} as `{}`: {err}",
                    new_user.username
                );
                last_err = Some(err);
            }
        }
    }

    Err(last_err.map_or(ServiceError::Conflict, ServiceError::from))
}

/// Like [`resolve_user`] for endpoints where authentication is optional.
pub fn resolve_viewer<R>(
    repo: &R,
    identity: Option<&AuthenticatedUser>,
) -> ServiceResult<Option<User>>
where
    R: UserReader + UserWriter + ?Sized,
{
    identity.map(|identity| resolve_user(repo, identity)).transpose()
}

/// Ids among `author_ids` the viewer follows. Anonymous viewers follow nobody.
pub(crate) fn subscribed_ids<R>(
    repo: &R,
    viewer: Option<&User>,
    author_ids: &[i32],
) -> ServiceResult<HashSet<i32>>
where
    R: SubscriptionReader + ?Sized,
{
    let Some(viewer) = viewer else {
        return Ok(HashSet::new());
    };

    let ids = repo
        .subscribed_author_ids(viewer.id, author_ids)
        .map_err(ServiceError::from)?;

    Ok(ids.into_iter().collect())
}

/// Lists users page by page.
pub fn list_users<R>(
    repo: &R,
    identity: Option<&AuthenticatedUser>,
    params: UserListParams,
) -> ServiceResult<Paginated<UserView>>
where
    R: UserReader + UserWriter + SubscriptionReader + ?Sized,
{
    let viewer = resolve_viewer(repo, identity)?;
    let (page, per_page) = page_bounds(params.page, params.limit);

    let (total, users) = repo
        .list_users(UserListQuery::new().paginate(page, per_page))
        .map_err(ServiceError::from)?;

    let ids: Vec<i32> = users.iter().map(|user| user.id).collect();
    let subscribed = subscribed_ids(repo, viewer.as_ref(), &ids)?;

    let items = users
        .into_iter()
        .map(|user| {
            let is_subscribed = subscribed.contains(&user.id);
            UserView::new(user, is_subscribed)
        })
        .collect();

    Ok(Paginated::new(items, page, total.div_ceil(per_page)))
}

/// Loads a single user.
pub fn get_user<R>(
    repo: &R,
    identity: Option<&AuthenticatedUser>,
    user_id: i32,
) -> ServiceResult<UserView>
where
    R: UserReader + UserWriter + SubscriptionReader + ?Sized,
{
    let viewer = resolve_viewer(repo, identity)?;

    let user = repo
        .get_user_by_id(user_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let subscribed = subscribed_ids(repo, viewer.as_ref(), &[user.id])?;
    let is_subscribed = subscribed.contains(&user.id);

    Ok(UserView::new(user, is_subscribed))
}

/// Returns the caller's own profile.
pub fn get_current_user<R>(repo: &R, identity: &AuthenticatedUser) -> ServiceResult<UserView>
where
    R: UserReader + UserWriter + ?Sized,
{
    let user = resolve_user(repo, identity)?;
    Ok(UserView::new(user, false))
}

/// Applies a profile edit for the caller.
pub fn update_current_user<R>(
    repo: &R,
    identity: &AuthenticatedUser,
    form: UpdateProfileForm,
) -> ServiceResult<UserView>
where
    R: UserReader + UserWriter + ?Sized,
{
    let user = resolve_user(repo, identity)?;

    let updates = form
        .into_update_user(&user)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let updated = repo
        .update_user(user.id, &updates)
        .map_err(ServiceError::from)?;

    Ok(UserView::new(updated, false))
}
