use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Longest username the `users` table accepts.
pub const USERNAME_MAX_LEN: usize = 150;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewUser {
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into().to_lowercase(),
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Append `-{n}` to the username, trimming the base to stay within
    /// [`USERNAME_MAX_LEN`].
    #[must_use]
    pub fn with_username_suffix(mut self, n: usize) -> Self {
        let suffix = format!("-{n}");
        let keep = USERNAME_MAX_LEN.saturating_sub(suffix.chars().count());
        self.username = self
            .username
            .chars()
            .take(keep)
            .chain(suffix.chars())
            .collect();
        self
    }
}

/// Profile fields a user may change about themself.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct UpdateUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&AuthenticatedUser> for NewUser {
    fn from(value: &AuthenticatedUser) -> Self {
        let email = value.email.to_lowercase();
        let username = username_from_email(&email);

        let mut parts = value.name.split_whitespace();
        let first_name = parts.next().unwrap_or_default().to_string();
        let last_name = parts.collect::<Vec<_>>().join(" ");

        NewUser::new(email, username, first_name, last_name)
    }
}

/// Derive a username from an e-mail, replacing characters outside `[\w.@+-]`.
fn username_from_email(email: &str) -> String {
    email
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || matches!(ch, '_' | '.' | '@' | '+' | '-') {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// Query definition used to list users.
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub pagination: Option<Pagination>,
}

impl UserListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(email: &str, name: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: email.to_string(),
            hub_id: 1,
            name: name.to_string(),
            roles: vec![],
            exp: 0,
        }
    }

    #[test]
    fn new_user_from_identity_splits_name() {
        let user = NewUser::from(&identity("Cook@Example.com", "Ivan Petrov Junior"));

        assert_eq!(user.email, "cook@example.com");
        assert_eq!(user.username, "cook@example.com");
        assert_eq!(user.first_name, "Ivan");
        assert_eq!(user.last_name, "Petrov Junior");
    }

    #[test]
    fn username_suffix_stays_within_column_width() {
        let user = NewUser::new("a@b.c", "cook", "", "").with_username_suffix(2);
        assert_eq!(user.username, "cook-2");

        let long = NewUser::new("a@b.c", "x".repeat(USERNAME_MAX_LEN), "", "")
            .with_username_suffix(10);
        assert_eq!(long.username.chars().count(), USERNAME_MAX_LEN);
        assert!(long.username.ends_with("x-10"));
    }

    #[test]
    fn username_from_email_replaces_forbidden_characters() {
        assert_eq!(username_from_email("a b!c@x.io"), "a_b_c@x.io");
    }
}
