use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::user::{UpdateUser, User};
use crate::forms::sanitize_inline_text;

const PROFILE_FIELD_MAX_LEN: usize = 150;
const PROFILE_FIELD_MAX_LEN_VALIDATOR: u64 = PROFILE_FIELD_MAX_LEN as u64;

lazy_static! {
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[\w.@+-]+$").expect("valid username regex");
}

pub type ProfileFormResult<T> = Result<T, ProfileFormError>;

#[derive(Debug, Error)]
pub enum ProfileFormError {
    #[error("Некорректные данные профиля: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Profile edit submitted by the current user.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileForm {
    #[validate(
        length(min = 1, max = PROFILE_FIELD_MAX_LEN_VALIDATOR),
        regex(path = *USERNAME_REGEX)
    )]
    pub username: Option<String>,
    #[validate(length(max = PROFILE_FIELD_MAX_LEN_VALIDATOR))]
    pub first_name: Option<String>,
    #[validate(length(max = PROFILE_FIELD_MAX_LEN_VALIDATOR))]
    pub last_name: Option<String>,
}

impl UpdateProfileForm {
    /// Merge the submitted fields over the stored profile.
    pub fn into_update_user(self, current: &User) -> ProfileFormResult<UpdateUser> {
        let form = UpdateProfileForm {
            username: self.username.map(|value| value.trim().to_string()),
            first_name: self.first_name,
            last_name: self.last_name,
        };
        form.validate()?;

        Ok(UpdateUser {
            username: form.username.unwrap_or_else(|| current.username.clone()),
            first_name: form
                .first_name
                .map(|value| sanitize_inline_text(&value))
                .unwrap_or_else(|| current.first_name.clone()),
            last_name: form
                .last_name
                .map(|value| sanitize_inline_text(&value))
                .unwrap_or_else(|| current.last_name.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> User {
        User {
            id: 1,
            email: "chef@example.com".to_string(),
            username: "chef@example.com".to_string(),
            first_name: "Anna".to_string(),
            last_name: "Smirnova".to_string(),
        }
    }

    #[test]
    fn profile_form_merges_partial_update() {
        let form = UpdateProfileForm {
            username: Some(" chef.anna ".to_string()),
            first_name: None,
            last_name: Some("  Ivanova ".to_string()),
        };

        let update = form.into_update_user(&current()).expect("valid profile");

        assert_eq!(update.username, "chef.anna");
        assert_eq!(update.first_name, "Anna");
        assert_eq!(update.last_name, "Ivanova");
    }

    #[test]
    fn profile_form_rejects_forbidden_username_characters() {
        let form = UpdateProfileForm {
            username: Some("chef anna!".to_string()),
            first_name: None,
            last_name: None,
        };

        assert!(matches!(
            form.into_update_user(&current()),
            Err(ProfileFormError::Validation(_))
        ));
    }

    #[test]
    fn profile_form_rejects_long_username() {
        let form = UpdateProfileForm {
            username: Some("a".repeat(151)),
            first_name: None,
            last_name: None,
        };

        assert!(form.into_update_user(&current()).is_err());
    }
}
