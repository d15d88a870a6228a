use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::tag::NewTag;
use crate::forms::sanitize_inline_text;

/// Maximum allowed length for a tag name and slug.
const NAME_MAX_LEN: usize = 200;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

lazy_static! {
    static ref SLUG_REGEX: Regex = Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid slug regex");
    static ref HEX_COLOR_REGEX: Regex =
        Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid color regex");
}

/// Result type returned by the tag form helpers.
pub type TagFormResult<T> = Result<T, TagFormError>;

/// Errors that can occur while processing tag forms.
#[derive(Debug, Error)]
pub enum TagFormError {
    /// Validation failures from the `validator` crate.
    #[error("Некорректные данные тэга: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("Название тэга не может быть пустым")]
    EmptyName,
}

/// Payload submitted when creating a tag.
#[derive(Debug, Deserialize, Validate)]
pub struct AddTagForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Color in `#RRGGBB` notation.
    #[validate(regex(path = *HEX_COLOR_REGEX))]
    pub color: Option<String>,
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR), regex(path = *SLUG_REGEX))]
    pub slug: Option<String>,
}

impl AddTagForm {
    /// Validates and sanitizes the payload into a domain `NewTag`.
    pub fn into_new_tag(self) -> TagFormResult<NewTag> {
        let AddTagForm { name, color, slug } = self;

        let form = AddTagForm {
            name,
            color: color.map(|value| value.trim().to_lowercase()).filter(|v| !v.is_empty()),
            slug: slug.map(|value| value.trim().to_string()).filter(|v| !v.is_empty()),
        };
        form.validate()?;

        let sanitized_name = sanitize_inline_text(&form.name);
        if sanitized_name.is_empty() {
            return Err(TagFormError::EmptyName);
        }

        let mut new_tag = NewTag::new(sanitized_name);
        if let Some(color) = form.color {
            new_tag = new_tag.with_color(color);
        }
        if let Some(slug) = form.slug {
            new_tag = new_tag.with_slug(slug);
        }

        Ok(new_tag)
    }
}
