use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::tag::Tag;
use crate::forms::catalog::UploadCatalogForm;
use crate::forms::tags::AddTagForm;
use crate::repository::{TagReader, TagWriter};
use crate::services::{ServiceError, ServiceResult};

/// Returns every tag, newest name first.
pub fn list_tags<R>(repo: &R) -> ServiceResult<Vec<Tag>>
where
    R: TagReader + ?Sized,
{
    repo.list_tags().map_err(ServiceError::from)
}

pub fn get_tag<R>(repo: &R, tag_id: i32) -> ServiceResult<Tag>
where
    R: TagReader + ?Sized,
{
    repo.get_tag_by_id(tag_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a catalog tag. Admin only.
pub fn create_tag<R>(repo: &R, user: &AuthenticatedUser, form: AddTagForm) -> ServiceResult<Tag>
where
    R: TagWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_tag = form
        .into_new_tag()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_tag(&new_tag).map_err(ServiceError::from)
}

/// Deletes a catalog tag together with its recipe links. Admin only.
pub fn remove_tag<R>(repo: &R, user: &AuthenticatedUser, tag_id: i32) -> ServiceResult<()>
where
    R: TagWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_tag(tag_id).map_err(ServiceError::from)
}

/// Imports tags from an uploaded `name,color,slug` CSV. Admin only.
pub fn upload_tags<R>(
    repo: &R,
    user: &AuthenticatedUser,
    mut form: UploadCatalogForm,
) -> ServiceResult<usize>
where
    R: TagWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let tags = form
        .parse_tags()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_tags(&tags).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::repository::mock::{MockTagReader, MockTagWriter};
    use crate::services::test_support::identity;

    fn sample_tag(id: i32, name: &str, slug: &str) -> Tag {
        Tag {
            id,
            name: name.to_string(),
            color: None,
            slug: Some(slug.to_string()),
        }
    }

    #[test]
    fn get_tag_reports_missing_tag() {
        let mut repo = MockTagReader::new();
        repo.expect_get_tag_by_id().returning(|_| Ok(None));

        assert!(matches!(get_tag(&repo, 3), Err(ServiceError::NotFound)));
    }

    #[test]
    fn list_tags_returns_repository_order() {
        let mut repo = MockTagReader::new();
        repo.expect_list_tags().times(1).returning(|| {
            Ok(vec![
                sample_tag(2, "Ужин", "dinner"),
                sample_tag(1, "Завтрак", "breakfast"),
            ])
        });

        let tags = list_tags(&repo).expect("tags");

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].slug.as_deref(), Some("dinner"));
    }

    #[test]
    fn create_tag_requires_admin_role() {
        let mut repo = MockTagWriter::new();
        repo.expect_create_tag().never();

        let form = AddTagForm {
            name: "Lunch".to_string(),
            color: None,
            slug: Some("lunch".to_string()),
        };
        let result = create_tag(&repo, &identity("cook@example.com", &[]), form);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn create_tag_persists_sanitized_payload() {
        let mut repo = MockTagWriter::new();
        repo.expect_create_tag()
            .times(1)
            .withf(|new_tag| new_tag.name == "Lunch" && new_tag.slug.as_deref() == Some("lunch"))
            .returning(|new_tag| {
                Ok(Tag {
                    id: 5,
                    name: new_tag.name.clone(),
                    color: new_tag.color.clone(),
                    slug: new_tag.slug.clone(),
                })
            });

        let form = AddTagForm {
            name: "  Lunch ".to_string(),
            color: None,
            slug: Some("lunch".to_string()),
        };
        let tag = create_tag(
            &repo,
            &identity("admin@example.com", &[SERVICE_ACCESS_ROLE]),
            form,
        )
        .expect("tag");

        assert_eq!(tag.id, 5);
    }

    #[test]
    fn create_tag_maps_invalid_payload_to_form_error() {
        let repo = MockTagWriter::new();
        let form = AddTagForm {
            name: "Lunch".to_string(),
            color: Some("blue".to_string()),
            slug: None,
        };

        let result = create_tag(
            &repo,
            &identity("admin@example.com", &[SERVICE_ACCESS_ROLE]),
            form,
        );

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
