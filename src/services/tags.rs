use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::tag::Tag;
use crate::domain::types::TagName;
use crate::repository::{TagListQuery, TagReader, TagWriter};

use super::{ServiceError, ServiceResult};

pub fn list_tags<R>(
    search: Option<String>,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Vec<Tag>>
where
    R: TagReader,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let mut query = TagListQuery::default();
    if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
        query = query.search(search.trim());
    }

    match repo.list_tags(query) {
        Ok(tags) => Ok(tags),
        Err(e) => {
            log::error!("Failed to list tags: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn add_tag<R>(name: String, user: &AuthenticatedUser, repo: &R) -> ServiceResult<Tag>
where
    R: TagWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let name = TagName::new(name)?;

    match repo.ensure_tags(std::slice::from_ref(&name)) {
        Ok(mut tags) if !tags.is_empty() => Ok(tags.remove(0)),
        Ok(_) => {
            log::error!("Tag upsert returned no rows for {name}");
            Err(ServiceError::Internal)
        }
        Err(e) => {
            log::error!("Failed to create tag: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TagId;
    use crate::repository::test::TestRepository;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            email: "test@example.com".into(),
            name: "Test".into(),
            roles: vec![SERVICE_ACCESS_ROLE.into()],
        }
    }

    fn sample_tags() -> Vec<Tag> {
        vec![
            Tag {
                id: TagId::new(1).unwrap(),
                name: TagName::new("VFX").unwrap(),
            },
            Tag {
                id: TagId::new(2).unwrap(),
                name: TagName::new("houdini").unwrap(),
            },
        ]
    }

    #[test]
    fn search_is_case_insensitive() {
        let repo = TestRepository::new().with_tags(sample_tags());
        let user = sample_user();

        let tags = list_tags(Some("vfx".to_string()), &user, &repo).unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name.as_str(), "VFX");
    }

    #[test]
    fn add_tag_reuses_existing_spelling() {
        let repo = TestRepository::new().with_tags(sample_tags());
        let user = sample_user();

        let tag = add_tag("HOUDINI".to_string(), &user, &repo).unwrap();
        assert_eq!(tag.name.as_str(), "houdini");
        assert_eq!(tag.id.get(), 2);
    }

    #[test]
    fn add_tag_rejects_invalid_names() {
        let repo = TestRepository::new();
        let user = sample_user();

        let err = add_tag("two words".to_string(), &user, &repo).unwrap_err();
        assert!(matches!(err, ServiceError::Form(_)));
    }
}
