use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::category_tree::CategoryTree;
use crate::forms::categories::{
    AddCategoryFormPayload, DeleteCategoryFormPayload, UpdateCategoryFormPayload,
};
use crate::repository::{CategoryReader, CategoryWriter, VideoReferenceReader};

use super::{ServiceError, ServiceResult};

/// Message shown when a deletion is refused; the category must be detached
/// from its children and referencing videos first.
const DELETE_REJECTED: &str = "Cannot delete category with children or video references";

pub fn show_categories<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<CategoryTree>
where
    R: CategoryReader,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    match repo.list_categories() {
        Ok(categories) => Ok(CategoryTree::from_flat(categories)),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn add_category<R>(
    payload: AddCategoryFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<bool>
where
    R: CategoryWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let category = payload.into_new_category();
    match repo.create_category(&category) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Ok(false)
        }
    }
}

pub fn update_category<R>(
    payload: UpdateCategoryFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<bool>
where
    R: CategoryReader + CategoryWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    match repo.get_category_by_id(payload.category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.update_category(
        payload.category_id,
        &payload.name,
        &payload.slug,
        payload.parent_id,
        payload.order,
    ) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to update category: {e}");
            Ok(false)
        }
    }
}

pub fn delete_category<R>(
    payload: DeleteCategoryFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<bool>
where
    R: CategoryReader + CategoryWriter + VideoReferenceReader,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    match repo.get_category_by_id(payload.category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.has_children(payload.category_id) {
        Ok(true) => return Err(ServiceError::Form(DELETE_REJECTED.to_string())),
        Ok(false) => {}
        Err(e) => {
            log::error!("Failed to count category children: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.count_for_category(payload.category_id) {
        Ok(0) => {}
        Ok(_) => return Err(ServiceError::Form(DELETE_REJECTED.to_string())),
        Err(e) => {
            log::error!("Failed to count category video references: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.delete_category(payload.category_id) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::types::{
        CategoryId, CategoryName, CategorySlug, Rating, SearchProfile, SortOrder, SourceUrl,
        VideoRefId, VideoTitle,
    };
    use crate::domain::video_ref::{ContentFlags, VideoReference};
    use crate::repository::test::TestRepository;
    use chrono::DateTime;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            email: "test@example.com".into(),
            name: "Test".into(),
            roles: vec![SERVICE_ACCESS_ROLE.into()],
        }
    }

    fn sample_category(id: i32, parent: Option<i32>, slug: &str) -> Category {
        let ts = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(format!("Category {id}")).unwrap(),
            slug: CategorySlug::new(slug).unwrap(),
            parent_id: parent.map(|p| CategoryId::new(p).unwrap()),
            order: SortOrder::new(0).unwrap(),
            created_at: ts,
            updated_at: ts,
        }
    }

    fn sample_video(id: i32, category_id: i32) -> VideoReference {
        let ts = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        VideoReference {
            id: VideoRefId::new(id).unwrap(),
            title: VideoTitle::new("Video").unwrap(),
            source_url: SourceUrl::new("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            public_summary_html: None,
            pacing: None,
            hook_id: None,
            production_level: None,
            flags: ContentFlags::default(),
            rating: Rating::default(),
            search_profile: SearchProfile::new("profile").unwrap(),
            search_metadata: None,
            category_ids: vec![CategoryId::new(category_id).unwrap()],
            tags: vec![],
            tutorials: vec![],
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn shows_categories_as_a_tree() {
        let repo = TestRepository::new().with_categories(vec![
            sample_category(1, None, "root"),
            sample_category(2, Some(1), "child"),
        ]);
        let user = sample_user();

        let tree = show_categories(&user, &repo).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.roots().len(), 1);
    }

    #[test]
    fn show_categories_requires_role() {
        let repo = TestRepository::new();
        let mut user = sample_user();
        user.roles.clear();

        let err = show_categories(&user, &repo).unwrap_err();
        assert_eq!(err, ServiceError::Unauthorized);
    }

    #[test]
    fn delete_rejects_category_with_children() {
        let repo = TestRepository::new().with_categories(vec![
            sample_category(1, None, "root"),
            sample_category(2, Some(1), "child"),
        ]);
        let user = sample_user();
        let payload = DeleteCategoryFormPayload {
            category_id: CategoryId::new(1).unwrap(),
        };

        let err = delete_category(payload, &user, &repo).unwrap_err();
        assert_eq!(err, ServiceError::Form(DELETE_REJECTED.to_string()));
    }

    #[test]
    fn delete_rejects_category_referenced_by_videos() {
        let repo = TestRepository::new()
            .with_categories(vec![sample_category(1, None, "root")])
            .with_video_refs(vec![sample_video(1, 1)]);
        let user = sample_user();
        let payload = DeleteCategoryFormPayload {
            category_id: CategoryId::new(1).unwrap(),
        };

        let err = delete_category(payload, &user, &repo).unwrap_err();
        assert_eq!(err, ServiceError::Form(DELETE_REJECTED.to_string()));
    }

    #[test]
    fn delete_succeeds_for_leaf_without_videos() {
        let repo = TestRepository::new().with_categories(vec![sample_category(1, None, "root")]);
        let user = sample_user();
        let payload = DeleteCategoryFormPayload {
            category_id: CategoryId::new(1).unwrap(),
        };

        assert!(delete_category(payload, &user, &repo).unwrap());
    }

    #[test]
    fn delete_missing_category_is_not_found() {
        let repo = TestRepository::new();
        let user = sample_user();
        let payload = DeleteCategoryFormPayload {
            category_id: CategoryId::new(9).unwrap(),
        };

        let err = delete_category(payload, &user, &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }
}
