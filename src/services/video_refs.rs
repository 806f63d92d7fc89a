use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::category_tree::CategoryTree;
use crate::domain::hook::Hook;
use crate::domain::tag::Tag;
use crate::domain::tutorial::Tutorial;
use crate::domain::types::VideoRefId;
use crate::domain::video_ref::VideoReference;
use crate::forms::video_refs::SaveVideoRefFormPayload;
use crate::repository::{
    CategoryReader, DEFAULT_ITEMS_PER_PAGE, HookReader, RepositoryError, TagListQuery, TagReader,
    TutorialReader, VideoRefListQuery, VideoReferenceReader, VideoReferenceWriter,
};

use super::{ServiceError, ServiceResult};

/// Everything the video form needs besides the record itself.
pub struct VideoFormContext {
    pub tree: CategoryTree,
    pub tags: Vec<Tag>,
    pub hooks: Vec<Hook>,
    pub tutorials: Vec<Tutorial>,
}

pub fn show_video_refs<R>(
    search_id: Option<i32>,
    search_source_url: Option<String>,
    page: usize,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<(usize, Vec<VideoReference>)>
where
    R: VideoReferenceReader,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let mut query = VideoRefListQuery::default().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(id) = search_id {
        // A non-positive id can match nothing; skip the round-trip.
        match VideoRefId::new(id) {
            Ok(id) => query = query.id(id),
            Err(_) => return Ok((0, vec![])),
        }
    }
    if let Some(source_url) = search_source_url.filter(|s| !s.trim().is_empty()) {
        query = query.source_url(source_url.trim());
    }

    match repo.list_video_refs(query) {
        Ok(result) => Ok(result),
        Err(e) => {
            log::error!("Failed to list video references: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_video_ref<R>(
    id: VideoRefId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<VideoReference>
where
    R: VideoReferenceReader,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    match repo.get_video_ref_by_id(id) {
        Ok(Some(video)) => Ok(video),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get video reference: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Load the selector data for the create/edit form.
pub fn load_form_context<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<VideoFormContext>
where
    R: CategoryReader + TagReader + HookReader + TutorialReader,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let categories = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories for video form: {e}");
        ServiceError::Internal
    })?;
    let tags = repo.list_tags(TagListQuery::default()).map_err(|e| {
        log::error!("Failed to list tags for video form: {e}");
        ServiceError::Internal
    })?;
    let hooks = repo.list_hooks().map_err(|e| {
        log::error!("Failed to list hooks for video form: {e}");
        ServiceError::Internal
    })?;
    let tutorials = repo.list_tutorials().map_err(|e| {
        log::error!("Failed to list tutorials for video form: {e}");
        ServiceError::Internal
    })?;

    Ok(VideoFormContext {
        tree: CategoryTree::from_flat(categories),
        tags,
        hooks,
        tutorials,
    })
}

/// Create (`id = None`) or fully replace (`id = Some`) a video reference.
pub fn save_video_ref<R>(
    payload: SaveVideoRefFormPayload,
    id: Option<VideoRefId>,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<VideoRefId>
where
    R: VideoReferenceReader + VideoReferenceWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let video = payload.into_new_video_ref();

    match id {
        Some(id) => {
            match repo.get_video_ref_by_id(id) {
                Ok(Some(_)) => {}
                Ok(None) => return Err(ServiceError::NotFound),
                Err(e) => {
                    log::error!("Failed to get video reference: {e}");
                    return Err(ServiceError::Internal);
                }
            }
            match repo.update_video_ref(id, &video) {
                Ok(_) => Ok(id),
                Err(RepositoryError::Validation(message)) => Err(ServiceError::Form(message)),
                Err(e) => {
                    log::error!("Failed to update video reference: {e}");
                    Err(ServiceError::Internal)
                }
            }
        }
        None => match repo.create_video_ref(&video) {
            Ok(id) => Ok(id),
            Err(RepositoryError::Validation(message)) => Err(ServiceError::Form(message)),
            Err(e) => {
                log::error!("Failed to create video reference: {e}");
                Err(ServiceError::Internal)
            }
        },
    }
}

pub fn delete_video_ref<R>(
    id: VideoRefId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<bool>
where
    R: VideoReferenceReader + VideoReferenceWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    match repo.get_video_ref_by_id(id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get video reference: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.delete_video_ref(id) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to delete video reference: {e}");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{
        CategoryId, Rating, SearchProfile, SourceUrl, TagName, VideoTitle,
    };
    use crate::domain::video_ref::ContentFlags;
    use crate::forms::video_refs::SaveVideoRefFormPayload;
    use crate::repository::test::TestRepository;
    use chrono::DateTime;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            email: "test@example.com".into(),
            name: "Test".into(),
            roles: vec![SERVICE_ACCESS_ROLE.into()],
        }
    }

    fn sample_video(id: i32, source_url: &str) -> VideoReference {
        let ts = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        VideoReference {
            id: VideoRefId::new(id).unwrap(),
            title: VideoTitle::new("Video").unwrap(),
            source_url: SourceUrl::new(source_url).unwrap(),
            public_summary_html: None,
            pacing: None,
            hook_id: None,
            production_level: None,
            flags: ContentFlags::default(),
            rating: Rating::default(),
            search_profile: SearchProfile::new("profile").unwrap(),
            search_metadata: None,
            category_ids: vec![CategoryId::new(1).unwrap()],
            tags: vec![TagName::new("vfx").unwrap()],
            tutorials: vec![],
            created_at: ts,
            updated_at: ts,
        }
    }

    fn sample_payload() -> SaveVideoRefFormPayload {
        SaveVideoRefFormPayload {
            title: VideoTitle::new("Video").unwrap(),
            source_url: SourceUrl::new("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            public_summary_html: None,
            category_ids: vec![CategoryId::new(1).unwrap()],
            tags: vec![],
            pacing: None,
            hook_id: None,
            production_level: None,
            flags: ContentFlags::default(),
            rating: Rating::default(),
            search_profile: SearchProfile::new("profile").unwrap(),
            search_metadata: None,
            tutorials: vec![],
        }
    }

    #[test]
    fn search_by_source_url_filters_results() {
        let repo = TestRepository::new().with_video_refs(vec![
            sample_video(1, "https://youtu.be/dQw4w9WgXcQ"),
            sample_video(2, "https://www.tiktok.com/@u/video/1"),
        ]);
        let user = sample_user();

        let (total, items) =
            show_video_refs(None, Some("tiktok".to_string()), 1, &user, &repo).unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].id.get(), 2);
    }

    #[test]
    fn non_positive_search_id_matches_nothing() {
        let repo = TestRepository::new().with_video_refs(vec![sample_video(
            1,
            "https://youtu.be/dQw4w9WgXcQ",
        )]);
        let user = sample_user();

        let (total, items) = show_video_refs(Some(0), None, 1, &user, &repo).unwrap();
        assert_eq!(total, 0);
        assert!(items.is_empty());
    }

    #[test]
    fn updating_missing_video_is_not_found() {
        let repo = TestRepository::new();
        let user = sample_user();

        let err = save_video_ref(
            sample_payload(),
            Some(VideoRefId::new(5).unwrap()),
            &user,
            &repo,
        )
        .unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn creating_returns_new_id() {
        let repo = TestRepository::new();
        let user = sample_user();

        let id = save_video_ref(sample_payload(), None, &user, &repo).unwrap();
        assert_eq!(id.get(), 1);
    }

    #[test]
    fn delete_requires_existing_video() {
        let repo = TestRepository::new();
        let user = sample_user();

        let err = delete_video_ref(VideoRefId::new(1).unwrap(), &user, &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }
}
