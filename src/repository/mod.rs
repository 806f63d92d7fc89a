use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::hook::Hook;
use crate::domain::tag::Tag;
use crate::domain::tutorial::Tutorial;
use crate::domain::types::{
    CategoryId, CategoryName, CategorySlug, SortOrder, TagName, TutorialId, VideoRefId,
};
use crate::domain::video_ref::{NewVideoReference, VideoReference};

pub mod category;
pub mod errors;
pub mod hook;
pub mod tag;
pub mod tutorial;
pub mod video_ref;

pub use errors::{RepositoryError, RepositoryResult};

/// Page size used by listing pages unless a caller overrides it.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 25;

/// Pagination parameters for listing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing or searching video references.
#[derive(Debug, Clone, Default)]
pub struct VideoRefListQuery {
    /// Exact-id search.
    pub id: Option<VideoRefId>,
    /// Source-URL search (substring match).
    pub source_url: Option<String>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl VideoRefListQuery {
    pub fn id(mut self, id: VideoRefId) -> Self {
        self.id = Some(id);
        self
    }
    pub fn source_url(mut self, source_url: impl Into<String>) -> Self {
        self.source_url = Some(source_url.into());
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing tags.
#[derive(Debug, Clone, Default)]
pub struct TagListQuery {
    /// Name substring filter used by the autocomplete endpoint.
    pub search: Option<String>,
}

impl TagListQuery {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List every category; the category tree is built client to this call.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Whether any category references `id` as its parent.
    fn has_children(&self, id: CategoryId) -> RepositoryResult<bool>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Update name, slug, parent and ordering of a category.
    fn update_category(
        &self,
        id: CategoryId,
        name: &CategoryName,
        slug: &CategorySlug,
        parent_id: Option<CategoryId>,
        order: SortOrder,
    ) -> RepositoryResult<usize>;
    /// Delete a category by id. Guard checks live in the service layer.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for video references.
pub trait VideoReferenceReader {
    /// List video references matching the supplied query parameters.
    fn list_video_refs(
        &self,
        query: VideoRefListQuery,
    ) -> RepositoryResult<(usize, Vec<VideoReference>)>;
    /// Retrieve a video reference with its associations.
    fn get_video_ref_by_id(&self, id: VideoRefId) -> RepositoryResult<Option<VideoReference>>;
    /// Number of video references attached to a category.
    fn count_for_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Write operations for video references.
pub trait VideoReferenceWriter {
    /// Persist a new video reference together with its associations.
    fn create_video_ref(&self, video: &NewVideoReference) -> RepositoryResult<VideoRefId>;
    /// Replace a video reference wholesale (full-document update).
    fn update_video_ref(
        &self,
        id: VideoRefId,
        video: &NewVideoReference,
    ) -> RepositoryResult<usize>;
    /// Delete a video reference and its association rows.
    fn delete_video_ref(&self, id: VideoRefId) -> RepositoryResult<usize>;
}

/// Read-only operations for tag entities.
pub trait TagReader {
    /// List tags using the supplied query options.
    fn list_tags(&self, query: TagListQuery) -> RepositoryResult<Vec<Tag>>;
}

/// Write operations for tag entities.
pub trait TagWriter {
    /// Resolve tag names to rows, inserting the ones that do not exist yet.
    ///
    /// Lookup is case-insensitive; the stored spelling wins over the incoming
    /// one for existing tags.
    fn ensure_tags(&self, names: &[TagName]) -> RepositoryResult<Vec<Tag>>;
}

/// Read-only operations for tutorial entities.
pub trait TutorialReader {
    fn list_tutorials(&self) -> RepositoryResult<Vec<Tutorial>>;
    fn get_tutorial_by_id(&self, id: TutorialId) -> RepositoryResult<Option<Tutorial>>;
}

/// Read-only operations for hook entities.
pub trait HookReader {
    fn list_hooks(&self) -> RepositoryResult<Vec<Hook>>;
}
