use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::tutorial::TutorialClip;
use crate::domain::types::{
    CategoryId, HookId, Pacing, ProductionLevel, Rating, SearchProfile, SourceUrl, TagName,
    TypeConstraintError, VideoRefId, VideoTitle,
};
use crate::domain::video_ref::{
    ContentFlags, NewVideoReference as DomainNewVideoReference, VideoReference,
};

/// Diesel model representing the `video_references` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::video_references)]
pub struct VideoRef {
    pub id: i32,
    pub title: String,
    pub source_url: String,
    pub public_summary_html: Option<String>,
    pub pacing: Option<String>,
    pub hook_id: Option<i32>,
    pub production_level: Option<String>,
    pub has_visual_effects: bool,
    pub has_3d: bool,
    pub has_animations: bool,
    pub has_typography: bool,
    pub has_sound_design: bool,
    pub has_ai: bool,
    pub rating: i32,
    pub search_profile: String,
    pub search_metadata: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl VideoRef {
    /// Assemble the domain record from the row plus its association sets.
    pub fn into_domain(
        self,
        category_ids: Vec<CategoryId>,
        tags: Vec<TagName>,
        tutorials: Vec<TutorialClip>,
    ) -> Result<VideoReference, TypeConstraintError> {
        Ok(VideoReference {
            id: VideoRefId::new(self.id)?,
            title: VideoTitle::new(self.title)?,
            source_url: SourceUrl::new(self.source_url)?,
            public_summary_html: self.public_summary_html,
            pacing: self.pacing.map(Pacing::try_from).transpose()?,
            hook_id: self.hook_id.map(HookId::new).transpose()?,
            production_level: self
                .production_level
                .map(ProductionLevel::try_from)
                .transpose()?,
            flags: ContentFlags {
                has_visual_effects: self.has_visual_effects,
                has_3d: self.has_3d,
                has_animations: self.has_animations,
                has_typography: self.has_typography,
                has_sound_design: self.has_sound_design,
                has_ai: self.has_ai,
            },
            rating: Rating::new(self.rating)?,
            search_profile: SearchProfile::new(self.search_profile)?,
            search_metadata: self.search_metadata,
            category_ids,
            tags,
            tutorials,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insertable form of the `video_references` row (associations are synced
/// separately by the repository).
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::video_references)]
pub struct NewVideoRef {
    pub title: String,
    pub source_url: String,
    pub public_summary_html: Option<String>,
    pub pacing: Option<String>,
    pub hook_id: Option<i32>,
    pub production_level: Option<String>,
    pub has_visual_effects: bool,
    pub has_3d: bool,
    pub has_animations: bool,
    pub has_typography: bool,
    pub has_sound_design: bool,
    pub has_ai: bool,
    pub rating: i32,
    pub search_profile: String,
    pub search_metadata: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<&DomainNewVideoReference> for NewVideoRef {
    fn from(video: &DomainNewVideoReference) -> Self {
        Self {
            title: video.title.as_str().to_string(),
            source_url: video.source_url.as_str().to_string(),
            public_summary_html: video.public_summary_html.clone(),
            pacing: video.pacing.map(|p| p.as_str().to_string()),
            hook_id: video.hook_id.map(HookId::get),
            production_level: video.production_level.map(|p| p.as_str().to_string()),
            has_visual_effects: video.flags.has_visual_effects,
            has_3d: video.flags.has_3d,
            has_animations: video.flags.has_animations,
            has_typography: video.flags.has_typography,
            has_sound_design: video.flags.has_sound_design,
            has_ai: video.flags.has_ai,
            rating: video.rating.get(),
            search_profile: video.search_profile.as_str().to_string(),
            search_metadata: video.search_metadata.clone(),
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}

/// Insertable link row for the category many-to-many.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::video_reference_categories)]
pub struct NewVideoRefCategory {
    pub video_ref_id: i32,
    pub category_id: i32,
}

/// Insertable link row for the tag many-to-many.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::video_reference_tags)]
pub struct NewVideoRefTag {
    pub video_ref_id: i32,
    pub tag_id: i32,
}

/// Insertable tutorial association row.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::video_reference_tutorials)]
pub struct NewVideoRefTutorial {
    pub video_ref_id: i32,
    pub tutorial_id: i32,
    pub start_sec: Option<i32>,
    pub end_sec: Option<i32>,
    pub position: i32,
}
