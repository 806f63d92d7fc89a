use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::tutorial::{TutorialAttachment, TutorialClip};
use crate::domain::types::{
    CategoryId, HookId, Pacing, ProductionLevel, Rating, SearchProfile, SourceUrl, TagName,
    VideoRefId, VideoTitle,
};

/// Content flags describing what a video makes use of.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentFlags {
    pub has_visual_effects: bool,
    pub has_3d: bool,
    pub has_animations: bool,
    pub has_typography: bool,
    pub has_sound_design: bool,
    pub has_ai: bool,
}

/// A catalogued video reference with its associations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoReference {
    pub id: VideoRefId,
    pub title: VideoTitle,
    pub source_url: SourceUrl,
    /// Sanitized-by-convention HTML fragment from the editing surface; stored
    /// and rendered opaquely.
    pub public_summary_html: Option<String>,
    pub pacing: Option<Pacing>,
    pub hook_id: Option<HookId>,
    pub production_level: Option<ProductionLevel>,
    pub flags: ContentFlags,
    pub rating: Rating,
    pub search_profile: SearchProfile,
    pub search_metadata: Option<String>,
    /// At least one category; many-to-many.
    pub category_ids: Vec<CategoryId>,
    pub tags: Vec<TagName>,
    pub tutorials: Vec<TutorialClip>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full-document payload for creating or replacing a [`VideoReference`].
///
/// Saves carry the complete association sets; the repository re-syncs the
/// stored links wholesale on update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewVideoReference {
    pub title: VideoTitle,
    pub source_url: SourceUrl,
    pub public_summary_html: Option<String>,
    pub pacing: Option<Pacing>,
    pub hook_id: Option<HookId>,
    pub production_level: Option<ProductionLevel>,
    pub flags: ContentFlags,
    pub rating: Rating,
    pub search_profile: SearchProfile,
    pub search_metadata: Option<String>,
    pub category_ids: Vec<CategoryId>,
    pub tags: Vec<TagName>,
    pub tutorials: Vec<TutorialAttachment>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
