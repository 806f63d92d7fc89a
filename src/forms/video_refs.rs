use std::collections::HashSet;

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::tutorial::{NewTutorial, TutorialAttachment, TutorialRef};
use crate::domain::types::{
    CategoryId, ClipSecond, HookId, Pacing, ProductionLevel, Rating, SearchProfile, SourceUrl,
    TagName, TutorialId, TutorialLabel, TutorialUrl, TypeConstraintError, VideoTitle,
};
use crate::domain::video_ref::{ContentFlags, NewVideoReference};

/// One tutorial entry of the save payload, in either `select` or `new` mode.
#[derive(Debug, Clone, Deserialize)]
pub struct TutorialEntryForm {
    #[serde(default = "TutorialEntryForm::default_mode")]
    pub mode: String,
    #[serde(default)]
    pub tutorial_id: Option<i32>,
    #[serde(default)]
    pub tutorial_url: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub start_sec: Option<i32>,
    #[serde(default)]
    pub end_sec: Option<i32>,
}

impl TutorialEntryForm {
    fn default_mode() -> String {
        "new".to_string()
    }
}

/// Full-document save payload for a video reference, submitted as JSON by the
/// admin form.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveVideoRefForm {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(url)]
    pub source_url: String,
    #[serde(default)]
    pub public_summary_html: Option<String>,
    #[validate(length(min = 1, message = "at least one category is required"))]
    pub category_ids: Vec<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pacing: Option<String>,
    #[serde(default)]
    pub hook_id: Option<i32>,
    #[serde(default)]
    pub production_level: Option<String>,
    #[serde(default)]
    pub has_visual_effects: bool,
    #[serde(default)]
    pub has_3d: bool,
    #[serde(default)]
    pub has_animations: bool,
    #[serde(default)]
    pub has_typography: bool,
    #[serde(default)]
    pub has_sound_design: bool,
    #[serde(default)]
    pub has_ai: bool,
    #[serde(default)]
    pub rating: Option<i32>,
    #[validate(length(min = 1))]
    pub search_profile: String,
    #[serde(default)]
    pub search_metadata: Option<String>,
    #[serde(default)]
    pub tutorials: Vec<TutorialEntryForm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveVideoRefFormPayload {
    pub title: VideoTitle,
    pub source_url: SourceUrl,
    pub public_summary_html: Option<String>,
    pub category_ids: Vec<CategoryId>,
    pub tags: Vec<TagName>,
    pub pacing: Option<Pacing>,
    pub hook_id: Option<HookId>,
    pub production_level: Option<ProductionLevel>,
    pub flags: ContentFlags,
    pub rating: Rating,
    pub search_profile: SearchProfile,
    pub search_metadata: Option<String>,
    pub tutorials: Vec<TutorialAttachment>,
}

impl SaveVideoRefFormPayload {
    pub fn into_new_video_ref(self) -> NewVideoReference {
        let now = Utc::now().naive_utc();
        NewVideoReference {
            title: self.title,
            source_url: self.source_url,
            public_summary_html: self.public_summary_html,
            pacing: self.pacing,
            hook_id: self.hook_id,
            production_level: self.production_level,
            flags: self.flags,
            rating: self.rating,
            search_profile: self.search_profile,
            search_metadata: self.search_metadata,
            category_ids: self.category_ids,
            tags: self.tags,
            tutorials: self.tutorials,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum SaveVideoRefFormError {
    #[error("Video reference form validation failed: {0}")]
    Validation(String),
    #[error("Video reference form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for SaveVideoRefFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for SaveVideoRefFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Convert a tutorial entry to an attachment.
///
/// Entries missing their mode's required fields are dropped rather than
/// rejected, matching how the editing surface filters unfilled rows before
/// submission. Negative clip offsets are ignored; the relation between
/// `start_sec` and `end_sec` is not checked.
fn convert_tutorial_entry(
    entry: TutorialEntryForm,
) -> Result<Option<TutorialAttachment>, SaveVideoRefFormError> {
    let start_sec = entry
        .start_sec
        .filter(|v| *v >= 0)
        .map(ClipSecond::new)
        .transpose()?;
    let end_sec = entry
        .end_sec
        .filter(|v| *v >= 0)
        .map(ClipSecond::new)
        .transpose()?;

    let tutorial = if entry.mode == "select" {
        match entry.tutorial_id {
            Some(id) => TutorialRef::Existing(TutorialId::new(id)?),
            None => return Ok(None),
        }
    } else {
        let (Some(url), Some(label)) = (
            non_empty(entry.tutorial_url),
            non_empty(entry.label),
        ) else {
            return Ok(None);
        };
        TutorialRef::New(NewTutorial {
            label: TutorialLabel::new(label)?,
            tutorial_url: TutorialUrl::new(url)?,
        })
    };

    Ok(Some(TutorialAttachment {
        tutorial,
        start_sec,
        end_sec,
    }))
}

impl TryFrom<SaveVideoRefForm> for SaveVideoRefFormPayload {
    type Error = SaveVideoRefFormError;

    fn try_from(value: SaveVideoRefForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let mut category_ids = Vec::with_capacity(value.category_ids.len());
        let mut seen_categories = HashSet::new();
        for raw in value.category_ids {
            let id = CategoryId::new(raw)?;
            if seen_categories.insert(id) {
                category_ids.push(id);
            }
        }

        // Case-insensitive dedup; the first spelling wins.
        let mut tags = Vec::with_capacity(value.tags.len());
        let mut seen_tags = HashSet::new();
        for raw in value.tags {
            let tag = TagName::new(raw)?;
            if seen_tags.insert(tag.folded()) {
                tags.push(tag);
            }
        }

        let mut tutorials = Vec::with_capacity(value.tutorials.len());
        for entry in value.tutorials {
            if let Some(attachment) = convert_tutorial_entry(entry)? {
                tutorials.push(attachment);
            }
        }

        Ok(Self {
            title: VideoTitle::new(value.title)?,
            source_url: SourceUrl::new(value.source_url)?,
            public_summary_html: non_empty(value.public_summary_html),
            category_ids,
            tags,
            pacing: non_empty(value.pacing)
                .map(|v| Pacing::try_from(v.as_str()))
                .transpose()?,
            hook_id: value.hook_id.map(HookId::new).transpose()?,
            production_level: non_empty(value.production_level)
                .map(|v| ProductionLevel::try_from(v.as_str()))
                .transpose()?,
            flags: ContentFlags {
                has_visual_effects: value.has_visual_effects,
                has_3d: value.has_3d,
                has_animations: value.has_animations,
                has_typography: value.has_typography,
                has_sound_design: value.has_sound_design,
                has_ai: value.has_ai,
            },
            rating: value.rating.map(Rating::new).transpose()?.unwrap_or_default(),
            search_profile: SearchProfile::new(value.search_profile)?,
            search_metadata: non_empty(value.search_metadata),
            tutorials,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> SaveVideoRefForm {
        serde_json::from_str(
            r#"{
                "title": "Kinetic type breakdown",
                "source_url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
                "category_ids": [1, 2],
                "tags": [],
                "search_profile": "kinetic typography breakdown"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn minimal_form_converts_with_defaults() {
        let payload: SaveVideoRefFormPayload = base_form().try_into().unwrap();
        assert_eq!(payload.rating.get(), 1);
        assert_eq!(payload.pacing, None);
        assert_eq!(payload.flags, ContentFlags::default());
        assert_eq!(payload.category_ids.len(), 2);
    }

    #[test]
    fn requires_at_least_one_category() {
        let mut form = base_form();
        form.category_ids = vec![];
        let payload: Result<SaveVideoRefFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }

    #[test]
    fn tags_dedup_case_insensitively_keeping_first_spelling() {
        let mut form = base_form();
        form.tags = vec![
            "VFX".to_string(),
            "vfx".to_string(),
            "Houdini".to_string(),
        ];
        let payload: SaveVideoRefFormPayload = form.try_into().unwrap();
        let names: Vec<&str> = payload.tags.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, vec!["VFX", "Houdini"]);
    }

    #[test]
    fn invalid_tag_is_rejected() {
        let mut form = base_form();
        form.tags = vec!["two words".to_string()];
        let payload: Result<SaveVideoRefFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }

    #[test]
    fn unfilled_tutorial_entries_are_dropped_in_order() {
        let mut form = base_form();
        form.tutorials = serde_json::from_str(
            r#"[
                {"mode": "select"},
                {"mode": "new", "tutorial_url": "https://example.com/t1", "label": "Part 1"},
                {"mode": "new", "tutorial_url": "", "label": "incomplete"},
                {"mode": "select", "tutorial_id": 7, "start_sec": 30, "end_sec": 10}
            ]"#,
        )
        .unwrap();

        let payload: SaveVideoRefFormPayload = form.try_into().unwrap();
        assert_eq!(payload.tutorials.len(), 2);
        assert!(matches!(
            payload.tutorials[0].tutorial,
            TutorialRef::New(_)
        ));
        assert!(matches!(
            payload.tutorials[1].tutorial,
            TutorialRef::Existing(id) if id.get() == 7
        ));
        // The inverted clip range is kept as-is.
        assert_eq!(payload.tutorials[1].start_sec.unwrap().get(), 30);
        assert_eq!(payload.tutorials[1].end_sec.unwrap().get(), 10);
    }

    #[test]
    fn negative_clip_offsets_are_ignored() {
        let mut form = base_form();
        form.tutorials = serde_json::from_str(
            r#"[{"mode": "select", "tutorial_id": 3, "start_sec": -5, "end_sec": 20}]"#,
        )
        .unwrap();

        let payload: SaveVideoRefFormPayload = form.try_into().unwrap();
        assert_eq!(payload.tutorials[0].start_sec, None);
        assert_eq!(payload.tutorials[0].end_sec.unwrap().get(), 20);
    }

    #[test]
    fn blank_optional_selects_become_none() {
        let mut form = base_form();
        form.pacing = Some("".to_string());
        form.production_level = Some(" ".to_string());
        let payload: SaveVideoRefFormPayload = form.try_into().unwrap();
        assert_eq!(payload.pacing, None);
        assert_eq!(payload.production_level, None);
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let mut form = base_form();
        form.rating = Some(11);
        let payload: Result<SaveVideoRefFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }
}
