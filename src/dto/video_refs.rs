use serde::Serialize;

use crate::domain::category_tree::CategoryTree;
use crate::domain::video_ref::VideoReference;

/// One rendered row of the video reference table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VideoRefRow {
    pub id: i32,
    pub title: String,
    pub source_url: String,
    /// Display names of the attached categories; dangling ids are dropped.
    pub category_names: Vec<String>,
    pub tags: Vec<String>,
    pub rating: i32,
}

pub fn list_rows(videos: &[VideoReference], tree: &CategoryTree) -> Vec<VideoRefRow> {
    videos
        .iter()
        .map(|video| VideoRefRow {
            id: video.id.get(),
            title: video.title.as_str().to_string(),
            source_url: video.source_url.as_str().to_string(),
            category_names: video
                .category_ids
                .iter()
                .filter_map(|id| tree.find(*id))
                .map(|category| category.name.as_str().to_string())
                .collect(),
            tags: video.tags.iter().map(|t| t.as_str().to_string()).collect(),
            rating: video.rating.get(),
        })
        .collect()
}
