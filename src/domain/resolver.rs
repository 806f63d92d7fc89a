//! Platform detection and video-id extraction for catalog URLs.
//!
//! Pure string/regex computation: no I/O, deterministic, same input always
//! yields the same output. Multiple URL shapes exist per platform (desktop,
//! mobile, shortened); the pattern tables are tried in order and the first
//! match wins.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use url::Url;

use crate::domain::types::TypeConstraintError;

/// Video-hosting services recognized by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Youtube,
    Tiktok,
    Instagram,
    Facebook,
}

impl Platform {
    /// String representation used in persistence and JSON payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Tiktok => "tiktok",
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Platform {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "youtube" => Ok(Self::Youtube),
            "tiktok" => Ok(Self::Tiktok),
            "instagram" => Ok(Self::Instagram),
            "facebook" => Ok(Self::Facebook),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "platform: {other}"
            ))),
        }
    }
}

/// Ephemeral result of a successful resolution; drives preview rendering and
/// is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVideoRef {
    pub platform: Platform,
    pub video_id: String,
    /// The original input, untrimmed.
    pub source_url: String,
}

/// Failure modes of [`resolve`]. Both are user-facing and retriable by
/// correcting the URL; neither is fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error(
        "Could not detect platform from URL. Supported platforms: YouTube, TikTok, Instagram, Facebook"
    )]
    UnknownPlatform,
    #[error("Could not extract video ID from URL for platform: {0}")]
    IdNotFound(Platform),
}

static YOUTUBE_PATTERNS: Lazy<[Regex; 5]> = Lazy::new(|| {
    [
        Regex::new(r"youtube\.com/watch\?v=([a-zA-Z0-9_-]{11})").expect("valid youtube regex"),
        Regex::new(r"youtu\.be/([a-zA-Z0-9_-]{11})").expect("valid youtube regex"),
        Regex::new(r"youtube\.com/shorts/([a-zA-Z0-9_-]{11})").expect("valid youtube regex"),
        Regex::new(r"youtube\.com/embed/([a-zA-Z0-9_-]{11})").expect("valid youtube regex"),
        Regex::new(r"m\.youtube\.com/watch\?v=([a-zA-Z0-9_-]{11})").expect("valid youtube regex"),
    ]
});

static TIKTOK_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"tiktok\.com/@[^/]+/video/(\d+)").expect("valid tiktok regex"),
        Regex::new(r"m\.tiktok\.com/v/(\d+)").expect("valid tiktok regex"),
    ]
});

static INSTAGRAM_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"instagram\.com/p/([a-zA-Z0-9_-]+)").expect("valid instagram regex"),
        Regex::new(r"instagram\.com/reel/([a-zA-Z0-9_-]+)").expect("valid instagram regex"),
        Regex::new(r"instagram\.com/tv/([a-zA-Z0-9_-]+)").expect("valid instagram regex"),
    ]
});

// The capture group holding the id differs per form: the videos/posts forms
// capture the user segment first.
static FACEBOOK_PATTERNS: Lazy<[(Regex, usize); 4]> = Lazy::new(|| {
    [
        (
            Regex::new(r"facebook\.com/reel/([a-zA-Z0-9_-]+)").expect("valid facebook regex"),
            1,
        ),
        (
            Regex::new(r"facebook\.com/watch/\?v=(\d+)").expect("valid facebook regex"),
            1,
        ),
        (
            Regex::new(r"facebook\.com/([^/]+)/videos/(\d+)").expect("valid facebook regex"),
            2,
        ),
        (
            Regex::new(r"facebook\.com/([^/]+)/posts/(\d+)").expect("valid facebook regex"),
            2,
        ),
    ]
});

/// Classify a raw URL string by substring containment over the lower-cased,
/// trimmed input. Empty or unrecognized input yields `None`.
pub fn detect_platform(url: &str) -> Option<Platform> {
    let lowered = url.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    if lowered.contains("youtube.com") || lowered.contains("youtu.be") {
        Some(Platform::Youtube)
    } else if lowered.contains("tiktok.com") {
        Some(Platform::Tiktok)
    } else if lowered.contains("instagram.com") {
        Some(Platform::Instagram)
    } else if lowered.contains("facebook.com") {
        Some(Platform::Facebook)
    } else {
        None
    }
}

/// Resolve a raw URL into a platform and platform-native video id.
///
/// Detection lower-cases the input; extraction runs over the original string,
/// so a mixed-case host can detect successfully and still fail extraction.
pub fn resolve(url: &str) -> Result<ResolvedVideoRef, ResolutionError> {
    let platform = detect_platform(url).ok_or(ResolutionError::UnknownPlatform)?;

    let video_id = match platform {
        Platform::Youtube => first_capture(YOUTUBE_PATTERNS.iter(), url),
        Platform::Tiktok => first_capture(TIKTOK_PATTERNS.iter(), url),
        Platform::Instagram => first_capture(INSTAGRAM_PATTERNS.iter(), url),
        Platform::Facebook => extract_facebook_id(url),
    }
    .ok_or(ResolutionError::IdNotFound(platform))?;

    Ok(ResolvedVideoRef {
        platform,
        video_id,
        source_url: url.to_string(),
    })
}

fn first_capture<'a>(patterns: impl Iterator<Item = &'a Regex>, input: &str) -> Option<String> {
    for pattern in patterns {
        if let Some(captures) = pattern.captures(input) {
            if let Some(group) = captures.get(1) {
                return Some(group.as_str().to_string());
            }
        }
    }
    None
}

/// Canonicalize a Facebook URL before matching.
///
/// A `/watch` path with a `v` query parameter becomes
/// `https://www.facebook.com/watch/?v=<v>`; any other parseable URL is reduced
/// to its path with the query string dropped. Unparseable input is used
/// unchanged.
fn normalize_facebook_url(input: &str) -> String {
    match Url::parse(input) {
        Ok(parsed) => {
            let path = parsed.path();
            if path.contains("/watch") {
                if let Some((_, v)) = parsed.query_pairs().find(|(key, _)| key == "v") {
                    return format!("https://www.facebook.com/watch/?v={v}");
                }
            }
            format!("https://www.facebook.com{path}")
        }
        Err(e) => {
            log::warn!("Failed to normalize Facebook URL {input}: {e}");
            input.to_string()
        }
    }
}

fn extract_facebook_id(input: &str) -> Option<String> {
    let normalized = normalize_facebook_url(input);
    for (pattern, group) in FACEBOOK_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(&normalized) {
            if let Some(found) = captures.get(*group) {
                return Some(found.as_str().to_string());
            }
        }
    }
    None
}
