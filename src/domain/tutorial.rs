use serde::{Deserialize, Serialize};

use crate::domain::types::{ClipSecond, TutorialId, TutorialLabel, TutorialUrl};

/// Tutorial resource that video references may point at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tutorial {
    pub id: TutorialId,
    pub label: TutorialLabel,
    pub tutorial_url: TutorialUrl,
}

/// Data required to insert a new [`Tutorial`] (inline "new" mode).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTutorial {
    pub label: TutorialLabel,
    pub tutorial_url: TutorialUrl,
}

/// Tutorial association stored on a saved video reference, optionally scoped
/// to a clip range. `start_sec <= end_sec` is deliberately not enforced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TutorialClip {
    pub tutorial: Tutorial,
    pub start_sec: Option<ClipSecond>,
    pub end_sec: Option<ClipSecond>,
}

/// Target of a tutorial association in an incoming save: either an existing
/// tutorial or an inline creation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TutorialRef {
    Existing(TutorialId),
    New(NewTutorial),
}

/// Ordered tutorial association carried by a video save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TutorialAttachment {
    pub tutorial: TutorialRef,
    pub start_sec: Option<ClipSecond>,
    pub end_sec: Option<ClipSecond>,
}
