use diesel::prelude::*;

use crate::domain::tutorial::{NewTutorial as DomainNewTutorial, Tutorial as DomainTutorial};
use crate::domain::types::{TutorialId, TutorialLabel, TutorialUrl, TypeConstraintError};

/// Diesel model representing the `tutorials` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::tutorials)]
pub struct Tutorial {
    pub id: i32,
    pub label: String,
    pub tutorial_url: String,
}

/// Insertable form of [`Tutorial`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::tutorials)]
pub struct NewTutorial {
    pub label: String,
    pub tutorial_url: String,
}

impl TryFrom<Tutorial> for DomainTutorial {
    type Error = TypeConstraintError;

    fn try_from(tutorial: Tutorial) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TutorialId::new(tutorial.id)?,
            label: TutorialLabel::new(tutorial.label)?,
            tutorial_url: TutorialUrl::new(tutorial.tutorial_url)?,
        })
    }
}

impl From<DomainNewTutorial> for NewTutorial {
    fn from(tutorial: DomainNewTutorial) -> Self {
        Self {
            label: tutorial.label.into_inner(),
            tutorial_url: tutorial.tutorial_url.into_inner(),
        }
    }
}
