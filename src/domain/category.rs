use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName, CategorySlug, SortOrder};

/// Canonical category record.
///
/// `parent_id` of `None` denotes a root category; children are derived by the
/// category tree, never stored on the record itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub parent_id: Option<CategoryId>,
    pub order: SortOrder,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub parent_id: Option<CategoryId>,
    pub order: SortOrder,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
