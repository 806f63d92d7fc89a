use serde::{Deserialize, Serialize};

use crate::domain::types::{TagId, TagName};

/// Catalog tag. Name uniqueness is case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub id: TagId,
    pub name: TagName,
}

/// Data required to insert a new [`Tag`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTag {
    pub name: TagName,
}
