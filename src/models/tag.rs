use diesel::prelude::*;

use crate::domain::tag::Tag as DomainTag;
use crate::domain::types::{TagId, TagName, TypeConstraintError};

/// Diesel model representing the `tags` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::tags)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

/// Insertable form of [`Tag`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::tags)]
pub struct NewTag {
    pub name: String,
}

impl TryFrom<Tag> for DomainTag {
    type Error = TypeConstraintError;

    fn try_from(tag: Tag) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TagId::new(tag.id)?,
            name: TagName::new(tag.name)?,
        })
    }
}
