use diesel::prelude::*;

use crate::domain::hook::Hook as DomainHook;
use crate::domain::types::{HookId, HookName, TypeConstraintError};

/// Diesel model representing the `hooks` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::hooks)]
pub struct Hook {
    pub id: i32,
    pub name: String,
}

impl TryFrom<Hook> for DomainHook {
    type Error = TypeConstraintError;

    fn try_from(hook: Hook) -> Result<Self, Self::Error> {
        Ok(Self {
            id: HookId::new(hook.id)?,
            name: HookName::new(hook.name)?,
        })
    }
}
