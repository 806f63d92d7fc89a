use diesel::prelude::*;

use crate::domain::hook::Hook;
use crate::models::hook::Hook as DbHook;
use crate::repository::{DieselRepository, HookReader, RepositoryResult};

impl HookReader for DieselRepository {
    fn list_hooks(&self) -> RepositoryResult<Vec<Hook>> {
        use crate::schema::hooks;

        let mut conn = self.conn()?;

        let items = hooks::table
            .order(hooks::name.asc())
            .load::<DbHook>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Hook>, _>>()?;

        Ok(items)
    }
}
