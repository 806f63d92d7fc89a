use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::tag::Tag;
use crate::domain::types::TagName;
use crate::models::tag::Tag as DbTag;
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, TagListQuery, TagReader, TagWriter,
};

/// Resolve tag names to rows inside an existing transaction, inserting the
/// names that do not exist yet. Lookup is case-insensitive; the stored
/// spelling wins for existing tags.
pub(crate) fn resolve_tags(
    conn: &mut SqliteConnection,
    names: &[TagName],
) -> Result<Vec<DbTag>, RepositoryError> {
    use crate::schema::tags;

    let mut by_folded: HashMap<String, DbTag> = tags::table
        .load::<DbTag>(conn)?
        .into_iter()
        .map(|tag| (tag.name.to_lowercase(), tag))
        .collect();

    let mut resolved = Vec::with_capacity(names.len());
    for name in names {
        let folded = name.folded();
        let row = match by_folded.get(&folded) {
            Some(existing) => existing.clone(),
            None => {
                let inserted = diesel::insert_into(tags::table)
                    .values(tags::name.eq(name.as_str()))
                    .get_result::<DbTag>(conn)?;
                by_folded.insert(folded, inserted.clone());
                inserted
            }
        };
        resolved.push(row);
    }

    Ok(resolved)
}

impl TagReader for DieselRepository {
    fn list_tags(&self, query: TagListQuery) -> RepositoryResult<Vec<Tag>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let mut items = tags::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(search) = &query.search {
            // SQLite LIKE is case-insensitive for ASCII, which matches the
            // case-insensitive tag namespace.
            items = items.filter(tags::name.like(format!("%{search}%")));
        }

        let items = items
            .order(tags::name.asc())
            .load::<DbTag>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Tag>, _>>()?;

        Ok(items)
    }
}

impl TagWriter for DieselRepository {
    fn ensure_tags(&self, names: &[TagName]) -> RepositoryResult<Vec<Tag>> {
        let mut conn = self.conn()?;

        conn.transaction::<Vec<Tag>, RepositoryError, _>(|conn| {
            resolve_tags(conn, names)?
                .into_iter()
                .map(|row| row.try_into().map_err(RepositoryError::from))
                .collect()
        })
    }
}
