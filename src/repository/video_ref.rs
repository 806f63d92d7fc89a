use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::tutorial::{Tutorial, TutorialClip, TutorialRef};
use crate::domain::types::{
    CategoryId, ClipSecond, HookId, TagName, TutorialId, TutorialLabel, TutorialUrl, VideoRefId,
};
use crate::domain::video_ref::{NewVideoReference, VideoReference};
use crate::models::tutorial::Tutorial as DbTutorial;
use crate::models::video_ref::{
    NewVideoRef as DbNewVideoRef, NewVideoRefCategory, NewVideoRefTag, NewVideoRefTutorial,
    VideoRef as DbVideoRef,
};
use crate::repository::tag::resolve_tags;
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, VideoRefListQuery, VideoReferenceReader,
    VideoReferenceWriter,
};

type AssociationMaps = (
    HashMap<i32, Vec<CategoryId>>,
    HashMap<i32, Vec<TagName>>,
    HashMap<i32, Vec<TutorialClip>>,
);

/// Batch-load the association sets for a page of video rows.
fn load_associations(
    conn: &mut SqliteConnection,
    ids: &[i32],
) -> Result<AssociationMaps, RepositoryError> {
    use crate::schema::{tags, tutorials, video_reference_categories, video_reference_tags,
        video_reference_tutorials};

    let mut categories: HashMap<i32, Vec<CategoryId>> = HashMap::new();
    let mut tag_names: HashMap<i32, Vec<TagName>> = HashMap::new();
    let mut clips: HashMap<i32, Vec<TutorialClip>> = HashMap::new();

    if ids.is_empty() {
        return Ok((categories, tag_names, clips));
    }

    let category_rows: Vec<(i32, i32)> = video_reference_categories::table
        .filter(video_reference_categories::video_ref_id.eq_any(ids))
        .order((
            video_reference_categories::video_ref_id.asc(),
            video_reference_categories::category_id.asc(),
        ))
        .load(conn)?;
    for (video_ref_id, category_id) in category_rows {
        categories
            .entry(video_ref_id)
            .or_default()
            .push(CategoryId::new(category_id)?);
    }

    let tag_rows: Vec<(i32, String)> = video_reference_tags::table
        .inner_join(tags::table)
        .filter(video_reference_tags::video_ref_id.eq_any(ids))
        .order(tags::name.asc())
        .select((video_reference_tags::video_ref_id, tags::name))
        .load(conn)?;
    for (video_ref_id, name) in tag_rows {
        tag_names
            .entry(video_ref_id)
            .or_default()
            .push(TagName::new(name)?);
    }

    let clip_rows: Vec<(i32, Option<i32>, Option<i32>, i32, String, String)> =
        video_reference_tutorials::table
            .inner_join(tutorials::table)
            .filter(video_reference_tutorials::video_ref_id.eq_any(ids))
            .order((
                video_reference_tutorials::video_ref_id.asc(),
                video_reference_tutorials::position.asc(),
            ))
            .select((
                video_reference_tutorials::video_ref_id,
                video_reference_tutorials::start_sec,
                video_reference_tutorials::end_sec,
                tutorials::id,
                tutorials::label,
                tutorials::tutorial_url,
            ))
            .load(conn)?;
    for (video_ref_id, start_sec, end_sec, tutorial_id, label, tutorial_url) in clip_rows {
        clips.entry(video_ref_id).or_default().push(TutorialClip {
            tutorial: Tutorial {
                id: TutorialId::new(tutorial_id)?,
                label: TutorialLabel::new(label)?,
                tutorial_url: TutorialUrl::new(tutorial_url)?,
            },
            start_sec: start_sec.map(ClipSecond::new).transpose()?,
            end_sec: end_sec.map(ClipSecond::new).transpose()?,
        });
    }

    Ok((categories, tag_names, clips))
}

/// Replace every association row of a video reference with the payload's sets.
///
/// Saves are full-document, so the stored links are synced wholesale rather
/// than diffed.
fn replace_associations(
    conn: &mut SqliteConnection,
    video_ref_id: i32,
    video: &NewVideoReference,
) -> Result<(), RepositoryError> {
    use crate::schema::{categories, tutorials, video_reference_categories, video_reference_tags,
        video_reference_tutorials};

    let category_ids: Vec<i32> = video.category_ids.iter().map(|id| id.get()).collect();
    let known: i64 = categories::table
        .filter(categories::id.eq_any(&category_ids))
        .count()
        .get_result(conn)?;
    if known as usize != category_ids.len() {
        return Err(RepositoryError::Validation(
            "one or more categories do not exist".to_string(),
        ));
    }

    diesel::delete(
        video_reference_categories::table
            .filter(video_reference_categories::video_ref_id.eq(video_ref_id)),
    )
    .execute(conn)?;
    let category_links: Vec<NewVideoRefCategory> = category_ids
        .iter()
        .map(|&category_id| NewVideoRefCategory {
            video_ref_id,
            category_id,
        })
        .collect();
    diesel::insert_into(video_reference_categories::table)
        .values(&category_links)
        .execute(conn)?;

    diesel::delete(
        video_reference_tags::table.filter(video_reference_tags::video_ref_id.eq(video_ref_id)),
    )
    .execute(conn)?;
    let tag_links: Vec<NewVideoRefTag> = resolve_tags(conn, &video.tags)?
        .into_iter()
        .map(|tag| NewVideoRefTag {
            video_ref_id,
            tag_id: tag.id,
        })
        .collect();
    diesel::insert_into(video_reference_tags::table)
        .values(&tag_links)
        .execute(conn)?;

    diesel::delete(
        video_reference_tutorials::table
            .filter(video_reference_tutorials::video_ref_id.eq(video_ref_id)),
    )
    .execute(conn)?;
    for (position, attachment) in video.tutorials.iter().enumerate() {
        let tutorial_id = match &attachment.tutorial {
            TutorialRef::Existing(id) => {
                let exists: i64 = tutorials::table
                    .filter(tutorials::id.eq(id.get()))
                    .count()
                    .get_result(conn)?;
                if exists == 0 {
                    return Err(RepositoryError::Validation(format!(
                        "tutorial {id} does not exist"
                    )));
                }
                id.get()
            }
            TutorialRef::New(new_tutorial) => {
                let inserted = diesel::insert_into(tutorials::table)
                    .values((
                        tutorials::label.eq(new_tutorial.label.as_str()),
                        tutorials::tutorial_url.eq(new_tutorial.tutorial_url.as_str()),
                    ))
                    .get_result::<DbTutorial>(conn)?;
                inserted.id
            }
        };

        diesel::insert_into(video_reference_tutorials::table)
            .values(NewVideoRefTutorial {
                video_ref_id,
                tutorial_id,
                start_sec: attachment.start_sec.map(ClipSecond::get),
                end_sec: attachment.end_sec.map(ClipSecond::get),
                position: position as i32,
            })
            .execute(conn)?;
    }

    Ok(())
}

impl VideoReferenceReader for DieselRepository {
    fn list_video_refs(
        &self,
        query: VideoRefListQuery,
    ) -> RepositoryResult<(usize, Vec<VideoReference>)> {
        use crate::schema::video_references;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = video_references::table.into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(id) = query.id {
                items = items.filter(video_references::id.eq(id.get()));
            }
            if let Some(source_url) = &query.source_url {
                items = items.filter(video_references::source_url.like(format!("%{source_url}%")));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let rows = items
            .order(video_references::id.desc())
            .load::<DbVideoRef>(&mut conn)?;

        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let (mut categories, mut tag_names, mut clips) = load_associations(&mut conn, &ids)?;

        let items = rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                row.into_domain(
                    categories.remove(&id).unwrap_or_default(),
                    tag_names.remove(&id).unwrap_or_default(),
                    clips.remove(&id).unwrap_or_default(),
                )
            })
            .collect::<Result<Vec<VideoReference>, _>>()?;

        Ok((total, items))
    }

    fn get_video_ref_by_id(&self, id: VideoRefId) -> RepositoryResult<Option<VideoReference>> {
        use crate::schema::video_references;

        let mut conn = self.conn()?;

        let row = video_references::table
            .filter(video_references::id.eq(id.get()))
            .first::<DbVideoRef>(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let row_id = row.id;
        let (mut categories, mut tag_names, mut clips) = load_associations(&mut conn, &[row_id])?;
        let video = row.into_domain(
            categories.remove(&row_id).unwrap_or_default(),
            tag_names.remove(&row_id).unwrap_or_default(),
            clips.remove(&row_id).unwrap_or_default(),
        )?;

        Ok(Some(video))
    }

    fn count_for_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::video_reference_categories;

        let mut conn = self.conn()?;

        let count: i64 = video_reference_categories::table
            .filter(video_reference_categories::category_id.eq(id.get()))
            .count()
            .get_result(&mut conn)?;

        Ok(count as usize)
    }
}

impl VideoReferenceWriter for DieselRepository {
    fn create_video_ref(&self, video: &NewVideoReference) -> RepositoryResult<VideoRefId> {
        use crate::schema::video_references;

        let mut conn = self.conn()?;

        let id = conn.transaction::<VideoRefId, RepositoryError, _>(|conn| {
            let db_video = DbNewVideoRef::from(video);
            let row = diesel::insert_into(video_references::table)
                .values(db_video)
                .get_result::<DbVideoRef>(conn)?;

            replace_associations(conn, row.id, video)?;
            Ok(VideoRefId::new(row.id)?)
        })?;

        Ok(id)
    }

    fn update_video_ref(
        &self,
        id: VideoRefId,
        video: &NewVideoReference,
    ) -> RepositoryResult<usize> {
        use crate::schema::video_references;

        let mut conn = self.conn()?;

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            let affected =
                diesel::update(video_references::table.filter(video_references::id.eq(id.get())))
                    .set((
                        video_references::title.eq(video.title.as_str()),
                        video_references::source_url.eq(video.source_url.as_str()),
                        video_references::public_summary_html
                            .eq(video.public_summary_html.as_deref()),
                        video_references::pacing.eq(video.pacing.map(|p| p.as_str())),
                        video_references::hook_id.eq(video.hook_id.map(HookId::get)),
                        video_references::production_level
                            .eq(video.production_level.map(|p| p.as_str())),
                        video_references::has_visual_effects.eq(video.flags.has_visual_effects),
                        video_references::has_3d.eq(video.flags.has_3d),
                        video_references::has_animations.eq(video.flags.has_animations),
                        video_references::has_typography.eq(video.flags.has_typography),
                        video_references::has_sound_design.eq(video.flags.has_sound_design),
                        video_references::has_ai.eq(video.flags.has_ai),
                        video_references::rating.eq(video.rating.get()),
                        video_references::search_profile.eq(video.search_profile.as_str()),
                        video_references::search_metadata.eq(video.search_metadata.as_deref()),
                        video_references::updated_at.eq(diesel::dsl::now),
                    ))
                    .execute(conn)?;

            if affected == 0 {
                return Ok(0);
            }

            replace_associations(conn, id.get(), video)?;
            Ok(affected)
        })
    }

    fn delete_video_ref(&self, id: VideoRefId) -> RepositoryResult<usize> {
        use crate::schema::{video_reference_categories, video_reference_tags,
            video_reference_tutorials, video_references};

        let mut conn = self.conn()?;

        let affected = conn.transaction::<usize, RepositoryError, _>(|conn| {
            diesel::delete(
                video_reference_categories::table
                    .filter(video_reference_categories::video_ref_id.eq(id.get())),
            )
            .execute(conn)?;
            diesel::delete(
                video_reference_tags::table
                    .filter(video_reference_tags::video_ref_id.eq(id.get())),
            )
            .execute(conn)?;
            diesel::delete(
                video_reference_tutorials::table
                    .filter(video_reference_tutorials::video_ref_id.eq(id.get())),
            )
            .execute(conn)?;

            let affected = diesel::delete(
                video_references::table.filter(video_references::id.eq(id.get())),
            )
            .execute(conn)?;
            Ok(affected)
        })?;

        Ok(affected)
    }
}
