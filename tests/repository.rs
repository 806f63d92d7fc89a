use chrono::Utc;
use diesel::prelude::*;
use reelbase::domain::category::NewCategory;
use reelbase::domain::category_tree::CategoryTree;
use reelbase::domain::tutorial::{NewTutorial, TutorialAttachment, TutorialRef};
use reelbase::domain::types::{
    CategoryId, CategoryName, CategorySlug, ClipSecond, Rating, SearchProfile, SortOrder,
    SourceUrl, TagName, TutorialLabel, TutorialUrl, VideoTitle,
};
use reelbase::domain::video_ref::{ContentFlags, NewVideoReference};
use reelbase::repository::{
    CategoryReader, CategoryWriter, DieselRepository, HookReader, RepositoryError, TagListQuery,
    TagReader, TagWriter, TutorialReader, VideoRefListQuery, VideoReferenceReader,
    VideoReferenceWriter,
};
use reelbase::schema::hooks;

mod common;

fn new_category(name: &str, slug: &str, parent_id: Option<CategoryId>, order: i32) -> NewCategory {
    let now = Utc::now().naive_utc();
    NewCategory {
        name: CategoryName::new(name).expect("valid category name"),
        slug: CategorySlug::new(slug).expect("valid slug"),
        parent_id,
        order: SortOrder::new(order).expect("valid order"),
        created_at: now,
        updated_at: now,
    }
}

fn new_video(category_ids: Vec<CategoryId>) -> NewVideoReference {
    let now = Utc::now().naive_utc();
    NewVideoReference {
        title: VideoTitle::new("Kinetic type breakdown").expect("valid title"),
        source_url: SourceUrl::new("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .expect("valid url"),
        public_summary_html: Some("<p>Fast cuts.</p>".to_string()),
        pacing: None,
        hook_id: None,
        production_level: None,
        flags: ContentFlags {
            has_typography: true,
            ..ContentFlags::default()
        },
        rating: Rating::new(7).expect("valid rating"),
        search_profile: SearchProfile::new("kinetic typography").expect("valid profile"),
        search_metadata: None,
        category_ids,
        tags: vec![
            TagName::new("VFX").expect("valid tag"),
            TagName::new("editing").expect("valid tag"),
        ],
        tutorials: vec![],
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn category_crud_round_trip() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let root = repo
        .create_category(&new_category("Motion", "motion", None, 0))
        .expect("should create root category");
    let child = repo
        .create_category(&new_category("Typography", "typography", Some(root.id), 1))
        .expect("should create child category");

    assert!(repo.has_children(root.id).expect("children query"));
    assert!(!repo.has_children(child.id).expect("children query"));

    let categories = repo.list_categories().expect("should list categories");
    assert_eq!(categories.len(), 2);

    let tree = CategoryTree::from_flat(categories);
    let flat = tree.flatten();
    assert_eq!(flat.len(), 2);
    assert_eq!(flat[0].id, root.id);
    assert_eq!(flat[1].id, child.id);

    let renamed = CategoryName::new("Motion Design").expect("valid name");
    let slug = CategorySlug::new("motion-design").expect("valid slug");
    let affected = repo
        .update_category(root.id, &renamed, &slug, None, SortOrder::new(5).unwrap())
        .expect("should update category");
    assert_eq!(affected, 1);

    let reloaded = repo
        .get_category_by_id(root.id)
        .expect("should get category")
        .expect("category exists");
    assert_eq!(reloaded.name.as_str(), "Motion Design");
    assert_eq!(reloaded.order.get(), 5);

    let affected = repo
        .delete_category(child.id)
        .expect("should delete category");
    assert_eq!(affected, 1);
    assert!(
        repo.get_category_by_id(child.id)
            .expect("should query category")
            .is_none()
    );
}

#[test]
fn video_reference_create_loads_associations() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Motion", "motion", None, 0))
        .expect("should create category");

    let mut video = new_video(vec![category.id]);
    video.tutorials = vec![
        TutorialAttachment {
            tutorial: TutorialRef::New(NewTutorial {
                label: TutorialLabel::new("Part 1").expect("valid label"),
                tutorial_url: TutorialUrl::new("https://example.com/t1").expect("valid url"),
            }),
            start_sec: Some(ClipSecond::new(30).unwrap()),
            end_sec: Some(ClipSecond::new(10).unwrap()), // inverted on purpose, stored as-is
        },
        TutorialAttachment {
            tutorial: TutorialRef::New(NewTutorial {
                label: TutorialLabel::new("Part 2").expect("valid label"),
                tutorial_url: TutorialUrl::new("https://example.com/t2").expect("valid url"),
            }),
            start_sec: None,
            end_sec: None,
        },
    ];

    let id = repo
        .create_video_ref(&video)
        .expect("should create video reference");

    let loaded = repo
        .get_video_ref_by_id(id)
        .expect("should get video reference")
        .expect("video exists");

    assert_eq!(loaded.title.as_str(), "Kinetic type breakdown");
    assert_eq!(loaded.category_ids, vec![category.id]);
    // Tags come back name-sorted; the column collation is NOCASE.
    let tag_names: Vec<&str> = loaded.tags.iter().map(|t| t.as_str()).collect();
    assert_eq!(tag_names, vec!["editing", "VFX"]);
    // Tutorial order follows the submitted positions.
    assert_eq!(loaded.tutorials.len(), 2);
    assert_eq!(loaded.tutorials[0].tutorial.label.as_str(), "Part 1");
    assert_eq!(loaded.tutorials[0].start_sec.unwrap().get(), 30);
    assert_eq!(loaded.tutorials[0].end_sec.unwrap().get(), 10);
    assert_eq!(loaded.tutorials[1].tutorial.label.as_str(), "Part 2");
    assert!(loaded.flags.has_typography);
    assert_eq!(loaded.rating.get(), 7);

    // Inline "new" tutorials landed in the tutorials table.
    let tutorials = repo.list_tutorials().expect("should list tutorials");
    assert_eq!(tutorials.len(), 2);

    assert_eq!(
        repo.count_for_category(category.id)
            .expect("should count videos"),
        1
    );
}

#[test]
fn video_reference_create_rejects_unknown_category() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let video = new_video(vec![CategoryId::new(99).unwrap()]);
    let err = repo
        .create_video_ref(&video)
        .expect_err("unknown category should be rejected");
    assert!(matches!(err, RepositoryError::Validation(_)));
}

#[test]
fn video_reference_update_replaces_associations() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let first = repo
        .create_category(&new_category("Motion", "motion", None, 0))
        .expect("should create category");
    let second = repo
        .create_category(&new_category("Live", "live", None, 1))
        .expect("should create category");

    let id = repo
        .create_video_ref(&new_video(vec![first.id]))
        .expect("should create video reference");

    let mut updated = new_video(vec![second.id]);
    updated.title = VideoTitle::new("Re-cut").expect("valid title");
    updated.tags = vec![TagName::new("sound").expect("valid tag")];
    let affected = repo
        .update_video_ref(id, &updated)
        .expect("should update video reference");
    assert_eq!(affected, 1);

    let loaded = repo
        .get_video_ref_by_id(id)
        .expect("should get video reference")
        .expect("video exists");
    assert_eq!(loaded.title.as_str(), "Re-cut");
    assert_eq!(loaded.category_ids, vec![second.id]);
    let tag_names: Vec<&str> = loaded.tags.iter().map(|t| t.as_str()).collect();
    assert_eq!(tag_names, vec!["sound"]);

    assert_eq!(repo.count_for_category(first.id).expect("count"), 0);
    assert_eq!(repo.count_for_category(second.id).expect("count"), 1);
}

#[test]
fn video_reference_search_and_delete() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Motion", "motion", None, 0))
        .expect("should create category");
    let id = repo
        .create_video_ref(&new_video(vec![category.id]))
        .expect("should create video reference");

    let (total, items) = repo
        .list_video_refs(VideoRefListQuery::default().source_url("youtube.com"))
        .expect("should search by source url");
    assert_eq!(total, 1);
    assert_eq!(items[0].id, id);

    let (total, _) = repo
        .list_video_refs(VideoRefListQuery::default().source_url("tiktok.com"))
        .expect("should search by source url");
    assert_eq!(total, 0);

    let affected = repo
        .delete_video_ref(id)
        .expect("should delete video reference");
    assert_eq!(affected, 1);
    assert!(
        repo.get_video_ref_by_id(id)
            .expect("should query video reference")
            .is_none()
    );
    assert_eq!(repo.count_for_category(category.id).expect("count"), 0);
}

#[test]
fn ensure_tags_reuses_existing_spelling_case_insensitively() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let first = repo
        .ensure_tags(&[TagName::new("VFX").unwrap()])
        .expect("should create tag");
    let second = repo
        .ensure_tags(&[TagName::new("vfx").unwrap()])
        .expect("should reuse tag");

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(first[0].id, second[0].id);
    assert_eq!(second[0].name.as_str(), "VFX");

    let tags = repo
        .list_tags(TagListQuery::default().search("vf"))
        .expect("should search tags");
    assert_eq!(tags.len(), 1);
}

#[test]
fn hooks_are_listed_from_seeded_rows() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let mut conn = test_db
        .pool()
        .get()
        .expect("should acquire DB connection for setup");
    diesel::insert_into(hooks::table)
        .values((hooks::name.eq("question"),))
        .execute(&mut conn)
        .expect("should seed hook");

    let hooks = repo.list_hooks().expect("should list hooks");
    assert_eq!(hooks.len(), 1);
    assert_eq!(hooks[0].name.as_str(), "question");
}
