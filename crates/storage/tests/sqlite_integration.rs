use course_core::model::{Category, Lesson, LessonDraft, LessonId, Role, ViewerId};
use course_core::time::fixed_now;
use storage::repository::{CompletionRepository, LessonRepository};
use storage::sqlite::SqliteRepository;

fn build_lesson(id: u64, category: &str, role: Role) -> Lesson {
    LessonDraft {
        title: format!("Lesson {id}"),
        category: Category::new(category).unwrap(),
        duration_minutes: 15,
        required_role: role,
        media_reference: format!("vid-{id}"),
    }
    .validate(fixed_now())
    .unwrap()
    .assign_id(LessonId::new(id))
}

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrip_preserves_lesson_fields() {
    let repo = connect("memdb_roundtrip").await;

    let lesson = build_lesson(10, "writing-basics", Role::Premium);
    repo.upsert_lesson(&lesson).await.unwrap();

    let fetched = repo
        .get_lesson(lesson.id())
        .await
        .expect("fetch")
        .expect("present");
    assert_eq!(fetched, lesson);
    assert_eq!(fetched.required_role(), Role::Premium);
    assert_eq!(fetched.created_at(), fixed_now());

    assert!(
        repo.get_lesson(LessonId::new(999))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn sqlite_upsert_keeps_original_created_at() {
    let repo = connect("memdb_upsert").await;

    let lesson = build_lesson(1, "writing-basics", Role::Free);
    repo.upsert_lesson(&lesson).await.unwrap();

    let renamed = Lesson::from_persisted(
        lesson.id(),
        "Renamed".to_string(),
        lesson.category().clone(),
        45,
        Role::Master,
        lesson.media_reference().to_string(),
        fixed_now() + chrono::Duration::days(3),
    )
    .unwrap();
    repo.upsert_lesson(&renamed).await.unwrap();

    let fetched = repo.get_lesson(lesson.id()).await.unwrap().unwrap();
    assert_eq!(fetched.title(), "Renamed");
    assert_eq!(fetched.duration_minutes(), 45);
    assert_eq!(fetched.created_at(), fixed_now());
}

#[tokio::test]
async fn sqlite_category_listing_is_id_ascending() {
    let repo = connect("memdb_category").await;

    for id in [13, 10, 12, 11] {
        repo.upsert_lesson(&build_lesson(id, "writing-basics", Role::Free))
            .await
            .unwrap();
    }
    repo.upsert_lesson(&build_lesson(20, "editing", Role::Free))
        .await
        .unwrap();

    let listed = repo
        .lessons_by_category(&Category::new("writing-basics").unwrap())
        .await
        .unwrap();
    let ids: Vec<u64> = listed.iter().map(|l| l.id().value()).collect();
    assert_eq!(ids, vec![10, 11, 12, 13]);

    let max = repo.max_lesson_id().await.unwrap();
    assert_eq!(max, Some(LessonId::new(20)));
}

#[tokio::test]
async fn sqlite_role_filter_and_delete() {
    let repo = connect("memdb_role").await;

    repo.upsert_lesson(&build_lesson(1, "editing", Role::Free))
        .await
        .unwrap();
    repo.upsert_lesson(&build_lesson(2, "editing", Role::Master))
        .await
        .unwrap();

    let master = repo.lessons_by_role(Role::Master).await.unwrap();
    assert_eq!(master.len(), 1);
    assert_eq!(master[0].id(), LessonId::new(2));

    assert!(repo.delete_lesson(LessonId::new(2)).await.unwrap());
    assert!(!repo.delete_lesson(LessonId::new(2)).await.unwrap());
    assert!(repo.lessons_by_role(Role::Master).await.unwrap().is_empty());
}

#[tokio::test]
async fn sqlite_empty_catalog_has_no_max_id() {
    let repo = connect("memdb_empty").await;
    assert!(repo.max_lesson_id().await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_completions_roundtrip_idempotently() {
    let repo = connect("memdb_completions").await;
    let viewer = ViewerId::new(7);

    repo.mark_completed(viewer, LessonId::new(10), fixed_now())
        .await
        .unwrap();
    repo.mark_completed(viewer, LessonId::new(10), fixed_now())
        .await
        .unwrap();
    repo.mark_completed(viewer, LessonId::new(11), fixed_now())
        .await
        .unwrap();

    let completed = repo.completed_lessons(viewer).await.unwrap();
    assert_eq!(completed.len(), 2);
    assert!(completed.contains(LessonId::new(10)));
    assert!(completed.contains(LessonId::new(11)));

    let other = repo.completed_lessons(ViewerId::new(8)).await.unwrap();
    assert!(other.is_empty());
}
