//! Integration tests for editor crate

use slidecraft_editor::{
    add_element_to_slide, add_slide, create_document, estimated_duration_minutes,
    insert_element_relative, lesson_progress, load_envelope, move_element_relative,
    remove_slide, restore_lesson, save_lesson, update_element, ContentElement, Direction,
    EditSession, EditorConfig, ElementBody, ElementKind, ElementPatch, FileCache, FixedClock,
    LessonMetrics, LocalCache, MemoryCache, Position, RoutingContext, TextVariant,
    SESSION_KEY,
};

fn context() -> RoutingContext {
    RoutingContext {
        path_id: "p1".to_string(),
        path: "Biology".to_string(),
        level_id: "l1".to_string(),
        level: "Cells".to_string(),
        course_id: "c1".to_string(),
        course: "Plant Cells".to_string(),
    }
}

#[test]
fn test_authoring_scenario() {
    let doc = create_document(&context());
    assert_eq!(doc.path_id, "p1");
    assert_eq!(doc.slide_count(), 1);

    let doc = add_slide(&add_slide(&add_slide(&doc)));
    assert_eq!(doc.slide_count(), 4);
    assert_eq!(lesson_progress(&doc), 40.0);
    assert_eq!(estimated_duration_minutes(&doc), 3);

    let removed = doc.slides[1].id.clone();
    let doc = remove_slide(&doc, &removed);
    assert_eq!(doc.slide_count(), 3);
    assert_eq!(lesson_progress(&doc), 30.0);
    assert!(doc.slide_by_id(&removed).is_none());

    let indexes: Vec<usize> = doc.slides.iter().map(|s| s.index).collect();
    assert_eq!(indexes, vec![0, 1, 2]);
}

#[test]
fn test_metrics_table() {
    let mut doc = create_document(&context());
    doc.slides.clear();

    let expected = [(0, 0.0, 0), (1, 10.0, 1), (4, 40.0, 3), (5, 50.0, 4), (10, 100.0, 8), (15, 100.0, 12)];
    let mut count = 0;
    for (slides, progress, minutes) in expected {
        while count < slides {
            doc = add_slide(&doc);
            count += 1;
        }
        let metrics = LessonMetrics::of(&doc);
        assert_eq!(metrics.slide_count, slides);
        assert_eq!(metrics.progress, progress, "progress at {} slides", slides);
        assert_eq!(metrics.estimated_minutes, minutes, "minutes at {} slides", slides);
    }
}

#[test]
fn test_update_missing_element_is_noop() {
    let doc = create_document(&context());
    let next = update_element(&doc, 0, "missing", &ElementPatch::content("x")).unwrap();
    assert_eq!(next, doc);

    let next = update_element(&doc, 9, "missing", &ElementPatch::content("x")).unwrap();
    assert_eq!(next, doc);
}

#[test]
fn test_insert_above_anchor() {
    let doc = create_document(&context());
    let doc = add_element_to_slide(&doc, 0, ContentElement::image("https://img/a.png")).unwrap();
    let anchor = doc.slides[0].elements()[1].id.clone();

    let next = insert_element_relative(&doc, 0, &anchor, ElementKind::Text, Position::Above);
    let elements = next.slides[0].elements();

    assert_eq!(elements.len(), 3);
    assert_eq!(elements[2].id, anchor);
    assert!(matches!(
        &elements[1].body,
        ElementBody::Text { content, .. } if content == "New text"
    ));
    assert_eq!(elements[0], doc.slides[0].elements()[0]);
}

#[test]
fn test_move_top_element_up_is_noop() {
    let doc = create_document(&context());
    let doc = add_element_to_slide(&doc, 0, ContentElement::text("two", TextVariant::Default)).unwrap();
    let top = doc.slides[0].elements()[0].id.clone();

    let next = move_element_relative(&doc, 0, &top, Direction::Up);
    assert_eq!(next.slides[0], doc.slides[0]);

    let next = move_element_relative(&doc, 0, &top, Direction::Down);
    assert_eq!(next.slides[0].elements()[1].id, top);
}

#[test]
fn test_file_cache_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let cache = FileCache::new(dir.path());
    let clock = FixedClock::new(1_700_000_000_000);

    let doc = create_document(&context());
    let doc = add_element_to_slide(
        &doc,
        0,
        ContentElement::options(vec!["Roots".into(), "Leaves".into()], 1)?,
    )?;

    save_lesson(&cache, &clock, SESSION_KEY, &doc)?;
    assert!(dir.path().join("currentLesson.json").exists());

    clock.advance(1_000);
    let restored = restore_lesson(&cache, &clock, SESSION_KEY, &RoutingContext::default(), 5_000);
    assert_eq!(restored, doc);
    Ok(())
}

#[test]
fn test_stale_envelope_is_ignored() -> anyhow::Result<()> {
    let cache = MemoryCache::new();
    let clock = FixedClock::new(0);
    let old = create_document(&context());

    save_lesson(&cache, &clock, SESSION_KEY, &old)?;
    clock.advance(6_000);

    let restored = restore_lesson(&cache, &clock, SESSION_KEY, &context(), 5_000);
    assert_ne!(restored.id, old.id);
    assert_eq!(restored.context(), context());
    assert_eq!(restored.slide_count(), 1);
    Ok(())
}

#[test]
fn test_missing_cache_dir_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("not-a-dir");
    std::fs::write(&file, "x").unwrap();

    // Reads and writes under a plain file both fail; restore still succeeds
    let cache = FileCache::new(&file);
    let clock = FixedClock::new(0);
    let doc = restore_lesson(&cache, &clock, SESSION_KEY, &context(), 5_000);
    assert_eq!(doc.path_id, "p1");
}

#[test]
fn test_session_resumes_after_reopen() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let clock = FixedClock::new(10_000);

    let mut session = EditSession::open(
        &context(),
        Box::new(FileCache::new(dir.path())),
        Box::new(clock.clone()),
        EditorConfig::default(),
    );
    session.add_slide()?;
    session.set_current_slide(1);
    session.add_expression("E = mc^2", Default::default())?;
    session.save()?;
    let saved = session.lesson();

    clock.advance(2_000);
    let reopened = EditSession::open(
        &RoutingContext::default(),
        Box::new(FileCache::new(dir.path())),
        Box::new(clock.clone()),
        EditorConfig::default(),
    );
    assert_eq!(*reopened.lesson(), *saved);
    assert!(!reopened.has_unsaved_changes());
    assert_eq!(reopened.current_slide(), 0);
    Ok(())
}

#[test]
fn test_unsaved_session_is_not_persisted() -> anyhow::Result<()> {
    let cache = MemoryCache::new();
    let clock = FixedClock::new(0);

    let mut session = EditSession::open(
        &context(),
        Box::new(cache.clone()),
        Box::new(clock.clone()),
        EditorConfig::default(),
    );
    let created = load_envelope(&cache, SESSION_KEY)?.expect("new lesson is written");
    session.add_slide()?;

    let stored = load_envelope(&cache, SESSION_KEY)?.expect("still there");
    assert_eq!(stored, created);
    assert!(cache.get(SESSION_KEY)?.is_some());
    Ok(())
}
