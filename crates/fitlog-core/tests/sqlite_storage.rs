use chrono::{Duration, NaiveDate};
use tempfile::TempDir;

use fitlog_core::aggregate::{group_by_exercise, progress_series, DateWindow};
use fitlog_core::calendar::{workout_counts, YearMonth};
use fitlog_core::storage::{
    CommentChange, MeasurementType, NewWorkout, SqliteStorage, UnitKind, WorkoutPatch,
    WorkoutStore,
};
use fitlog_core::FitlogError;

struct TestDb {
    _dir: TempDir,
    store: SqliteStorage,
}

impl TestDb {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("fitlog.db");
        SqliteStorage::create(&path).expect("create should succeed");
        let store = SqliteStorage::open(&path).expect("open should succeed");
        Self { _dir: dir, store }
    }

    fn exercise_id(&self, name: &str) -> i64 {
        self.store
            .find_exercise(name)
            .expect("lookup should succeed")
            .expect("exercise should be seeded")
            .id
    }

    fn unit_id(&self, kind: UnitKind, name: &str) -> i64 {
        self.store
            .list_units(kind)
            .expect("units should list")
            .into_iter()
            .find(|u| u.name == name)
            .expect("unit should be seeded")
            .id
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

#[test]
fn test_create_then_open_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("nested").join("fitlog.db");

    SqliteStorage::create(&path).expect("create should succeed");
    assert!(path.exists());

    let store = SqliteStorage::open(&path).expect("open should succeed");
    let meta = store.metadata().expect("metadata should read");
    assert_eq!(meta.format_version, "0.1");
    assert!(meta.last_modified >= meta.created_at);
    store.check_integrity().expect("fresh database should be healthy");
}

#[test]
fn test_create_refuses_existing_file() {
    let db = TestDb::new();
    let result = SqliteStorage::create(db.store.path());
    assert!(matches!(result, Err(FitlogError::Storage(_))));
}

#[test]
fn test_open_missing_file_fails() {
    let dir = TempDir::new().expect("temp dir");
    let result = SqliteStorage::open(&dir.path().join("missing.db"));
    assert!(matches!(result, Err(FitlogError::DatabaseNotFound)));
}

#[test]
fn test_open_rejects_foreign_sqlite_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("other.db");
    let conn = rusqlite::Connection::open(&path).expect("open");
    conn.execute_batch("CREATE TABLE notes (id INTEGER PRIMARY KEY);")
        .expect("schema");
    drop(conn);

    assert!(matches!(
        SqliteStorage::open(&path),
        Err(FitlogError::Storage(_))
    ));
}

#[test]
fn test_writes_survive_reopen() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("fitlog.db");
    SqliteStorage::create(&path).expect("create");

    let id = {
        let mut store = SqliteStorage::open(&path).expect("open");
        let plank = store.find_exercise("Plank").expect("lookup").expect("seeded");
        store
            .create_workout(&NewWorkout::new(date("2024-03-05"), plank.id).with_time("0:02:00"))
            .expect("insert")
            .id()
    };

    let store = SqliteStorage::open(&path).expect("reopen");
    let set = store.get_workout(id).expect("get").expect("present");
    assert_eq!(set.workout.time.as_deref(), Some("0:02:00"));
    assert_eq!(set.measurement_type, MeasurementType::Time);
}

#[test]
fn test_validation_rejects_before_write() {
    let mut db = TestDb::new();
    let bench = db.exercise_id("Flat Barbell Bench Press");
    let running = db.exercise_id("Running");
    let km = db.unit_id(UnitKind::Distance, "km");

    let missing_reps = NewWorkout::new(date("2024-03-05"), bench);
    let err = db.store.create_workout(&missing_reps).unwrap_err();
    assert!(matches!(err, FitlogError::Validation(_)));

    let bad_time = NewWorkout::new(date("2024-03-05"), running)
        .with_distance(5.0, km)
        .with_time("30:00");
    let err = db.store.create_workout(&bad_time).unwrap_err();
    assert!(err.to_string().contains("Invalid time"));

    let missing_unit = NewWorkout {
        date: Some(date("2024-03-05")),
        exercise_id: running,
        distance: Some(5.0),
        ..NewWorkout::default()
    };
    assert!(db.store.create_workout(&missing_unit).unwrap_err().is_validation());

    let huge_reps = NewWorkout::new(date("2024-03-05"), bench).with_reps(i64::MAX);
    let err = db.store.create_workout(&huge_reps).unwrap_err();
    assert!(matches!(err, FitlogError::Validation(_)));

    let unknown_exercise = NewWorkout::new(date("2024-03-05"), 9999).with_reps(1);
    assert!(db.store.create_workout(&unknown_exercise).unwrap_err().is_validation());

    assert_eq!(db.store.list_page(0, 10).expect("page").total_count, 0);
}

#[test]
fn test_list_orderings() {
    let mut db = TestDb::new();
    let pull_up = db.exercise_id("Pull Up");
    let squat = db.exercise_id("Barbell Squat");

    let mut ids = Vec::new();
    for (day, exercise) in [
        ("2024-03-05", pull_up),
        ("2024-03-01", pull_up),
        ("2024-03-05", squat),
        ("2024-03-05", pull_up),
        ("2024-03-10", pull_up),
    ] {
        let set = db
            .store
            .create_workout(&NewWorkout::new(date(day), exercise).with_reps(5))
            .expect("insert");
        ids.push(set.id());
    }

    let on_day: Vec<i64> = db
        .store
        .list_by_date(date("2024-03-05"))
        .expect("by date")
        .iter()
        .map(|s| s.id())
        .collect();
    assert_eq!(on_day, vec![ids[0], ids[2], ids[3]]);

    let history: Vec<(NaiveDate, i64)> = db
        .store
        .list_by_exercise(pull_up)
        .expect("by exercise")
        .iter()
        .map(|s| (s.date(), s.id()))
        .collect();
    assert_eq!(
        history,
        vec![
            (date("2024-03-10"), ids[4]),
            (date("2024-03-05"), ids[0]),
            (date("2024-03-05"), ids[3]),
            (date("2024-03-01"), ids[1]),
        ]
    );

    let range: Vec<i64> = db
        .store
        .list_by_date_range(date("2024-03-01"), date("2024-03-05"))
        .expect("range")
        .iter()
        .map(|s| s.id())
        .collect();
    assert_eq!(range, vec![ids[1], ids[0], ids[2], ids[3]]);

    let groups = group_by_exercise(&db.store.list_by_date(date("2024-03-05")).expect("by date"));
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].exercise_id, pull_up);
    assert_eq!(groups[0].sets.len(), 2);
}

#[test]
fn test_pagination_over_150_rows() {
    let mut db = TestDb::new();
    let crunch = db.exercise_id("Crunch");
    let start = date("2024-01-01");

    for i in 0..150 {
        db.store
            .create_workout(&NewWorkout::new(start + Duration::days(i % 40), crunch).with_reps(20))
            .expect("insert");
    }

    let first = db.store.list_page(0, 100).expect("first page");
    assert_eq!(first.workouts.len(), 100);
    assert_eq!(first.total_count, 150);
    assert!(first.has_more());

    let second = db.store.list_page(100, 100).expect("second page");
    assert_eq!(second.workouts.len(), 50);
    assert!(!second.has_more());

    let all: Vec<_> = first.workouts.iter().chain(second.workouts.iter()).collect();
    for pair in all.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(
            a.date() > b.date() || (a.date() == b.date() && a.id() > b.id()),
            "page order broken between {} and {}",
            a.id(),
            b.id()
        );
    }
}

#[test]
fn test_update_keeps_unspecified_fields() {
    let mut db = TestDb::new();
    let bench = db.exercise_id("Flat Barbell Bench Press");
    let kg = db.unit_id(UnitKind::Weight, "kg");

    let created = db
        .store
        .create_workout(
            &NewWorkout::new(date("2024-03-05"), bench)
                .with_weight(60.0, kg)
                .with_reps(8)
                .with_comment("paused"),
        )
        .expect("insert");

    let updated = db
        .store
        .update_workout(created.id(), &WorkoutPatch::new().reps(Some(10)))
        .expect("update");
    assert_eq!(updated.workout.reps, Some(10));
    assert_eq!(updated.workout.weight, Some(60.0));
    assert_eq!(updated.workout.comment.as_deref(), Some("paused"));

    let cleared = db
        .store
        .update_workout(
            created.id(),
            &WorkoutPatch::new().weight(None, None).comment(None),
        )
        .expect("clear");
    assert_eq!(cleared.workout.weight, None);
    assert_eq!(cleared.weight_unit_name, None);
    assert_eq!(cleared.workout.comment, None);

    let invalid = db
        .store
        .update_workout(created.id(), &WorkoutPatch::new().reps(None));
    assert!(invalid.unwrap_err().is_validation());
    let unchanged = db.store.get_workout(created.id()).expect("get").expect("present");
    assert_eq!(unchanged.workout.reps, Some(10));
}

#[test]
fn test_delete_twice_reports_not_found() {
    let mut db = TestDb::new();
    let crunch = db.exercise_id("Crunch");
    let set = db
        .store
        .create_workout(&NewWorkout::new(date("2024-03-05"), crunch).with_reps(30))
        .expect("insert");

    db.store.delete_workout(set.id()).expect("first delete");
    assert!(db.store.get_workout(set.id()).expect("get").is_none());

    let err = db.store.delete_workout(set.id()).unwrap_err();
    assert!(matches!(err, FitlogError::NotFound(_)));
}

#[test]
fn test_comment_upsert_is_idempotent() {
    let mut db = TestDb::new();
    let day = date("2024-03-05");

    assert_eq!(db.store.upsert_comment(day, "").expect("blank"), CommentChange::Unchanged);
    assert_eq!(db.store.get_comment(day).expect("get"), None);

    db.store.upsert_comment(day, "x").expect("first");
    db.store.upsert_comment(day, "x").expect("second");

    let comments = db.store.list_comments(day, day).expect("list");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].comment, "x");

    assert_eq!(db.store.upsert_comment(day, "   ").expect("clear"), CommentChange::Deleted);
    assert!(db.store.list_comments(day, day).expect("list").is_empty());
}

#[test]
fn test_calendar_counts_from_range_query() {
    let mut db = TestDb::new();
    let jump = db.exercise_id("Jump Rope");
    for day in ["2024-03-05", "2024-03-05", "2024-03-12", "2024-04-01"] {
        db.store
            .create_workout(&NewWorkout::new(date(day), jump).with_time("0:05:00"))
            .expect("insert");
    }

    let march = YearMonth::new(2024, 3).expect("month");
    let sets = db
        .store
        .list_by_date_range(march.first_day(), march.last_day())
        .expect("range");
    let counts = workout_counts(&sets);

    assert_eq!(counts.len(), 2);
    assert_eq!(counts["2024-03-05"], 2);
    assert_eq!(counts["2024-03-12"], 1);
}

#[test]
fn test_progress_from_stored_history() {
    let mut db = TestDb::new();
    let deadlift = db.exercise_id("Deadlift");
    let kg = db.unit_id(UnitKind::Weight, "kg");

    for (weight, reps) in [(20.0, 10), (25.0, 8)] {
        db.store
            .create_workout(
                &NewWorkout::new(date("2024-03-05"), deadlift)
                    .with_weight(weight, kg)
                    .with_reps(reps),
            )
            .expect("insert");
    }

    let history = db.store.list_by_exercise(deadlift).expect("history");
    let series = progress_series(
        &history,
        MeasurementType::Reps,
        DateWindow::All,
        date("2024-03-10"),
    );

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].value, 400.0);
    assert_eq!(series[0].label, "Volume (weight×reps)");
}
