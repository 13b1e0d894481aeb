use chrono::Utc;
use taskboard_core::db::{open_db_in_memory, DbError};
use taskboard_core::store::board_store::{decode_board, encode_board, load_board, save_board};
use taskboard_core::store::prefs_store::{load_prefs, load_prefs_or_default, save_prefs};
use taskboard_core::{
    Board, BoardIntegrityError, BoardService, ColumnMove, Priority, PriorityFilter, PrefsService,
    SqliteStateStore, StateStore, StoreError, StoreResult, TaskDraft, TaskMove, TaskPatch, TaskSlot,
    UiPrefs, BOARD_STORAGE_KEY, PREFS_STORAGE_KEY,
};

/// Store that reads nothing and rejects every write.
struct ReadOnlyStore;

impl StateStore for ReadOnlyStore {
    fn get_value(&self, _key: &str) -> StoreResult<Option<String>> {
        Ok(None)
    }

    fn set_value(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Db(DbError::Sqlite(rusqlite::Error::InvalidQuery)))
    }

    fn remove_value(&self, _key: &str) -> StoreResult<bool> {
        Ok(false)
    }
}

#[test]
fn encode_then_decode_yields_identical_board() {
    let mut board = Board::seeded(Utc::now());
    let column = board.add_column();
    board
        .add_task(
            &column,
            TaskDraft::new("persisted", Priority::Medium).with_tags(["a", "b"]),
        )
        .unwrap();

    let decoded = decode_board(&encode_board(&board).unwrap()).unwrap();
    assert_eq!(decoded, board);
}

#[test]
fn board_blob_uses_camel_case_schema() {
    let board = Board::seeded(Utc::now());
    let json: serde_json::Value = serde_json::from_str(&encode_board(&board).unwrap()).unwrap();

    assert_eq!(json["columnOrder"][0], "column-1");
    assert_eq!(json["columns"]["column-1"]["taskIds"][1], "task-2");
    assert_eq!(json["tasks"]["task-1"]["priority"], "high");
    assert!(json["tasks"]["task-1"]["createdAt"].is_string());
}

#[test]
fn decode_accepts_blob_written_by_the_browser_build() {
    let raw = r#"{
        "tasks": {
            "task-1": {
                "id": "task-1",
                "title": "Legacy",
                "description": "",
                "priority": "low",
                "createdAt": "2024-03-01T10:15:30.123Z",
                "tags": []
            }
        },
        "columns": {
            "column-1": { "id": "column-1", "title": "To Do", "taskIds": ["task-1"] }
        },
        "columnOrder": ["column-1"]
    }"#;

    let board = decode_board(raw).unwrap();
    assert_eq!(board.tasks["task-1"].title, "Legacy");
    assert_eq!(board.columns["column-1"].task_ids, vec!["task-1"]);
}

#[test]
fn decode_rejects_malformed_json_and_broken_references() {
    let err = decode_board("{not json").unwrap_err();
    assert!(matches!(err, StoreError::InvalidData { ref key, .. } if key == BOARD_STORAGE_KEY));

    let dangling = r#"{
        "tasks": {},
        "columns": { "column-1": { "id": "column-1", "title": "To Do", "taskIds": ["task-9"] } },
        "columnOrder": ["column-1"]
    }"#;
    let err = decode_board(dangling).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Integrity(BoardIntegrityError::MissingTask { .. })
    ));
}

#[test]
fn save_and_load_through_sqlite_store() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStateStore::new(&conn);
    assert!(load_board(&store).unwrap().is_none());

    let board = Board::seeded(Utc::now());
    save_board(&store, &board).unwrap();
    assert_eq!(load_board(&store).unwrap(), Some(board));
}

#[test]
fn board_and_prefs_blobs_are_independent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStateStore::new(&conn);

    save_prefs(
        &store,
        &UiPrefs {
            is_dark_mode: true,
            search_term: "ui".to_string(),
            filter_priority: PriorityFilter::High,
        },
    )
    .unwrap();
    assert!(load_board(&store).unwrap().is_none());
    assert!(store.get_value(PREFS_STORAGE_KEY).unwrap().is_some());

    store.set_value(BOARD_STORAGE_KEY, "garbage").unwrap();
    let prefs = load_prefs(&store).unwrap().unwrap();
    assert_eq!(prefs.filter_priority, PriorityFilter::High);
}

#[test]
fn prefs_default_follows_system_preference() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStateStore::new(&conn);

    let prefs = load_prefs_or_default(&store, true).unwrap();
    assert!(prefs.is_dark_mode);
    assert_eq!(prefs.search_term, "");
    assert_eq!(prefs.filter_priority, PriorityFilter::All);
}

#[test]
fn board_service_persists_after_each_change() {
    let conn = open_db_in_memory().unwrap();

    let (task_id, column_id) = {
        let mut service = BoardService::load(SqliteStateStore::new(&conn)).unwrap();
        let column_id = service.add_column().unwrap();
        assert!(service.rename_column(&column_id, "Review").unwrap());
        let task_id = service
            .add_task(&column_id, TaskDraft::new("check", Priority::High))
            .unwrap()
            .unwrap();
        assert!(service
            .update_task(
                &task_id,
                TaskPatch {
                    tags: Some(vec!["qa".to_string()]),
                    ..TaskPatch::default()
                },
            )
            .unwrap());
        (task_id, column_id)
    };

    let reloaded = BoardService::load(SqliteStateStore::new(&conn)).unwrap();
    let board = reloaded.board();
    assert_eq!(board.columns[&column_id].title, "Review");
    assert_eq!(board.columns[&column_id].task_ids, vec![task_id.clone()]);
    assert_eq!(board.tasks[&task_id].tags, vec!["qa".to_string()]);
}

#[test]
fn board_service_moves_and_cascades_are_durable() {
    let conn = open_db_in_memory().unwrap();
    {
        let mut service = BoardService::load(SqliteStateStore::new(&conn)).unwrap();
        let moved = service
            .move_task(&TaskMove {
                task_id: "task-3".to_string(),
                source: TaskSlot::new("column-2", 0),
                destination: Some(TaskSlot::new("column-3", 0)),
            })
            .unwrap();
        assert!(moved);
        assert!(service
            .move_column(&ColumnMove {
                column_id: "column-3".to_string(),
                source_index: 2,
                destination_index: Some(0),
            })
            .unwrap());
        assert!(service.delete_column("column-1").unwrap());
        assert!(service.delete_task("task-3").unwrap());
    }

    let board = BoardService::load(SqliteStateStore::new(&conn))
        .unwrap()
        .into_board();
    assert_eq!(board.column_order, vec!["column-3", "column-2"]);
    assert!(board.tasks.is_empty());
    assert!(board.columns["column-3"].task_ids.is_empty());
}

#[test]
fn board_service_noop_does_not_write_seed_board() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStateStore::new(&conn);
    let mut service = BoardService::load(SqliteStateStore::new(&conn)).unwrap();

    assert!(!service.delete_task("task-missing").unwrap());
    assert!(!service.rename_column("column-1", "  ").unwrap());
    assert!(store.get_value(BOARD_STORAGE_KEY).unwrap().is_none());
}

#[test]
fn board_service_surfaces_corrupt_blob_on_load() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStateStore::new(&conn);
    store.set_value(BOARD_STORAGE_KEY, "[]").unwrap();

    let err = BoardService::load(store).err().expect("corrupt blob must fail");
    assert!(matches!(err, StoreError::InvalidData { .. }));
}

#[test]
fn prefs_service_persists_changes() {
    let conn = open_db_in_memory().unwrap();
    {
        let mut service = PrefsService::load(SqliteStateStore::new(&conn), false).unwrap();
        assert!(service.toggle_dark_mode().unwrap());
        assert!(service.set_search_term("drag").unwrap());
        assert!(service.set_filter_priority(PriorityFilter::Low).unwrap());
        assert!(!service.set_filter_priority(PriorityFilter::Low).unwrap());
    }

    let service = PrefsService::load(SqliteStateStore::new(&conn), false).unwrap();
    assert_eq!(
        service.prefs(),
        &UiPrefs {
            is_dark_mode: true,
            search_term: "drag".to_string(),
            filter_priority: PriorityFilter::Low,
        }
    );
}

#[test]
fn failed_board_save_keeps_previous_board() {
    let mut service = BoardService::load(ReadOnlyStore).unwrap();
    let before = service.board().clone();

    assert!(service.delete_column("column-1").is_err());
    assert!(service.add_column().is_err());
    assert!(service
        .add_task("column-1", TaskDraft::new("lost", Priority::Low))
        .is_err());
    assert!(service
        .move_task(&TaskMove {
            task_id: "task-1".to_string(),
            source: TaskSlot::new("column-1", 0),
            destination: Some(TaskSlot::new("column-3", 0)),
        })
        .is_err());
    assert_eq!(service.board(), &before);

    assert!(!service.delete_task("task-missing").unwrap());
}

#[test]
fn failed_prefs_save_keeps_previous_prefs() {
    let mut service = PrefsService::load(ReadOnlyStore, false).unwrap();

    assert!(service.toggle_dark_mode().is_err());
    assert!(service.set_search_term("lost").is_err());
    assert!(service.set_filter_priority(PriorityFilter::High).is_err());
    assert_eq!(service.prefs(), &UiPrefs::default());

    assert!(!service.set_search_term("").unwrap());
}
