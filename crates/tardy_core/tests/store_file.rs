use rusqlite::Connection;
use tardy_core::db::migrations::{latest_version, schema_version};
use tardy_core::db::{open_db, open_db_in_memory, stored_keys};
use tardy_core::{
    KeyValueStore, SqliteKeyValueStore, StorageError, Student, TardyApp, RECORDS_KEY,
    STUDENTS_KEY,
};

#[test]
fn fresh_store_is_at_latest_schema_with_no_snapshots() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert!(stored_keys(&conn).unwrap().is_empty());
}

#[test]
fn snapshots_written_by_the_app_survive_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tardy.db");

    let record = {
        let conn = open_db(&path).unwrap();
        let mut app = TardyApp::open(SqliteKeyValueStore::new(&conn));
        app.import_students(vec![Student::new("Ani", "001", "7A")]);
        app.add_record_for_nis("001").unwrap()
    };

    let conn = open_db(&path).unwrap();
    let keys: Vec<_> = stored_keys(&conn)
        .unwrap()
        .into_iter()
        .map(|entry| (entry.key, entry.known))
        .collect();
    assert_eq!(
        keys,
        [
            (STUDENTS_KEY.to_string(), true),
            (RECORDS_KEY.to_string(), true)
        ]
    );

    let app = TardyApp::open(SqliteKeyValueStore::new(&conn));
    assert_eq!(app.records(), &[record]);
    assert_eq!(app.students(), &[Student::new("Ani", "001", "7A")]);
}

#[test]
fn unversioned_file_with_snapshots_is_upgraded_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unversioned.db");

    let legacy = Connection::open(&path).unwrap();
    legacy
        .execute_batch(
            "CREATE TABLE kv_entries (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            INSERT INTO kv_entries (key, value, updated_at) VALUES (
                'masterStudentList',
                '[{\"name\":\"Budi\",\"nis\":\"002\",\"class\":\"8B\"}]',
                1700000000000
            );",
        )
        .unwrap();
    drop(legacy);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());

    let mut app = TardyApp::open(SqliteKeyValueStore::new(&conn));
    assert_eq!(app.students(), &[Student::new("Budi", "002", "8B")]);
    assert_eq!(app.add_record_for_nis("002").unwrap().class_name, "8B");
}

#[test]
fn newer_schema_is_refused_and_snapshots_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    {
        let conn = open_db(&path).unwrap();
        SqliteKeyValueStore::new(&conn)
            .set_item(RECORDS_KEY, "[]")
            .unwrap();
        conn.pragma_update(None, "user_version", 999u32).unwrap();
    }

    match open_db(&path).unwrap_err() {
        StorageError::SchemaTooNew {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    let raw = Connection::open(&path).unwrap();
    let value: String = raw
        .query_row(
            "SELECT value FROM kv_entries WHERE key = ?1;",
            [RECORDS_KEY],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(value, "[]");
}
