//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `tardy_core` linkage with deterministic output.
//! - Optionally summarize an existing store file: `tardy_cli <store.sqlite3>`.
//!   Lists the stored keys, flagging any the app does not own.

use tardy_core::db::{open_db, stored_keys};
use tardy_core::{SqliteKeyValueStore, TardyApp};

fn main() {
    println!("tardy_core ping={}", tardy_core::ping());
    println!("tardy_core version={}", tardy_core::core_version());

    let Some(path) = std::env::args().nth(1) else {
        return;
    };
    let conn = match open_db(&path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("store open failed: {err}");
            std::process::exit(1);
        }
    };
    match stored_keys(&conn) {
        Ok(keys) => {
            for entry in keys {
                println!(
                    "key={} bytes={} updated_at={} known={}",
                    entry.key, entry.value_bytes, entry.updated_at, entry.known
                );
            }
        }
        Err(err) => eprintln!("key listing failed: {err}"),
    }
    let app = TardyApp::open(SqliteKeyValueStore::new(&conn));
    let view = app.snapshot();
    println!("students={}", app.students().len());
    println!(
        "today={} this_month={} total={}",
        view.stats.today_count, view.stats.this_month_count, view.stats.total_count
    );
    println!("classes={}", view.classes.join(","));
}
