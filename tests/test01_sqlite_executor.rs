#![cfg(feature = "sqlite")]

use sql_compose::prelude::*;
use sql_compose::{named_params, params};
use tokio::runtime::Runtime;

// Per-test database under its own temp dir, so suites can run in parallel
// without sharing state.
async fn fresh_db(dir: &tempfile::TempDir) -> Result<Database, SqlComposeError> {
    let path = dir.path().join("app.db");
    Database::new_sqlite(path.to_string_lossy().into_owned()).await
}

fn user_schema() -> &'static str {
    "CREATE TABLE users (
        id INTEGER PRIMARY KEY,
        handle TEXT NOT NULL
            CHECK (length(handle) >= 1 AND handle NOT GLOB '*[^a-z0-9_]*')
    );"
}

fn event_schema() -> &'static str {
    "CREATE TABLE events (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        start_at TEXT NOT NULL,
        end_at TEXT NOT NULL,
        CHECK (end_at > start_at)
    );"
}

fn seeded_handle(seed: u32) -> String {
    format!("user_{seed}")
}

#[test]
fn insert_reports_rowid_and_affected_rows() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    let dir = tempfile::tempdir()?;
    rt.block_on(async {
        let db = fresh_db(&dir).await?;
        let mut conn = db.get_connection().await?;
        conn.execute_batch(user_schema()).await?;

        let result = conn
            .execute_dml(
                "INSERT INTO users (handle) VALUES (?1)",
                &params![seeded_handle(1)],
            )
            .await?;
        assert_eq!(result.rows_affected, 1);
        let id = result.insert_id.expect("sqlite reports a rowid");
        assert!(id > 0);

        let rows = conn
            .execute_select("SELECT handle FROM users WHERE id = ?1", &params![id])
            .await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows.rows()[0].get("handle").and_then(DbValue::as_text),
            Some(seeded_handle(1).as_str())
        );

        Ok::<(), SqlComposeError>(())
    })?;
    Ok(())
}

#[test]
fn garbage_handle_fails_with_check_constraint() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    let dir = tempfile::tempdir()?;
    rt.block_on(async {
        let db = fresh_db(&dir).await?;
        let mut conn = db.get_connection().await?;
        conn.execute_batch(user_schema()).await?;

        let err = conn
            .execute_dml(
                "INSERT INTO users (handle) VALUES (?1)",
                &params!["(*(*&(SJK"],
            )
            .await
            .expect_err("uppercase/symbol handle must be rejected");
        assert!(err.is_check_violation(), "got {err:?}");
        assert_eq!(err.constraint_kind(), Some(ConstraintKind::Check));

        Ok::<(), SqlComposeError>(())
    })?;
    Ok(())
}

#[test]
fn empty_handle_fails_with_check_constraint() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    let dir = tempfile::tempdir()?;
    rt.block_on(async {
        let db = fresh_db(&dir).await?;
        let mut conn = db.get_connection().await?;
        conn.execute_batch(user_schema()).await?;

        let err = conn
            .execute_dml("INSERT INTO users (handle) VALUES (?1)", &params![""])
            .await
            .expect_err("empty handle must be rejected");
        assert!(err.is_check_violation(), "got {err:?}");

        Ok::<(), SqlComposeError>(())
    })?;
    Ok(())
}

#[test]
fn event_ending_before_start_fails_with_check_constraint()
-> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    let dir = tempfile::tempdir()?;
    rt.block_on(async {
        let db = fresh_db(&dir).await?;
        let mut conn = db.get_connection().await?;
        conn.execute_batch(event_schema()).await?;

        let start = chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        let end = start - chrono::Duration::hours(2);

        let err = conn
            .execute_dml(
                "INSERT INTO events (title, start_at, end_at) VALUES (?1, ?2, ?3)",
                &params!["picnic", start, end],
            )
            .await
            .expect_err("end before start must be rejected");
        assert!(err.is_check_violation(), "got {err:?}");

        // Sanity: the well-ordered event inserts fine.
        let ok = conn
            .execute_dml(
                "INSERT INTO events (title, start_at, end_at) VALUES (?1, ?2, ?3)",
                &params!["picnic", start, start + chrono::Duration::hours(2)],
            )
            .await?;
        assert_eq!(ok.rows_affected, 1);

        Ok::<(), SqlComposeError>(())
    })?;
    Ok(())
}

#[test]
fn unique_violation_is_not_a_check_violation() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    let dir = tempfile::tempdir()?;
    rt.block_on(async {
        let db = fresh_db(&dir).await?;
        let mut conn = db.get_connection().await?;
        conn.execute_batch(
            "CREATE TABLE handles (handle TEXT PRIMARY KEY) WITHOUT ROWID;",
        )
        .await?;

        conn.execute_dml(
            "INSERT INTO handles (handle) VALUES (?1)",
            &params!["alice"],
        )
        .await?;
        let err = conn
            .execute_dml(
                "INSERT INTO handles (handle) VALUES (?1)",
                &params!["alice"],
            )
            .await
            .expect_err("duplicate must be rejected");
        assert_eq!(err.constraint_kind(), Some(ConstraintKind::Unique));
        assert!(!err.is_check_violation());

        Ok::<(), SqlComposeError>(())
    })?;
    Ok(())
}

#[test]
fn named_parameters_bind_by_key_order() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    let dir = tempfile::tempdir()?;
    rt.block_on(async {
        let db = fresh_db(&dir).await?;
        let mut conn = db.get_connection().await?;
        conn.execute_batch(event_schema()).await?;

        conn.execute_dml(
            "INSERT INTO events (title, start_at, end_at)
             VALUES (:title, :start_at, :end_at)",
            &named_params! {
                "title" => "standup",
                "start_at" => "2025-06-01 09:00:00",
                "end_at" => "2025-06-01 09:15:00",
            },
        )
        .await?;

        let rows = conn
            .execute_select(
                "SELECT title FROM events WHERE start_at = :start_at AND title = :title",
                &named_params! {
                    "start_at" => "2025-06-01 09:00:00",
                    "title" => "standup",
                },
            )
            .await?;
        assert_eq!(rows.len(), 1);

        Ok::<(), SqlComposeError>(())
    })?;
    Ok(())
}

// A domain value type serializing itself through the capability trait and
// parsing back on read.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
struct ColorCode {
    r: u8,
    g: u8,
    b: u8,
}

impl ColorCode {
    fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        Some(Self {
            r: u8::from_str_radix(&hex[0..2], 16).ok()?,
            g: u8::from_str_radix(&hex[2..4], 16).ok()?,
            b: u8::from_str_radix(&hex[4..6], 16).ok()?,
        })
    }
}

impl ToDbValue for ColorCode {
    fn to_db_value(&self) -> DbValue {
        DbValue::Text(format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b))
    }
}

#[test]
fn convertible_value_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    let dir = tempfile::tempdir()?;
    rt.block_on(async {
        let db = fresh_db(&dir).await?;
        let mut conn = db.get_connection().await?;
        conn.execute_batch("CREATE TABLE profiles (id INTEGER PRIMARY KEY, color TEXT);")
            .await?;

        let color = ColorCode {
            r: 0x1f,
            g: 0xaa,
            b: 0x03,
        };
        conn.execute_dml(
            "INSERT INTO profiles (color) VALUES (?1)",
            &params![color],
        )
        .await?;

        let rows = conn
            .execute_select("SELECT color FROM profiles", &SqlParams::none())
            .await?;
        let stored = rows.rows()[0]
            .get("color")
            .and_then(DbValue::as_text)
            .expect("color stored as text");
        assert_eq!(ColorCode::parse(stored), Some(color));

        Ok::<(), SqlComposeError>(())
    })?;
    Ok(())
}
