#![cfg(feature = "sqlite")]

use sql_compose::prelude::*;
use sql_compose::params;
use tokio::runtime::Runtime;

async fn seeded_db(dir: &tempfile::TempDir) -> Result<Database, SqlComposeError> {
    let path = dir.path().join("checks.db");
    let db = Database::new_sqlite(path.to_string_lossy().into_owned()).await?;
    let mut conn = db.get_connection().await?;
    conn.execute_batch(
        "CREATE TABLE blocks (blocker INTEGER NOT NULL, blocked INTEGER NOT NULL);
         INSERT INTO blocks (blocker, blocked) VALUES (1, 2);",
    )
    .await?;
    Ok(db)
}

#[test]
fn existence_check_resolves_the_boolean() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    let dir = tempfile::tempdir()?;
    rt.block_on(async {
        let db = seeded_db(&dir).await?;
        let mut conn = db.get_connection().await?;

        let blocked = conn
            .exists("SELECT 1 FROM blocks WHERE blocker = ?1 AND blocked = ?2")
            .params(params![1i64, 2i64])
            .get()
            .await?;
        assert!(blocked);

        let blocked = conn
            .exists("SELECT 1 FROM blocks WHERE blocker = ?1 AND blocked = ?2")
            .params(params![2i64, 1i64])
            .get()
            .await?;
        assert!(!blocked);

        Ok::<(), SqlComposeError>(())
    })?;
    Ok(())
}

#[test]
fn even_inversions_cancel_out_against_a_live_query()
-> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    let dir = tempfile::tempdir()?;
    rt.block_on(async {
        let db = seeded_db(&dir).await?;
        let mut conn = db.get_connection().await?;

        let plain = conn
            .exists("SELECT 1 FROM blocks WHERE blocker = ?1")
            .params(params![1i64])
            .get()
            .await?;
        let twice = conn
            .exists("SELECT 1 FROM blocks WHERE blocker = ?1")
            .params(params![1i64])
            .inverted()
            .inverted()
            .get()
            .await?;
        assert_eq!(plain, twice);

        let once = conn
            .exists("SELECT 1 FROM blocks WHERE blocker = ?1")
            .params(params![1i64])
            .inverted()
            .get()
            .await?;
        assert_eq!(once, !plain);

        Ok::<(), SqlComposeError>(())
    })?;
    Ok(())
}

#[test]
fn with_failure_fires_exactly_when_the_final_boolean_is_true()
-> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    let dir = tempfile::tempdir()?;
    rt.block_on(async {
        let db = seeded_db(&dir).await?;
        let mut conn = db.get_connection().await?;

        // Condition holds -> failure.
        let outcome = conn
            .exists("SELECT 1 FROM blocks WHERE blocker = ?1 AND blocked = ?2")
            .params(params![1i64, 2i64])
            .with_failure("user-is-blocked")
            .check()
            .await?;
        assert_eq!(outcome, Outcome::Failure("user-is-blocked"));

        // Condition absent -> success.
        let outcome = conn
            .exists("SELECT 1 FROM blocks WHERE blocker = ?1 AND blocked = ?2")
            .params(params![2i64, 1i64])
            .with_failure("user-is-blocked")
            .check()
            .await?;
        assert_eq!(outcome, Outcome::Success(()));

        // Inverted guard: "the row must exist" style check.
        let outcome = conn
            .exists("SELECT 1 FROM blocks WHERE blocker = ?1")
            .params(params![99i64])
            .inverted()
            .with_failure("block-not-found")
            .check()
            .await?;
        assert_eq!(outcome, Outcome::Failure("block-not-found"));

        // Inversion after with_failure behaves the same as before it.
        let outcome = conn
            .exists("SELECT 1 FROM blocks WHERE blocker = ?1")
            .params(params![99i64])
            .with_failure("block-not-found")
            .inverted()
            .check()
            .await?;
        assert_eq!(outcome, Outcome::Failure("block-not-found"));

        Ok::<(), SqlComposeError>(())
    })?;
    Ok(())
}

#[test]
fn pipeline_is_lazy_until_the_terminal_call() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    let dir = tempfile::tempdir()?;
    rt.block_on(async {
        let db = seeded_db(&dir).await?;
        let mut conn = db.get_connection().await?;

        // Building a pipeline against a table that does not exist is fine;
        // only the terminal call touches the database.
        {
            let _pipeline = conn
                .exists("SELECT 1 FROM no_such_table")
                .params(params![1i64])
                .inverted()
                .with_failure("never-resolved");
        }

        let err = conn
            .exists("SELECT 1 FROM no_such_table")
            .get()
            .await
            .expect_err("running the pipeline must surface the missing table");
        assert!(!err.is_constraint_violation());

        Ok::<(), SqlComposeError>(())
    })?;
    Ok(())
}
