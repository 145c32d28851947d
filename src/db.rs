//! Direct SQL lookups against the MOVEit backing database.
//!
//! When the DMZ database is reachable, folder and file ids can be resolved
//! in one or two queries instead of walking the remote hierarchy. All
//! lookups use bind parameters; values are never spliced into query text.

use std::sync::Once;

use sqlx::any::AnyPoolOptions;
use sqlx::{AnyPool, Row};
use tracing::debug;

use crate::error::{MoveitError, Result};

static DRIVERS: Once = Once::new();

/// SQL lookup helper over the `folders` / `files` tables.
///
/// The store is reached through whatever sqlx `Any` driver the
/// `database_url` selects.
pub struct MoveitDb {
    pool: AnyPool,
}

impl MoveitDb {
    /// Connect and probe the database with a `SELECT 1` round trip, so a
    /// bad connection string fails here and not on the first lookup.
    pub async fn connect(database_url: &str) -> Result<Self> {
        DRIVERS.call_once(sqlx::any::install_default_drivers);
        let pool = AnyPoolOptions::new()
            .max_connections(2)
            .connect(database_url)
            .await?;
        let probe: i64 = sqlx::query_scalar("select 1").fetch_one(&pool).await?;
        if probe != 1 {
            return Err(MoveitError::DataInconsistency(
                "unexpected result from SQL test connection".to_string(),
            ));
        }
        debug!("SQL connection verified");
        Ok(Self { pool })
    }

    /// Folder id for an exact `FolderPath` match. `Ok(None)` when no row
    /// matches.
    pub async fn folder_id(&self, folder_path: &str) -> Result<Option<u64>> {
        let row = sqlx::query("select ID from folders where FolderPath = ?")
            .bind(folder_path)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            debug!(folder_path, "no folder id found");
            return Ok(None);
        };
        let id: Option<i64> = row.try_get("ID")?;
        to_id(id, "folder").map(Some)
    }

    /// File id for (`folder_path`, `file_name`): the folder is resolved
    /// first, then the file is looked up within it. `Ok(None)` when either
    /// is absent.
    pub async fn file_id(&self, folder_path: &str, file_name: &str) -> Result<Option<u64>> {
        let Some(folder_id) = self.folder_id(folder_path).await? else {
            return Ok(None);
        };
        let row =
            sqlx::query("select ID from files where FolderID = ? and OriginalFilename = ?")
                .bind(folder_id as i64)
                .bind(file_name)
                .fetch_optional(&self.pool)
                .await?;
        let Some(row) = row else {
            debug!(folder_path, file_name, "no file id found");
            return Ok(None);
        };
        let id: Option<i64> = row.try_get("ID")?;
        to_id(id, "file").map(Some)
    }
}

/// A row that matched but carries no usable id is a data problem, distinct
/// from absence.
fn to_id(raw: Option<i64>, what: &str) -> Result<u64> {
    match raw {
        Some(id) if id >= 0 => Ok(id as u64),
        Some(id) => Err(MoveitError::DataInconsistency(format!(
            "negative {what} id {id}"
        ))),
        None => Err(MoveitError::DataInconsistency(format!(
            "{what} row with NULL id"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_db() -> (TempDir, MoveitDb) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("moveit.db").display()
        );
        let db = MoveitDb::connect(&url).await.unwrap();
        sqlx::query("create table folders (ID integer primary key, FolderPath text not null)")
            .execute(&db.pool)
            .await
            .unwrap();
        sqlx::query(
            "create table files (ID integer, FolderID integer not null, OriginalFilename text not null)",
        )
        .execute(&db.pool)
        .await
        .unwrap();
        (dir, db)
    }

    async fn insert_folder(db: &MoveitDb, id: i64, path: &str) {
        sqlx::query("insert into folders (ID, FolderPath) values (?, ?)")
            .bind(id)
            .bind(path)
            .execute(&db.pool)
            .await
            .unwrap();
    }

    async fn insert_file(db: &MoveitDb, id: Option<i64>, folder_id: i64, name: &str) {
        sqlx::query("insert into files (ID, FolderID, OriginalFilename) values (?, ?, ?)")
            .bind(id)
            .bind(folder_id)
            .bind(name)
            .execute(&db.pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_folder_lookup() {
        let (_dir, db) = test_db().await;
        insert_folder(&db, 10, "/Home/reports").await;

        assert_eq!(db.folder_id("/Home/reports").await.unwrap(), Some(10));
        assert_eq!(db.folder_id("/Home/other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_lookup_scoped_to_folder() {
        let (_dir, db) = test_db().await;
        insert_folder(&db, 10, "/Home/reports").await;
        insert_folder(&db, 20, "/Home/archive").await;
        insert_file(&db, Some(100), 10, "a.csv").await;
        insert_file(&db, Some(200), 20, "a.csv").await;

        assert_eq!(db.file_id("/Home/reports", "a.csv").await.unwrap(), Some(100));
        assert_eq!(db.file_id("/Home/archive", "a.csv").await.unwrap(), Some(200));
        assert_eq!(db.file_id("/Home/reports", "b.csv").await.unwrap(), None);
        assert_eq!(db.file_id("/Nowhere", "a.csv").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_single_quote_names_bind_cleanly() {
        let (_dir, db) = test_db().await;
        insert_folder(&db, 10, "/Home/reports").await;
        insert_file(&db, Some(100), 10, "it's a report.csv").await;

        // The quote is matched literally, not interpreted.
        assert_eq!(
            db.file_id("/Home/reports", "it's a report.csv")
                .await
                .unwrap(),
            Some(100)
        );
        // A value shaped like an injection stays a plain comparison value.
        assert_eq!(
            db.file_id("/Home/reports", "x' or '1'='1").await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_null_id_is_data_inconsistency_not_absence() {
        let (_dir, db) = test_db().await;
        insert_folder(&db, 10, "/Home/reports").await;
        insert_file(&db, None, 10, "broken.csv").await;

        let err = db.file_id("/Home/reports", "broken.csv").await.unwrap_err();
        assert!(matches!(err, MoveitError::DataInconsistency(_)));
    }
}
