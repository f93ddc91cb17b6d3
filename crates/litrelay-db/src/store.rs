//! Schema bootstrap, transactional upsert, and the read path for
//! validated SELECT statements.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use sqlx::{Column, Connection, Row, SqliteConnection, TypeInfo, ValueRef};
use tracing::{debug, instrument};

use litrelay_pubmed::ArticleRecord;

use crate::Result;

const CREATE_ARTICLES: &str = r#"
CREATE TABLE IF NOT EXISTS articles (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    pmid        TEXT NOT NULL UNIQUE,
    title       TEXT,
    authors     TEXT NOT NULL DEFAULT '[]',
    journal     TEXT,
    pubdate     TEXT,
    doi         TEXT,
    abstract    TEXT,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
)
"#;

const UPSERT_ARTICLE: &str = r#"
INSERT INTO articles (pmid, title, authors, journal, pubdate, doi, abstract)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
ON CONFLICT(pmid) DO UPDATE SET
    title      = excluded.title,
    authors    = excluded.authors,
    journal    = excluded.journal,
    pubdate    = excluded.pubdate,
    doi        = excluded.doi,
    abstract   = excluded.abstract,
    updated_at = datetime('now')
"#;

async fn connect(database_url: &str) -> Result<SqliteConnection> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    Ok(SqliteConnection::connect_with(&options).await?)
}

/// Ensure the articles table exists, then upsert every record by PMID
/// inside one transaction. Every descriptive field is overwritten with the
/// incoming value, absent ones included; cross-source merging happens in
/// the normalizer, not here. Returns the number of records processed.
#[instrument(skip(records), fields(n = records.len()))]
pub async fn save_records(database_url: &str, records: &[ArticleRecord]) -> Result<usize> {
    let mut conn = connect(database_url).await?;
    sqlx::query(CREATE_ARTICLES).execute(&mut conn).await?;

    let mut tx = conn.begin().await?;
    let mut count = 0usize;
    for record in records {
        let authors = serde_json::to_string(&record.authors)?;
        sqlx::query(UPSERT_ARTICLE)
            .bind(&record.pmid)
            .bind(&record.title)
            .bind(authors)
            .bind(&record.journal)
            .bind(&record.pubdate)
            .bind(&record.doi)
            .bind(&record.abstract_text)
            .execute(&mut *tx)
            .await?;
        count += 1;
    }
    tx.commit().await?;

    debug!(count, "records upserted");
    Ok(count)
}

/// Execute an already-validated SELECT on a fresh connection and return
/// each row as an ordered column→value mapping.
#[instrument(skip(sql))]
pub async fn run_select(
    database_url: &str,
    sql: &str,
) -> Result<Vec<serde_json::Map<String, serde_json::Value>>> {
    let mut conn = connect(database_url).await?;
    sqlx::query(CREATE_ARTICLES).execute(&mut conn).await?;

    let rows = sqlx::query(sql).fetch_all(&mut conn).await?;
    rows.iter().map(row_to_map).collect()
}

fn row_to_map(row: &SqliteRow) -> Result<serde_json::Map<String, serde_json::Value>> {
    let mut map = serde_json::Map::new();
    for (i, column) in row.columns().iter().enumerate() {
        map.insert(column.name().to_string(), column_value(row, i)?);
    }
    Ok(map)
}

fn column_value(row: &SqliteRow, index: usize) -> Result<serde_json::Value> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(serde_json::Value::Null);
    }
    let value = match raw.type_info().name() {
        "INTEGER" => serde_json::Value::from(row.try_get::<i64, _>(index)?),
        "REAL" => serde_json::Value::from(row.try_get::<f64, _>(index)?),
        "BLOB" => {
            let bytes = row.try_get::<Vec<u8>, _>(index)?;
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        }
        _ => serde_json::Value::String(row.try_get::<String, _>(index)?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pmid: &str, title: Option<&str>) -> ArticleRecord {
        ArticleRecord {
            title: title.map(String::from),
            ..ArticleRecord::bare(pmid)
        }
    }

    fn temp_db() -> tempfile::NamedTempFile {
        tempfile::NamedTempFile::new().unwrap()
    }

    #[tokio::test]
    async fn insert_then_select() {
        let db = temp_db();
        let url = db.path().to_str().unwrap();

        let mut rec = record("100", Some("A title"));
        rec.authors = vec!["Smith J".to_string()];
        rec.doi = Some("10.1/abc".to_string());

        let saved = save_records(url, &[rec]).await.unwrap();
        assert_eq!(saved, 1);

        let rows = run_select(url, "SELECT pmid, title, authors FROM articles")
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["pmid"], serde_json::json!("100"));
        assert_eq!(rows[0]["title"], serde_json::json!("A title"));
        assert_eq!(rows[0]["authors"], serde_json::json!("[\"Smith J\"]"));
    }

    #[tokio::test]
    async fn upsert_is_last_write_wins() {
        let db = temp_db();
        let url = db.path().to_str().unwrap();

        save_records(url, &[record("1", Some("A"))]).await.unwrap();
        save_records(url, &[record("1", None)]).await.unwrap();

        let rows = run_select(url, "SELECT pmid, title FROM articles").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["title"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn column_order_follows_the_statement() {
        let db = temp_db();
        let url = db.path().to_str().unwrap();
        save_records(url, &[record("9", Some("t"))]).await.unwrap();

        let rows = run_select(url, "SELECT title, pmid FROM articles").await.unwrap();
        let keys: Vec<_> = rows[0].keys().cloned().collect();
        assert_eq!(keys, vec!["title", "pmid"]);
    }

    #[tokio::test]
    async fn batch_saves_commit_together() {
        let db = temp_db();
        let url = db.path().to_str().unwrap();

        let saved = save_records(
            url,
            &[record("1", Some("a")), record("2", Some("b")), record("1", Some("c"))],
        )
        .await
        .unwrap();
        assert_eq!(saved, 3);

        let rows = run_select(url, "SELECT pmid, title FROM articles ORDER BY pmid")
            .await
            .unwrap();
        // Same-batch duplicate collapses onto one row, last write winning.
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["title"], serde_json::json!("c"));
    }

    #[tokio::test]
    async fn bad_sql_surfaces_an_error() {
        let db = temp_db();
        let url = db.path().to_str().unwrap();

        let err = run_select(url, "SELECT nope FROM articles").await;
        assert!(err.is_err());
    }
}
