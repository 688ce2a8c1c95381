//! SQLite credential repository implementation.
//!
//! Implements `CredentialRepository` from `chatrelay-core` using sqlx with
//! split read/write pools. Session blobs are opaque text -- this repository
//! stores and retrieves them verbatim and never logs their contents.

use chatrelay_core::repository::credential::CredentialRepository;
use chatrelay_types::credential::{CredentialRecord, SessionBlob};
use chatrelay_types::error::RepositoryError;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `CredentialRepository`.
///
/// The `credentials` table is keyed by phone number; `upsert` relies on
/// `ON CONFLICT(phone_number)` so repeated authentications can never create
/// a second row for the same number.
pub struct SqliteCredentialRepository {
    pool: DatabasePool,
}

impl SqliteCredentialRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<CredentialRecord, RepositoryError> {
    let phone_number: String = row
        .try_get("phone_number")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let session: String = row
        .try_get("session")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let created_at_str: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let updated_at_str: String = row
        .try_get("updated_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(CredentialRecord {
        phone_number,
        session: SessionBlob::new(session),
        created_at: Some(parse_datetime(&created_at_str)?),
        updated_at: Some(parse_datetime(&updated_at_str)?),
    })
}

impl CredentialRepository for SqliteCredentialRepository {
    async fn find_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<CredentialRecord>, RepositoryError> {
        let row = sqlx::query(
            "SELECT phone_number, session, created_at, updated_at FROM credentials WHERE phone_number = ?",
        )
        .bind(phone_number)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(record_from_row).transpose()
    }

    async fn upsert(
        &self,
        phone_number: &str,
        session: &SessionBlob,
    ) -> Result<CredentialRecord, RepositoryError> {
        let now = Utc::now().to_rfc3339();

        // created_at survives the conflict update; updated_at is bumped.
        sqlx::query(
            "INSERT INTO credentials (phone_number, session, created_at, updated_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(phone_number) DO UPDATE SET session = excluded.session, updated_at = excluded.updated_at",
        )
        .bind(phone_number)
        .bind(session.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let row = sqlx::query(
            "SELECT phone_number, session, created_at, updated_at FROM credentials WHERE phone_number = ?",
        )
        .bind(phone_number)
        .fetch_one(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        record_from_row(&row)
    }
}
