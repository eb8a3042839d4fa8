use crate::db::Database;
use crate::error::{AppError, Result};
use crate::pages::models::{ContentPage, PageRecord};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Access to the singleton content records.
#[derive(Clone, Debug)]
pub struct PageRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct PageRow<P> {
    content: Json<P>,
    updated_at: DateTime<Utc>,
}

impl PageRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// Return the record for `P`, creating an empty one on first access.
    ///
    /// Creation is `INSERT ... ON CONFLICT DO NOTHING` keyed on the page
    /// kind, so concurrent first loads all end up reading the same row.
    pub async fn load<P: ContentPage>(&self) -> Result<PageRecord<P>> {
        if let Some(record) = self.fetch::<P>().await? {
            return Ok(record);
        }

        let inserted = sqlx::query(
            "INSERT INTO content_pages (kind, content, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(kind) DO NOTHING",
        )
        .bind(P::KIND.slug())
        .bind(Json(P::default()))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if inserted.rows_affected() > 0 {
            info!("Created empty content record for page '{}'", P::KIND);
        }

        self.fetch::<P>().await?.ok_or_else(|| {
            AppError::Corrupt(format!("content record '{}' vanished after insert", P::KIND))
        })
    }

    /// Replace the content of `P`'s record and refresh `updated_at`.
    pub async fn save<P: ContentPage>(&self, content: &P) -> Result<PageRecord<P>> {
        let updated_at = Utc::now();

        sqlx::query(
            "INSERT INTO content_pages (kind, content, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(kind) DO UPDATE SET content = excluded.content, updated_at = excluded.updated_at",
        )
        .bind(P::KIND.slug())
        .bind(Json(content))
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        debug!("Saved content record for page '{}'", P::KIND);

        Ok(PageRecord {
            kind: P::KIND,
            content: content.clone(),
            updated_at,
        })
    }

    async fn fetch<P: ContentPage>(&self) -> Result<Option<PageRecord<P>>> {
        let row: Option<PageRow<P>> =
            sqlx::query_as("SELECT content, updated_at FROM content_pages WHERE kind = ?")
                .bind(P::KIND.slug())
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|row| PageRecord {
            kind: P::KIND,
            content: row.content.0,
            updated_at: row.updated_at,
        }))
    }
}
