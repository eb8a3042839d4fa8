use crate::contacts::models::{ContactMessage, ContactSubmission, MessageListFilter};
use crate::db::Database;
use crate::error::{AppError, Result};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{info, warn};
use validator::Validate;

/// The contact inbox.
#[derive(Clone, Debug)]
pub struct ContactRepository {
    pool: SqlitePool,
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Message {} not found", id))
}

impl ContactRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// Validate and store a public submission as unread.
    ///
    /// Nothing is written when validation fails.
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<ContactMessage> {
        if let Err(errors) = submission.validate() {
            warn!("Rejected contact submission: {}", errors);
            return Err(errors.into());
        }

        let message: ContactMessage = sqlx::query_as(
            r#"
            INSERT INTO contact_messages (
                first_name, last_name, email, phone, message,
                privacy_accepted, updates_accepted, source, property_ref,
                is_read, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?)
            RETURNING *
            "#,
        )
        .bind(submission.first_name.trim())
        .bind(submission.last_name.trim())
        .bind(submission.email.trim())
        .bind(submission.phone.trim())
        .bind(&submission.message)
        .bind(submission.privacy_accepted)
        .bind(submission.updates_accepted)
        .bind(submission.source)
        .bind(submission.property_ref.trim())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        info!(
            "New contact message {} from {:?} form",
            message.id, message.source
        );
        Ok(message)
    }

    /// Fetch a message. Does not change its read state.
    pub async fn get(&self, id: i64) -> Result<ContactMessage> {
        sqlx::query_as("SELECT * FROM contact_messages WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Newest first, optionally filtered.
    pub async fn list(&self, filter: &MessageListFilter) -> Result<Vec<ContactMessage>> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM contact_messages WHERE 1 = 1");

        if let Some(is_read) = filter.is_read {
            builder.push(" AND is_read = ").push_bind(is_read);
        }
        if let Some(source) = filter.source {
            builder.push(" AND source = ").push_bind(source);
        }
        builder.push(" ORDER BY created_at DESC, id DESC");

        let messages = builder.build_query_as().fetch_all(&self.pool).await?;
        Ok(messages)
    }

    /// Record that an admin opened the message.
    ///
    /// Idempotent. Returns `true` only on the call that flipped it to read.
    pub async fn mark_read_on_view(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE contact_messages SET is_read = 1 WHERE id = ? AND is_read = 0")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Message {} marked as read", id);
            return Ok(true);
        }

        // Either already read or missing
        self.get(id).await?;
        Ok(false)
    }

    /// Set the read flag explicitly, e.g. to mark a message unread again.
    pub async fn set_read(&self, id: i64, is_read: bool) -> Result<ContactMessage> {
        sqlx::query_as("UPDATE contact_messages SET is_read = ? WHERE id = ? RETURNING *")
            .bind(is_read)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn unread_count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages WHERE is_read = 0")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
