//! PostgreSQL implementation of [`Database`].

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use store::models::{NewNote, Note, NotePatch, Theme};
use uuid::Uuid;

use super::{Database, DbError, DbResult};
use crate::models::{NewUser, NoteRow, User};

/// SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Database backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    /// Open a pool and bring the schema up to date.
    pub async fn connect(url: &str, max_connections: u32) -> DbResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Connected to PostgreSQL, migrations applied");
        Ok(Self { pool })
    }
}

fn map_unique(e: sqlx::Error) -> DbError {
    match &e {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => DbError::Conflict,
        _ => DbError::Sqlx(e),
    }
}

#[async_trait]
impl Database for PgDatabase {
    async fn create_user(&self, user: NewUser) -> DbResult<User> {
        sqlx::query_as(
            "INSERT INTO users (id, username, email, password_hash, theme) VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Theme::default().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique)
    }

    async fn user_by_id(&self, id: Uuid) -> DbResult<Option<User>> {
        Ok(sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn user_by_email(&self, email: &str) -> DbResult<Option<User>> {
        Ok(sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn user_exists(&self, username: &str, email: &str) -> DbResult<bool> {
        let existing: Option<(i32,)> =
            sqlx::query_as("SELECT 1 FROM users WHERE username = $1 OR email = $2 LIMIT 1")
                .bind(username)
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(existing.is_some())
    }

    async fn username_taken(&self, username: &str, except: Uuid) -> DbResult<bool> {
        let existing: Option<(i32,)> =
            sqlx::query_as("SELECT 1 FROM users WHERE username = $1 AND id <> $2 LIMIT 1")
                .bind(username)
                .bind(except)
                .fetch_optional(&self.pool)
                .await?;
        Ok(existing.is_some())
    }

    async fn set_theme(&self, id: Uuid, theme: Theme) -> DbResult<Option<User>> {
        Ok(sqlx::query_as("UPDATE users SET theme = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(theme.as_str())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn set_profile_image(&self, id: Uuid, image: Option<String>) -> DbResult<Option<User>> {
        Ok(sqlx::query_as("UPDATE users SET profile_image = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(image)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn set_username(&self, id: Uuid, username: &str) -> DbResult<Option<User>> {
        sqlx::query_as("UPDATE users SET username = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_unique)
    }

    async fn list_notes(&self, owner: Uuid) -> DbResult<Vec<Note>> {
        let rows: Vec<NoteRow> =
            sqlx::query_as("SELECT * FROM notes WHERE owner_id = $1 ORDER BY created_at, id")
                .bind(owner)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(NoteRow::into_note).collect())
    }

    async fn create_note(&self, owner: Uuid, note: NewNote) -> DbResult<Note> {
        let now = Utc::now();
        let row: NoteRow = sqlx::query_as(
            "INSERT INTO notes (id, owner_id, title, content, color, size, position_x, position_y, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(note.title_or_default())
        .bind(note.content.as_deref().unwrap_or_default())
        .bind(note.color.unwrap_or_default().as_str())
        .bind(note.size.unwrap_or_default().as_str())
        .bind(note.position.map(|p| p.x))
        .bind(note.position.map(|p| p.y))
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into_note())
    }

    async fn update_note(&self, owner: Uuid, id: Uuid, patch: NotePatch) -> DbResult<Option<Note>> {
        let row: Option<NoteRow> = sqlx::query_as(
            "UPDATE notes SET
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                color = COALESCE($5, color),
                size = COALESCE($6, size),
                position_x = COALESCE($7, position_x),
                position_y = COALESCE($8, position_y),
                updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
             RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(patch.title)
        .bind(patch.content)
        .bind(patch.color.map(|c| c.as_str()))
        .bind(patch.size.map(|s| s.as_str()))
        .bind(patch.position.map(|p| p.x))
        .bind(patch.position.map(|p| p.y))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(NoteRow::into_note))
    }

    async fn delete_note(&self, owner: Uuid, id: Uuid) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
