use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{fs, path::Path, str::FromStr};

use shared::domain::UserId;

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub phone_alt: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub phone_alt: Option<String>,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub phone: Option<String>,
    pub phone_alt: Option<String>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        let storage = Self { pool };
        storage.ensure_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name    TEXT NOT NULL,
                last_name     TEXT NOT NULL,
                email         TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                phone         TEXT NOT NULL,
                phone_alt     TEXT,
                created_at    TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn create_user(&self, new_user: NewUser) -> Result<UserRecord> {
        let created_at = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO users (first_name, last_name, email, password_hash, phone, phone_alt, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.phone)
        .bind(&new_user.phone_alt)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .context("failed to insert user")?;

        Ok(UserRecord {
            id: UserId(result.last_insert_rowid()),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            phone: new_user.phone,
            phone_alt: new_user.phone_alt,
            created_at,
        })
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(user_from_row))
    }

    pub async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(user_from_row))
    }

    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(user_from_row).collect())
    }

    /// Returns the number of rows touched (0 when the user does not exist).
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                first_name    = COALESCE(?1, first_name),
                last_name     = COALESCE(?2, last_name),
                email         = COALESCE(?3, email),
                password_hash = COALESCE(?4, password_hash),
                phone         = COALESCE(?5, phone),
                phone_alt     = COALESCE(?6, phone_alt)
            WHERE id = ?7
            "#,
        )
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.email)
        .bind(&update.password_hash)
        .bind(&update.phone)
        .bind(&update.phone_alt)
        .bind(id.0)
        .execute(&self.pool)
        .await
        .context("failed to update user")?;
        Ok(result.rows_affected())
    }

    pub async fn delete_user(&self, id: UserId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn user_from_row(row: sqlx::sqlite::SqliteRow) -> UserRecord {
    UserRecord {
        id: UserId(row.get::<i64, _>("id")),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        phone: row.get("phone"),
        phone_alt: row.get("phone_alt"),
        created_at: row.get("created_at"),
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return Ok(());
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();
    if path.is_empty() {
        return Ok(());
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!(
                    "failed to create parent directory '{}' for database url '{database_url}'",
                    parent.display()
                )
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
