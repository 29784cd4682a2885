//! PostgreSQL store: table DDL, owner seeding, and programmer queries.

use super::{nickname_taken, ProgrammerStore};
use crate::error::AppError;
use crate::model::{NewProgrammer, Programmer, User};
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const PROGRAMMER_COLUMNS: &str = "id, nickname, avatar_number, tag_line, power_level, user_id";

/// Create the `users` and `programmers` tables if missing and make sure `owner` exists.
pub async fn ensure_schema(pool: &PgPool, owner: &str) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            username TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS programmers (
            id BIGSERIAL PRIMARY KEY,
            nickname TEXT NOT NULL UNIQUE,
            avatar_number INTEGER,
            tag_line TEXT,
            power_level INTEGER NOT NULL DEFAULT 0,
            user_id BIGINT NOT NULL REFERENCES users (id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    let seeded = sqlx::query("INSERT INTO users (username) VALUES ($1) ON CONFLICT (username) DO NOTHING")
        .bind(owner)
        .execute(pool)
        .await?;
    if seeded.rows_affected() > 0 {
        tracing::info!(username = %owner, "seeded owner user");
    }
    Ok(())
}

/// Connect to the `postgres` maintenance database and create the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::Internal(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::Internal("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[derive(Clone)]
pub struct PgProgrammerStore {
    pool: PgPool,
}

impl PgProgrammerStore {
    pub fn new(pool: PgPool) -> Self {
        PgProgrammerStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProgrammerStore for PgProgrammerStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<Programmer>, AppError> {
        let sql = format!("SELECT {} FROM programmers WHERE nickname = $1", PROGRAMMER_COLUMNS);
        tracing::debug!(sql = %sql, nickname = %nickname, "query");
        let row = sqlx::query_as::<_, Programmer>(&sql)
            .bind(nickname)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Programmer>, AppError> {
        let sql = format!("SELECT {} FROM programmers ORDER BY id", PROGRAMMER_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Programmer>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, programmer: NewProgrammer) -> Result<Programmer, AppError> {
        let sql = format!(
            "INSERT INTO programmers (nickname, avatar_number, tag_line, user_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            PROGRAMMER_COLUMNS
        );
        tracing::debug!(sql = %sql, nickname = %programmer.nickname, "query");
        sqlx::query_as::<_, Programmer>(&sql)
            .bind(&programmer.nickname)
            .bind(programmer.avatar_number)
            .bind(&programmer.tag_line)
            .bind(programmer.user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    nickname_taken()
                } else {
                    AppError::Db(e)
                }
            })
    }

    async fn save(&self, programmer: &Programmer) -> Result<Programmer, AppError> {
        let sql = format!(
            "UPDATE programmers SET avatar_number = $1, tag_line = $2 WHERE id = $3 RETURNING {}",
            PROGRAMMER_COLUMNS
        );
        tracing::debug!(sql = %sql, nickname = %programmer.nickname, "query");
        sqlx::query_as::<_, Programmer>(&sql)
            .bind(programmer.avatar_number)
            .bind(&programmer.tag_line)
            .bind(programmer.id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No programmer found with nickname \"{}\"",
                    programmer.nickname
                ))
            })
    }

    async fn delete_by_nickname(&self, nickname: &str) -> Result<bool, AppError> {
        tracing::debug!(nickname = %nickname, "delete programmer");
        let result = sqlx::query("DELETE FROM programmers WHERE nickname = $1")
            .bind(nickname)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
