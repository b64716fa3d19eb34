use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::SubmissionRow;

pub async fn create(
    pool: &SqlitePool,
    answers: &str,
    timestamp: DateTime<Utc>,
    team: Option<&str>,
    score: Option<&str>,
    previous_score: Option<i64>,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO submissions (answers, timestamp, team, score, previous_score)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(answers)
    .bind(timestamp)
    .bind(team)
    .bind(score)
    .bind(previous_score)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<SubmissionRow>, sqlx::Error> {
    sqlx::query_as::<_, SubmissionRow>(
        "SELECT id, answers, timestamp, team, score, previous_score
         FROM submissions ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<SubmissionRow>, sqlx::Error> {
    sqlx::query_as::<_, SubmissionRow>(
        "SELECT id, answers, timestamp, team, score, previous_score
         FROM submissions WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Overwrites every mutable column. An unknown id affects zero rows and is not an error.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    answers: &str,
    team: Option<&str>,
    score: Option<&str>,
    previous_score: Option<i64>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE submissions SET answers = ?, team = ?, score = ?, previous_score = ?
         WHERE id = ?",
    )
    .bind(answers)
    .bind(team)
    .bind(score)
    .bind(previous_score)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM submissions")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}
