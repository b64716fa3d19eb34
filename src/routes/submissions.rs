use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::db;
use crate::error::AppError;
use crate::models::{Answers, RawSubmission, Submission};
use crate::state::SharedState;
use crate::submission::validate::validate_answers;

#[derive(Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub answers: Answers,
    pub team: Option<String>,
    pub score: Option<String>,
    pub previous_score: Option<i64>,
}

#[derive(Deserialize)]
pub struct UpdateRequest {
    pub id: i64,
    #[serde(default)]
    pub answers: Answers,
    pub team: Option<String>,
    pub score: Option<String>,
    pub previous_score: Option<i64>,
}

#[derive(Deserialize)]
pub struct FetchParams {
    pub id: Option<String>,
}

pub async fn submit(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let req: SubmitRequest = parse_body(&body)?;
    validate_answers(&req.answers)?;

    let answers = encode_answers(&req.answers)?;
    let id = db::submissions::create(
        &state.pool,
        &answers,
        Utc::now(),
        req.team.as_deref(),
        req.score.as_deref(),
        req.previous_score,
    )
    .await
    .map_err(team_conflict)?;

    tracing::info!("Stored submission {id}");

    Ok(Json(json!({ "status": "success", "id": id })))
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Submission>>, AppError> {
    let rows = db::submissions::list(&state.pool).await?;

    // One undecodable row fails the whole listing.
    let submissions = rows
        .into_iter()
        .map(Submission::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Internal(format!("Failed to decode stored answers: {e}")))?;

    Ok(Json(submissions))
}

pub async fn get(
    State(state): State<SharedState>,
    params: Result<Query<FetchParams>, QueryRejection>,
) -> Result<Json<RawSubmission>, AppError> {
    // An unparsable query string is just another bad id.
    let id: i64 = params
        .ok()
        .and_then(|Query(params)| params.id)
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| AppError::BadRequest("Invalid submission ID".to_string()))?;

    let row = db::submissions::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

    let submission = RawSubmission::try_from(row)
        .map_err(|e| AppError::Internal(format!("Stored answers for {id} are not JSON: {e}")))?;

    Ok(Json(submission))
}

pub async fn update(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let req: UpdateRequest = parse_body(&body)?;
    validate_answers(&req.answers)?;

    let answers = encode_answers(&req.answers)?;
    let affected = db::submissions::update(
        &state.pool,
        req.id,
        &answers,
        req.team.as_deref(),
        req.score.as_deref(),
        req.previous_score,
    )
    .await
    .map_err(team_conflict)?;

    // No existence check: an unknown id is still a success.
    if affected == 0 {
        tracing::debug!("Update for submission {} matched no rows", req.id);
    }

    Ok(Json(json!({ "status": "success" })))
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Malformed request body: {e}");
        AppError::BadRequest("Invalid request body".to_string())
    })
}

fn encode_answers(answers: &Answers) -> Result<String, AppError> {
    serde_json::to_string(answers)
        .map_err(|e| AppError::Internal(format!("Failed to encode answers: {e}")))
}

fn team_conflict(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("A submission for this team already exists".to_string())
        }
        _ => AppError::Database(err),
    }
}
