use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Question identifier -> selected option. Ordered so the stored text is stable.
pub type Answers = BTreeMap<String, i64>;

/// A row exactly as stored; `answers` is still the encoded JSON text.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubmissionRow {
    pub id: i64,
    pub answers: String,
    pub timestamp: DateTime<Utc>,
    pub team: Option<String>,
    pub score: Option<String>,
    pub previous_score: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub answers: Answers,
    pub timestamp: DateTime<Utc>,
    pub team: Option<String>,
    pub score: Option<String>,
    pub previous_score: Option<i64>,
}

impl TryFrom<SubmissionRow> for Submission {
    type Error = serde_json::Error;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        Ok(Submission {
            id: row.id,
            answers: serde_json::from_str(&row.answers)?,
            timestamp: row.timestamp,
            team: row.team,
            score: row.score,
            previous_score: row.previous_score,
        })
    }
}

/// Single-row response that embeds the stored answers verbatim.
#[derive(Debug, Serialize)]
pub struct RawSubmission {
    pub id: i64,
    pub answers: Box<RawValue>,
    pub timestamp: DateTime<Utc>,
    pub team: Option<String>,
    pub score: Option<String>,
    pub previous_score: Option<i64>,
}

impl TryFrom<SubmissionRow> for RawSubmission {
    type Error = serde_json::Error;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        Ok(RawSubmission {
            id: row.id,
            answers: RawValue::from_string(row.answers)?,
            timestamp: row.timestamp,
            team: row.team,
            score: row.score,
            previous_score: row.previous_score,
        })
    }
}
