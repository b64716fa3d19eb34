use std::ops::RangeInclusive;

use crate::error::AppError;
use crate::models::Answers;

/// Options are indexed 0..=10; index 0 is the "N/A" choice.
pub const ANSWER_RANGE: RangeInclusive<i64> = 0..=10;

/// Reject an empty answer set, then any value outside [`ANSWER_RANGE`].
pub fn validate_answers(answers: &Answers) -> Result<(), AppError> {
    if answers.is_empty() {
        return Err(AppError::BadRequest("No answers provided".to_string()));
    }

    if let Some((key, value)) = answers.iter().find(|(_, v)| !ANSWER_RANGE.contains(*v)) {
        tracing::debug!("Rejected answer {key}={value}");
        return Err(AppError::BadRequest("Invalid answers".to_string()));
    }

    Ok(())
}
