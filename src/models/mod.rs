pub mod submission;

pub use submission::{Answers, RawSubmission, Submission, SubmissionRow};
