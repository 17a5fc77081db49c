//! Submission field checks.
//!
//! The email check is an approximate syntactic filter
//! (`something@something.something` with no whitespace or extra `@`), not an
//! RFC 5322 validator. It accepts plenty of undeliverable addresses on purpose.

use db::models::ticket::{Category, Priority};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Maximum issue length in characters. A 500-character issue is accepted.
pub const MAX_ISSUE_CHARS: usize = 500;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub fn is_valid_email(s: &str) -> bool {
    EMAIL_REGEX.is_match(s)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill all required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Issue too long! Maximum 500 characters ({0} given)")]
    IssueTooLong(usize),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown priority: {0}")]
    UnknownPriority(String),

    #[error("Please enter both name and email")]
    MissingIdentity,
}

/// Raw form input, as typed.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFields {
    pub name: String,
    pub email: String,
    pub category: String,
    pub priority: String,
    pub issue: String,
}

/// Input that passed [`validate_submission`]: trimmed and parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub name: String,
    pub email: String,
    pub category: Category,
    pub priority: Priority,
    pub issue: String,
}

/// Checks required fields, then email shape, then issue length, reporting the
/// first failure. A blank priority falls back to [`Priority::default`].
pub fn validate_submission(fields: &SubmissionFields) -> Result<ValidSubmission, ValidationError> {
    let name = fields.name.trim();
    let email = fields.email.trim();
    let category = fields.category.trim();
    let priority = fields.priority.trim();
    let issue = fields.issue.trim();

    let missing: Vec<&'static str> = [
        ("name", name),
        ("email", email),
        ("category", category),
        ("issue", issue),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(field, _)| field)
    .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    let issue_len = issue.chars().count();
    if issue_len > MAX_ISSUE_CHARS {
        return Err(ValidationError::IssueTooLong(issue_len));
    }

    let category = category
        .parse::<Category>()
        .map_err(|_| ValidationError::UnknownCategory(category.to_owned()))?;
    let priority = if priority.is_empty() {
        Priority::default()
    } else {
        priority
            .parse::<Priority>()
            .map_err(|_| ValidationError::UnknownPriority(priority.to_owned()))?
    };

    Ok(ValidSubmission {
        name: name.to_owned(),
        email: email.to_owned(),
        category,
        priority,
        issue: issue.to_owned(),
    })
}

/// Checks the self-lookup form: both fields present and a plausible email.
/// Returns the trimmed pair.
pub fn validate_identity(name: &str, email: &str) -> Result<(String, String), ValidationError> {
    let (name, email) = (name.trim(), email.trim());
    if name.is_empty() || email.is_empty() {
        return Err(ValidationError::MissingIdentity);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok((name.to_owned(), email.to_owned()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    Normal,
    Warning,
    Critical,
}

/// Remaining issue characters, for a live counter next to the issue field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IssueBudget {
    /// Negative once the text is over the limit.
    pub remaining: i64,
    pub level: BudgetLevel,
}

pub fn issue_budget(current_chars: usize) -> IssueBudget {
    let remaining = MAX_ISSUE_CHARS as i64 - current_chars as i64;
    let level = match remaining {
        r if r < 50 => BudgetLevel::Critical,
        r if r < 100 => BudgetLevel::Warning,
        _ => BudgetLevel::Normal,
    };
    IssueBudget { remaining, level }
}
