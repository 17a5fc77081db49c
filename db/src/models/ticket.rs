//! The ticket record and its enumerated fields.
//!
//! Field names follow the persisted layout: the whole collection is stored as
//! a JSON array of these records, so renaming a field is a storage format
//! change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Creation time in milliseconds since the Unix epoch, doubling as the
    /// identifier.
    pub id: i64,

    pub name: String,
    pub email: String,

    pub category: Category,
    pub priority: Priority,

    pub issue: String,
    #[serde(default)]
    pub solution: String,
    pub status: TicketStatus,

    pub date: DateTime<Utc>,

    #[serde(default)]
    pub assigned_to: String,

    #[serde(default)]
    pub attachment: Option<Attachment>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, EnumString, Serialize, Deserialize,
)]
pub enum TicketStatus {
    Pending,
    Solved,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, EnumString, Serialize, Deserialize,
)]
pub enum Category {
    Hardware,
    Software,
    Network,
    Account,
    Other,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A file inlined into the ticket record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(rename = "size")]
    pub size_bytes: u64,
    /// `data:<mime>;base64,<payload>` URL holding the file bytes.
    #[serde(rename = "data")]
    pub payload: String,
}

impl TicketStatus {
    /// The status a ticket has once `solution` is saved.
    pub fn for_solution(solution: &str) -> Self {
        if solution.trim().is_empty() {
            TicketStatus::Pending
        } else {
            TicketStatus::Solved
        }
    }
}

impl Ticket {
    /// Builds a freshly submitted ticket: no solution, unassigned, `Pending`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
        category: Category,
        priority: Priority,
        issue: impl Into<String>,
        date: DateTime<Utc>,
        attachment: Option<Attachment>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            category,
            priority,
            issue: issue.into(),
            solution: String::new(),
            status: TicketStatus::Pending,
            date,
            assigned_to: String::new(),
            attachment,
        }
    }

    /// Stores `solution` verbatim and recomputes `status` from it.
    pub fn set_solution(&mut self, solution: impl Into<String>) {
        self.solution = solution.into();
        self.status = TicketStatus::for_solution(&self.solution);
    }

    pub fn assign_to(&mut self, staff: impl Into<String>) {
        self.assigned_to = staff.into();
    }

    pub fn is_solved(&self) -> bool {
        self.status == TicketStatus::Solved
    }
}
