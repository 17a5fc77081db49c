//! Error type shared by every helpdesk operation, plus the clock seam.

use crate::attachment::AttachmentError;
use crate::session::Role;
use crate::validation::ValidationError;
use chrono::{DateTime, Utc};
use db::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("You submitted a similar ticket recently. Confirm to submit another.")]
    DuplicateTicket,

    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    /// Deliberately the same for unknown users and wrong passwords.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Already logged in, log out first")]
    AlreadyAuthenticated,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("{0} access required")]
    Forbidden(Role),

    #[error("Ticket {0} not found")]
    TicketNotFound(i64),

    #[error("Attachment not found")]
    AttachmentNotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Source of "now". Ticket ids and the duplicate window are both derived from it.
pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: std::sync::Arc<std::sync::Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Arc::new(std::sync::Mutex::new(start)),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.lock().map(|now| *now).unwrap_or_else(|p| *p.into_inner())
    }
}
