//! The helpdesk as one owned value.
//!
//! [`HelpdeskService`] ties the repository, the session gate and the clock
//! together and enforces who may do what. Every method runs to completion
//! synchronously; callers that share it across tasks wrap it in a mutex.

use crate::attachment::{self, EmbedOutcome, Upload};
use crate::duplicate::is_duplicate;
use crate::service::{AppError, Clock};
use crate::session::{CredentialCheck, LoginError, Role, SessionGate, SessionState};
use crate::ticket_query;
use crate::validation::{self, SubmissionFields};
use chrono::{DateTime, Utc};
use db::filters::TicketFilter;
use db::models::ticket::{Attachment, Ticket};
use db::repositories::ticket_repository::{TicketRepository, TicketStats};
use db::store::Store;
use serde::Serialize;

impl From<LoginError> for AppError {
    fn from(e: LoginError) -> Self {
        match e {
            LoginError::InvalidCredentials => AppError::InvalidCredentials,
            LoginError::AlreadyAuthenticated => AppError::AlreadyAuthenticated,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateTicket {
    pub fields: SubmissionFields,
    pub upload: Option<Upload>,
    /// The submitter has seen the duplicate warning and wants to go ahead.
    pub confirm_duplicate: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    pub ticket: Ticket,
    /// False when a file was supplied but was too large to keep.
    pub attachment_stored: bool,
    pub warning: Option<String>,
}

/// A downloadable snapshot of every ticket.
#[derive(Debug, Clone)]
pub struct Export {
    pub file_name: String,
    pub contents: String,
}

pub struct HelpdeskService {
    repo: TicketRepository,
    session: SessionGate,
    clock: Box<dyn Clock>,
}

impl HelpdeskService {
    /// Loads tickets from `store`. The session always starts anonymous.
    pub fn new(
        store: impl Store + 'static,
        credentials: impl CredentialCheck + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        let repo = TicketRepository::open(store);
        if let Some(role) = repo.stored_last_role() {
            tracing::debug!(last_role = %role, "Previous session role found, not restoring it");
        }
        Self {
            repo,
            session: SessionGate::new(credentials),
            clock: Box::new(clock),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn require(&self, role: Role) -> Result<&str, AppError> {
        let state = self.session.state();
        match state.role() {
            None => Err(AppError::Unauthenticated),
            Some(current) if current != role => Err(AppError::Forbidden(role)),
            Some(_) => Ok(state.username().unwrap_or_default()),
        }
    }

    // --- Session ---

    pub fn session(&self) -> &SessionState {
        self.session.state()
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<Role, AppError> {
        let role = self.session.login(username, password).inspect_err(|e| {
            tracing::warn!(error = %e, "Login rejected");
        })?;
        if let Err(e) = self.repo.set_last_role(role.label()) {
            tracing::warn!(error = %e, "Could not persist last role");
        }
        tracing::info!(role = %role, "Logged in");
        Ok(role)
    }

    pub fn logout(&mut self) {
        if let Some(role) = self.session.logout() {
            tracing::info!(role = %role, "Logged out");
        }
        if let Err(e) = self.repo.clear_last_role() {
            tracing::warn!(error = %e, "Could not clear last role");
        }
    }

    // --- Student ---

    /// Files a new ticket for the logged-in student.
    ///
    /// Checks run in order: fields, attachment selection, duplicate window.
    /// An unconfirmed duplicate fails with [`AppError::DuplicateTicket`] and
    /// changes nothing.
    pub fn submit(&mut self, req: CreateTicket) -> Result<SubmitOutcome, AppError> {
        self.require(Role::Student)?;

        let valid = validation::validate_submission(&req.fields)?;
        if let Some(upload) = &req.upload {
            attachment::validate_selection(&upload.file_name, upload.size())?;
        }

        let now = self.now();
        let now_ms = now.timestamp_millis();
        if !req.confirm_duplicate
            && is_duplicate(
                &valid.name,
                &valid.email,
                &valid.issue,
                self.repo.tickets(),
                now_ms,
            )
        {
            tracing::info!(email = %valid.email, "Possible duplicate submission held back");
            return Err(AppError::DuplicateTicket);
        }

        let (embedded, attachment_stored, warning) = match req.upload.as_ref().map(attachment::embed) {
            None => (None, false, None),
            Some(EmbedOutcome::Embedded(att)) => (Some(att), true, None),
            Some(EmbedOutcome::TooLargeToEmbed { size }) => {
                tracing::warn!(size, "Attachment too large to embed, saving ticket without it");
                let warning = format!(
                    "File too large for embedded storage ({}); the ticket was saved without it.",
                    attachment::format_file_size(size)
                );
                (None, false, Some(warning))
            }
        };

        // Ids are creation timestamps, bumped past the newest id so they
        // stay unique and increasing.
        let id = self
            .repo
            .newest_id()
            .map_or(now_ms, |newest| now_ms.max(newest + 1));

        let ticket = Ticket::new(
            id,
            valid.name,
            valid.email,
            valid.category,
            valid.priority,
            valid.issue,
            now,
            embedded,
        );
        self.repo.add(ticket.clone())?;

        Ok(SubmitOutcome {
            ticket,
            attachment_stored,
            warning,
        })
    }

    /// A submitter's own tickets, newest first. Open to everyone.
    pub fn lookup(&self, name: &str, email: &str) -> Result<Vec<Ticket>, AppError> {
        let (name, email) = validation::validate_identity(name, email)?;
        Ok(ticket_query::find_by_identity(&name, &email, self.repo.tickets())
            .into_iter()
            .cloned()
            .collect())
    }

    /// The embedded file of ticket `id`, decoded. Open to everyone.
    pub fn attachment(&self, id: i64) -> Result<(Attachment, Vec<u8>), AppError> {
        let att = self
            .repo
            .find(id)
            .and_then(|t| t.attachment.clone())
            .ok_or(AppError::AttachmentNotFound)?;
        let bytes = attachment::decode(&att)?;
        Ok((att, bytes))
    }

    // --- Staff ---

    pub fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, AppError> {
        self.require(Role::Staff)?;
        Ok(ticket_query::filter(self.repo.tickets(), filter)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn stats(&self) -> Result<TicketStats, AppError> {
        self.require(Role::Staff)?;
        Ok(self.repo.stats())
    }

    /// Stores `solution` and recomputes the status: `Solved` if it has any
    /// non-whitespace text, `Pending` otherwise.
    pub fn save_solution(&mut self, id: i64, solution: &str) -> Result<Ticket, AppError> {
        self.require(Role::Staff)?;
        if !self.repo.update(id, |t| t.set_solution(solution))? {
            return Err(AppError::TicketNotFound(id));
        }
        tracing::info!(ticket_id = id, "Solution saved");
        self.repo
            .find(id)
            .cloned()
            .ok_or(AppError::TicketNotFound(id))
    }

    /// Assigns ticket `id` to the logged-in staff member.
    pub fn assign_to_me(&mut self, id: i64) -> Result<Ticket, AppError> {
        let staff = self.require(Role::Staff)?.to_owned();
        if !self.repo.update(id, |t| t.assign_to(staff.as_str()))? {
            return Err(AppError::TicketNotFound(id));
        }
        tracing::info!(ticket_id = id, assigned_to = %staff, "Ticket assigned");
        self.repo
            .find(id)
            .cloned()
            .ok_or(AppError::TicketNotFound(id))
    }

    pub fn delete(&mut self, id: i64) -> Result<(), AppError> {
        self.require(Role::Staff)?;
        if !self.repo.remove(id)? {
            return Err(AppError::TicketNotFound(id));
        }
        Ok(())
    }

    /// Pretty-printed JSON of every ticket, named after today's date.
    pub fn export(&self) -> Result<Export, AppError> {
        self.require(Role::Staff)?;
        let contents = serde_json::to_string_pretty(self.repo.tickets())
            .map_err(|e| AppError::Store(e.into()))?;
        let file_name = format!("helpdesk_tickets_{}.json", self.now().format("%Y-%m-%d"));
        tracing::info!(count = self.repo.tickets().len(), %file_name, "Tickets exported");
        Ok(Export {
            file_name,
            contents,
        })
    }
}
