//! Owner of the ticket list.
//!
//! The repository keeps the whole collection in memory, newest first, and
//! writes it back to the [`Store`] in full after every mutation. Nothing else
//! holds a copy of the list; readers borrow it through [`TicketRepository::tickets`].

use crate::models::ticket::{Ticket, TicketStatus};
use crate::store::{Store, StoreError};
use serde::Serialize;

/// Store key holding the serialized ticket array.
pub const TICKETS_KEY: &str = "tickets";
/// Store key holding the label of the last role that was logged in.
pub const LAST_ROLE_KEY: &str = "lastRole";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TicketStats {
    pub total: usize,
    pub pending: usize,
    pub solved: usize,
}

pub struct TicketRepository {
    store: Box<dyn Store>,
    tickets: Vec<Ticket>,
    last_role: Option<String>,
}

impl TicketRepository {
    /// Wraps `store` and hydrates the list from it.
    pub fn open(store: impl Store + 'static) -> Self {
        let mut repo = Self {
            store: Box::new(store),
            tickets: Vec::new(),
            last_role: None,
        };
        repo.load();
        repo
    }

    /// Replaces the in-memory list with the stored collection.
    ///
    /// An absent entry, an unreadable store or a payload that does not parse
    /// all yield an empty list; the cause is logged and never returned.
    pub fn load(&mut self) -> &[Ticket] {
        self.tickets = match self.store.get(TICKETS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored tickets are corrupt, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored tickets, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(count = self.tickets.len(), "Tickets loaded");
        &self.tickets
    }

    /// Writes the full list, and the last role label if one is set.
    ///
    /// The role label goes first so that a failed ticket write leaves the
    /// stored list exactly as it was.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.tickets)?;
        if let Some(role) = &self.last_role {
            self.store.set(LAST_ROLE_KEY, role)?;
        }
        self.store.set(TICKETS_KEY, &raw)
    }

    /// Records the active role label and persists it immediately.
    pub fn set_last_role(&mut self, role: &str) -> Result<(), StoreError> {
        self.last_role = Some(role.to_owned());
        self.store.set(LAST_ROLE_KEY, role)
    }

    /// Forgets the role label, in memory and in the store.
    pub fn clear_last_role(&mut self) -> Result<(), StoreError> {
        self.last_role = None;
        self.store.remove(LAST_ROLE_KEY)
    }

    /// The persisted last role label. Informational only.
    pub fn stored_last_role(&self) -> Option<String> {
        self.store.get(LAST_ROLE_KEY).ok().flatten()
    }

    /// Prepends `ticket` and persists. A failed write leaves the list unchanged.
    pub fn add(&mut self, ticket: Ticket) -> Result<(), StoreError> {
        let id = ticket.id;
        self.tickets.insert(0, ticket);
        if let Err(e) = self.save() {
            self.tickets.remove(0);
            return Err(e);
        }
        tracing::info!(ticket_id = id, "Ticket added");
        Ok(())
    }

    /// Removes the ticket with `id`. Returns `false` (and writes nothing) if
    /// there is no such ticket.
    pub fn remove(&mut self, id: i64) -> Result<bool, StoreError> {
        let Some(pos) = self.tickets.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        let removed = self.tickets.remove(pos);
        if let Err(e) = self.save() {
            self.tickets.insert(pos, removed);
            return Err(e);
        }
        tracing::info!(ticket_id = id, "Ticket removed");
        Ok(true)
    }

    /// Applies `mutator` to the ticket with `id` and persists. Returns
    /// `false` (and writes nothing) if there is no such ticket. The ticket is
    /// restored if the write fails.
    pub fn update<F>(&mut self, id: i64, mutator: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&mut Ticket),
    {
        let Some(pos) = self.tickets.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        let before = self.tickets[pos].clone();
        mutator(&mut self.tickets[pos]);
        if let Err(e) = self.save() {
            self.tickets[pos] = before;
            return Err(e);
        }
        Ok(true)
    }

    /// Drops every ticket with a single write.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        let previous = std::mem::take(&mut self.tickets);
        if let Err(e) = self.save() {
            self.tickets = previous;
            return Err(e);
        }
        tracing::info!(count = previous.len(), "Tickets cleared");
        Ok(())
    }

    pub fn find(&self, id: i64) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// All tickets, newest first.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Id of the most recently created ticket.
    pub fn newest_id(&self) -> Option<i64> {
        self.tickets.first().map(|t| t.id)
    }

    pub fn stats(&self) -> TicketStats {
        self.tickets
            .iter()
            .fold(TicketStats::default(), |mut stats, t| {
                stats.total += 1;
                match t.status {
                    TicketStatus::Pending => stats.pending += 1,
                    TicketStatus::Solved => stats.solved += 1,
                }
                stats
            })
    }
}
