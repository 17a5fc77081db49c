use crate::models::ticket::{Category, Priority, Ticket};
use crate::repositories::ticket_repository::TicketRepository;
use crate::store::{MemoryStore, Store, StoreError};
use chrono::{TimeZone, Utc};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A repository over an empty in-memory store.
pub fn setup_test_repository() -> TicketRepository {
    TicketRepository::open(MemoryStore::new())
}

/// A `Pending` Software/Low ticket created at `id` milliseconds.
pub fn sample_ticket(id: i64, name: &str, email: &str, issue: &str) -> Ticket {
    let date = Utc
        .timestamp_millis_opt(id)
        .single()
        .unwrap_or_else(Utc::now);
    Ticket::new(
        id,
        name,
        email,
        Category::Software,
        Priority::Low,
        issue,
        date,
        None,
    )
}

/// In-memory store whose writes can be switched to fail, as a full disk would.
///
/// Clones share state, so a test can keep one handle while the repository
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct FailingStore {
    inner: Arc<Mutex<MemoryStore>>,
    failing: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.failing.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(io::Error::other("disk full").into());
        }
        Ok(())
    }

    fn inner(&self) -> std::sync::MutexGuard<'_, MemoryStore> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl Store for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        self.inner().set(key, value)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.inner().remove(key)
    }
}
