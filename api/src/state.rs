//! Shared application state handed to every handler.

use db::StoreError;
use services::service::SystemClock;
use services::session::StaticCredentials;
use services::ticket_service::HelpdeskService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use util::config;

#[derive(Clone)]
pub struct AppState {
    helpdesk: Arc<Mutex<HelpdeskService>>,
    lookup_delay: Duration,
}

impl AppState {
    pub fn new(helpdesk: HelpdeskService, lookup_delay: Duration) -> Self {
        Self {
            helpdesk: Arc::new(Mutex::new(helpdesk)),
            lookup_delay,
        }
    }

    /// Opens the file store under the configured path and wires the
    /// configured demo accounts and the system clock.
    pub fn from_config() -> Result<Self, StoreError> {
        let store = db::connect()?;
        let helpdesk = HelpdeskService::new(store, StaticCredentials::from_config(), SystemClock);
        Ok(Self::new(
            helpdesk,
            Duration::from_millis(config::lookup_delay_ms()),
        ))
    }

    pub fn helpdesk(&self) -> &Arc<Mutex<HelpdeskService>> {
        &self.helpdesk
    }

    /// Pause applied before answering a ticket lookup.
    pub fn lookup_delay(&self) -> Duration {
        self.lookup_delay
    }
}
