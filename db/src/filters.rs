use crate::models::ticket::{Category, TicketStatus};

/// Staff view filter. Every `None` criterion matches all tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    /// Case-insensitive substring matched against name, email and issue.
    pub search: Option<String>,
    pub status: Option<TicketStatus>,
    pub category: Option<Category>,
}

impl TicketFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank search text is treated as no search at all.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.is_empty() { None } else { Some(search) };
        self
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.status.is_none() && self.category.is_none()
    }
}
