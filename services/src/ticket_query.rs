//! Read-side queries over the ticket list.
//!
//! Both queries are pure: they borrow the repository's slice, keep its
//! newest-first order, and cache nothing.

use db::filters::TicketFilter;
use db::models::ticket::Ticket;

/// A submitter's own tickets: exact, case-sensitive match on name and email.
pub fn find_by_identity<'a>(name: &str, email: &str, tickets: &'a [Ticket]) -> Vec<&'a Ticket> {
    tickets
        .iter()
        .filter(|t| t.name == name && t.email == email)
        .collect()
}

/// Whether `ticket` passes every criterion set in `filter`.
pub fn matches(ticket: &Ticket, filter: &TicketFilter) -> bool {
    let matches_search = filter.search.as_deref().is_none_or(|search| {
        let needle = search.to_lowercase();
        [&ticket.name, &ticket.email, &ticket.issue]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    });
    let matches_status = filter.status.is_none_or(|s| ticket.status == s);
    let matches_category = filter.category.is_none_or(|c| ticket.category == c);

    matches_search && matches_status && matches_category
}

/// The staff view: every ticket passing `filter`, in repository order.
pub fn filter<'a>(tickets: &'a [Ticket], filter: &TicketFilter) -> Vec<&'a Ticket> {
    tickets.iter().filter(|t| matches(t, filter)).collect()
}
