use db::models::ticket::Ticket;

/// Window within which an identical resubmission counts as a duplicate: 24 hours.
pub const DUPLICATE_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// True if some ticket has exactly this name, email and issue and was created
/// less than [`DUPLICATE_WINDOW_MS`] before `now_ms`.
///
/// A ticket exactly one window old no longer counts. The result is a warning
/// trigger only; callers let the user submit anyway after confirming.
pub fn is_duplicate(name: &str, email: &str, issue: &str, tickets: &[Ticket], now_ms: i64) -> bool {
    tickets.iter().any(|t| {
        t.name == name
            && t.email == email
            && t.issue == issue
            && now_ms - t.id < DUPLICATE_WINDOW_MS
    })
}
