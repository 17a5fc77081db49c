use crate::seed::Seeder;
use chrono::{Duration, Utc};
use db::StoreError;
use db::models::ticket::{Category, Priority, Ticket};
use db::repositories::ticket_repository::TicketRepository;
use fake::{
    Fake,
    faker::{internet::en::SafeEmail, name::en::Name},
};
use rand::{Rng, seq::SliceRandom};
use strum::IntoEnumIterator;
use util::config;

const TICKET_COUNT: usize = 30;

const ISSUES: [&str; 8] = [
    "Laptop will not power on after the latest update.",
    "Cannot connect to campus wifi from the library.",
    "Forgot my password and the reset email never arrives.",
    "The spreadsheet app crashes when opening large files.",
    "Printer on floor two shows a paper jam that is not there.",
    "VPN disconnects every few minutes.",
    "Account locked after too many login attempts.",
    "Projector in room 104 has no signal from HDMI.",
];

const SOLUTIONS: [&str; 4] = [
    "Restarted the service and confirmed it works.",
    "Reset the account and sent new credentials.",
    "Replaced the faulty cable.",
    "Reinstalled the application with default settings.",
];

/// Demo tickets spread over the last 30 days, oldest added first so the
/// list ends up newest first. About a third are solved, some assigned to
/// the configured staff account.
pub struct TicketSeeder;

impl Seeder for TicketSeeder {
    fn seed(&self, repo: &mut TicketRepository) -> Result<(), StoreError> {
        let mut rng = rand::thread_rng();
        let categories: Vec<Category> = Category::iter().collect();
        let priorities: Vec<Priority> = Priority::iter().collect();
        let (staff, _) = config::staff_credentials();

        let mut ages: Vec<i64> = (0..TICKET_COUNT)
            .map(|_| rng.gen_range(0..30 * 24 * 60))
            .collect();
        ages.sort_unstable_by(|a, b| b.cmp(a));

        let now = Utc::now();
        let mut last_id = repo.newest_id().unwrap_or(i64::MIN);
        for age_minutes in ages {
            let date = now - Duration::minutes(age_minutes);
            let id = date.timestamp_millis().max(last_id.saturating_add(1));
            last_id = id;

            let name: String = Name().fake();
            let email: String = SafeEmail().fake();
            let issue = ISSUES.choose(&mut rng).copied().unwrap_or(ISSUES[0]);

            let mut ticket = Ticket::new(
                id,
                name,
                email,
                categories.choose(&mut rng).copied().unwrap_or(Category::Other),
                priorities.choose(&mut rng).copied().unwrap_or_default(),
                issue.to_string(),
                date,
                None,
            );
            if rng.gen_bool(0.35) {
                ticket.set_solution(SOLUTIONS.choose(&mut rng).copied().unwrap_or(SOLUTIONS[0]));
            }
            if rng.gen_bool(0.25) {
                ticket.assign_to(staff.as_str());
            }
            repo.add(ticket)?;
        }

        Ok(())
    }
}
