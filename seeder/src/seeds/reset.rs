use crate::seed::Seeder;
use db::StoreError;
use db::repositories::ticket_repository::TicketRepository;

/// Empties the store so seeded ids and dates stay in order.
pub struct ResetSeeder;

impl Seeder for ResetSeeder {
    fn seed(&self, repo: &mut TicketRepository) -> Result<(), StoreError> {
        repo.clear_last_role()?;
        repo.clear()
    }
}
