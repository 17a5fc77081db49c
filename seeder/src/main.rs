use crate::seed::{Seeder, run_seeder};
use crate::seeds::{reset::ResetSeeder, tickets::TicketSeeder};
use db::repositories::ticket_repository::TicketRepository;

mod seed;
mod seeds;

fn main() {
    let store = match db::connect() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open ticket store: {e}");
            std::process::exit(1);
        }
    };
    println!("Seeding store at {}", store.root().display());
    let mut repo = TicketRepository::open(store);

    for (seeder, name) in [
        (Box::new(ResetSeeder) as Box<dyn Seeder>, "Reset"),
        (Box::new(TicketSeeder), "Tickets"),
    ] {
        run_seeder(&*seeder, name, &mut repo);
    }
}
