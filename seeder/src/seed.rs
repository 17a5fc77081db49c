use colored::*;
use db::StoreError;
use db::repositories::ticket_repository::TicketRepository;
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 80;

pub trait Seeder {
    fn seed(&self, repo: &mut TicketRepository) -> Result<(), StoreError>;
}

/// Runs one seeder, printing a dotted status line. Exits the process on
/// failure.
pub fn run_seeder<S: Seeder + ?Sized>(seeder: &S, name: &str, repo: &mut TicketRepository) {
    let base_msg = format!("Seeding {}", name.bold());
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(base_msg.len()));
    print!("{}{} ", base_msg, dots);
    io::stdout().flush().ok();

    let start = Instant::now();
    if let Err(e) = seeder.seed(repo) {
        println!("{}", "failed".red());
        eprintln!("{e}");
        std::process::exit(1);
    }

    let time_str = format!("({:.2?})", start.elapsed()).dimmed();
    println!("{} {}", "done".green(), time_str);
}
