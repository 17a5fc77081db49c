pub mod reset;
pub mod tickets;
