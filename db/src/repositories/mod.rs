pub mod ticket_repository;
