pub mod attachment;
pub mod duplicate;
pub mod service;
pub mod session;
pub mod ticket_query;
pub mod ticket_service;
pub mod validation;
