mod auth_test;
mod health_test;
mod tickets_test;
