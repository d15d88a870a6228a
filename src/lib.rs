pub mod domain;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Role required to manage the tag and ingredient catalog.
pub const SERVICE_ACCESS_ROLE: &str = "admin";
