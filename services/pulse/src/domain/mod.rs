pub mod repository;
pub mod schema;
pub mod types;
