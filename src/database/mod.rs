//! Capa de base de datos

pub mod connection;

pub use connection::{run_migrations, DatabaseConnection};
