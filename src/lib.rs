pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod observability;
pub mod queries;
pub mod routes;
pub mod session;

pub use config::Config;
