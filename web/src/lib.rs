pub mod config;
pub mod routes;
pub mod views;

pub use config::ServerConfig;
pub use routes::router;
