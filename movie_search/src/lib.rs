pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;

pub use client::{MovieApi, SearchClient};
pub use config::ClientConfig;
pub use controller::{AskPhase, Outcome, PageController, PageState};
pub use error::{ClientError, Result};
pub use models::*;
